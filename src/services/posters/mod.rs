//! Poster metadata provider abstraction
//!
//! A provider answers one question: which poster image belongs to a title.
//! Failures are reported as errors here and turned into the placeholder by
//! [`crate::services::PosterService`].

use crate::{error::AppResult, models::PosterLookup};

pub mod omdb;

pub use omdb::OmdbProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Look up the poster for an exact title
    ///
    /// `Ok(PosterLookup::Unknown)` means the provider answered but has no
    /// poster; `Err` means the provider could not be asked.
    async fn fetch_poster(&self, title: &str) -> AppResult<PosterLookup>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
