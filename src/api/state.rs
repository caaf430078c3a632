use crate::services::{PosterService, Recommender};

/// Shared application state
///
/// Everything in here is either immutable after startup (the recommender and
/// its dataset) or internally synchronized (the poster cache), so handlers
/// share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    pub posters: PosterService,
}

impl AppState {
    pub fn new(recommender: Recommender, posters: PosterService) -> Self {
        Self {
            recommender,
            posters,
        }
    }
}
