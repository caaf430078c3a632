use std::sync::Arc;

use crate::{
    db::{CacheKey, PosterCache},
    models::{CachedPoster, PosterLookup},
    services::posters::PosterProvider,
};

/// Poster shown when no real poster can be resolved
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/300x450?text=No+Poster";

/// Resolves titles to poster URLs, caching provider answers
///
/// Never fails: unknown titles and provider failures both resolve to the
/// placeholder. Provider answers (found or unknown) are cached; failures are
/// not, so a later request retries the provider.
#[derive(Clone)]
pub struct PosterService {
    provider: Arc<dyn PosterProvider>,
    cache: Arc<dyn PosterCache>,
    placeholder_url: Arc<str>,
}

impl PosterService {
    pub fn new(provider: Arc<dyn PosterProvider>, cache: Arc<dyn PosterCache>) -> Self {
        Self::with_placeholder(provider, cache, PLACEHOLDER_POSTER_URL)
    }

    /// Uses a custom placeholder; an empty one falls back to [`PLACEHOLDER_POSTER_URL`]
    pub fn with_placeholder(
        provider: Arc<dyn PosterProvider>,
        cache: Arc<dyn PosterCache>,
        placeholder_url: &str,
    ) -> Self {
        let placeholder_url = if placeholder_url.trim().is_empty() {
            PLACEHOLDER_POSTER_URL
        } else {
            placeholder_url
        };

        Self {
            provider,
            cache,
            placeholder_url: Arc::from(placeholder_url),
        }
    }

    pub fn placeholder_url(&self) -> &str {
        &self.placeholder_url
    }

    /// Poster URL for one title
    pub async fn poster_for(&self, title: &str) -> String {
        let key = CacheKey::Poster(title.to_string());

        match self.cache.get(&key).await {
            Ok(Some(cached)) => {
                tracing::debug!(title = %title, cache = self.cache.name(), "Poster cache hit");
                return self.resolve(cached.lookup);
            }
            Ok(None) => {
                tracing::debug!(title = %title, cache = self.cache.name(), "Poster cache miss");
            }
            Err(e) => {
                tracing::warn!(
                    title = %title,
                    cache = self.cache.name(),
                    error = %e,
                    "Poster cache read failed, treating as miss"
                );
            }
        }

        match self.provider.fetch_poster(title).await {
            Ok(lookup) => {
                self.cache.set(&key, &CachedPoster::new(lookup.clone())).await;
                self.resolve(lookup)
            }
            Err(e) => {
                tracing::warn!(
                    title = %title,
                    provider = self.provider.name(),
                    error = %e,
                    "Poster lookup failed, using placeholder"
                );
                self.placeholder_url.to_string()
            }
        }
    }

    /// Poster URLs for several titles, fetched concurrently, in input order
    pub async fn posters_for(&self, titles: &[String]) -> Vec<String> {
        let tasks: Vec<_> = titles
            .iter()
            .map(|title| {
                let service = self.clone();
                let title = title.clone();
                tokio::spawn(async move { service.poster_for(&title).await })
            })
            .collect();

        let mut posters = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(poster) => posters.push(poster),
                Err(e) => {
                    tracing::error!(error = %e, "Poster task join error");
                    posters.push(self.placeholder_url.to_string());
                }
            }
        }

        posters
    }

    fn resolve(&self, lookup: PosterLookup) -> String {
        match lookup {
            PosterLookup::Found(url) => url,
            PosterLookup::Unknown => self.placeholder_url.to_string(),
        }
    }
}
