use std::{collections::HashMap, fmt::Display};

use tokio::sync::RwLock;

use crate::{error::AppResult, models::CachedPoster};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Poster lookup keyed by the exact catalog title
    Poster(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Poster(title) => write!(f, "poster:{}", title),
        }
    }
}

/// Storage for poster lookup results
///
/// Reads may fail (the caller treats a failure as a miss); writes never
/// report failure to the caller.
#[async_trait::async_trait]
pub trait PosterCache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> AppResult<Option<CachedPoster>>;

    async fn set(&self, key: &CacheKey, value: &CachedPoster);

    /// Cache backend name for logging
    fn name(&self) -> &'static str;
}

/// Process-local poster cache with no eviction and no TTL
///
/// Unbounded on purpose: keys are catalog titles, so the catalog size caps
/// the number of entries.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CachedPoster>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl PosterCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> AppResult<Option<CachedPoster>> {
        Ok(self.entries.read().await.get(&key.to_string()).cloned())
    }

    async fn set(&self, key: &CacheKey, value: &CachedPoster) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone());
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
