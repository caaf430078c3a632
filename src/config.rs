use std::time::Duration;

use serde::Deserialize;

use crate::{
    dataset::{DatasetPaths, DuplicateTitlePolicy},
    services::{SelfExclusion, PLACEHOLDER_POSTER_URL},
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// JSON catalog of movies, one object per movie with a `title` field
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// JSON similarity matrix aligned to the catalog
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// OMDb API key
    pub omdb_api_key: String,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Per-request timeout for poster lookups, in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Poster returned when no real poster is available
    #[serde(default = "default_poster_placeholder_url")]
    pub poster_placeholder_url: String,

    /// Redis connection URL; posters are cached in memory when unset
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Expiry of Redis poster cache entries, in seconds
    #[serde(default = "default_poster_cache_ttl_secs")]
    pub poster_cache_ttl_secs: u64,

    /// `position` or `rank_zero`
    #[serde(default)]
    pub self_exclusion: SelfExclusion,

    /// Refuse to start when the catalog repeats a title
    #[serde(default)]
    pub reject_duplicate_titles: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_movies_path() -> String {
    "movies.json".to_string()
}

fn default_similarity_path() -> String {
    "similarity.json".to_string()
}

fn default_omdb_api_url() -> String {
    "http://www.omdbapi.com".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    10
}

fn default_poster_placeholder_url() -> String {
    PLACEHOLDER_POSTER_URL.to_string()
}

fn default_poster_cache_ttl_secs() -> u64 {
    604800 // 1 week
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs (uppercase keys)
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.omdb_api_key.trim().is_empty() {
            anyhow::bail!("Failed to load config: OMDB_API_KEY must not be empty");
        }

        Ok(config)
    }

    pub fn dataset_paths(&self) -> DatasetPaths {
        DatasetPaths::new(&self.movies_path, &self.similarity_path)
    }

    pub fn duplicate_title_policy(&self) -> DuplicateTitlePolicy {
        if self.reject_duplicate_titles {
            DuplicateTitlePolicy::Reject
        } else {
            DuplicateTitlePolicy::FirstMatch
        }
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_secs(self.poster_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
