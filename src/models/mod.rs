use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod movie;

pub use movie::Movie;

// ============================================================================
// Recommendation API Types
// ============================================================================

/// Query string for endpoints keyed by a movie title
#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    /// Missing and empty are treated alike and rejected by the handlers
    #[serde(default)]
    pub title: String,
}

/// A single recommended movie returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedMovie {
    pub title: String,
    pub score: f32,
    pub poster_url: String,
    /// Display fields of the catalog record, as loaded
    #[serde(default)]
    pub details: Map<String, Value>,
}

/// Response for a recommendation request
///
/// An empty `recommendations` list means the queried title is not in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub query: String,
    pub recommendations: Vec<RecommendedMovie>,
}

/// Response for a single poster lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PosterResponse {
    pub title: String,
    pub poster_url: String,
}

// ============================================================================
// Poster Lookup Types
// ============================================================================

/// Outcome of a poster lookup that reached the metadata API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum PosterLookup {
    /// The API knows the title and has a poster for it
    Found(String),
    /// The API does not know the title, or has no poster for it
    Unknown,
}

/// A poster lookup result as stored in the poster cache
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CachedPoster {
    pub lookup: PosterLookup,
    pub cached_at: DateTime<Utc>,
}

impl CachedPoster {
    pub fn new(lookup: PosterLookup) -> Self {
        Self {
            lookup,
            cached_at: Utc::now(),
        }
    }
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw OMDb response for a `?t=` title lookup
///
/// Only the fields needed for poster resolution are modelled.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbTitle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    /// "True" or "False"
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<OmdbTitle> for PosterLookup {
    fn from(omdb: OmdbTitle) -> Self {
        if omdb.response.as_deref() == Some("False") {
            return PosterLookup::Unknown;
        }

        match omdb.poster {
            Some(poster) if !poster.trim().is_empty() && poster != "N/A" => {
                PosterLookup::Found(poster)
            }
            _ => PosterLookup::Unknown,
        }
    }
}
