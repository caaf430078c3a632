//! OMDb poster provider
//!
//! Uses the title lookup endpoint (`/?t=<title>&apikey=<key>`) and reads the
//! `Poster` field of the response.

use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{OmdbTitle, PosterLookup},
    services::posters::PosterProvider,
};

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl PosterProvider for OmdbProvider {
    async fn fetch_poster(&self, title: &str) -> AppResult<PosterLookup> {
        let url = format!("{}/", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let omdb: OmdbTitle = serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(response = %response_text, "Raw OMDb API response");
            AppError::ExternalApi(format!("Failed to parse OMDb response: {}", e))
        })?;

        if let Some(error) = omdb.error.as_deref() {
            tracing::debug!(title = %title, error = %error, "OMDb has no entry for title");
        }

        let lookup = PosterLookup::from(omdb);

        tracing::debug!(
            title = %title,
            found = matches!(lookup, PosterLookup::Found(_)),
            provider = "omdb",
            "Poster lookup completed"
        );

        Ok(lookup)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Serves a fake OMDb on an ephemeral port and returns its base URL
    async fn spawn_fake_omdb() -> String {
        async fn lookup(
            Query(params): Query<HashMap<String, String>>,
        ) -> Result<Json<Value>, StatusCode> {
            if params.get("apikey").map(String::as_str) != Some("test_key") {
                return Err(StatusCode::UNAUTHORIZED);
            }

            match params.get("t").map(String::as_str) {
                Some("Inception") => Ok(Json(json!({
                    "Title": "Inception",
                    "Poster": "https://img.omdb/inception.jpg",
                    "Response": "True"
                }))),
                Some("Fast & Furious") => Ok(Json(json!({
                    "Title": "Fast & Furious",
                    "Poster": "https://img.omdb/fast.jpg",
                    "Response": "True"
                }))),
                Some("No Art") => Ok(Json(json!({
                    "Title": "No Art",
                    "Poster": "N/A",
                    "Response": "True"
                }))),
                Some("Broken") => Err(StatusCode::INTERNAL_SERVER_ERROR),
                _ => Ok(Json(json!({
                    "Response": "False",
                    "Error": "Movie not found!"
                }))),
            }
        }

        let app = Router::new()
            .route("/", get(lookup))
            .route("/garbage/", get(|| async { "<html>not json</html>" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn provider(api_url: String) -> OmdbProvider {
        OmdbProvider::new("test_key".to_string(), api_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let provider = OmdbProvider::new(
            "k".to_string(),
            "http://www.omdbapi.com/".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(provider.api_url, "http://www.omdbapi.com");
        assert_eq!(provider.name(), "omdb");
    }

    #[tokio::test]
    async fn test_fetch_poster_found() {
        let provider = provider(spawn_fake_omdb().await);
        let lookup = provider.fetch_poster("Inception").await.unwrap();
        assert_eq!(
            lookup,
            PosterLookup::Found("https://img.omdb/inception.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_poster_encodes_title() {
        let provider = provider(spawn_fake_omdb().await);
        let lookup = provider.fetch_poster("Fast & Furious").await.unwrap();
        assert_eq!(
            lookup,
            PosterLookup::Found("https://img.omdb/fast.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_poster_na_is_unknown() {
        let provider = provider(spawn_fake_omdb().await);
        assert_eq!(
            provider.fetch_poster("No Art").await.unwrap(),
            PosterLookup::Unknown
        );
    }

    #[tokio::test]
    async fn test_fetch_poster_not_found_is_unknown() {
        let provider = provider(spawn_fake_omdb().await);
        assert_eq!(
            provider.fetch_poster("__does_not_exist__").await.unwrap(),
            PosterLookup::Unknown
        );
    }

    #[tokio::test]
    async fn test_fetch_poster_server_error() {
        let provider = provider(spawn_fake_omdb().await);
        let err = provider.fetch_poster("Broken").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(_)));
    }

    #[tokio::test]
    async fn test_fetch_poster_wrong_api_key() {
        let base = spawn_fake_omdb().await;
        let provider =
            OmdbProvider::new("wrong".to_string(), base, Duration::from_secs(5)).unwrap();
        let err = provider.fetch_poster("Inception").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(msg) if msg.contains("401")));
    }

    #[tokio::test]
    async fn test_fetch_poster_malformed_body() {
        let base = spawn_fake_omdb().await;
        let provider = provider(format!("{}/garbage", base));
        let err = provider.fetch_poster("Inception").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(_)));
    }

    #[tokio::test]
    async fn test_fetch_poster_unreachable() {
        // Bind then drop a listener to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = provider(format!("http://{}", addr));
        let err = provider.fetch_poster("Inception").await.unwrap_err();
        assert!(matches!(err, AppError::HttpClient(_)));
    }
}
