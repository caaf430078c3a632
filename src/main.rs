use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use marquee_api::{
    api::{create_router, AppState},
    config::Config,
    dataset::load_dataset,
    db::{create_redis_client, CacheWriterHandle, MemoryCache, PosterCache, RedisCache},
    services::{posters::OmdbProvider, PosterService, Recommender},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marquee_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // The dataset must be valid before anything is served
    let index = load_dataset(&config.dataset_paths(), config.duplicate_title_policy())
        .inspect_err(|e| tracing::error!(error = %e, "Failed to load dataset"))?;
    let recommender = Recommender::new(Arc::new(index), config.self_exclusion);

    let (cache, cache_writer): (Arc<dyn PosterCache>, Option<CacheWriterHandle>) =
        match &config.redis_url {
            Some(redis_url) => {
                let client = create_redis_client(redis_url)?;
                let (cache, handle) = RedisCache::new(client, config.poster_cache_ttl_secs);
                let cache: Arc<dyn PosterCache> = Arc::new(cache);
                (cache, Some(handle))
            }
            None => {
                let cache: Arc<dyn PosterCache> = Arc::new(MemoryCache::new());
                (cache, None)
            }
        };
    tracing::info!(cache = cache.name(), "Poster cache ready");

    let provider = OmdbProvider::new(
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
        config.poster_timeout(),
    )?;
    let posters =
        PosterService::with_placeholder(Arc::new(provider), cache, &config.poster_placeholder_url);

    let app = create_router(AppState::new(recommender, posters));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
