//! Peone API server
//!
//! Serves profile updates, nearby queries and the WebSocket endpoint.

use std::sync::Arc;

use peone_api::{cors_layer, create_router, AppState, Config, Result};
use peone_db::PgProfileStore;
use sqlx::postgres::PgPoolOptions;
use telegram_avatar::{AvatarCache, AvatarResolver, TelegramClient};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive("peone_api=info".parse()?);

    // Use JSON format for Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    let config = Config::from_env()?;
    info!(port = config.port, "Starting peone-api");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    info!("Database connection established");
    peone_db::migrate::migrate(&pool).await?;

    let telegram = TelegramClient::with_api_url(
        &config.telegram_api_url,
        &config.telegram_token,
        config.telegram_timeout,
    )?;
    let avatars = AvatarResolver::new(Arc::new(telegram))
        .with_ttl(config.avatar_cache_ttl)
        .with_cache(AvatarCache::new(config.avatar_cache_capacity));

    let state = AppState::new(Arc::new(PgProfileStore::new(pool)), Arc::new(avatars));
    let app = create_router(state, cors_layer(&config.cors_origins));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
