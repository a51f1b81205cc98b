//! Peone API
//!
//! Profile updates and nearby-profile queries for Telegram users, with
//! avatars resolved through the Bot API and cached per user.

pub mod config;
pub mod error;
pub mod proximity;
pub mod routes;
pub mod sockets;
pub mod state;

#[cfg(test)]
mod test_support;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub use config::Config;
pub use error::{AppError, Result, ServiceError};
pub use state::AppState;

const BODY_LIMIT_BYTES: usize = 5 * 1024 * 1024;

/// CORS policy: `*` allows any origin, otherwise only the listed ones
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Create the HTTP router
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/profile", post(routes::profile::upsert_profile))
        .route("/api/nearby/{telegram_id}", get(routes::nearby::get_nearby))
        .route("/ws", get(routes::ws::connect))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .with_state(state)
}
