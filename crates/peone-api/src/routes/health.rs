use axum::extract::State;
use axum::Json;
use serde::Serialize;
use telegram_avatar::CacheStats;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    uptime_secs: i64,
    sockets: usize,
    avatar_cache: CacheStats,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: (chrono::Utc::now() - state.started_at).num_seconds(),
        sockets: state.sockets.len().await,
        avatar_cache: state.avatars.cache_stats().await,
    })
}
