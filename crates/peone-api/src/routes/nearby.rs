use axum::extract::{Path, State};
use axum::Json;
use peone_db::ProfileRow;

use crate::error::AppError;
use crate::state::AppState;

/// Profiles within the nearby radius of `telegram_id`
pub async fn get_nearby(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
) -> Result<Json<Vec<ProfileRow>>, AppError> {
    let profiles = state.nearby.find_nearby(telegram_id).await?;
    Ok(Json(profiles))
}
