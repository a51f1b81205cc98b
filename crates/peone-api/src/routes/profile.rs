use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use peone_db::UpsertProfileParams;
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    telegram_id: i64,
    name: Option<String>,
    bio: Option<String>,
    interests: Option<Vec<String>>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl ProfileUpdate {
    fn validate(&self) -> Result<(), AppError> {
        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(AppError::BadRequest(format!("latitude out of range: {lat}")));
            }
        }
        if let Some(lng) = self.longitude {
            if !(-180.0..=180.0).contains(&lng) {
                return Err(AppError::BadRequest(format!("longitude out of range: {lng}")));
            }
        }
        Ok(())
    }

    fn into_params(self, avatar_url: Option<String>) -> UpsertProfileParams {
        UpsertProfileParams {
            telegram_id: self.telegram_id,
            name: self.name,
            bio: self.bio,
            interests: self.interests,
            avatar_url,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Create or update the caller's profile, refreshing their avatar
pub async fn upsert_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<StatusCode, AppError> {
    update.validate()?;

    let avatar_url = state.avatars.resolve(update.telegram_id).await;
    let params = update.into_params(avatar_url);
    state.store.upsert_profile(&params).await?;

    info!(
        telegram_id = params.telegram_id,
        located = params.latitude.is_some() && params.longitude.is_some(),
        "Profile saved"
    );
    Ok(StatusCode::OK)
}
