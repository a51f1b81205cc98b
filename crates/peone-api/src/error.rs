use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Request error that converts to an HTTP response
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Database(sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Database(e)
    }
}

/// Startup errors
#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    Database(Box<sqlx::Error>),
    Avatar(telegram_avatar::AvatarError),
    Io(Box<std::io::Error>),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ServiceError::Database(err) => write!(f, "Database error: {}", err),
            ServiceError::Avatar(err) => write!(f, "Avatar client error: {}", err),
            ServiceError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Database(err) => Some(err.as_ref()),
            ServiceError::Avatar(err) => Some(err),
            ServiceError::Io(err) => Some(err.as_ref()),
            ServiceError::Config(_) => None,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(Box::new(err))
    }
}

impl From<telegram_avatar::AvatarError> for ServiceError {
    fn from(err: telegram_avatar::AvatarError) -> Self {
        ServiceError::Avatar(err)
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ServiceError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ServiceError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
