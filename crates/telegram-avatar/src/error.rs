//! Error types for avatar resolution

use std::fmt;

#[derive(Debug)]
pub enum AvatarError {
    Http(Box<reqwest::Error>),
    Status(u16),
    Api(String),
    MissingFilePath(String),
}

impl fmt::Display for AvatarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvatarError::Http(err) => write!(f, "HTTP error: {}", err),
            AvatarError::Status(code) => write!(f, "Telegram returned status {}", code),
            AvatarError::Api(msg) => write!(f, "Telegram API error: {}", msg),
            AvatarError::MissingFilePath(file_id) => {
                write!(f, "No file path for file {}", file_id)
            }
        }
    }
}

impl std::error::Error for AvatarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AvatarError::Http(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AvatarError {
    // Request URLs embed the bot token
    fn from(err: reqwest::Error) -> Self {
        AvatarError::Http(Box::new(err.without_url()))
    }
}

pub type Result<T> = std::result::Result<T, AvatarError>;
