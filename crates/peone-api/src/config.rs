use std::env;
use std::time::Duration;

use crate::error::{Result, ServiceError};

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub cors_origins: Vec<String>,
    pub telegram_token: String,
    pub telegram_api_url: String,
    pub telegram_timeout: Duration,
    pub avatar_cache_ttl: Duration,
    pub avatar_cache_capacity: u64,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let parsed = |key: &str| var(key).and_then(|v| v.parse::<u64>().ok());

        let port = var("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000);

        let database_url = match var("DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(&var)?,
        };

        let telegram_token = var("TELEGRAM_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ServiceError::Config("TELEGRAM_TOKEN environment variable is required".to_string())
            })?;

        let telegram_api_url = var("TELEGRAM_API_URL")
            .unwrap_or_else(|| telegram_avatar::DEFAULT_API_URL.to_string());

        let cors_origins = var("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|| vec!["*".to_string()]);

        Ok(Self {
            port,
            database_url,
            cors_origins,
            telegram_token,
            telegram_api_url,
            telegram_timeout: Duration::from_secs(parsed("TELEGRAM_TIMEOUT_SECS").unwrap_or(10)),
            avatar_cache_ttl: Duration::from_secs(parsed("AVATAR_CACHE_TTL_SECS").unwrap_or(3600)),
            avatar_cache_capacity: parsed("AVATAR_CACHE_CAPACITY")
                .unwrap_or(telegram_avatar::DEFAULT_CACHE_CAPACITY),
        })
    }
}

/// Build a connection URL from separate DB_* variables
fn database_url_from_parts(var: &impl Fn(&str) -> Option<String>) -> Result<String> {
    let host = var("DB_HOST").ok_or_else(|| {
        ServiceError::Config("DATABASE_URL or DB_HOST environment variable is required".to_string())
    })?;
    let port = var("DB_PORT").unwrap_or_else(|| "5432".to_string());
    let name = var("DB_NAME").unwrap_or_else(|| "peone".to_string());
    let user = var("DB_USER").unwrap_or_else(|| "postgres".to_string());
    let password = var("DB_PASSWORD").unwrap_or_default();

    Ok(format!(
        "postgresql://{}:{}@{}:{}/{}",
        user, password, host, port, name
    ))
}
