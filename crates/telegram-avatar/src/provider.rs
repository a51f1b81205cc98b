//! Bot API client behind the avatar provider trait

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AvatarError, Result};
use crate::types::{File, TelegramResponse, UserProfilePhotos};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Source of profile photos for an identity.
///
/// Resolution is two calls: find the most recent photo, then turn its
/// file id into a path that [`AvatarProvider::file_url`] can serve.
#[async_trait]
pub trait AvatarProvider: Send + Sync {
    /// File id of the user's most recent profile photo, `None` if they have none
    async fn latest_photo_id(&self, user_id: i64) -> Result<Option<String>>;

    /// Relative path of a file on the provider's file server
    async fn file_path(&self, file_id: &str) -> Result<String>;

    /// Fully-qualified URL for a path returned by [`AvatarProvider::file_path`]
    fn file_url(&self, file_path: &str) -> String;
}

/// Telegram Bot API client
pub struct TelegramClient {
    client: Client,
    api_url: String,
    token: String,
}

impl TelegramClient {
    /// Create a client against the public Bot API
    pub fn new(token: &str) -> Result<Self> {
        Self::with_api_url(DEFAULT_API_URL, token, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client against a custom Bot API server
    pub fn with_api_url(api_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn method_url(&self, method: &str, query: &str) -> String {
        format!("{}/bot{}/{}?{}", self.api_url, self.token, method, query)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, query: &str) -> Result<T> {
        let response = self.client.get(self.method_url(method, query)).send().await?;
        let status = response.status();

        // Telegram reports most failures as a 4xx with an `ok: false` body
        let envelope = match response.json::<TelegramResponse<T>>().await {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => return Err(AvatarError::Status(status.as_u16())),
            Err(e) => return Err(e.into()),
        };

        envelope.into_result().map_err(AvatarError::Api)
    }
}

#[async_trait]
impl AvatarProvider for TelegramClient {
    async fn latest_photo_id(&self, user_id: i64) -> Result<Option<String>> {
        let photos: UserProfilePhotos = self
            .call("getUserProfilePhotos", &format!("user_id={user_id}&limit=1"))
            .await?;

        let file_id = photos.latest_file_id().map(str::to_string);
        debug!(user_id, found = file_id.is_some(), "Fetched profile photos");
        Ok(file_id)
    }

    async fn file_path(&self, file_id: &str) -> Result<String> {
        let file: File = self
            .call(
                "getFile",
                &format!("file_id={}", urlencoding::encode(file_id)),
            )
            .await?;

        file.file_path
            .ok_or_else(|| AvatarError::MissingFilePath(file_id.to_string()))
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{}", self.api_url, self.token, file_path)
    }
}
