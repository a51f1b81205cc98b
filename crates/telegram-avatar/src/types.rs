//! Telegram Bot API wire types

use serde::Deserialize;

/// Envelope wrapping every Bot API response
#[derive(Debug, Deserialize)]
pub struct TelegramResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i32>,
}

impl<T> TelegramResponse<T> {
    /// Unwrap the `result`, turning `ok: false` into an API error message
    pub fn into_result(self) -> Result<T, String> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err("response missing result".to_string()),
            (false, _) => Err(self
                .description
                .unwrap_or_else(|| format!("error code {}", self.error_code.unwrap_or(0)))),
        }
    }
}

/// Result of `getUserProfilePhotos`
#[derive(Debug, Deserialize)]
pub struct UserProfilePhotos {
    pub total_count: u32,
    /// Each photo is a list of sizes, smallest first
    pub photos: Vec<Vec<PhotoSize>>,
}

impl UserProfilePhotos {
    /// File id of the largest rendition of the most recent photo
    pub fn latest_file_id(&self) -> Option<&str> {
        self.photos
            .first()
            .and_then(|sizes| sizes.last())
            .map(|size| size.file_id.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub file_unique_id: String,
    pub width: u32,
    pub height: u32,
    pub file_size: Option<u64>,
}

/// Result of `getFile`
#[derive(Debug, Deserialize)]
pub struct File {
    pub file_id: String,
    pub file_unique_id: String,
    pub file_size: Option<u64>,
    pub file_path: Option<String>,
}
