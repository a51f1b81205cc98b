//! Cached avatar resolution

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{AvatarCache, CacheStats};
use crate::error::{AvatarError, Result};
use crate::provider::AvatarProvider;

pub const DEFAULT_AVATAR_TTL: Duration = Duration::from_secs(60 * 60);

/// Resolves user ids to avatar URLs, caching outcomes for a fixed TTL
pub struct AvatarResolver {
    provider: Arc<dyn AvatarProvider>,
    cache: AvatarCache,
    ttl: Duration,
}

impl AvatarResolver {
    pub fn new(provider: Arc<dyn AvatarProvider>) -> Self {
        Self {
            provider,
            cache: AvatarCache::default(),
            ttl: DEFAULT_AVATAR_TTL,
        }
    }

    /// Keep resolved outcomes for `ttl` instead of the default hour
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Replace the cache, e.g. to change its capacity
    pub fn with_cache(mut self, cache: AvatarCache) -> Self {
        self.cache = cache;
        self
    }

    /// Best-known avatar URL for a user, `None` if they have none or the
    /// lookup failed. Failures are logged and retried on the next call.
    pub async fn resolve(&self, user_id: i64) -> Option<String> {
        match self.try_resolve(user_id).await {
            Ok(url) => url,
            Err(e) => {
                warn!(user_id, error = %e, "Failed to resolve avatar");
                None
            }
        }
    }

    /// Like [`AvatarResolver::resolve`] but keeps the failure
    pub async fn try_resolve(
        &self,
        user_id: i64,
    ) -> std::result::Result<Option<String>, Arc<AvatarError>> {
        self.cache
            .get_or_try_insert_with(user_id, self.ttl, self.fetch(user_id))
            .await
    }

    async fn fetch(&self, user_id: i64) -> Result<Option<String>> {
        let Some(file_id) = self.provider.latest_photo_id(user_id).await? else {
            debug!(user_id, "User has no profile photo");
            return Ok(None);
        };

        let file_path = self.provider.file_path(&file_id).await?;
        Ok(Some(self.provider.file_url(&file_path)))
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
