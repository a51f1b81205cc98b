//! TTL cache for resolved avatar URLs

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;
use moka::Expiry;
use serde::Serialize;

pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// A cached lookup outcome. `url: None` records a confirmed absence.
#[derive(Debug, Clone)]
struct CachedAvatar {
    url: Option<String>,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with
struct PerEntryTtl;

impl Expiry<i64, CachedAvatar> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &i64,
        value: &CachedAvatar,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &i64,
        value: &CachedAvatar,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

/// Avatar URLs keyed by Telegram user id
pub struct AvatarCache {
    entries: Cache<i64, CachedAvatar>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AvatarCache {
    pub fn new(max_capacity: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a live entry.
    ///
    /// `None` is a miss (never looked up, or expired). `Some(None)` means the
    /// user was looked up and has no avatar.
    pub async fn get(&self, user_id: i64) -> Option<Option<String>> {
        match self.entries.get(&user_id).await {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.url)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store an outcome that stays valid for `ttl`
    pub async fn put(&self, user_id: i64, url: Option<String>, ttl: Duration) {
        self.entries.insert(user_id, CachedAvatar { url, ttl }).await;
    }

    /// Return the live entry, or run `fetch` and store its outcome for `ttl`.
    ///
    /// Concurrent callers for the same user share one `fetch`. Errors are
    /// handed to every waiter and leave the cache untouched.
    pub async fn get_or_try_insert_with<F, E>(
        &self,
        user_id: i64,
        ttl: Duration,
        fetch: F,
    ) -> Result<Option<String>, Arc<E>>
    where
        F: Future<Output = Result<Option<String>, E>>,
        E: Send + Sync + 'static,
    {
        if let Some(url) = self.get(user_id).await {
            return Ok(url);
        }

        let entry = self
            .entries
            .try_get_with(user_id, async move {
                fetch.await.map(|url| CachedAvatar { url, ttl })
            })
            .await?;

        Ok(entry.url)
    }

    pub async fn stats(&self) -> CacheStats {
        self.entries.run_pending_tasks().await;
        CacheStats {
            entries: self.entries.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for AvatarCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = AvatarCache::default();
        assert_eq!(cache.get(1).await, None);

        cache.put(1, Some("https://t.me/a.jpg".to_string()), HOUR).await;
        assert_eq!(cache.get(1).await, Some(Some("https://t.me/a.jpg".to_string())));

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_confirmed_absence_is_distinct_from_miss() {
        let cache = AvatarCache::default();
        cache.put(7, None, HOUR).await;
        assert_eq!(cache.get(7).await, Some(None));
        assert_eq!(cache.get(8).await, None);
    }

    #[tokio::test]
    async fn test_entry_expires_after_its_ttl() {
        let cache = AvatarCache::default();
        cache
            .put(1, Some("u".to_string()), Duration::from_millis(50))
            .await;
        cache.put(2, Some("v".to_string()), HOUR).await;

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(cache.get(1).await, None);
        assert_eq!(cache.get(2).await, Some(Some("v".to_string())));
    }

    #[tokio::test]
    async fn test_overwrite_restarts_ttl() {
        let cache = AvatarCache::default();
        cache
            .put(1, Some("old".to_string()), Duration::from_millis(50))
            .await;
        cache.put(1, Some("new".to_string()), HOUR).await;

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(cache.get(1).await, Some(Some("new".to_string())));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_stored() {
        let cache = AvatarCache::default();
        let result = cache
            .get_or_try_insert_with(3, HOUR, async { Err::<Option<String>, _>("timeout") })
            .await;
        assert_eq!(*result.unwrap_err(), "timeout");
        assert_eq!(cache.get(3).await, None);

        let result = cache
            .get_or_try_insert_with(3, HOUR, async { Ok::<_, &str>(Some("u".to_string())) })
            .await;
        assert_eq!(result.unwrap(), Some("u".to_string()));
        assert_eq!(cache.get(3).await, Some(Some("u".to_string())));
    }
}
