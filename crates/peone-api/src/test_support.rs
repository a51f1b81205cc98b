//! In-memory doubles for the store and the avatar provider

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use peone_db::{ProfileRow, ProfileStore, UpsertProfileParams};
use telegram_avatar::{AvatarError, AvatarProvider};

pub fn profile(telegram_id: i64, latitude: Option<f64>, longitude: Option<f64>) -> ProfileRow {
    ProfileRow {
        telegram_id,
        name: Some(format!("user {telegram_id}")),
        bio: None,
        interests: Some(vec!["hiking".to_string()]),
        avatar_url: None,
        latitude,
        longitude,
        last_seen: Utc::now(),
    }
}

/// Store keeping rows in id order, merging upserts like the SQL does
#[derive(Default)]
pub struct MemoryProfileStore {
    rows: Mutex<BTreeMap<i64, ProfileRow>>,
    unavailable: AtomicBool,
}

impl MemoryProfileStore {
    pub fn with_profiles(profiles: Vec<ProfileRow>) -> Self {
        let store = Self::default();
        {
            let mut rows = store.rows.lock().unwrap();
            for p in profiles {
                rows.insert(p.telegram_id, p);
            }
        }
        store
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn upsert_profile(&self, params: &UpsertProfileParams) -> Result<ProfileRow, sqlx::Error> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let row = params.merge_into(rows.get(&params.telegram_id), Utc::now());
        rows.insert(row.telegram_id, row.clone());
        Ok(row)
    }

    async fn get_profile(&self, telegram_id: i64) -> Result<Option<ProfileRow>, sqlx::Error> {
        self.check()?;
        Ok(self.rows.lock().unwrap().get(&telegram_id).cloned())
    }

    async fn list_other_profiles(&self, exclude_id: i64) -> Result<Vec<ProfileRow>, sqlx::Error> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.telegram_id != exclude_id)
            .cloned()
            .collect())
    }
}

/// Provider serving `photos/{id}.jpg` for a fixed set of users
#[derive(Default)]
pub struct CountingProvider {
    with_photo: HashSet<i64>,
    failing: AtomicBool,
    lookups: AtomicUsize,
}

impl CountingProvider {
    pub fn with_photos(ids: &[i64]) -> Self {
        Self {
            with_photo: ids.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        let provider = Self::default();
        provider.failing.store(true, Ordering::SeqCst);
        provider
    }

    /// Number of `latest_photo_id` calls made
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvatarProvider for CountingProvider {
    async fn latest_photo_id(&self, user_id: i64) -> telegram_avatar::Result<Option<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AvatarError::Api("Too Many Requests".to_string()));
        }
        Ok(self.with_photo.contains(&user_id).then(|| user_id.to_string()))
    }

    async fn file_path(&self, file_id: &str) -> telegram_avatar::Result<String> {
        Ok(format!("photos/{file_id}.jpg"))
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("https://files.test/{file_path}")
    }
}
