use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::profiles;
use crate::types::{ProfileRow, UpsertProfileParams};

/// Profile persistence used by the request handlers
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn upsert_profile(&self, params: &UpsertProfileParams) -> Result<ProfileRow, sqlx::Error>;

    async fn get_profile(&self, telegram_id: i64) -> Result<Option<ProfileRow>, sqlx::Error>;

    async fn list_other_profiles(&self, exclude_id: i64) -> Result<Vec<ProfileRow>, sqlx::Error>;
}

/// PostgreSQL-backed profile store
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn upsert_profile(&self, params: &UpsertProfileParams) -> Result<ProfileRow, sqlx::Error> {
        debug!(telegram_id = params.telegram_id, "Upserting profile");
        profiles::upsert(&self.pool, params).await
    }

    async fn get_profile(&self, telegram_id: i64) -> Result<Option<ProfileRow>, sqlx::Error> {
        profiles::get(&self.pool, telegram_id).await
    }

    async fn list_other_profiles(&self, exclude_id: i64) -> Result<Vec<ProfileRow>, sqlx::Error> {
        profiles::list_others(&self.pool, exclude_id).await
    }
}
