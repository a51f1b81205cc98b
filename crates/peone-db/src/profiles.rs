use crate::types::{ProfileRow, UpsertProfileParams};

/// Insert or update a profile.
///
/// A missing avatar in `params` keeps the stored one.
pub async fn upsert(
    executor: impl sqlx::PgExecutor<'_>,
    params: &UpsertProfileParams,
) -> Result<ProfileRow, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO users (telegram_id, name, interests, bio, avatar_url, latitude, longitude, last_seen)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
        ON CONFLICT (telegram_id) DO UPDATE SET
            name = EXCLUDED.name,
            interests = EXCLUDED.interests,
            bio = EXCLUDED.bio,
            avatar_url = COALESCE(EXCLUDED.avatar_url, users.avatar_url),
            latitude = EXCLUDED.latitude,
            longitude = EXCLUDED.longitude,
            last_seen = NOW()
        RETURNING telegram_id, name, bio, interests, avatar_url, latitude, longitude, last_seen
        "#,
    )
    .bind(params.telegram_id)
    .bind(&params.name)
    .bind(&params.interests)
    .bind(&params.bio)
    .bind(&params.avatar_url)
    .bind(params.latitude)
    .bind(params.longitude)
    .fetch_one(executor)
    .await
}

/// Get a single profile
pub async fn get(
    executor: impl sqlx::PgExecutor<'_>,
    telegram_id: i64,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT telegram_id, name, bio, interests, avatar_url, latitude, longitude, last_seen
        FROM users
        WHERE telegram_id = $1
        "#,
    )
    .bind(telegram_id)
    .fetch_optional(executor)
    .await
}

/// Every profile except `exclude_id`
pub async fn list_others(
    executor: impl sqlx::PgExecutor<'_>,
    exclude_id: i64,
) -> Result<Vec<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT telegram_id, name, bio, interests, avatar_url, latitude, longitude, last_seen
        FROM users
        WHERE telegram_id != $1
        ORDER BY telegram_id
        "#,
    )
    .bind(exclude_id)
    .fetch_all(executor)
    .await
}
