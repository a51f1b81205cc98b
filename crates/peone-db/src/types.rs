use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// Row of the `users` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProfileRow {
    #[ts(type = "number")]
    pub telegram_id: i64,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub interests: Option<Vec<String>>,
    pub avatar_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub last_seen: DateTime<Utc>,
}

impl ProfileRow {
    /// `(latitude, longitude)` when both are known
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Fields written by a profile update.
///
/// `avatar_url: None` keeps whatever avatar is already stored.
#[derive(Debug, Clone, Default)]
pub struct UpsertProfileParams {
    pub telegram_id: i64,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub interests: Option<Vec<String>>,
    pub avatar_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl UpsertProfileParams {
    /// The row these params produce on top of `existing`, mirroring the
    /// merge the upsert statement performs. Backs in-memory `ProfileStore`
    /// implementations; the PostgreSQL store merges in SQL.
    pub fn merge_into(&self, existing: Option<&ProfileRow>, now: DateTime<Utc>) -> ProfileRow {
        ProfileRow {
            telegram_id: self.telegram_id,
            name: self.name.clone(),
            bio: self.bio.clone(),
            interests: self.interests.clone(),
            avatar_url: self
                .avatar_url
                .clone()
                .or_else(|| existing.and_then(|row| row.avatar_url.clone())),
            latitude: self.latitude,
            longitude: self.longitude,
            last_seen: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(avatar_url: Option<&str>) -> ProfileRow {
        ProfileRow {
            telegram_id: 42,
            name: Some("Ada".to_string()),
            bio: Some("hi".to_string()),
            interests: Some(vec!["chess".to_string()]),
            avatar_url: avatar_url.map(|s| s.to_string()),
            latitude: Some(55.75),
            longitude: Some(37.62),
            last_seen: Utc::now(),
        }
    }

    #[test]
    fn test_coordinates_require_both() {
        let mut profile = row(None);
        assert_eq!(profile.coordinates(), Some((55.75, 37.62)));

        profile.longitude = None;
        assert_eq!(profile.coordinates(), None);

        profile.longitude = Some(37.62);
        profile.latitude = None;
        assert_eq!(profile.coordinates(), None);
    }

    #[test]
    fn test_merge_keeps_existing_avatar_when_unresolved() {
        let existing = row(Some("https://cdn/u.jpg"));
        let params = UpsertProfileParams {
            telegram_id: 42,
            name: Some("Ada L.".to_string()),
            ..Default::default()
        };

        let merged = params.merge_into(Some(&existing), Utc::now());
        assert_eq!(merged.avatar_url.as_deref(), Some("https://cdn/u.jpg"));
        assert_eq!(merged.name.as_deref(), Some("Ada L."));
        assert_eq!(merged.latitude, None);
    }

    #[test]
    fn test_merge_replaces_avatar_when_resolved() {
        let existing = row(Some("https://cdn/old.jpg"));
        let params = UpsertProfileParams {
            telegram_id: 42,
            avatar_url: Some("https://cdn/new.jpg".to_string()),
            ..Default::default()
        };

        let merged = params.merge_into(Some(&existing), Utc::now());
        assert_eq!(merged.avatar_url.as_deref(), Some("https://cdn/new.jpg"));
    }

    #[test]
    fn test_row_serializes_snake_case() {
        let json = serde_json::to_value(row(None)).unwrap();
        assert_eq!(json["telegram_id"], 42);
        assert!(json["avatar_url"].is_null());
        assert_eq!(json["interests"][0], "chess");
    }
}
