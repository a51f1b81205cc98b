//! Nearby profile matching
//!
//! Filters candidates to those within a fixed great-circle radius of the
//! requester, then refreshes avatars for the survivors only.

use std::sync::Arc;

use futures::future::join_all;
use peone_db::{ProfileRow, ProfileStore};
use telegram_avatar::AvatarResolver;
use tracing::debug;

pub const NEARBY_RADIUS_METERS: f64 = 2000.0;

/// Mean equatorial radius (WGS-84)
const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Great-circle distance between two `(latitude, longitude)` points in
/// whole meters
pub fn distance_meters(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();
    (EARTH_RADIUS_METERS * c).round()
}

/// Candidates at most `radius_meters` from `origin`, in input order.
///
/// Candidates without both coordinates are always dropped.
pub fn within_radius(
    origin: (f64, f64),
    candidates: impl IntoIterator<Item = ProfileRow>,
    radius_meters: f64,
) -> Vec<ProfileRow> {
    candidates
        .into_iter()
        .filter(|candidate| match candidate.coordinates() {
            Some(point) => distance_meters(origin, point) <= radius_meters,
            None => false,
        })
        .collect()
}

pub struct ProximityMatcher {
    store: Arc<dyn ProfileStore>,
    avatars: Arc<AvatarResolver>,
    radius_meters: f64,
}

impl ProximityMatcher {
    pub fn new(store: Arc<dyn ProfileStore>, avatars: Arc<AvatarResolver>) -> Self {
        Self {
            store,
            avatars,
            radius_meters: NEARBY_RADIUS_METERS,
        }
    }

    /// Profiles near `requester_id`, with freshly resolved avatars.
    ///
    /// An unknown requester, or one without a location, has no neighbours.
    pub async fn find_nearby(&self, requester_id: i64) -> Result<Vec<ProfileRow>, sqlx::Error> {
        let Some(requester) = self.store.get_profile(requester_id).await? else {
            debug!(requester_id, "Nearby requested for unknown profile");
            return Ok(Vec::new());
        };

        let Some(origin) = requester.coordinates() else {
            debug!(requester_id, "Nearby requested without a location");
            return Ok(Vec::new());
        };

        let others = self.store.list_other_profiles(requester_id).await?;
        let candidate_count = others.len();
        let admitted = within_radius(
            origin,
            others.into_iter().filter(|p| p.telegram_id != requester_id),
            self.radius_meters,
        );

        debug!(
            requester_id,
            candidates = candidate_count,
            admitted = admitted.len(),
            "Matched nearby profiles"
        );

        Ok(self.with_fresh_avatars(admitted).await)
    }

    /// Resolve avatars concurrently. A failed or empty lookup keeps the
    /// stored avatar; nothing is written back.
    async fn with_fresh_avatars(&self, profiles: Vec<ProfileRow>) -> Vec<ProfileRow> {
        join_all(profiles.into_iter().map(|mut profile| async move {
            if let Some(url) = self.avatars.resolve(profile.telegram_id).await {
                profile.avatar_url = Some(url);
            }
            profile
        }))
        .await
    }
}
