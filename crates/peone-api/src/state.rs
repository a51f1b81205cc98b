use std::sync::Arc;

use chrono::{DateTime, Utc};
use peone_db::ProfileStore;
use telegram_avatar::AvatarResolver;

use crate::proximity::ProximityMatcher;
use crate::sockets::SocketRegistry;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub avatars: Arc<AvatarResolver>,
    pub nearby: Arc<ProximityMatcher>,
    pub sockets: Arc<SocketRegistry>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProfileStore>, avatars: Arc<AvatarResolver>) -> Self {
        let nearby = Arc::new(ProximityMatcher::new(store.clone(), avatars.clone()));
        Self {
            store,
            avatars,
            nearby,
            sockets: Arc::new(SocketRegistry::new()),
            started_at: Utc::now(),
        }
    }
}
