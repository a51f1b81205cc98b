//! Registry of open WebSocket connections

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct SocketRegistry {
    next_id: AtomicU64,
    connections: RwLock<HashMap<u64, DateTime<Utc>>>,
}

impl SocketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new connection and return its id
    pub async fn register(&self) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.connections.write().await.insert(id, Utc::now());
        id
    }

    /// Forget a connection; returns when it was opened
    pub async fn unregister(&self, id: u64) -> Option<DateTime<Utc>> {
        self.connections.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }
}
