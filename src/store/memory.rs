use crate::core::position::Position;
use crate::core::snapshot::SnapshotStore;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory snapshot store; contents are lost with the process.
#[derive(Clone, Default)]
pub struct MemorySnapshotStore {
    inner: Arc<Mutex<HashMap<String, Vec<Position>>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self, user: &str) -> Result<Vec<Position>> {
        let snapshots = self.inner.lock().await;
        let positions = snapshots.get(user).cloned().unwrap_or_default();
        debug!(user, count = positions.len(), "Snapshot LOAD");
        Ok(positions)
    }

    async fn save(&self, user: &str, positions: &[Position]) -> Result<()> {
        let mut snapshots = self.inner.lock().await;
        snapshots.insert(user.to_string(), positions.to_vec());
        debug!(user, count = positions.len(), "Snapshot SAVE");
        Ok(())
    }

    async fn clear(&self, user: &str) -> Result<bool> {
        let mut snapshots = self.inner.lock().await;
        debug!(user, "Snapshot CLEAR");
        Ok(snapshots.remove(user).is_some())
    }
}
