use crate::core::position::Position;
use crate::core::snapshot::SnapshotStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "portfolios";

/// Snapshot store backed by a fjall keyspace. One JSON document per user.
pub struct DiskSnapshotStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskSnapshotStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;
        let keyspace = fjall::Config::new(path.join("snapshots"))
            .open()
            .with_context(|| format!("Failed to open snapshot store at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .context("Failed to open snapshot partition")?;
        debug!("Opened snapshot store at {}", path.display());
        Ok(Self {
            keyspace,
            partition,
        })
    }
}

#[async_trait]
impl SnapshotStore for DiskSnapshotStore {
    async fn load(&self, user: &str) -> Result<Vec<Position>> {
        let Some(bytes) = self
            .partition
            .get(user)
            .with_context(|| format!("Failed to read snapshot for {user}"))?
        else {
            debug!(user, "Snapshot MISS");
            return Ok(Vec::new());
        };
        let positions: Vec<Position> = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse snapshot for {user}"))?;
        debug!(user, count = positions.len(), "Snapshot HIT");
        Ok(positions)
    }

    async fn save(&self, user: &str, positions: &[Position]) -> Result<()> {
        let bytes = serde_json::to_vec(positions)?;
        self.partition
            .insert(user, bytes)
            .with_context(|| format!("Failed to write snapshot for {user}"))?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(user, count = positions.len(), "Snapshot SAVE");
        Ok(())
    }

    async fn clear(&self, user: &str) -> Result<bool> {
        let existed = self.partition.contains_key(user)?;
        if existed {
            self.partition.remove(user)?;
            self.keyspace.persist(PersistMode::SyncAll)?;
        }
        debug!(user, existed, "Snapshot CLEAR");
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::{AssetClass, PositionKey};
    use chrono::Utc;
    use tempfile::TempDir;

    fn positions() -> Vec<Position> {
        let now = Utc::now();
        vec![
            Position::new(
                PositionKey::new(AssetClass::DomesticEquity, "RELIANCE"),
                10.0,
                2900.5,
                now,
            ),
            Position::new(PositionKey::new(AssetClass::Crypto, "ETH"), 0.5, 3100.0, now),
        ]
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = DiskSnapshotStore::open(temp_dir.path()).unwrap();

        assert!(store.load("alice").await.unwrap().is_empty());
        store.save("alice", &positions()).await.unwrap();

        let loaded = store.load("alice").await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].symbol, "RELIANCE");
        assert_eq!(loaded[0].display_name, "Reliance Industries");
        assert_eq!(loaded[1].quantity, 0.5);
        assert!(store.load("bob").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let saved = positions();
        {
            let store = DiskSnapshotStore::open(temp_dir.path()).unwrap();
            store.save("alice", &saved).await.unwrap();
        }

        let store = DiskSnapshotStore::open(temp_dir.path()).unwrap();
        let loaded = store.load("alice").await.unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = DiskSnapshotStore::open(temp_dir.path()).unwrap();
        store.save("alice", &positions()).await.unwrap();

        assert!(store.clear("alice").await.unwrap());
        assert!(!store.clear("alice").await.unwrap());
        assert!(store.load("alice").await.unwrap().is_empty());
    }
}
