//! Persistence of positions, scoped by user id.

use crate::core::position::Position;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads the saved positions for `user`; empty when nothing was saved.
    async fn load(&self, user: &str) -> Result<Vec<Position>>;

    async fn save(&self, user: &str, positions: &[Position]) -> Result<()>;

    /// Deletes the saved positions. Returns whether anything was deleted.
    async fn clear(&self, user: &str) -> Result<bool>;
}
