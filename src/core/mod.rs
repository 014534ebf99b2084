//! Core business logic abstractions

pub mod asset;
pub mod config;
pub mod error;
pub mod log;
pub mod portfolio;
pub mod position;
pub mod price;
pub mod snapshot;
pub mod summary;

// Re-export main types for cleaner imports
pub use asset::{AssetClass, PositionKey};
pub use error::{LookupFailure, StoreError};
pub use portfolio::{PortfolioStore, RefreshFailure, RefreshOptions, RefreshReport};
pub use position::Position;
pub use price::{PriceSource, PriceSources};
pub use snapshot::SnapshotStore;
pub use summary::{ClassAllocation, PortfolioSummary};
