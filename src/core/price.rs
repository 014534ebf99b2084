//! Pricing abstractions

use crate::core::asset::AssetClass;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Resolves a normalized symbol to its current unit price.
///
/// Implementations may be slow or fail; callers bound each call with a
/// timeout. Lookups must not accumulate state in the source.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    async fn lookup(&self, symbol: &str) -> Result<f64>;
}

/// Routes each asset class to its price source.
#[derive(Clone)]
pub struct PriceSources {
    domestic: Arc<dyn PriceSource>,
    foreign: Arc<dyn PriceSource>,
    crypto: Arc<dyn PriceSource>,
}

impl PriceSources {
    pub fn new(
        domestic: Arc<dyn PriceSource>,
        foreign: Arc<dyn PriceSource>,
        crypto: Arc<dyn PriceSource>,
    ) -> Self {
        Self {
            domestic,
            foreign,
            crypto,
        }
    }

    pub fn for_class(&self, asset_class: AssetClass) -> &dyn PriceSource {
        match asset_class {
            AssetClass::DomesticEquity => self.domestic.as_ref(),
            AssetClass::ForeignEquity => self.foreign.as_ref(),
            AssetClass::Crypto => self.crypto.as_ref(),
        }
    }
}
