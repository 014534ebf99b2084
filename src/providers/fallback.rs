use crate::core::price::PriceSource;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Tries each source in order and returns the first usable price.
///
/// A price that is not finite and positive counts as a failure of that
/// source, and so does a source that overruns its time budget.
pub struct FallbackSource {
    name: String,
    sources: Vec<Arc<dyn PriceSource>>,
    link_timeout: Option<Duration>,
}

impl FallbackSource {
    pub fn new(name: &str, sources: Vec<Arc<dyn PriceSource>>) -> Self {
        Self {
            name: name.to_string(),
            sources,
            link_timeout: None,
        }
    }

    /// Bounds each source in the chain so a hung one cannot starve the rest.
    pub fn with_link_timeout(mut self, limit: Duration) -> Self {
        self.link_timeout = Some(limit);
        self
    }
}

#[async_trait]
impl PriceSource for FallbackSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn lookup(&self, symbol: &str) -> Result<f64> {
        let mut errors = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let attempt = match self.link_timeout {
                Some(limit) => tokio::time::timeout(limit, source.lookup(symbol))
                    .await
                    .unwrap_or_else(|_| Err(anyhow!("timed out after {limit:?}"))),
                None => source.lookup(symbol).await,
            };
            match attempt {
                Ok(price) if price.is_finite() && price > 0.0 => {
                    debug!(source = source.name(), symbol, price, "Resolved price");
                    return Ok(price);
                }
                Ok(price) => {
                    warn!(source = source.name(), symbol, price, "Discarding invalid price");
                    errors.push(format!("{}: invalid price {price}", source.name()));
                }
                Err(e) => {
                    warn!(source = source.name(), symbol, error = %e, "Source failed, trying next");
                    errors.push(format!("{}: {e}", source.name()));
                }
            }
        }

        if errors.is_empty() {
            return Err(anyhow!("No price source configured for {}", symbol));
        }
        Err(anyhow!(
            "All price sources failed for {}: {}",
            symbol,
            errors.join("; ")
        ))
    }
}
