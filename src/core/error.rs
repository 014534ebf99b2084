use crate::core::asset::PositionKey;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by portfolio mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Invalid quantity: {0} (must be a positive number)")]
    InvalidQuantity(f64),

    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Price unavailable for {key}: {reason}")]
    PriceUnavailable {
        key: PositionKey,
        reason: LookupFailure,
    },
}

/// Why a single price lookup did not produce a usable price.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupFailure {
    #[error("{0}")]
    Source(String),

    #[error("Lookup timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Invalid price returned: {0}")]
    InvalidPrice(f64),

    #[error("Refresh cancelled before lookup completed")]
    Cancelled,

    #[error("Refresh deadline exceeded")]
    DeadlineExceeded,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::AssetClass;

    #[test]
    fn test_error_messages() {
        let err = StoreError::PriceUnavailable {
            key: PositionKey::new(AssetClass::DomesticEquity, "RELI"),
            reason: LookupFailure::TimedOut(Duration::from_secs(10)),
        };
        assert_eq!(
            err.to_string(),
            "Price unavailable for RELI (Indian Stock): Lookup timed out after 10s"
        );
        assert_eq!(
            StoreError::InvalidQuantity(-1.0).to_string(),
            "Invalid quantity: -1 (must be a positive number)"
        );
    }
}
