//! Asset classes and position identity

use crate::core::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum AssetClass {
    /// Indian equities listed on NSE/BSE
    DomesticEquity,
    /// US-listed equities
    ForeignEquity,
    Crypto,
}

impl Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AssetClass::DomesticEquity => "Indian Stock",
                AssetClass::ForeignEquity => "US Stock",
                AssetClass::Crypto => "Crypto",
            }
        )
    }
}

impl AssetClass {
    pub const ALL: [AssetClass; 3] = [
        AssetClass::DomesticEquity,
        AssetClass::ForeignEquity,
        AssetClass::Crypto,
    ];

    /// Currency the class is priced and displayed in.
    pub fn currency(&self) -> &'static str {
        match self {
            AssetClass::DomesticEquity => "INR",
            AssetClass::ForeignEquity | AssetClass::Crypto => "USD",
        }
    }

    /// Looks up a human-readable name for a normalized symbol.
    pub fn display_name(&self, symbol: &str) -> Option<&'static str> {
        let name = match self {
            AssetClass::DomesticEquity => match symbol {
                "RELIANCE" => "Reliance Industries",
                "TCS" => "Tata Consultancy Services",
                "INFY" => "Infosys",
                "HDFCBANK" => "HDFC Bank",
                "ICICIBANK" => "ICICI Bank",
                "HINDUNILVR" => "Hindustan Unilever",
                "ITC" => "ITC",
                "SBIN" => "State Bank of India",
                "BHARTIARTL" => "Bharti Airtel",
                "KOTAKBANK" => "Kotak Mahindra Bank",
                "LT" => "Larsen & Toubro",
                "WIPRO" => "Wipro",
                "TATAMOTORS" => "Tata Motors",
                _ => return None,
            },
            AssetClass::ForeignEquity => match symbol {
                "AAPL" => "Apple Inc.",
                "MSFT" => "Microsoft Corporation",
                "GOOGL" => "Alphabet Inc.",
                "AMZN" => "Amazon.com Inc.",
                "TSLA" => "Tesla Inc.",
                "META" => "Meta Platforms Inc.",
                "NVDA" => "NVIDIA Corporation",
                "NFLX" => "Netflix Inc.",
                _ => return None,
            },
            AssetClass::Crypto => match symbol {
                "BTC" => "Bitcoin",
                "ETH" => "Ethereum",
                "USDT" => "Tether",
                "BNB" => "BNB",
                "SOL" => "Solana",
                "XRP" => "XRP",
                "ADA" => "Cardano",
                "DOGE" => "Dogecoin",
                "DOT" => "Polkadot",
                "MATIC" => "Polygon",
                "LTC" => "Litecoin",
                _ => return None,
            },
        };
        Some(name)
    }
}

/// Trims and uppercases a ticker. Empty input is rejected.
pub fn normalize_symbol(raw: &str) -> Result<String, StoreError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(StoreError::InvalidSymbol(raw.to_string()));
    }
    Ok(symbol)
}

/// Identity of a position: one entry per (asset class, symbol).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionKey {
    pub asset_class: AssetClass,
    pub symbol: String,
}

impl PositionKey {
    pub fn new(asset_class: AssetClass, symbol: impl Into<String>) -> Self {
        Self {
            asset_class,
            symbol: symbol.into(),
        }
    }
}

impl Display for PositionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.symbol, self.asset_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("  btc ").unwrap(), "BTC");
        assert_eq!(normalize_symbol("Reliance").unwrap(), "RELIANCE");
        assert!(matches!(
            normalize_symbol("   "),
            Err(StoreError::InvalidSymbol(_))
        ));
        assert!(matches!(
            normalize_symbol(""),
            Err(StoreError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn test_display_name_is_per_class() {
        assert_eq!(
            AssetClass::DomesticEquity.display_name("TCS"),
            Some("Tata Consultancy Services")
        );
        assert_eq!(AssetClass::Crypto.display_name("BTC"), Some("Bitcoin"));
        // Same ticker, different class
        assert_eq!(AssetClass::ForeignEquity.display_name("BTC"), None);
        assert_eq!(AssetClass::Crypto.display_name("UNKNOWN"), None);
    }

    #[test]
    fn test_currency_per_class() {
        assert_eq!(AssetClass::DomesticEquity.currency(), "INR");
        assert_eq!(AssetClass::ForeignEquity.currency(), "USD");
        assert_eq!(AssetClass::Crypto.currency(), "USD");
    }

    #[test]
    fn test_key_display() {
        let key = PositionKey::new(AssetClass::Crypto, "ETH");
        assert_eq!(key.to_string(), "ETH (Crypto)");
    }
}
