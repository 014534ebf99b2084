use crate::core::asset::{AssetClass, PositionKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A held quantity of one (asset class, symbol).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub asset_class: AssetClass,
    pub symbol: String,
    pub display_name: String,
    pub quantity: f64,
    pub last_price: f64,
    pub last_change: f64,
    pub last_change_percent: f64,
    pub last_updated: DateTime<Utc>,
}

impl Position {
    pub(crate) fn new(key: PositionKey, quantity: f64, price: f64, at: DateTime<Utc>) -> Self {
        let display_name = key
            .asset_class
            .display_name(&key.symbol)
            .map_or_else(|| key.symbol.clone(), str::to_string);
        Self {
            asset_class: key.asset_class,
            symbol: key.symbol,
            display_name,
            quantity,
            last_price: price,
            last_change: 0.0,
            last_change_percent: 0.0,
            last_updated: at,
        }
    }

    pub fn key(&self) -> PositionKey {
        PositionKey::new(self.asset_class, self.symbol.clone())
    }

    pub fn is(&self, key: &PositionKey) -> bool {
        self.asset_class == key.asset_class && self.symbol == key.symbol
    }

    pub fn value(&self) -> f64 {
        self.quantity * self.last_price
    }

    /// Applies a refreshed price, deriving the change from the previous one.
    pub(crate) fn reprice(&mut self, price: f64, at: DateTime<Utc>) {
        let change = price - self.last_price;
        self.last_change = change;
        self.last_change_percent = if self.last_price > 0.0 {
            change / self.last_price * 100.0
        } else {
            0.0
        };
        self.last_price = price;
        self.last_updated = at;
    }
}
