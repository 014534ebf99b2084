//! Aggregates derived from the current positions. Never cached.

use crate::core::asset::AssetClass;
use crate::core::position::Position;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_change: f64,
    pub total_change_percent: f64,
    pub asset_count: usize,
}

impl PortfolioSummary {
    pub fn from_positions(positions: &[Position]) -> Self {
        let total_value: f64 = positions.iter().map(Position::value).sum();
        let total_change: f64 = positions.iter().map(|p| p.quantity * p.last_change).sum();
        let total_change_percent = if total_value != 0.0 {
            total_change / total_value * 100.0
        } else {
            0.0
        };
        Self {
            total_value,
            total_change,
            total_change_percent,
            asset_count: positions.len(),
        }
    }
}

/// Plain-text rendering, e.g. as prompt input for a summary generator.
impl Display for PortfolioSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Portfolio of {} asset{} worth {:.2} in total, {} {:.2} ({:+.2}%) since the last refresh.",
            self.asset_count,
            if self.asset_count == 1 { "" } else { "s" },
            self.total_value,
            if self.total_change < 0.0 { "down" } else { "up" },
            self.total_change.abs(),
            self.total_change_percent
        )
    }
}

/// Value held in one asset class and its share of the portfolio.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassAllocation {
    pub asset_class: AssetClass,
    pub count: usize,
    pub value: f64,
    pub weight: f64,
}

pub fn allocation(positions: &[Position]) -> Vec<ClassAllocation> {
    let total_value: f64 = positions.iter().map(Position::value).sum();

    AssetClass::ALL
        .iter()
        .filter_map(|&asset_class| {
            let held: Vec<_> = positions
                .iter()
                .filter(|p| p.asset_class == asset_class)
                .collect();
            if held.is_empty() {
                return None;
            }
            let value: f64 = held.iter().map(|p| p.value()).sum();
            let weight = if total_value > 0.0 {
                value / total_value * 100.0
            } else {
                0.0
            };
            Some(ClassAllocation {
                asset_class,
                count: held.len(),
                value,
                weight,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::asset::PositionKey;
    use chrono::Utc;

    fn position(asset_class: AssetClass, symbol: &str, quantity: f64, price: f64) -> Position {
        Position::new(
            PositionKey::new(asset_class, symbol),
            quantity,
            price,
            Utc::now(),
        )
    }

    #[test]
    fn test_summary_totals() {
        let mut btc = position(AssetClass::Crypto, "BTC", 2.0, 45000.0);
        btc.reprice(46000.0, Utc::now());
        let aapl = position(AssetClass::ForeignEquity, "AAPL", 10.0, 150.5);

        let summary = PortfolioSummary::from_positions(&[btc, aapl]);
        assert_eq!(summary.asset_count, 2);
        assert!((summary.total_value - (92000.0 + 1505.0)).abs() < 1e-9);
        assert!((summary.total_change - 2000.0).abs() < 1e-9);
        let expected_pct = 2000.0 / 93505.0 * 100.0;
        assert!((summary.total_change_percent - expected_pct).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary_has_zero_percent() {
        let summary = PortfolioSummary::from_positions(&[]);
        assert_eq!(summary.total_value, 0.0);
        assert_eq!(summary.total_change_percent, 0.0);
        assert_eq!(summary.asset_count, 0);
    }

    #[test]
    fn test_summary_text() {
        let summary = PortfolioSummary {
            total_value: 1000.0,
            total_change: -50.0,
            total_change_percent: -5.0,
            asset_count: 1,
        };
        assert_eq!(
            summary.to_string(),
            "Portfolio of 1 asset worth 1000.00 in total, down 50.00 (-5.00%) since the last refresh."
        );
    }

    #[test]
    fn test_allocation_by_class() {
        let positions = vec![
            position(AssetClass::Crypto, "BTC", 1.0, 300.0),
            position(AssetClass::DomesticEquity, "TCS", 1.0, 100.0),
            position(AssetClass::Crypto, "ETH", 1.0, 100.0),
        ];

        let alloc = allocation(&positions);
        assert_eq!(alloc.len(), 2);
        assert_eq!(alloc[0].asset_class, AssetClass::DomesticEquity);
        assert_eq!(alloc[0].count, 1);
        assert!((alloc[0].weight - 20.0).abs() < 1e-9);
        assert_eq!(alloc[1].asset_class, AssetClass::Crypto);
        assert_eq!(alloc[1].count, 2);
        assert!((alloc[1].value - 400.0).abs() < 1e-9);
        assert!((alloc[1].weight - 80.0).abs() < 1e-9);
    }
}
