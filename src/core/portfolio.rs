//! The in-memory portfolio and its price refresh.

use crate::core::asset::{AssetClass, PositionKey, normalize_symbol};
use crate::core::error::{LookupFailure, StoreError};
use crate::core::position::Position;
use crate::core::price::PriceSources;
use crate::core::summary::{self, ClassAllocation, PortfolioSummary};
use chrono::Utc;
use futures::future;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct RefreshOptions {
    /// Upper bound for a single price lookup.
    pub lookup_timeout: Duration,
    /// Upper bound for a whole refresh pass.
    pub deadline: Option<Duration>,
    pub max_concurrent_lookups: usize,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(10),
            deadline: Some(Duration::from_secs(30)),
            max_concurrent_lookups: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshFailure {
    pub key: PositionKey,
    pub reason: LookupFailure,
}

/// Outcome of one refresh pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshReport {
    pub updated: usize,
    pub failures: Vec<RefreshFailure>,
}

impl RefreshReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True when at least one position kept a stale price.
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Holds the positions and is the only place they are mutated.
///
/// Every mutation happens inside a short synchronous critical section, so an
/// update to a position is applied whole or not at all. Price lookups always
/// run outside the lock.
pub struct PortfolioStore {
    sources: PriceSources,
    options: RefreshOptions,
    positions: Mutex<Vec<Position>>,
}

impl PortfolioStore {
    pub fn new(sources: PriceSources, options: RefreshOptions) -> Self {
        Self {
            sources,
            options,
            positions: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Position>> {
        self.positions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Adds `quantity` of a symbol at its current price.
    ///
    /// Nothing is created or modified when the price cannot be resolved.
    pub async fn add(
        &self,
        asset_class: AssetClass,
        symbol: &str,
        quantity: f64,
    ) -> Result<Position, StoreError> {
        let symbol = normalize_symbol(symbol)?;
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(StoreError::InvalidQuantity(quantity));
        }
        let key = PositionKey::new(asset_class, symbol);

        let price = self
            .lookup(&key)
            .await
            .map_err(|reason| StoreError::PriceUnavailable {
                key: key.clone(),
                reason,
            })?;

        let now = Utc::now();
        let mut positions = self.lock();
        let position = match positions.iter_mut().find(|p| p.is(&key)) {
            Some(existing) => {
                existing.quantity += quantity;
                existing.last_price = price;
                existing.last_updated = now;
                debug!(%key, quantity = existing.quantity, price, "Merged into existing position");
                existing.clone()
            }
            None => {
                let created = Position::new(key.clone(), quantity, price, now);
                debug!(%key, quantity, price, "Created position");
                positions.push(created.clone());
                created
            }
        };
        Ok(position)
    }

    /// Removes a position. Returns whether anything was removed.
    pub fn remove(&self, asset_class: AssetClass, symbol: &str) -> bool {
        let Ok(symbol) = normalize_symbol(symbol) else {
            return false;
        };
        let key = PositionKey::new(asset_class, symbol);
        let mut positions = self.lock();
        let before = positions.len();
        positions.retain(|p| !p.is(&key));
        let removed = positions.len() != before;
        debug!(%key, removed, "Remove position");
        removed
    }

    /// Replaces all positions with a previously saved snapshot.
    ///
    /// Symbols are normalized and duplicate keys merged so that each key
    /// appears at most once. Entries with an empty symbol, a quantity that is
    /// not finite and positive, or a negative or non-finite price are skipped.
    pub fn restore(&self, snapshot: Vec<Position>) {
        let mut restored: Vec<Position> = Vec::with_capacity(snapshot.len());
        for mut position in snapshot {
            let Ok(symbol) = normalize_symbol(&position.symbol) else {
                warn!("Skipping restored position with empty symbol");
                continue;
            };
            if !position.quantity.is_finite() || position.quantity <= 0.0 {
                warn!(
                    %symbol,
                    quantity = position.quantity,
                    "Skipping restored position with invalid quantity"
                );
                continue;
            }
            if !position.last_price.is_finite() || position.last_price < 0.0 {
                warn!(
                    %symbol,
                    price = position.last_price,
                    "Skipping restored position with invalid price"
                );
                continue;
            }
            position.symbol = symbol;
            let key = position.key();
            match restored.iter_mut().find(|p| p.is(&key)) {
                Some(existing) => existing.quantity += position.quantity,
                None => restored.push(position),
            }
        }
        debug!(count = restored.len(), "Restored positions");
        *self.lock() = restored;
    }

    pub fn positions(&self) -> Vec<Position> {
        self.lock().clone()
    }

    /// Positions of one class, in insertion order.
    pub fn positions_by_class(&self, asset_class: AssetClass) -> Vec<Position> {
        self.lock()
            .iter()
            .filter(|p| p.asset_class == asset_class)
            .cloned()
            .collect()
    }

    pub fn get(&self, asset_class: AssetClass, symbol: &str) -> Option<Position> {
        let key = PositionKey::new(asset_class, normalize_symbol(symbol).ok()?);
        self.lock().iter().find(|p| p.is(&key)).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_positions(&self.lock())
    }

    pub fn allocation(&self) -> Vec<ClassAllocation> {
        summary::allocation(&self.lock())
    }

    /// Refreshes every position's price. See [`Self::refresh_prices_until`].
    pub async fn refresh_prices(&self) -> RefreshReport {
        self.refresh_prices_until(future::pending::<()>(), || {})
            .await
    }

    /// Refreshes every position's price until done, `cancel` resolves or the
    /// configured deadline passes.
    ///
    /// A failed lookup leaves its position untouched and is listed in the
    /// report; it never stops the rest of the pass. Positions whose lookup
    /// had not completed when the pass stopped are reported as cancelled or
    /// past the deadline. `on_progress` runs once per completed lookup.
    pub async fn refresh_prices_until<C, P>(&self, cancel: C, on_progress: P) -> RefreshReport
    where
        C: Future<Output = ()>,
        P: Fn(),
    {
        let keys: Vec<PositionKey> = self.lock().iter().map(Position::key).collect();
        let mut report = RefreshReport::default();
        if keys.is_empty() {
            return report;
        }
        info!(count = keys.len(), "Refreshing prices");

        let mut completed = HashSet::with_capacity(keys.len());
        let lookups = stream::iter(keys.clone())
            .map(|key| async move {
                let result = self.lookup(&key).await;
                (key, result)
            })
            .buffer_unordered(self.options.max_concurrent_lookups.max(1));
        let deadline = async {
            match self.options.deadline {
                Some(deadline) => tokio::time::sleep(deadline).await,
                None => future::pending::<()>().await,
            }
        };
        tokio::pin!(lookups, cancel, deadline);

        let stopped = loop {
            tokio::select! {
                biased;
                _ = &mut cancel => break Some(LookupFailure::Cancelled),
                _ = &mut deadline => break Some(LookupFailure::DeadlineExceeded),
                next = lookups.next() => match next {
                    Some((key, result)) => {
                        completed.insert(key.clone());
                        self.merge_refresh(key, result, &mut report);
                        on_progress();
                    }
                    None => break None,
                },
            }
        };

        if let Some(reason) = stopped {
            warn!(%reason, "Refresh pass stopped early");
            report.failures.extend(
                keys.into_iter()
                    .filter(|key| !completed.contains(key))
                    .map(|key| RefreshFailure {
                        key,
                        reason: reason.clone(),
                    }),
            );
        }

        info!(
            updated = report.updated,
            failed = report.failed(),
            "Refresh finished"
        );
        report
    }

    fn merge_refresh(
        &self,
        key: PositionKey,
        result: Result<f64, LookupFailure>,
        report: &mut RefreshReport,
    ) {
        match result {
            Ok(price) => {
                let mut positions = self.lock();
                match positions.iter_mut().find(|p| p.is(&key)) {
                    Some(position) => {
                        position.reprice(price, Utc::now());
                        debug!(%key, price, change = position.last_change, "Price refreshed");
                        report.updated += 1;
                    }
                    None => debug!(%key, "Position removed during refresh, skipping"),
                }
            }
            Err(reason) => {
                warn!(%key, %reason, "Price refresh failed, keeping last price");
                report.failures.push(RefreshFailure { key, reason });
            }
        }
    }

    async fn lookup(&self, key: &PositionKey) -> Result<f64, LookupFailure> {
        let source = self.sources.for_class(key.asset_class);
        let timeout = self.options.lookup_timeout;
        debug!(%key, source = source.name(), "Looking up price");

        match tokio::time::timeout(timeout, source.lookup(&key.symbol)).await {
            Err(_) => Err(LookupFailure::TimedOut(timeout)),
            Ok(Err(e)) => Err(LookupFailure::Source(format!("{e:#}"))),
            Ok(Ok(price)) if !price.is_finite() || price <= 0.0 => {
                Err(LookupFailure::InvalidPrice(price))
            }
            Ok(Ok(price)) => Ok(price),
        }
    }
}
