pub mod binance;
pub mod coincap;
pub mod fallback;
pub mod fixed;
pub mod util;
pub mod yahoo_finance;

use crate::core::asset::AssetClass;
use crate::core::config::AppConfig;
use crate::core::price::{PriceSource, PriceSources};
use anyhow::Result;
use binance::BinanceSource;
use coincap::CoinCapSource;
use fallback::FallbackSource;
use fixed::StaticPriceSource;
use std::sync::Arc;
use tracing::debug;
use yahoo_finance::YahooFinanceSource;

/// Builds the per-class fallback chains from config.
///
/// - Indian equities: Yahoo NSE, then Yahoo BSE
/// - US equities: Yahoo
/// - Crypto: CoinCap, then Binance
///
/// With `static_fallback` each chain ends in the built-in price table.
/// Each link gets an equal share of the lookup timeout, so the whole chain
/// can run before the store gives up on the lookup.
pub fn default_sources(config: &AppConfig) -> Result<PriceSources> {
    let yahoo_url = config.providers.yahoo_url();
    let lookup_timeout = config.refresh.options().lookup_timeout;

    let domestic: Vec<Arc<dyn PriceSource>> = vec![
        Arc::new(YahooFinanceSource::new(yahoo_url)?.with_suffix(".NS")),
        Arc::new(YahooFinanceSource::new(yahoo_url)?.with_suffix(".BO")),
    ];
    let foreign: Vec<Arc<dyn PriceSource>> = vec![Arc::new(YahooFinanceSource::new(yahoo_url)?)];
    let crypto: Vec<Arc<dyn PriceSource>> = vec![
        Arc::new(CoinCapSource::new(config.providers.coincap_url())?),
        Arc::new(BinanceSource::new(config.providers.binance_url())?),
    ];

    let chain = |asset_class: AssetClass, mut sources: Vec<Arc<dyn PriceSource>>| {
        if config.static_fallback {
            sources.push(Arc::new(StaticPriceSource::builtin(asset_class)));
        }
        let link_timeout = lookup_timeout / sources.len().max(1) as u32;
        debug!(%asset_class, sources = sources.len(), ?link_timeout, "Configured price sources");
        Arc::new(
            FallbackSource::new(&format!("{asset_class} prices"), sources)
                .with_link_timeout(link_timeout),
        ) as Arc<dyn PriceSource>
    };

    Ok(PriceSources::new(
        chain(AssetClass::DomesticEquity, domestic),
        chain(AssetClass::ForeignEquity, foreign),
        chain(AssetClass::Crypto, crypto),
    ))
}
