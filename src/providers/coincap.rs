use crate::core::price::PriceSource;
use crate::providers::util::{http_client, parse_price, with_retry};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

/// CoinCap assets API for cryptocurrency prices in USD.
///
/// CoinCap addresses assets by lowercase id ("bitcoin"), not ticker.
/// Common tickers are mapped; anything else is tried as its lowercased
/// ticker.
pub struct CoinCapSource {
    base_url: String,
    client: reqwest::Client,
}

impl CoinCapSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: http_client()?,
        })
    }

    pub fn asset_id(symbol: &str) -> String {
        let id = match symbol {
            "BTC" => "bitcoin",
            "ETH" => "ethereum",
            "USDT" => "tether",
            "USDC" => "usd-coin",
            "BNB" => "binance-coin",
            "XRP" => "xrp",
            "ADA" => "cardano",
            "SOL" => "solana",
            "DOGE" => "dogecoin",
            "DOT" => "polkadot",
            "MATIC" => "polygon",
            "LTC" => "litecoin",
            "AVAX" => "avalanche",
            "LINK" => "chainlink",
            "SHIB" => "shiba-inu",
            "TRX" => "tron",
            _ => return symbol.to_lowercase(),
        };
        id.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct AssetResponse {
    data: Option<AssetData>,
}

#[derive(Debug, Deserialize)]
struct AssetData {
    #[serde(rename = "priceUsd")]
    price_usd: Option<String>,
}

#[async_trait]
impl PriceSource for CoinCapSource {
    fn name(&self) -> &str {
        "CoinCap"
    }

    #[instrument(name = "CoinCapPriceLookup", skip(self), fields(symbol = %symbol))]
    async fn lookup(&self, symbol: &str) -> Result<f64> {
        let id = Self::asset_id(symbol);
        let url = format!("{}/assets/{}", self.base_url, id);
        debug!("Requesting price data from {}", url);

        let response = with_retry(|| self.client.get(&url).send(), 3, 500)
            .await
            .with_context(|| format!("Failed to send request for asset: {id}"))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for asset: {}",
                response.status(),
                id
            ));
        }

        let body: AssetResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse CoinCap response for asset: {id}"))?;

        let raw = body
            .data
            .and_then(|d| d.price_usd)
            .ok_or_else(|| anyhow!("No price data found for asset: {}", id))?;
        let price = parse_price(&raw)?;

        debug!(price, "Received CoinCap price");
        Ok(price)
    }
}
