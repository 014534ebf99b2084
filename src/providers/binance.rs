use crate::core::price::PriceSource;
use crate::providers::util::{http_client, parse_price, with_retry};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Binance spot ticker, quoting crypto against USDT.
pub struct BinanceSource {
    base_url: String,
    client: reqwest::Client,
}

impl BinanceSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: http_client()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: String,
}

#[async_trait]
impl PriceSource for BinanceSource {
    fn name(&self) -> &str {
        "Binance"
    }

    #[instrument(name = "BinancePriceLookup", skip(self), fields(symbol = %symbol))]
    async fn lookup(&self, symbol: &str) -> Result<f64> {
        let pair = format!("{symbol}USDT");
        let url = format!("{}/api/v3/ticker/price?symbol={}", self.base_url, pair);
        debug!("Requesting price data from {}", url);

        let response = with_retry(|| self.client.get(&url).send(), 3, 500)
            .await
            .with_context(|| format!("Failed to send request for pair: {pair}"))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for pair: {}",
                response.status(),
                pair
            ));
        }

        let ticker: TickerPrice = response
            .json()
            .await
            .with_context(|| format!("Failed to parse Binance response for pair: {pair}"))?;
        let price = parse_price(&ticker.price)?;

        debug!(price, "Received Binance price");
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_successful_price_lookup() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker/price"))
            .and(query_param("symbol", "ETHUSDT"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"symbol": "ETHUSDT", "price": "3120.55000000"}"#),
            )
            .mount(&mock_server)
            .await;

        let source = BinanceSource::new(&mock_server.uri()).unwrap();
        assert_eq!(source.lookup("ETH").await.unwrap(), 3120.55);
    }

    #[tokio::test]
    async fn test_invalid_symbol() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker/price"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"code": -1121, "msg": "Invalid symbol."}"#),
            )
            .mount(&mock_server)
            .await;

        let source = BinanceSource::new(&mock_server.uri()).unwrap();
        assert_eq!(
            source.lookup("NOPE").await.unwrap_err().to_string(),
            "HTTP error: 400 Bad Request for pair: NOPEUSDT"
        );
    }
}
