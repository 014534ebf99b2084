use crate::core::price::PriceSource;
use crate::providers::util::{http_client, with_retry};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Yahoo Finance chart API.
///
/// Serves US equities as-is and Indian equities through an exchange suffix
/// (`.NS` for NSE, `.BO` for BSE).
pub struct YahooFinanceSource {
    name: String,
    base_url: String,
    suffix: String,
    client: reqwest::Client,
}

impl YahooFinanceSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(YahooFinanceSource {
            name: "Yahoo Finance".to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            suffix: String::new(),
            client: http_client()?,
        })
    }

    /// Appends an exchange suffix to every looked-up symbol.
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.name = format!("Yahoo Finance ({suffix})");
        self.suffix = suffix.to_string();
        self
    }
}

#[derive(Deserialize, Debug)]
struct YahooPriceResponse {
    chart: PriceChartResult,
}

#[derive(Deserialize, Debug)]
struct PriceChartResult {
    result: Option<Vec<PriceChartItem>>,
}

#[derive(Deserialize, Debug)]
struct PriceChartItem {
    meta: PriceChartMeta,
}

#[derive(Deserialize, Debug)]
struct PriceChartMeta {
    #[serde(alias = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[async_trait]
impl PriceSource for YahooFinanceSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "YahooPriceLookup",
        skip(self),
        fields(symbol = %symbol)
    )]
    async fn lookup(&self, symbol: &str) -> Result<f64> {
        let ticker = format!("{symbol}{}", self.suffix);
        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&range=1d",
            self.base_url, ticker
        );
        debug!("Requesting price data from {}", url);

        let response = with_retry(|| self.client.get(&url).send(), 3, 500)
            .await
            .map_err(|e| anyhow!("Request error: {} for symbol: {}", e, ticker))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for symbol: {}",
                response.status(),
                ticker
            ));
        }

        let text = response.text().await?;
        let data: YahooPriceResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", ticker, e))?;

        let price = data
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|item| item.meta.regular_market_price)
            .ok_or_else(|| anyhow!("No price data found for symbol: {}", ticker))?;

        debug!(price, "Received Yahoo price");
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(ticker: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        let request_path = format!("/v8/finance/chart/{ticker}");

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_price_lookup() {
        let mock_response = r#"{
            "chart": {
                "result": [{
                    "meta": {
                        "regularMarketPrice": 150.65,
                        "currency": "USD"
                    }
                }]
            }
        }"#;

        let mock_server = create_mock_server("AAPL", 200, mock_response).await;
        let source = YahooFinanceSource::new(&mock_server.uri()).unwrap();
        assert_eq!(source.name(), "Yahoo Finance");
        assert_eq!(source.lookup("AAPL").await.unwrap(), 150.65);
    }

    #[tokio::test]
    async fn test_suffix_is_appended() {
        let mock_response = r#"{
            "chart": {
                "result": [{
                    "meta": { "regularMarketPrice": 2950.1, "currency": "INR" }
                }]
            }
        }"#;

        let mock_server = create_mock_server("RELIANCE.NS", 200, mock_response).await;
        let source = YahooFinanceSource::new(&mock_server.uri())
            .unwrap()
            .with_suffix(".NS");
        assert_eq!(source.name(), "Yahoo Finance (.NS)");
        assert_eq!(source.lookup("RELIANCE").await.unwrap(), 2950.1);
    }

    #[tokio::test]
    async fn test_no_price_result_data() {
        let mock_server =
            create_mock_server("INVALID", 200, r#"{"chart": {"result": []}}"#).await;
        let source = YahooFinanceSource::new(&mock_server.uri()).unwrap();

        let result = source.lookup("INVALID").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No price data found for symbol: INVALID"
        );
    }

    #[tokio::test]
    async fn test_null_result_for_unknown_symbol() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found"}}}"#;
        let mock_server = create_mock_server("NOPE", 200, body).await;
        let source = YahooFinanceSource::new(&mock_server.uri()).unwrap();

        assert!(source.lookup("NOPE").await.is_err());
    }

    #[tokio::test]
    async fn test_http_error_response() {
        let mock_server = create_mock_server("AAPL", 500, "").await;
        let source = YahooFinanceSource::new(&mock_server.uri()).unwrap();

        let result = source.lookup("AAPL").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for symbol: AAPL"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server =
            create_mock_server("AAPL", 200, r#"{"chart": {"results": "oops"}}"#).await;
        let source = YahooFinanceSource::new(&mock_server.uri()).unwrap();

        let result = source.lookup("AAPL").await;
        // "result" is optional, so a misnamed field reads as no data
        assert!(result.is_err());

        let mock_server = create_mock_server("AAPL", 200, "not json").await;
        let source = YahooFinanceSource::new(&mock_server.uri()).unwrap();
        let result = source.lookup("AAPL").await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for AAPL")
        );
    }
}
