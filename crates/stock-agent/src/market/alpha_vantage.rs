//! Alpha Vantage API client (company overview only)

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Result, StockError};
use crate::result::{FundamentalMetric, Fundamentals, MetricValue};

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER: &str = "Alpha Vantage";
const FREE_TIER_PER_MINUTE: NonZeroU32 = match NonZeroU32::new(5) {
    Some(limit) => limit,
    None => NonZeroU32::MIN,
};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

/// Subset of the `OVERVIEW` payload used for fundamentals.
///
/// Alpha Vantage sends every number as a string and uses `"None"` or `"-"`
/// when a figure is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyOverview {
    pub symbol: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "PERatio")]
    pub pe_ratio: Option<String>,
    #[serde(rename = "EPS")]
    pub eps: Option<String>,
    #[serde(rename = "MarketCapitalization")]
    pub market_cap: Option<String>,
    #[serde(rename = "ForwardPE")]
    pub forward_pe: Option<String>,
}

impl CompanyOverview {
    /// Map the overview onto the reported metrics
    pub fn fundamentals(&self) -> Fundamentals {
        [
            (FundamentalMetric::PeRatio, &self.pe_ratio),
            (FundamentalMetric::Eps, &self.eps),
            (FundamentalMetric::MarketCap, &self.market_cap),
            (FundamentalMetric::ForwardPe, &self.forward_pe),
        ]
        .into_iter()
        .fold(Fundamentals::unavailable(), |fundamentals, (metric, raw)| {
            let value = raw
                .as_deref()
                .map_or(MetricValue::NotAvailable, |raw| metric.parse_value(raw));
            fundamentals.with(metric, value)
        })
    }
}

/// Interpret a raw `OVERVIEW` response body
pub fn parse_overview(symbol: &str, data: serde_json::Value) -> Result<CompanyOverview> {
    if let Some(error) = data.get("Error Message") {
        return Err(StockError::AlphaVantageError(error.to_string()));
    }

    // Free-tier throttling shows up as a "Note" or "Information" body
    if data.get("Note").is_some() || data.get("Information").is_some() {
        return Err(StockError::RateLimitExceeded {
            provider: PROVIDER.to_string(),
        });
    }

    // Unknown symbols come back as an empty object
    if data.as_object().is_none_or(serde_json::Map::is_empty) {
        return Err(StockError::InvalidSymbol(symbol.to_string()));
    }

    Ok(serde_json::from_value(data)?)
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client with API key and rate limit
    ///
    /// # Arguments
    /// * `api_key` - Alpha Vantage API key
    /// * `rate_limit` - Maximum requests per minute (5 for the free tier)
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Self {
        Self::from_parts(Client::new(), api_key.into(), rate_limit)
    }

    /// Same as [`new`](Self::new) with a per-request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        rate_limit: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::from_parts(client, api_key.into(), rate_limit))
    }

    fn from_parts(client: Client, api_key: String, rate_limit: u32) -> Self {
        let per_minute = NonZeroU32::new(rate_limit).unwrap_or(FREE_TIER_PER_MINUTE);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Self {
            client,
            api_key,
            rate_limiter,
        }
    }

    /// Get the company overview for a symbol
    pub async fn get_company_overview(&self, symbol: &str) -> Result<CompanyOverview> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        let params = [
            ("function", "OVERVIEW"),
            ("symbol", symbol),
            ("apikey", self.api_key.as_str()),
        ];

        let response = self.client.get(BASE_URL).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(StockError::AlphaVantageError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response.json().await?;
        parse_overview(symbol, data)
    }

    /// Fundamentals for a symbol
    pub async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
        let overview = self.get_company_overview(symbol).await?;
        let fundamentals = overview.fundamentals();

        if fundamentals.reported() == 0 {
            warn!(symbol, "Alpha Vantage overview carried no usable metrics");
        } else {
            debug!(symbol, reported = fundamentals.reported(), "Fetched fundamentals");
        }

        Ok(fundamentals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = AlphaVantageClient::new("test_key", 5);
        assert_eq!(client.api_key, "test_key");
    }

    #[test]
    fn test_parse_overview() {
        let body = json!({
            "Symbol": "AAPL",
            "Name": "Apple Inc",
            "PERatio": "29.85",
            "EPS": "6.42",
            "MarketCapitalization": "2980000000000",
            "ForwardPE": "None",
            "DividendYield": "0.0051"
        });

        let overview = parse_overview("AAPL", body).unwrap();
        assert_eq!(overview.name.as_deref(), Some("Apple Inc"));

        let fundamentals = overview.fundamentals();
        assert_eq!(
            fundamentals.get(FundamentalMetric::PeRatio),
            MetricValue::Number(29.85)
        );
        assert_eq!(
            fundamentals.get(FundamentalMetric::MarketCap),
            MetricValue::Whole(2_980_000_000_000)
        );
        assert_eq!(
            fundamentals.get(FundamentalMetric::ForwardPe),
            MetricValue::NotAvailable
        );
    }

    #[test]
    fn test_parse_overview_missing_fields() {
        let overview = parse_overview("XYZ", json!({"Symbol": "XYZ", "EPS": "-"})).unwrap();
        assert_eq!(overview.fundamentals().reported(), 0);
    }

    #[test]
    fn test_overview_value_kind_follows_metric() {
        let body = json!({"Symbol": "XYZ", "EPS": "6", "MarketCapitalization": "1.5E9"});
        let fundamentals = parse_overview("XYZ", body).unwrap().fundamentals();

        assert_eq!(
            fundamentals.get(FundamentalMetric::Eps),
            MetricValue::Number(6.0)
        );
        assert_eq!(
            fundamentals.get(FundamentalMetric::MarketCap),
            MetricValue::Whole(1_500_000_000)
        );
        assert_eq!(
            fundamentals.to_string(),
            "P/E Ratio: N/A, EPS: 6.0, Market Cap: 1500000000, Forward P/E: N/A"
        );
    }

    #[test]
    fn test_parse_overview_errors() {
        assert!(matches!(
            parse_overview("AAPL", json!({"Error Message": "Invalid API call"})),
            Err(StockError::AlphaVantageError(_))
        ));
        assert!(matches!(
            parse_overview("AAPL", json!({"Note": "Thank you for using Alpha Vantage!"})),
            Err(StockError::RateLimitExceeded { .. })
        ));
        assert!(matches!(
            parse_overview("AAPL", json!({"Information": "rate limit"})),
            Err(StockError::RateLimitExceeded { .. })
        ));
        assert!(matches!(
            parse_overview("NOPE", json!({})),
            Err(StockError::InvalidSymbol(s)) if s == "NOPE"
        ));
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_get_company_overview() {
        let key = std::env::var("ALPHA_VANTAGE_API_KEY").unwrap();
        let client = AlphaVantageClient::new(key, 5);
        let overview = client.get_company_overview("AAPL").await.unwrap();
        assert_eq!(overview.symbol.as_deref(), Some("AAPL"));
    }
}
