//! Market data sources
//!
//! [`MarketDataSource`] is the seam between the analyzer and the outside
//! world. Sources report failures as [`StockError`](crate::StockError); the
//! analyzer decides how each failure degrades.
//!
//! [`MarketData`] is the production source: prices come from Yahoo Finance,
//! fundamentals from Alpha Vantage when an API key is configured.

pub mod alpha_vantage;
pub mod yahoo;

use async_trait::async_trait;
use tracing::debug;

use crate::config::{HistoryPeriod, StockConfig};
use crate::error::Result;
use crate::result::Fundamentals;

pub use alpha_vantage::{AlphaVantageClient, CompanyOverview};
pub use yahoo::YahooFinanceClient;

/// Provider of prices and fundamentals for a ticker
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Most recent closing price, rounded to 2 decimals
    async fn current_price(&self, ticker: &str) -> Result<f64>;

    /// Daily closes over `period`, oldest first
    async fn historical_closes(&self, ticker: &str, period: HistoryPeriod) -> Result<Vec<f64>>;

    /// Basic fundamentals; metrics the provider lacks are `N/A`
    async fn fundamentals(&self, ticker: &str) -> Result<Fundamentals>;
}

/// Yahoo Finance prices with optional Alpha Vantage fundamentals
pub struct MarketData {
    yahoo: YahooFinanceClient,
    alpha_vantage: Option<AlphaVantageClient>,
}

impl MarketData {
    pub fn new(config: &StockConfig) -> Result<Self> {
        let alpha_vantage = config
            .alpha_vantage_api_key
            .as_ref()
            .map(|key| {
                AlphaVantageClient::with_timeout(
                    key.clone(),
                    config.alpha_vantage_rate_limit,
                    config.request_timeout,
                )
            })
            .transpose()?;

        if alpha_vantage.is_none() {
            debug!("No Alpha Vantage key configured, fundamentals will be N/A");
        }

        Ok(Self {
            yahoo: YahooFinanceClient::new(),
            alpha_vantage,
        })
    }

    /// Whether fundamentals come from a real provider
    pub fn has_fundamentals(&self) -> bool {
        self.alpha_vantage.is_some()
    }
}

#[async_trait]
impl MarketDataSource for MarketData {
    async fn current_price(&self, ticker: &str) -> Result<f64> {
        self.yahoo.current_price(ticker).await
    }

    async fn historical_closes(&self, ticker: &str, period: HistoryPeriod) -> Result<Vec<f64>> {
        self.yahoo.historical_closes(ticker, period).await
    }

    async fn fundamentals(&self, ticker: &str) -> Result<Fundamentals> {
        match &self.alpha_vantage {
            Some(client) => client.fundamentals(ticker).await,
            None => self.yahoo.fundamentals(ticker).await,
        }
    }
}
