//! Yahoo Finance API client

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api as yahoo;

use super::MarketDataSource;
use crate::calculator::round_to;
use crate::config::HistoryPeriod;
use crate::error::{Result, StockError};
use crate::result::Fundamentals;

/// Yahoo Finance API client
#[derive(Debug, Clone, Default)]
pub struct YahooFinanceClient {}

fn yahoo_error(err: impl std::fmt::Display) -> StockError {
    StockError::YahooFinanceError(err.to_string())
}

fn to_offset(at: DateTime<Utc>) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(at.timestamp())
        .map_err(|e| StockError::YahooFinanceError(format!("Invalid timestamp: {e}")))
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    fn connector(&self) -> Result<yahoo::YahooConnector> {
        yahoo::YahooConnector::new().map_err(yahoo_error)
    }

    /// Latest close for `symbol`, rounded to cents
    pub async fn current_price(&self, symbol: &str) -> Result<f64> {
        let response = self
            .connector()?
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(yahoo_error)?;

        let quote = response.last_quote().map_err(yahoo_error)?;

        if !quote.close.is_finite() {
            return Err(StockError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "latest quote has no close".to_string(),
            });
        }

        debug!(symbol, close = quote.close, "Fetched latest quote");
        Ok(round_to(quote.close, 2))
    }

    /// Daily closes between `start` and `end`, oldest first
    pub async fn closes_between(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<f64>> {
        let response = self
            .connector()?
            .get_quote_history(symbol, to_offset(start)?, to_offset(end)?)
            .await
            .map_err(yahoo_error)?;

        let mut quotes = response.quotes().map_err(yahoo_error)?;
        quotes.sort_by_key(|q| q.timestamp);

        let closes: Vec<f64> = quotes
            .iter()
            .map(|q| q.close)
            .filter(|close| close.is_finite())
            .collect();

        debug!(symbol, points = closes.len(), "Fetched quote history");
        Ok(closes)
    }

    /// Daily closes over a named look-back period
    pub async fn historical_closes(&self, symbol: &str, period: HistoryPeriod) -> Result<Vec<f64>> {
        let end = Utc::now();
        self.closes_between(symbol, period.start_from(end), end).await
    }

    /// The Rust Yahoo client has no fundamentals endpoint, so every metric is
    /// reported as `N/A`.
    pub async fn fundamentals(&self, _symbol: &str) -> Result<Fundamentals> {
        Ok(Fundamentals::unavailable())
    }
}

#[async_trait]
impl MarketDataSource for YahooFinanceClient {
    async fn current_price(&self, ticker: &str) -> Result<f64> {
        YahooFinanceClient::current_price(self, ticker).await
    }

    async fn historical_closes(&self, ticker: &str, period: HistoryPeriod) -> Result<Vec<f64>> {
        YahooFinanceClient::historical_closes(self, ticker, period).await
    }

    async fn fundamentals(&self, ticker: &str) -> Result<Fundamentals> {
        YahooFinanceClient::fundamentals(self, ticker).await
    }
}
