//! Error types for stock analysis operations

use thiserror::Error;

/// Provider, configuration and I/O errors
#[derive(Debug, Error)]
pub enum StockError {
    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable {
        symbol: String,
        reason: String,
    },

    /// Rate limit exceeded for API
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded {
        provider: String,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Alpha Vantage API error
    #[error("Alpha Vantage error: {0}")]
    AlphaVantageError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Journal or terminal I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

/// Why an analysis produced no result.
///
/// Both kinds are recoverable: the interactive loop prints the message and
/// prompts again. `cause` keeps the provider failure, if any, so a fetch that
/// failed can still be told apart from one that legitimately returned nothing.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Current price is zero or could not be fetched
    #[error("Failed to fetch current price. Check ticker symbol.")]
    PriceFetchFailed {
        ticker: String,
        cause: Option<String>,
    },

    /// No historical closes were returned
    #[error("Failed to fetch historical prices.")]
    HistoryFetchFailed {
        ticker: String,
        cause: Option<String>,
    },
}

impl AnalysisError {
    /// Ticker the failed analysis was run for
    pub fn ticker(&self) -> &str {
        match self {
            Self::PriceFetchFailed { ticker, .. } | Self::HistoryFetchFailed { ticker, .. } => {
                ticker
            }
        }
    }

    /// Underlying provider error, when the fetch itself failed
    pub fn cause(&self) -> Option<&str> {
        match self {
            Self::PriceFetchFailed { cause, .. } | Self::HistoryFetchFailed { cause, .. } => {
                cause.as_deref()
            }
        }
    }
}
