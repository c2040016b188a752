//! Stock analysis agent
//!
//! Fetches a ticker's current price, recent closes and basic fundamentals,
//! then reports:
//!
//! - A 20-day simple moving average and where the price sits against it (±5%)
//! - Projected ROI for hypothetical +5% and +10% moves
//! - A Consider Buy / Hold/Watch / Avoid recommendation
//!
//! Successful analyses are appended to a daily markdown journal.
//!
//! # Architecture
//!
//! - [`calculator`]: pure arithmetic (ROI, SMA, assessment)
//! - [`market`]: the [`MarketDataSource`] seam plus Yahoo Finance and
//!   Alpha Vantage providers
//! - [`analysis`]: [`StockAnalyzer`], which composes the two
//! - [`journal`], [`report`], [`session`]: output and the prompt loop
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_agent::{MarketData, StockAnalyzer, StockConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = StockConfig::builder().with_env().build()?;
//!     let analyzer = StockAnalyzer::new(MarketData::new(&config)?);
//!
//!     match analyzer.analyze("AAPL").await {
//!         Ok(result) => println!("{}: {}", result.ticker, result.recommendation),
//!         Err(e) => eprintln!("{e}"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod calculator;
pub mod config;
pub mod error;
pub mod journal;
pub mod market;
pub mod report;
pub mod result;
pub mod session;

// Re-export main types for convenience
pub use analysis::StockAnalyzer;
pub use calculator::{
    Assessment, assess_price_against_average, calculate_moving_average, calculate_roi,
};
pub use config::{HistoryPeriod, StockConfig};
pub use error::{AnalysisError, Result, StockError};
pub use journal::AnalysisJournal;
pub use market::{MarketData, MarketDataSource};
pub use report::{Formatter, FormatterFactory};
pub use result::{AnalysisResult, FundamentalMetric, Fundamentals, MetricValue, Recommendation};
pub use session::{Command, Session};
