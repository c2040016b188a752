//! Analysis orchestration: fetch, compute, decide

use tracing::{debug, info, warn};

use crate::calculator::{
    DEFAULT_SMA_WINDOW, assess_price_against_average, calculate_moving_average, calculate_roi,
    round_to,
};
use crate::config::HistoryPeriod;
use crate::error::AnalysisError;
use crate::market::MarketDataSource;
use crate::result::{AnalysisResult, Fundamentals, Recommendation};

/// Hypothetical price moves used for the ROI projections
const ROI_SCENARIOS: (f64, f64) = (1.05, 1.10);

/// Trim and uppercase a ticker as typed by the user
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Runs one analysis per ticker against a market data source
pub struct StockAnalyzer<S> {
    source: S,
    period: HistoryPeriod,
}

impl<S: MarketDataSource> StockAnalyzer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            period: HistoryPeriod::default(),
        }
    }

    /// Look-back period for the historical closes
    pub fn with_period(mut self, period: HistoryPeriod) -> Self {
        self.period = period;
        self
    }

    pub fn period(&self) -> HistoryPeriod {
        self.period
    }

    /// Analyze a ticker.
    ///
    /// A zero or unavailable current price, or an empty history, ends the
    /// analysis with an [`AnalysisError`]. Missing fundamentals never do.
    pub async fn analyze(&self, ticker: &str) -> Result<AnalysisResult, AnalysisError> {
        let ticker = normalize_ticker(ticker);
        info!(%ticker, period = %self.period, "Analyzing");

        let current_price = match self.source.current_price(&ticker).await {
            Ok(price) if price != 0.0 => price,
            Ok(_) => {
                warn!(%ticker, "Current price came back as zero");
                return Err(AnalysisError::PriceFetchFailed { ticker, cause: None });
            }
            Err(e) => {
                warn!(%ticker, error = %e, "Current price fetch failed");
                return Err(AnalysisError::PriceFetchFailed {
                    ticker,
                    cause: Some(e.to_string()),
                });
            }
        };

        let history = match self.source.historical_closes(&ticker, self.period).await {
            Ok(closes) if !closes.is_empty() => closes,
            Ok(_) => {
                warn!(%ticker, "No historical closes returned");
                return Err(AnalysisError::HistoryFetchFailed { ticker, cause: None });
            }
            Err(e) => {
                warn!(%ticker, error = %e, "Historical price fetch failed");
                return Err(AnalysisError::HistoryFetchFailed {
                    ticker,
                    cause: Some(e.to_string()),
                });
            }
        };

        let fundamentals = self.source.fundamentals(&ticker).await.unwrap_or_else(|e| {
            warn!(%ticker, error = %e, "Fundamentals unavailable");
            Fundamentals::unavailable()
        });

        let sma = calculate_moving_average(&history, DEFAULT_SMA_WINDOW);
        let price_assessment = assess_price_against_average(current_price, sma);
        let recommendation = Recommendation::from_assessment(price_assessment);

        let (up_5, up_10) = ROI_SCENARIOS;
        let roi_5 = calculate_roi(current_price, current_price * up_5);
        let roi_10 = calculate_roi(current_price, current_price * up_10);

        debug!(
            %ticker,
            points = history.len(),
            sma,
            assessment = ?price_assessment,
            "Computed indicators"
        );

        Ok(AnalysisResult {
            ticker,
            current_price,
            moving_average: round_to(sma, 2),
            price_assessment,
            roi_5,
            roi_10,
            fundamentals,
            recommendation,
        })
    }
}
