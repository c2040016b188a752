//! Terminal rendering of analysis outcomes

use serde_json::json;

use crate::error::AnalysisError;
use crate::result::{AnalysisResult, format_number};

pub trait Formatter: Send + Sync {
    fn format_analysis(&self, result: &AnalysisResult) -> String;
    fn format_error(&self, error: &AnalysisError) -> String;
}

/// Line-per-field report for humans
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_analysis(&self, result: &AnalysisResult) -> String {
        [
            format!("Analysis for {}:", result.ticker),
            format!("Current Price: ${}", format_number(result.current_price)),
            format!(
                "20-Day Moving Average: ${}",
                format_number(result.moving_average)
            ),
            format!("Price Assessment: {}", result.price_assessment),
            format!(
                "Projected ROI for 5% Increase: {}",
                result.roi_5_percent_gain()
            ),
            format!(
                "Projected ROI for 10% Increase: {}",
                result.roi_10_percent_gain()
            ),
            format!("Fundamentals: {}", result.fundamentals),
            format!("Recommendation: {}", result.recommendation),
        ]
        .join("\n")
    }

    fn format_error(&self, error: &AnalysisError) -> String {
        format!("Error: {error}")
    }
}

/// Pretty-printed JSON, for piping into other tools
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_analysis(&self, result: &AnalysisResult) -> String {
        serde_json::to_string_pretty(result)
            .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string())
    }

    fn format_error(&self, error: &AnalysisError) -> String {
        json!({
            "error": error.to_string(),
            "ticker": error.ticker(),
        })
        .to_string()
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(json: bool) -> Box<dyn Formatter> {
        if json {
            Box::new(JsonFormatter)
        } else {
            Box::new(TextFormatter)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Assessment;
    use crate::result::{FundamentalMetric, Fundamentals, MetricValue, Recommendation};

    fn sample() -> AnalysisResult {
        AnalysisResult {
            ticker: "AAPL".to_string(),
            current_price: 198.53,
            moving_average: 202.57,
            price_assessment: Assessment::NearAverage,
            roi_5: 5.0,
            roi_10: 10.0,
            fundamentals: Fundamentals::unavailable()
                .with(FundamentalMetric::PeRatio, MetricValue::Number(30.9)),
            recommendation: Recommendation::HoldWatch,
        }
    }

    #[test]
    fn test_text_report() {
        let text = TextFormatter.format_analysis(&sample());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Analysis for AAPL:",
                "Current Price: $198.53",
                "20-Day Moving Average: $202.57",
                "Price Assessment: Near average (Stable)",
                "Projected ROI for 5% Increase: 5.0%",
                "Projected ROI for 10% Increase: 10.0%",
                "Fundamentals: P/E Ratio: 30.9, EPS: N/A, Market Cap: N/A, Forward P/E: N/A",
                "Recommendation: Hold/Watch",
            ]
        );
    }

    #[test]
    fn test_text_error() {
        let err = AnalysisError::HistoryFetchFailed {
            ticker: "AAPL".to_string(),
            cause: None,
        };
        assert_eq!(
            TextFormatter.format_error(&err),
            "Error: Failed to fetch historical prices."
        );
    }

    #[test]
    fn test_json_report() {
        let json: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_analysis(&sample())).unwrap();

        assert_eq!(json["ticker"], "AAPL");
        assert_eq!(json["price_assessment"], "near_average");
        assert_eq!(json["recommendation"], "hold_watch");
        assert_eq!(json["fundamentals"]["P/E Ratio"], 30.9);
        assert_eq!(json["fundamentals"]["EPS"], "N/A");
    }

    #[test]
    fn test_json_error() {
        let err = AnalysisError::PriceFetchFailed {
            ticker: "ZZZZ".to_string(),
            cause: None,
        };
        let json: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_error(&err)).unwrap();
        assert_eq!(
            json["error"],
            "Failed to fetch current price. Check ticker symbol."
        );
        assert_eq!(json["ticker"], "ZZZZ");
    }
}
