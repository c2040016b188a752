//! Analysis result types

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::calculator::Assessment;

/// Placeholder shown for a metric the provider did not report
pub const NOT_AVAILABLE: &str = "N/A";

/// Render a number the way the reports expect it.
///
/// Integral values keep one decimal (`5.0`), everything else uses the
/// shortest representation that round-trips (`198.53`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Buy/hold/sell style call derived from the price assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ConsiderBuy,
    AvoidOvervalued,
    HoldWatch,
}

impl Recommendation {
    /// Below average is a discount, above average is a warning, anything else
    /// is a wait-and-see.
    pub fn from_assessment(assessment: Assessment) -> Self {
        match assessment {
            Assessment::BelowAverage => Self::ConsiderBuy,
            Assessment::AboveAverage => Self::AvoidOvervalued,
            Assessment::NearAverage | Assessment::InsufficientData => Self::HoldWatch,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ConsiderBuy => "Consider Buy",
            Self::AvoidOvervalued => "Avoid - Potentially Overvalued",
            Self::HoldWatch => "Hold/Watch",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fundamental metrics reported alongside the price analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FundamentalMetric {
    PeRatio,
    Eps,
    MarketCap,
    ForwardPe,
}

impl FundamentalMetric {
    pub const ALL: [Self; 4] = [Self::PeRatio, Self::Eps, Self::MarketCap, Self::ForwardPe];

    pub fn label(self) -> &'static str {
        match self {
            Self::PeRatio => "P/E Ratio",
            Self::Eps => "EPS",
            Self::MarketCap => "Market Cap",
            Self::ForwardPe => "Forward P/E",
        }
    }

    /// Parse a provider string for this metric, mapping placeholders and
    /// garbage to `N/A`. Market cap is a whole number however the provider
    /// writes it; every other metric is a plain number.
    #[allow(clippy::cast_possible_truncation)]
    pub fn parse_value(self, raw: &str) -> MetricValue {
        let raw = raw.trim();
        match raw.parse::<f64>() {
            Ok(number) if number.is_finite() => match self {
                Self::MarketCap => MetricValue::Whole(raw.parse().unwrap_or(number.round() as i64)),
                _ => MetricValue::Number(number),
            },
            _ => MetricValue::NotAvailable,
        }
    }
}

impl fmt::Display for FundamentalMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for FundamentalMetric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A reported metric value, or the `N/A` placeholder
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MetricValue {
    /// Ratio or per-share figure
    Number(f64),
    /// Whole-number figure such as market capitalization
    Whole(i64),
    #[default]
    NotAvailable,
}

impl MetricValue {
    pub fn is_available(self) -> bool {
        !matches!(self, Self::NotAvailable)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Whole(value) => write!(f, "{value}"),
            Self::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(value) => serializer.serialize_f64(*value),
            Self::Whole(value) => serializer.serialize_i64(*value),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Fundamentals keyed by metric, always holding every metric
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fundamentals {
    values: BTreeMap<FundamentalMetric, MetricValue>,
}

impl Fundamentals {
    /// Every metric set to `N/A`
    pub fn unavailable() -> Self {
        Self {
            values: FundamentalMetric::ALL
                .into_iter()
                .map(|metric| (metric, MetricValue::NotAvailable))
                .collect(),
        }
    }

    pub fn with(mut self, metric: FundamentalMetric, value: MetricValue) -> Self {
        self.values.insert(metric, value);
        self
    }

    pub fn get(&self, metric: FundamentalMetric) -> MetricValue {
        self.values.get(&metric).copied().unwrap_or_default()
    }

    /// Metrics in display order
    pub fn iter(&self) -> impl Iterator<Item = (FundamentalMetric, MetricValue)> + '_ {
        self.values.iter().map(|(metric, value)| (*metric, *value))
    }

    /// Number of metrics the provider actually reported
    pub fn reported(&self) -> usize {
        self.values.values().filter(|v| v.is_available()).count()
    }
}

impl Default for Fundamentals {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl fmt::Display for Fundamentals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (metric, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{metric}: {value}")?;
        }
        Ok(())
    }
}

/// Outcome of a successful analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub ticker: String,
    pub current_price: f64,
    /// Simple moving average, rounded to 2 decimals
    pub moving_average: f64,
    pub price_assessment: Assessment,
    /// Projected ROI in percent for a hypothetical +5% move
    pub roi_5: f64,
    /// Projected ROI in percent for a hypothetical +10% move
    pub roi_10: f64,
    pub fundamentals: Fundamentals,
    pub recommendation: Recommendation,
}

impl AnalysisResult {
    /// Formatted ROI for the +5% scenario, e.g. `5.0%`
    pub fn roi_5_percent_gain(&self) -> String {
        format!("{}%", format_number(self.roi_5))
    }

    /// Formatted ROI for the +10% scenario, e.g. `10.0%`
    pub fn roi_10_percent_gain(&self) -> String {
        format!("{}%", format_number(self.roi_10))
    }
}
