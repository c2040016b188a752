//! Price arithmetic: ROI, simple moving average and the ±5% assessment

use serde::{Deserialize, Serialize};
use std::fmt;
use ta::{Next, indicators::SimpleMovingAverage};

/// Default look-back for the moving average, in trading days
pub const DEFAULT_SMA_WINDOW: usize = 20;

/// Relative distance from the average that still counts as "near"
const ASSESSMENT_BAND: f64 = 0.05;

/// Where the current price sits relative to its moving average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    /// No usable average (zero)
    InsufficientData,
    /// More than 5% above the average
    AboveAverage,
    /// More than 5% below the average
    BelowAverage,
    /// Within ±5% of the average
    NearAverage,
}

impl Assessment {
    pub fn label(self) -> &'static str {
        match self {
            Self::InsufficientData => "Insufficient data for assessment",
            Self::AboveAverage => "Above average (Potentially Overvalued)",
            Self::BelowAverage => "Below average (Potential Discount)",
            Self::NearAverage => "Near average (Stable)",
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Round to `places` decimals.
///
/// Works on the exact binary value and breaks ties to even, so `100.125`
/// rounds to `100.12` while `100.126` rounds to `100.13`.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Return on investment in percent, rounded to 2 decimals.
///
/// A zero buy price yields `0.0` instead of a division by zero.
pub fn calculate_roi(buy_price: f64, sell_price: f64) -> f64 {
    if buy_price == 0.0 {
        return 0.0;
    }
    round_to((sell_price - buy_price) / buy_price * 100.0, 2)
}

/// Simple moving average over the most recent `window` prices.
///
/// `prices` is chronological (oldest first). With fewer than `window` prices
/// every price is averaged; an empty slice yields `0.0`. A zero window also
/// averages everything. The result is not rounded.
pub fn calculate_moving_average(prices: &[f64], window: usize) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }

    let period = if window == 0 {
        prices.len()
    } else {
        window.min(prices.len())
    };

    // The indicator only fails for a zero period, which is ruled out above.
    let Ok(mut sma) = SimpleMovingAverage::new(period) else {
        return prices.iter().sum::<f64>() / prices.len() as f64;
    };

    prices[prices.len() - period..]
        .iter()
        .fold(0.0, |_, &price| sma.next(price))
}

/// Compare a price against its moving average using a fixed ±5% band
pub fn assess_price_against_average(current_price: f64, moving_average: f64) -> Assessment {
    if moving_average == 0.0 {
        Assessment::InsufficientData
    } else if current_price > moving_average * (1.0 + ASSESSMENT_BAND) {
        Assessment::AboveAverage
    } else if current_price < moving_average * (1.0 - ASSESSMENT_BAND) {
        Assessment::BelowAverage
    } else {
        Assessment::NearAverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roi() {
        assert_eq!(calculate_roi(100.0, 105.0), 5.0);
        assert_eq!(calculate_roi(100.0, 110.0), 10.0);
        assert_eq!(calculate_roi(100.0, 90.0), -10.0);
        assert_eq!(calculate_roi(3.0, 4.0), 33.33);
    }

    #[test]
    fn test_roi_zero_buy_price() {
        assert_eq!(calculate_roi(0.0, 100.0), 0.0);
        assert_eq!(calculate_roi(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_moving_average_empty() {
        assert_eq!(calculate_moving_average(&[], DEFAULT_SMA_WINDOW), 0.0);
    }

    #[test]
    fn test_moving_average_shorter_than_window() {
        let prices = [10.0, 20.0, 30.0];
        assert_eq!(calculate_moving_average(&prices, DEFAULT_SMA_WINDOW), 20.0);
    }

    #[test]
    fn test_moving_average_uses_last_window() {
        let prices = vec![5.0; 25];
        assert_eq!(calculate_moving_average(&prices, DEFAULT_SMA_WINDOW), 5.0);

        // Old outliers fall out of the window
        let mut prices = vec![1000.0; 5];
        prices.extend([2.0, 4.0, 6.0]);
        assert_eq!(calculate_moving_average(&prices, 3), 4.0);
    }

    #[test]
    fn test_moving_average_zero_window() {
        assert_eq!(calculate_moving_average(&[1.0, 2.0, 3.0, 6.0], 0), 3.0);
    }

    #[test]
    fn test_moving_average_is_not_rounded() {
        let sma = calculate_moving_average(&[1.0, 2.0, 2.0], DEFAULT_SMA_WINDOW);
        assert!((sma - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_assessment_insufficient_data() {
        for price in [0.0, 1.0, 94.0, 1_000_000.0] {
            assert_eq!(
                assess_price_against_average(price, 0.0),
                Assessment::InsufficientData
            );
        }
    }

    #[test]
    fn test_assessment_thresholds() {
        assert_eq!(
            assess_price_against_average(106.0, 100.0),
            Assessment::AboveAverage
        );
        assert_eq!(
            assess_price_against_average(94.0, 100.0),
            Assessment::BelowAverage
        );
        assert_eq!(
            assess_price_against_average(100.0, 100.0),
            Assessment::NearAverage
        );
        assert_eq!(
            assess_price_against_average(104.0, 100.0),
            Assessment::NearAverage
        );
        assert_eq!(
            assess_price_against_average(96.0, 100.0),
            Assessment::NearAverage
        );
    }

    #[test]
    fn test_assessment_labels() {
        assert_eq!(
            Assessment::BelowAverage.to_string(),
            "Below average (Potential Discount)"
        );
        assert_eq!(
            Assessment::InsufficientData.to_string(),
            "Insufficient data for assessment"
        );
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(202.568, 2), 202.57);
        assert_eq!(round_to(-1.005_1, 2), -1.01);
        assert_eq!(round_to(5.0, 2), 5.0);
    }

    #[test]
    fn test_round_to_ties_to_even() {
        assert_eq!(round_to(100.125, 2), 100.12);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert!(round_to(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_roi_tie_rounds_to_even() {
        assert_eq!(calculate_roi(100.0, 100.125), 0.12);
    }
}
