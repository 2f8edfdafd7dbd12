// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band
// (SMA + k*σ), and a lower band (SMA - k*σ), where σ is the sample standard
// deviation (ddof = 1) of the closes inside the window.
//
// For every defined row: upper >= middle >= lower.
// =============================================================================

use crate::indicators::sma::sma;

/// Index-aligned Bollinger Band series.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// All three returned series have exactly `closes.len()` elements and are
/// defined from index `window - 1` onwards.
///
/// # Edge cases
/// - `window < 2` => all `None` (sample deviation needs two points)
/// - `closes.len() < window` => all `None`
/// - A non-finite mean or deviation yields `None` for that row.
pub fn bollinger(closes: &[f64], window: usize, num_std: f64) -> BollingerSeries {
    let len = closes.len();
    let mut series = BollingerSeries {
        upper: vec![None; len],
        middle: vec![None; len],
        lower: vec![None; len],
    };

    if window < 2 || len < window {
        return series;
    }

    series.middle = sma(closes, window);

    for (i, chunk) in closes.windows(window).enumerate() {
        let row = i + window - 1;
        let Some(mean) = series.middle[row] else {
            continue;
        };

        // Sample variance: divide by (window - 1).
        let variance = chunk.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
            / (window as f64 - 1.0);
        let std_dev = variance.sqrt();
        if !std_dev.is_finite() {
            series.middle[row] = None;
            continue;
        }

        series.upper[row] = Some(mean + num_std * std_dev);
        series.lower[row] = Some(mean - num_std * std_dev);
    }

    series
}
