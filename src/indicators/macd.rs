// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   MACD line  = EMA(fast) - EMA(slow)
//   Signal     = EMA(signal) of the MACD line
//   Histogram  = MACD line - Signal
//
// The MACD line is defined once the slow EMA is (index `slow - 1`); the
// signal and histogram need a further `signal - 1` rows on top of that.
// =============================================================================

use crate::indicators::ema::ema;

/// Index-aligned MACD series.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// Compute the MACD line, signal line, and histogram for `closes`.
///
/// All three series have exactly `closes.len()` elements.
///
/// # Edge cases
/// - Any zero window, or `fast >= slow` => all `None` (degenerate parameters)
/// - `closes.len() < slow` => all `None`
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let len = closes.len();
    let mut series = MacdSeries {
        macd: vec![None; len],
        signal: vec![None; len],
        histogram: vec![None; len],
    };

    if fast == 0 || slow == 0 || signal == 0 || fast >= slow || len < slow {
        return series;
    }

    let ema_fast = ema(closes, fast);
    let ema_slow = ema(closes, slow);

    for i in 0..len {
        if let (Some(f), Some(s)) = (ema_fast[i], ema_slow[i]) {
            series.macd[i] = Some(f - s);
        }
    }

    // The MACD line is a contiguous run of defined values starting at the
    // first row where the slow EMA exists. Collect that run and smooth it.
    let offset = match series.macd.iter().position(|v| v.is_some()) {
        Some(idx) => idx,
        None => return series,
    };
    let line: Vec<f64> = series.macd[offset..]
        .iter()
        .map_while(|v| *v)
        .collect();

    let signal_line = ema(&line, signal);
    for (j, value) in signal_line.into_iter().enumerate() {
        let i = offset + j;
        series.signal[i] = value;
        if let (Some(m), Some(s)) = (series.macd[i], value) {
            series.histogram[i] = Some(m - s);
        }
    }

    series
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macd_insufficient_data() {
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let out = macd(&closes, 12, 26, 9);
        assert!(out.macd.iter().all(|v| v.is_none()));
        assert!(out.signal.iter().all(|v| v.is_none()));
        assert!(out.histogram.iter().all(|v| v.is_none()));
    }

    #[test]
    fn macd_degenerate_windows() {
        let closes: Vec<f64> = (1..=50).map(|x| x as f64).collect();
        assert!(macd(&closes, 0, 26, 9).macd.iter().all(|v| v.is_none()));
        assert!(macd(&closes, 26, 12, 9).macd.iter().all(|v| v.is_none()));
        assert!(macd(&closes, 12, 26, 0).macd.iter().all(|v| v.is_none()));
    }

    #[test]
    fn macd_warmup_boundaries() {
        let closes: Vec<f64> = (1..=60).map(|x| (x as f64 * 0.3).sin() * 10.0 + 100.0).collect();
        let out = macd(&closes, 12, 26, 9);
        assert_eq!(out.macd.len(), 60);

        // MACD line appears with the slow EMA.
        assert!(out.macd[24].is_none());
        assert!(out.macd[25].is_some());

        // Signal needs `signal` MACD values: first defined at 25 + 9 - 1 = 33.
        assert!(out.signal[32].is_none());
        assert!(out.signal[33].is_some());
        assert!(out.histogram[33].is_some());
    }

    #[test]
    fn macd_flat_series_is_zero() {
        let out = macd(&[100.0; 60], 12, 26, 9);
        for v in out.macd.iter().flatten() {
            assert!(v.abs() < 1e-10);
        }
        for v in out.histogram.iter().flatten() {
            assert!(v.abs() < 1e-10);
        }
    }

    #[test]
    fn macd_positive_in_uptrend() {
        // In a sustained uptrend the fast EMA sits above the slow EMA.
        let closes: Vec<f64> = (1..=80).map(|x| x as f64).collect();
        let out = macd(&closes, 12, 26, 9);
        let last = out.macd.last().unwrap().unwrap();
        assert!(last > 0.0, "expected positive MACD, got {last}");
    }

    #[test]
    fn macd_histogram_is_line_minus_signal() {
        let closes: Vec<f64> = (1..=70).map(|x| (x as f64 * 0.7).cos() * 4.0 + 50.0).collect();
        let out = macd(&closes, 12, 26, 9);
        for i in 0..closes.len() {
            if let (Some(m), Some(s), Some(h)) = (out.macd[i], out.signal[i], out.histogram[i]) {
                assert!((h - (m - s)).abs() < 1e-12);
            }
        }
    }
}
