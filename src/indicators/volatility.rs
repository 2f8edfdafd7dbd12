// =============================================================================
// Garman-Klass Volatility
// =============================================================================
//
// Closed-form per-row volatility estimator that uses the full intraday range
// instead of close-to-close moves:
//
//   GK = sqrt( 0.5 * ln(H/L)^2 - (2*ln2 - 1) * ln(C/O)^2 )
//
// Each row is estimated independently; no rolling window is involved.
// =============================================================================

use std::f64::consts::LN_2;

use crate::types::PriceRow;

/// Compute the Garman-Klass volatility estimate for every row.
///
/// The returned vector has exactly `rows.len()` elements. A row is `None`
/// when any price is non-positive (the logs are undefined) or when the
/// radicand goes negative, which can happen on large open-to-close gaps
/// inside a narrow range.
pub fn garman_klass(rows: &[PriceRow]) -> Vec<Option<f64>> {
    let co_coefficient = 2.0 * LN_2 - 1.0;

    rows.iter()
        .map(|row| {
            if row.open <= 0.0 || row.high <= 0.0 || row.low <= 0.0 || row.close <= 0.0 {
                return None;
            }

            let log_hl = (row.high / row.low).ln();
            let log_co = (row.close / row.open).ln();
            let radicand = 0.5 * log_hl * log_hl - co_coefficient * log_co * log_co;

            if radicand.is_finite() && radicand >= 0.0 {
                Some(radicand.sqrt())
            } else {
                None
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(day: u32, open: f64, high: f64, low: f64, close: f64) -> PriceRow {
        PriceRow::new(
            NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            open,
            high,
            low,
            close,
            500.0,
        )
    }

    #[test]
    fn gk_empty_input() {
        assert!(garman_klass(&[]).is_empty());
    }

    #[test]
    fn gk_alignment() {
        let rows: Vec<PriceRow> = (1..=5).map(|d| row(d, 100.0, 102.0, 99.0, 101.0)).collect();
        assert_eq!(garman_klass(&rows).len(), 5);
    }

    #[test]
    fn gk_known_value() {
        // H/L = 102/99, C/O = 101/100.
        let rows = vec![row(1, 100.0, 102.0, 99.0, 101.0)];
        let log_hl = (102.0_f64 / 99.0).ln();
        let log_co = (101.0_f64 / 100.0).ln();
        let expected =
            (0.5 * log_hl * log_hl - (2.0 * LN_2 - 1.0) * log_co * log_co).sqrt();
        let out = garman_klass(&rows);
        assert!((out[0].unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn gk_doji_bar_is_zero() {
        // Open == high == low == close: both logs are zero.
        let rows = vec![row(1, 100.0, 100.0, 100.0, 100.0)];
        assert_eq!(garman_klass(&rows)[0], Some(0.0));
    }

    #[test]
    fn gk_wider_range_means_higher_estimate() {
        let narrow = row(1, 100.0, 101.0, 99.0, 100.0);
        let wide = row(2, 100.0, 110.0, 90.0, 100.0);
        let out = garman_klass(&[narrow, wide]);
        assert!(out[1].unwrap() > out[0].unwrap());
    }

    #[test]
    fn gk_negative_radicand_is_undefined() {
        // Large close/open move inside a razor-thin range drives the radicand
        // negative.
        let rows = vec![row(1, 100.0, 120.0, 119.9, 120.0)];
        assert_eq!(garman_klass(&rows)[0], None);
    }

    #[test]
    fn gk_non_positive_price_is_undefined() {
        let rows = vec![row(1, 0.0, 102.0, 99.0, 101.0)];
        assert_eq!(garman_klass(&rows)[0], None);
    }
}
