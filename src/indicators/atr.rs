// =============================================================================
// Average True Range (ATR) — trailing simple mean
// =============================================================================
//
// ATR measures market volatility by decomposing the entire range of a bar.
//
// True Range (TR) for each row:
//   TR_0 = H_0 - L_0                       (no previous close exists)
//   TR_t = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is the trailing simple mean of TR over `window` rows, so the first
// `window - 1` slots of the output are `None`.
// =============================================================================

use crate::indicators::sma::sma;
use crate::types::PriceRow;

/// Compute the ATR series from a slice of daily OHLCV rows.
///
/// The returned vector always has exactly `rows.len()` elements.
///
/// # Edge cases
/// - `window == 0` => all `None`
/// - `rows.len() < window` => all `None`
/// - Non-finite true ranges poison the affected windows (`None` rows).
pub fn atr(rows: &[PriceRow], window: usize) -> Vec<Option<f64>> {
    if window == 0 || rows.len() < window {
        return vec![None; rows.len()];
    }

    let true_ranges = true_range_series(rows);
    sma(&true_ranges, window)
}

/// The per-row true range, index-aligned with `rows`.
fn true_range_series(rows: &[PriceRow]) -> Vec<f64> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let hl = row.high - row.low;
            if i == 0 {
                return hl;
            }
            let prev_close = rows[i - 1].close;
            let hc = (row.high - prev_close).abs();
            let lc = (row.low - prev_close).abs();
            hl.max(hc).max(lc)
        })
        .collect()
}
