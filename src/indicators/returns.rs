// =============================================================================
// Percent Change
// =============================================================================
//
// Day-over-day fractional change of the closing price:
//
//   pc_t = (close_t - close_{t-1}) / close_{t-1}
//
// Expressed as a fraction, so close_t == close_{t-1} * (1 + pc_t) holds
// exactly. Row 0 has no predecessor and is undefined.

/// Compute the percent-change series, index-aligned with `closes`.
///
/// A row is `None` when it is the first row, the previous close is zero, or
/// the result is non-finite.
pub fn percent_change(closes: &[f64]) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];

    for i in 1..closes.len() {
        let prev = closes[i - 1];
        if prev == 0.0 {
            continue;
        }
        let change = (closes[i] - prev) / prev;
        if change.is_finite() {
            out[i] = Some(change);
        }
    }

    out
}
