// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// The unweighted mean of the trailing `window` closes:
//
//   SMA_t = (close_{t-window+1} + ... + close_t) / window
//
// The output is index-aligned with the input: the first `window - 1` slots
// are `None` (not enough history), every later slot holds the trailing mean.
// =============================================================================

/// Compute the SMA series for the given `values` and look-back `window`.
///
/// The returned vector always has exactly `values.len()` elements.
///
/// # Edge cases
/// - `window == 0` => all `None` (division-by-zero guard)
/// - `values.len() < window` => all `None`
/// - A non-finite mean (NaN/inf in the window) yields `None` for that row.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    for (i, chunk) in values.windows(window).enumerate() {
        let mean = chunk.iter().sum::<f64>() / window as f64;
        if mean.is_finite() {
            out[i + window - 1] = Some(mean);
        }
    }

    out
}
