// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (window + 1)
//   EMA_t      = value_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The very first EMA value is seeded with the SMA of the first `window`
// values and lands at index `window - 1`; earlier slots are `None`.
// =============================================================================

/// Compute the EMA series for the given `values` slice and look-back `window`.
///
/// The returned vector always has exactly `values.len()` elements so that it
/// stays index-aligned with the input series.
///
/// # Edge cases
/// - `window == 0` => all `None` (division-by-zero guard)
/// - `values.len() < window` => all `None`
/// - A non-finite intermediate value stops the series; remaining slots stay
///   `None` — downstream consumers should not trust a broken tail.
pub fn ema(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let multiplier = 2.0 / (window as f64 + 1.0);

    // Seed: SMA of the first `window` values.
    let seed: f64 = values[..window].iter().sum::<f64>() / window as f64;
    if !seed.is_finite() {
        return out;
    }
    out[window - 1] = Some(seed);

    let mut prev = seed;
    for (i, &value) in values.iter().enumerate().skip(window) {
        let next = value * multiplier + prev * (1.0 - multiplier);
        if !next.is_finite() {
            break;
        }
        out[i] = Some(next);
        prev = next;
    }

    out
}
