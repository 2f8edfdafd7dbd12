// =============================================================================
// Relative Strength Index (RSI) — rolling-mean variant
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute one-day deltas from consecutive closes.
// Step 2 — Split each delta into gain (delta > 0) and loss (delta < 0).
// Step 3 — Average gains and losses with a simple trailing-window mean.
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// A perfectly flat window has neither gains nor losses; RS is 0/0 and the
// row is undefined. All-gain windows clamp to 100, all-loss windows to 0.
//
// Thresholds:  RSI > 70 => OVERBOUGHT,  RSI < 30 => OVERSOLD.
// =============================================================================

/// Compute the full RSI series for the given `closes` and `window`.
///
/// The returned vector has exactly `closes.len()` elements; the first
/// `window` slots are `None` (deltas start at row 1, and a full window of
/// them is needed before the first value).
///
/// # Edge cases
/// - `window == 0` => all `None`
/// - `closes.len() < window + 1` => all `None`
/// - Flat window (no gains, no losses) => `None` for that row
/// - Defined values always lie in [0, 100].
pub fn rsi(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if window == 0 || closes.len() < window + 1 {
        return out;
    }

    // deltas[i] = closes[i + 1] - closes[i]
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    let window_f = window as f64;
    for t in window..closes.len() {
        // Trailing `window` deltas ending at row t.
        let (sum_gain, sum_loss) = deltas[t - window..t]
            .iter()
            .fold((0.0_f64, 0.0_f64), |(g, l), &d| {
                if d > 0.0 {
                    (g + d, l)
                } else {
                    (g, l + d.abs())
                }
            });

        out[t] = rsi_from_averages(sum_gain / window_f, sum_loss / window_f);
    }

    out
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// - If both averages are zero the ratio is 0/0 — undefined.
/// - If average loss is zero (only gains), RSI clamps to 100.0.
/// - Returns `None` when the result is non-finite.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_gain == 0.0 && avg_loss == 0.0 {
        return None;
    }

    let value = if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    value.is_finite().then_some(value)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_input() {
        assert!(rsi(&[], 14).is_empty());
    }

    #[test]
    fn rsi_window_zero() {
        assert_eq!(rsi(&[1.0, 2.0, 3.0], 0), vec![None, None, None]);
    }

    #[test]
    fn rsi_insufficient_data() {
        // Need window+1 closes (window deltas). 14 closes => 13 deltas < 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert!(rsi(&closes, 14).iter().all(|v| v.is_none()));
    }

    #[test]
    fn rsi_warmup_is_undefined() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let out = rsi(&closes, 14);
        assert_eq!(out.len(), 30);
        assert!(out[..14].iter().all(|v| v.is_none()));
        assert!(out[14..].iter().all(|v| v.is_some()));
    }

    #[test]
    fn rsi_all_gains() {
        // Strictly ascending prices => RSI should be 100.
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        for v in rsi(&closes, 14).iter().flatten() {
            assert!((v - 100.0).abs() < 1e-10, "expected 100.0, got {v}");
        }
    }

    #[test]
    fn rsi_all_losses() {
        // Strictly descending prices => RSI should be 0.
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        for v in rsi(&closes, 14).iter().flatten() {
            assert!(v.abs() < 1e-10, "expected 0.0, got {v}");
        }
    }

    #[test]
    fn rsi_flat_market_is_undefined() {
        // No price change at all => 0/0 ratio, no defined value.
        let closes = vec![100.0; 30];
        assert!(rsi(&closes, 14).iter().all(|v| v.is_none()));
    }

    #[test]
    fn rsi_range_check() {
        // Arbitrary data — defined RSI must always be in [0, 100].
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13, 44.01, 44.93,
            45.61, 46.28, 46.00,
        ];
        for v in rsi(&closes, 14).iter().flatten() {
            assert!((0.0..=100.0).contains(v), "RSI {v} out of range");
        }
    }

    #[test]
    fn rsi_half_gains_half_losses() {
        // Alternating +1/-1 deltas over an even window => avg gain == avg loss
        // => RS = 1 => RSI = 50.
        let mut closes = vec![100.0];
        for i in 0..20 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 { last + 1.0 } else { last - 1.0 });
        }
        let out = rsi(&closes, 4);
        for v in out.iter().flatten() {
            assert!((v - 50.0).abs() < 1e-10, "expected 50.0, got {v}");
        }
    }
}
