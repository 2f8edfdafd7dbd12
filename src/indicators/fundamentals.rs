// =============================================================================
// Price-to-Earnings Ratio
// =============================================================================
//
// P/E is a pass-through: each close divided by the externally supplied
// trailing earnings-per-share. Nothing is computed from the series itself,
// and a missing or non-positive EPS leaves the whole series undefined.

/// Compute the P/E series for `closes` against a trailing EPS figure.
pub fn pe_ratio(closes: &[f64], earnings_per_share: Option<f64>) -> Vec<Option<f64>> {
    let eps = match earnings_per_share {
        Some(eps) if eps > 0.0 && eps.is_finite() => eps,
        _ => return vec![None; closes.len()],
    };

    closes
        .iter()
        .map(|&close| {
            let ratio = close / eps;
            ratio.is_finite().then_some(ratio)
        })
        .collect()
}
