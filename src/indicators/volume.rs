// =============================================================================
// Dollar Volume
// =============================================================================
//
// Dollar volume is the cash value traded per row: close price × share volume.
// A row-wise transform with no look-back, so every row with finite inputs is
// defined.

use crate::types::PriceRow;

/// Compute the dollar-volume series, index-aligned with `rows`.
pub fn dollar_volume(rows: &[PriceRow]) -> Vec<Option<f64>> {
    rows.iter()
        .map(|row| {
            let value = row.close * row.volume;
            value.is_finite().then_some(value)
        })
        .collect()
}
