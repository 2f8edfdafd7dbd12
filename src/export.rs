// =============================================================================
// CSV Export
// =============================================================================
//
// Serialises the combined price + indicator table into a single CSV string.
// One row per trading day; undefined indicator cells are left empty so the
// file loads cleanly into spreadsheet tools.
// =============================================================================

use anyhow::{Context, Result};

use crate::indicators::IndicatorBundle;
use crate::types::PriceRow;

/// Column order after the OHLCV block. Matches the serialized field order of
/// [`IndicatorBundle`].
const INDICATOR_COLUMNS: &[&str] = &[
    "garman_klass",
    "rsi",
    "bollinger_upper",
    "bollinger_middle",
    "bollinger_lower",
    "atr",
    "dollar_volume",
    "percent_change",
    "sma_20",
    "sma_50",
    "macd",
    "macd_signal",
    "macd_histogram",
    "pe_ratio",
];

/// Render `rows` and their indicator series as a CSV document.
///
/// Every indicator series is index-aligned with `rows`; the caller
/// guarantees this by construction (both come from the same request).
pub fn to_csv(rows: &[PriceRow], indicators: &IndicatorBundle) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["date", "open", "high", "low", "close", "volume"];
    header.extend_from_slice(INDICATOR_COLUMNS);
    writer
        .write_record(&header)
        .context("failed to write CSV header")?;

    for (i, row) in rows.iter().enumerate() {
        let mut record = vec![
            row.date.to_string(),
            row.open.to_string(),
            row.high.to_string(),
            row.low.to_string(),
            row.close.to_string(),
            row.volume.to_string(),
        ];

        for series in [
            &indicators.garman_klass,
            &indicators.rsi,
            &indicators.bollinger_upper,
            &indicators.bollinger_middle,
            &indicators.bollinger_lower,
            &indicators.atr,
            &indicators.dollar_volume,
            &indicators.percent_change,
            &indicators.sma_20,
            &indicators.sma_50,
            &indicators.macd,
            &indicators.macd_signal,
            &indicators.macd_histogram,
            &indicators.pe_ratio,
        ] {
            record.push(cell(series.get(i).copied().flatten()));
        }

        writer
            .write_record(&record)
            .context("failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV writer: {e}"))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Format an optional value as a CSV cell; `None` is an empty field.
fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}
