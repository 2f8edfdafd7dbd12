// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators rendered by the
// dashboard. Every series is a `Vec<Option<f64>>` with exactly one slot per
// input price row: `None` marks warm-up rows (insufficient history) or
// numerically undefined values, and serializes as JSON `null`. Insufficient
// history is never an error.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod fundamentals;
pub mod macd;
pub mod returns;
pub mod rsi;
pub mod sma;
pub mod volatility;
pub mod volume;

use serde::Serialize;

use crate::config::IndicatorParams;
use crate::types::PriceRow;

/// Fast simple-moving-average window. Fixed: the serialized field name
/// `sma_20` is part of the wire contract.
pub const SMA_FAST_WINDOW: usize = 20;
/// Slow simple-moving-average window, paired with `sma_50` on the wire.
pub const SMA_SLOW_WINDOW: usize = 50;

/// Every indicator series for one request, index-aligned one-to-one with the
/// request's `PriceRow` sequence. Field names are the exact series names the
/// dashboard and CSV export consume.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorBundle {
    pub garman_klass: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub bollinger_upper: Vec<Option<f64>>,
    pub bollinger_middle: Vec<Option<f64>>,
    pub bollinger_lower: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
    pub dollar_volume: Vec<Option<f64>>,
    pub percent_change: Vec<Option<f64>>,
    pub sma_20: Vec<Option<f64>>,
    pub sma_50: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
    pub pe_ratio: Vec<Option<f64>>,
}

/// Compute every indicator series for the given price rows.
///
/// `earnings_per_share` is the externally supplied trailing EPS used by the
/// P/E pass-through; `None` leaves that series fully undefined.
pub fn compute_all(
    rows: &[PriceRow],
    earnings_per_share: Option<f64>,
    params: &IndicatorParams,
) -> IndicatorBundle {
    let closes = PriceRow::closes(rows);

    let bands = bollinger::bollinger(&closes, params.bollinger_window, params.bollinger_num_std);
    let macd_series = macd::macd(
        &closes,
        params.macd_fast,
        params.macd_slow,
        params.macd_signal,
    );

    IndicatorBundle {
        garman_klass: volatility::garman_klass(rows),
        rsi: rsi::rsi(&closes, params.rsi_window),
        bollinger_upper: bands.upper,
        bollinger_middle: bands.middle,
        bollinger_lower: bands.lower,
        atr: atr::atr(rows, params.atr_window),
        dollar_volume: volume::dollar_volume(rows),
        percent_change: returns::percent_change(&closes),
        sma_20: sma::sma(&closes, SMA_FAST_WINDOW),
        sma_50: sma::sma(&closes, SMA_SLOW_WINDOW),
        macd: macd_series.macd,
        macd_signal: macd_series.signal,
        macd_histogram: macd_series.histogram,
        pe_ratio: fundamentals::pe_ratio(&closes, earnings_per_share),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rows(n: usize) -> Vec<PriceRow> {
        (0..n)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.4).sin() * 8.0;
                PriceRow::new(
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                    base - 0.5,
                    base + 2.0,
                    base - 2.0,
                    base + 0.5,
                    10_000.0 + i as f64,
                )
            })
            .collect()
    }

    #[test]
    fn bundle_series_are_input_aligned() {
        let rows = rows(60);
        let bundle = compute_all(&rows, Some(6.5), &IndicatorParams::default());

        for (name, series) in [
            ("garman_klass", &bundle.garman_klass),
            ("rsi", &bundle.rsi),
            ("bollinger_upper", &bundle.bollinger_upper),
            ("bollinger_middle", &bundle.bollinger_middle),
            ("bollinger_lower", &bundle.bollinger_lower),
            ("atr", &bundle.atr),
            ("dollar_volume", &bundle.dollar_volume),
            ("percent_change", &bundle.percent_change),
            ("sma_20", &bundle.sma_20),
            ("sma_50", &bundle.sma_50),
            ("macd", &bundle.macd),
            ("macd_signal", &bundle.macd_signal),
            ("macd_histogram", &bundle.macd_histogram),
            ("pe_ratio", &bundle.pe_ratio),
        ] {
            assert_eq!(series.len(), rows.len(), "series {name} misaligned");
        }
    }

    #[test]
    fn bundle_serializes_expected_names_and_nulls() {
        let rows = rows(25);
        let bundle = compute_all(&rows, None, &IndicatorParams::default());
        let json = serde_json::to_value(&bundle).unwrap();

        for name in [
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
        ] {
            assert!(json.get(name).is_some(), "missing series {name}");
        }

        // Warm-up rows surface as JSON null, not zero.
        assert!(json["sma_20"][0].is_null());
        // sma_50 never warms up on 25 rows.
        assert!(json["sma_50"].as_array().unwrap().iter().all(|v| v.is_null()));
        // No EPS supplied: the whole P/E series is null.
        assert!(json["pe_ratio"].as_array().unwrap().iter().all(|v| v.is_null()));
    }

    #[test]
    fn bundle_short_series_is_all_warmup_without_error() {
        let rows = rows(3);
        let bundle = compute_all(&rows, Some(4.0), &IndicatorParams::default());
        assert!(bundle.rsi.iter().all(|v| v.is_none()));
        assert!(bundle.sma_20.iter().all(|v| v.is_none()));
        // Row-wise transforms still produce values.
        assert!(bundle.dollar_volume.iter().all(|v| v.is_some()));
        assert!(bundle.pe_ratio.iter().all(|v| v.is_some()));
    }
}
