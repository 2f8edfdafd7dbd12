// =============================================================================
// Dashboard Configuration — JSON settings with serde defaults
// =============================================================================
//
// Central configuration for the Marketscope server. Every field carries a
// serde default so that older config files keep deserialising after new
// fields are added. A missing or corrupt file is never fatal; the caller
// falls back to `DashboardConfig::default()` with a warning.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_provider_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

fn default_provider_timeout_secs() -> u64 {
    10
}

fn default_symbol() -> String {
    "AAPL".to_string()
}

fn default_start_date() -> String {
    "2024-01-01".to_string()
}

fn default_universe_refresh_hours() -> u64 {
    24
}

fn default_rsi_window() -> usize {
    20
}

fn default_bollinger_window() -> usize {
    20
}

fn default_bollinger_num_std() -> f64 {
    2.0
}

fn default_atr_window() -> usize {
    20
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

// =============================================================================
// IndicatorParams
// =============================================================================

/// Tunable look-back parameters for the indicator engine.
///
/// The two simple-moving-average windows (20 and 50) are deliberately not
/// configurable: the response field names `sma_20` / `sma_50` are part of the
/// wire contract consumed by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorParams {
    /// Trailing window for the rolling-mean RSI.
    #[serde(default = "default_rsi_window")]
    pub rsi_window: usize,

    /// Rolling window for the Bollinger middle band and deviation.
    #[serde(default = "default_bollinger_window")]
    pub bollinger_window: usize,

    /// Band distance in standard deviations.
    #[serde(default = "default_bollinger_num_std")]
    pub bollinger_num_std: f64,

    /// Trailing window for the ATR simple mean.
    #[serde(default = "default_atr_window")]
    pub atr_window: usize,

    /// MACD fast EMA window.
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    /// MACD slow EMA window.
    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    /// MACD signal-line EMA window.
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_window: default_rsi_window(),
            bollinger_window: default_bollinger_window(),
            bollinger_num_std: default_bollinger_num_std(),
            atr_window: default_atr_window(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
        }
    }
}

// =============================================================================
// DashboardConfig
// =============================================================================

/// Top-level configuration for the Marketscope server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the market-data provider (Yahoo Finance query host).
    #[serde(default = "default_provider_base_url")]
    pub provider_base_url: String,

    /// Per-request timeout for outbound provider calls, in seconds.
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// Symbol used when a request omits the `symbol` query parameter.
    #[serde(default = "default_symbol")]
    pub default_symbol: String,

    /// Start date (`YYYY-MM-DD`) used when a request omits `start`.
    #[serde(default = "default_start_date")]
    pub default_start_date: String,

    /// How often the S&P 500 ticker universe is re-fetched, in hours.
    #[serde(default = "default_universe_refresh_hours")]
    pub universe_refresh_hours: u64,

    /// Indicator look-back parameters.
    #[serde(default)]
    pub indicator_params: IndicatorParams,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            provider_base_url: default_provider_base_url(),
            provider_timeout_secs: default_provider_timeout_secs(),
            default_symbol: default_symbol(),
            default_start_date: default_start_date(),
            universe_refresh_hours: default_universe_refresh_hours(),
            indicator_params: IndicatorParams::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist or fails to parse, returns an error so the
    /// caller can fall back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dashboard config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse dashboard config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            default_symbol = %config.default_symbol,
            "dashboard config loaded"
        );

        Ok(config)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000");
        assert_eq!(cfg.provider_base_url, "https://query1.finance.yahoo.com");
        assert_eq!(cfg.provider_timeout_secs, 10);
        assert_eq!(cfg.default_symbol, "AAPL");
        assert_eq!(cfg.default_start_date, "2024-01-01");
        assert_eq!(cfg.universe_refresh_hours, 24);
        assert_eq!(cfg.indicator_params.rsi_window, 20);
        assert_eq!(cfg.indicator_params.bollinger_window, 20);
        assert!((cfg.indicator_params.bollinger_num_std - 2.0).abs() < f64::EPSILON);
        assert_eq!(cfg.indicator_params.atr_window, 20);
        assert_eq!(cfg.indicator_params.macd_fast, 12);
        assert_eq!(cfg.indicator_params.macd_slow, 26);
        assert_eq!(cfg.indicator_params.macd_signal, 9);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.default_symbol, "AAPL");
        assert_eq!(cfg.indicator_params.macd_slow, 26);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "bind_addr": "127.0.0.1:8080", "indicator_params": { "rsi_window": 14 } }"#;
        let cfg: DashboardConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.indicator_params.rsi_window, 14);
        // Untouched fields fall back to defaults.
        assert_eq!(cfg.indicator_params.bollinger_window, 20);
        assert_eq!(cfg.default_symbol, "AAPL");
    }

    #[test]
    fn roundtrip_serialisation() {
        let cfg = DashboardConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: DashboardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.bind_addr, cfg2.bind_addr);
        assert_eq!(cfg.indicator_params.atr_window, cfg2.indicator_params.atr_window);
    }
}
