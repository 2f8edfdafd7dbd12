// =============================================================================
// Central Application State — Marketscope Dashboard Server
// =============================================================================
//
// Request handling is stateless: every request fetches, computes, and
// responds on its own. The only shared mutable state is the configuration
// and the cached ticker universe, both behind parking_lot::RwLock and
// written only by the startup path and the background refresh task.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::DashboardConfig;
use crate::provider::{universe, YahooClient};

/// Central application state shared across all handlers via `Arc<AppState>`.
pub struct AppState {
    // ── Configuration ───────────────────────────────────────────────────
    pub config: RwLock<DashboardConfig>,

    // ── Market data provider ────────────────────────────────────────────
    pub provider: Arc<YahooClient>,

    // ── Ticker universe (symbol selector contents) ──────────────────────
    tickers: RwLock<Vec<String>>,

    // ── Operational counters ────────────────────────────────────────────
    requests_served: AtomicU64,
    start_time: std::time::Instant,
}

impl AppState {
    /// Construct a new `AppState` from the given configuration.
    ///
    /// The ticker universe starts as the builtin fallback list and is
    /// replaced by the background refresh task after the first successful
    /// fetch. The returned value is typically wrapped in `Arc` immediately.
    pub fn new(config: DashboardConfig) -> Self {
        let provider = Arc::new(YahooClient::new(
            config.provider_base_url.clone(),
            config.provider_timeout_secs,
        ));

        let fallback: Vec<String> = universe::FALLBACK_SYMBOLS
            .iter()
            .map(|s| s.to_string())
            .collect();

        Self {
            config: RwLock::new(config),
            provider,
            tickers: RwLock::new(fallback),
            requests_served: AtomicU64::new(0),
            start_time: std::time::Instant::now(),
        }
    }

    // ── Ticker universe ─────────────────────────────────────────────────

    /// Replace the cached universe. The list is stored sorted ascending and
    /// de-duplicated regardless of what the fetch produced.
    pub fn set_tickers(&self, mut symbols: Vec<String>) {
        symbols.sort();
        symbols.dedup();
        *self.tickers.write() = symbols;
    }

    /// Snapshot of the current universe for the API layer.
    pub fn tickers_snapshot(&self) -> Vec<String> {
        self.tickers.read().clone()
    }

    /// Number of symbols currently cached.
    pub fn universe_size(&self) -> usize {
        self.tickers.read().len()
    }

    // ── Operational counters ────────────────────────────────────────────

    /// Count one served data request (health endpoint reporting).
    pub fn record_request(&self) -> u64 {
        self.requests_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
