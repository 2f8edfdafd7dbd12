// =============================================================================
// Marketscope — Main Entry Point
// =============================================================================
//
// S&P 500 technical-analysis dashboard server: fetches daily OHLCV history
// from Yahoo Finance, computes the indicator series, and serves JSON, CSV
// export, and the static dashboard page.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod config;
mod export;
mod indicators;
mod provider;
mod types;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::DashboardConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║            Marketscope Dashboard — Starting Up           ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let mut config = DashboardConfig::load("dashboard_config.json").unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        DashboardConfig::default()
    });

    // Override the bind address from env if available.
    if let Ok(addr) = std::env::var("MARKETSCOPE_BIND_ADDR") {
        config.bind_addr = addr;
    }

    info!(
        bind_addr = %config.bind_addr,
        provider = %config.provider_base_url,
        default_symbol = %config.default_symbol,
        "Configuration resolved"
    );

    // ── 2. Build shared state ────────────────────────────────────────────
    let state = Arc::new(AppState::new(config));

    // ── 3. Ticker universe refresh loop ──────────────────────────────────
    // The universe starts as the builtin fallback list; the first successful
    // fetch replaces it, then it is re-fetched on the configured interval.
    let universe_state = state.clone();
    tokio::spawn(async move {
        loop {
            let (timeout_secs, refresh_hours) = {
                let config = universe_state.config.read();
                (config.provider_timeout_secs, config.universe_refresh_hours)
            };

            match provider::universe::fetch_sp500_symbols(timeout_secs).await {
                Ok(symbols) => {
                    info!(count = symbols.len(), "ticker universe refreshed");
                    universe_state.set_tickers(symbols);
                }
                Err(e) => {
                    warn!(error = %e, "ticker universe refresh failed — keeping previous list");
                }
            }

            tokio::time::sleep(tokio::time::Duration::from_secs(refresh_hours.max(1) * 3600))
                .await;
        }
    });

    // ── 4. Start the API server ──────────────────────────────────────────
    let bind_addr = state.config.read().bind_addr.clone();
    let api_state = state.clone();
    let bind_addr_clone = bind_addr.clone();

    tokio::spawn(async move {
        let app = api::rest::router(api_state);
        let listener = tokio::net::TcpListener::bind(&bind_addr_clone)
            .await
            .expect("Failed to bind API server");
        info!(addr = %bind_addr_clone, "API server listening");
        axum::serve(listener, app)
            .await
            .expect("API server failed");
    });

    info!("All subsystems running. Press Ctrl+C to stop.");

    // ── 5. Graceful shutdown ─────────────────────────────────────────────
    tokio::signal::ctrl_c().await?;
    warn!("Shutdown signal received — stopping");

    info!("Marketscope shut down complete.");
    Ok(())
}
