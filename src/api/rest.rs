// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All data endpoints live under `/api/`. The dashboard page and its assets
// are served statically from `static/`.
//
// Error policy: malformed parameters are a 400, an empty result range is an
// explicit 404 empty-data response (never a partial payload), and provider
// failures surface as 502. Every error body is `{"error": "..."}`.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::export;
use crate::indicators::{self, IndicatorBundle};
use crate::types::PriceRow;

/// Error body returned when a range holds no trading days.
const NO_DATA_MESSAGE: &str = "No data available for the specified date range";

/// Handler error: status plus a JSON `{"error": ...}` body.
type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
}

// =============================================================================
// Router construction
// =============================================================================

/// Build the full router: REST API, CORS middleware, shared state, and the
/// static dashboard assets.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/tickers", get(tickers))
        .route("/api/get_stock_data", get(get_stock_data))
        .route("/api/export_csv", get(export_csv))
        .route_service("/", ServeFile::new("static/dashboard.html"))
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Request parameters
// =============================================================================

/// Query parameters shared by the data and export endpoints. Every field is
/// optional; defaults come from the runtime configuration (end date defaults
/// to today, UTC).
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
}

/// Fully resolved request scope.
#[derive(Debug, PartialEq)]
struct RequestScope {
    symbol: String,
    start: NaiveDate,
    end: NaiveDate,
}

/// Resolve query parameters against configured defaults and validate them.
fn resolve_query(
    query: &RangeQuery,
    default_symbol: &str,
    default_start: &str,
    today: NaiveDate,
) -> Result<RequestScope, String> {
    let symbol = query
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default_symbol)
        .to_uppercase();

    let start_str = query
        .start
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default_start);
    let start = parse_date(start_str)?;

    let end = match query.end.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_date(s)?,
        None => today,
    };

    if start > end {
        return Err(format!("start date {start} is after end date {end}"));
    }

    Ok(RequestScope { symbol, start, end })
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

// =============================================================================
// Health (public)
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    requests_served: u64,
    universe_size: usize,
    server_time: i64,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.uptime_secs(),
        requests_served: state.requests_served(),
        universe_size: state.universe_size(),
        server_time: Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Ticker universe
// =============================================================================

async fn tickers(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.tickers_snapshot())
}

// =============================================================================
// Combined stock data + indicators
// =============================================================================

#[derive(Serialize)]
struct StockDataResponse {
    stock_data: Vec<PriceRow>,
    indicators: IndicatorBundle,
}

async fn get_stock_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<StockDataResponse>, ApiError> {
    let (rows, bundle, scope) = fetch_and_compute(&state, &query).await?;

    info!(
        symbol = %scope.symbol,
        start = %scope.start,
        end = %scope.end,
        rows = rows.len(),
        "stock data prepared"
    );

    Ok(Json(StockDataResponse {
        stock_data: rows,
        indicators: bundle,
    }))
}

// =============================================================================
// CSV export
// =============================================================================

#[derive(Serialize)]
struct CsvExportResponse {
    csv_data: String,
    filename: String,
}

async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<CsvExportResponse>, ApiError> {
    let (rows, bundle, scope) = fetch_and_compute(&state, &query).await?;

    let csv_data = export::to_csv(&rows, &bundle).map_err(|e| {
        warn!(error = %e, symbol = %scope.symbol, "CSV serialisation failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to serialise CSV")
    })?;

    info!(symbol = %scope.symbol, rows = rows.len(), "CSV export prepared");

    Ok(Json(CsvExportResponse {
        csv_data,
        filename: format!("{}_data.csv", scope.symbol),
    }))
}

// =============================================================================
// Shared fetch + compute pipeline
// =============================================================================

/// The request pipeline shared by the data and export endpoints:
/// resolve parameters, fetch history, fetch fundamentals (best-effort),
/// compute every indicator series.
async fn fetch_and_compute(
    state: &AppState,
    query: &RangeQuery,
) -> Result<(Vec<PriceRow>, IndicatorBundle, RequestScope), ApiError> {
    let (default_symbol, default_start, params) = {
        let config = state.config.read();
        (
            config.default_symbol.clone(),
            config.default_start_date.clone(),
            config.indicator_params.clone(),
        )
    };

    let scope = resolve_query(query, &default_symbol, &default_start, Utc::now().date_naive())
        .map_err(|msg| api_error(StatusCode::BAD_REQUEST, msg))?;

    state.record_request();

    let rows = state
        .provider
        .daily_history(&scope.symbol, scope.start, scope.end)
        .await
        .map_err(|e| {
            warn!(error = %e, symbol = %scope.symbol, "provider request failed");
            api_error(
                StatusCode::BAD_GATEWAY,
                "upstream market-data request failed",
            )
        })?;

    if rows.is_empty() {
        info!(symbol = %scope.symbol, start = %scope.start, end = %scope.end, "empty result range");
        return Err(api_error(StatusCode::NOT_FOUND, NO_DATA_MESSAGE));
    }

    // Fundamentals are best-effort: failures degrade to an undefined P/E
    // series rather than failing the request.
    let eps = match state.provider.trailing_eps(&scope.symbol).await {
        Ok(eps) => eps,
        Err(e) => {
            warn!(error = %e, symbol = %scope.symbol, "trailing EPS fetch failed");
            None
        }
    };

    let bundle = indicators::compute_all(&rows, eps, &params);
    Ok((rows, bundle, scope))
}
