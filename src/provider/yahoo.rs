// =============================================================================
// Yahoo Finance REST Client — daily history + trailing fundamentals
// =============================================================================
//
// Both endpoints used here are public and unsigned. Yahoo rejects requests
// without a browser-like User-Agent, so one is installed as a default header.
// An unknown symbol or an empty date range is NOT an error: it produces an
// empty row set, which the API layer turns into an explicit empty-data
// response.
// =============================================================================

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, NaiveTime};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, instrument, warn};

use crate::types::PriceRow;

/// User-Agent sent with every provider request.
const PROVIDER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Yahoo Finance REST client.
#[derive(Debug, Clone)]
pub struct YahooClient {
    base_url: String,
    client: reqwest::Client,
}

impl YahooClient {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// Create a new `YahooClient`.
    ///
    /// # Arguments
    /// * `base_url`     — query host, e.g. `https://query1.finance.yahoo.com`.
    /// * `timeout_secs` — per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(PROVIDER_USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    // -------------------------------------------------------------------------
    // Daily price history
    // -------------------------------------------------------------------------

    /// GET /v8/finance/chart/{symbol} — daily OHLCV rows for the inclusive
    /// date range `[start, end]`.
    ///
    /// Returns rows sorted by date ascending with duplicate dates removed.
    /// An unknown symbol yields an empty vec; network and malformed-payload
    /// failures yield an error with context.
    #[instrument(skip(self), name = "yahoo::daily_history")]
    pub async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceRow>> {
        // period2 is exclusive on the provider side; push it one day past
        // `end` so the range stays inclusive.
        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = end
            .checked_add_days(Days::new(1))
            .context("end date overflows the calendar")?
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d",
            self.base_url, symbol, period1, period2
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /v8/finance/chart request failed")?;

        let status = resp.status();

        // Yahoo answers 404 with a chart error payload for unknown symbols;
        // that is an empty result, not a failure.
        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(symbol, "provider reported unknown symbol");
            return Ok(Vec::new());
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse chart response")?;

        if !status.is_success() {
            anyhow::bail!("Yahoo GET /v8/finance/chart returned {}: {}", status, body);
        }

        let rows = parse_chart_response(&body)?;
        debug!(symbol, count = rows.len(), "daily history fetched");
        Ok(rows)
    }

    // -------------------------------------------------------------------------
    // Fundamentals
    // -------------------------------------------------------------------------

    /// GET /v10/finance/quoteSummary/{symbol} — trailing earnings per share.
    ///
    /// Fundamentals are best-effort: a symbol without reported earnings
    /// yields `Ok(None)`, and callers are expected to degrade an `Err` to
    /// `None` as well.
    #[instrument(skip(self), name = "yahoo::trailing_eps")]
    pub async fn trailing_eps(&self, symbol: &str) -> Result<Option<f64>> {
        let url = format!(
            "{}/v10/finance/quoteSummary/{}?modules=defaultKeyStatistics",
            self.base_url, symbol
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /v10/finance/quoteSummary request failed")?;

        let status = resp.status();
        if !status.is_success() {
            debug!(symbol, %status, "no fundamentals available");
            return Ok(None);
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse quoteSummary response")?;

        let eps = extract_trailing_eps(&body);
        debug!(symbol, ?eps, "trailing EPS fetched");
        Ok(eps)
    }
}

// =============================================================================
// Payload parsing
// =============================================================================

/// Parse the chart payload into ordered, de-duplicated price rows.
///
/// Rows with a null open/high/low/close are skipped (the provider emits
/// nulls for halted or partially reported days); a null volume is treated
/// as zero.
fn parse_chart_response(body: &serde_json::Value) -> Result<Vec<PriceRow>> {
    let result = match body["chart"]["result"].as_array() {
        Some(arr) if !arr.is_empty() => &arr[0],
        _ => return Ok(Vec::new()),
    };

    let timestamps = match result["timestamp"].as_array() {
        Some(ts) => ts,
        None => return Ok(Vec::new()), // valid symbol, no trading days in range
    };

    let quote = &result["indicators"]["quote"][0];
    let opens = quote["open"]
        .as_array()
        .context("chart payload missing 'open' array")?;
    let highs = quote["high"]
        .as_array()
        .context("chart payload missing 'high' array")?;
    let lows = quote["low"]
        .as_array()
        .context("chart payload missing 'low' array")?;
    let closes = quote["close"]
        .as_array()
        .context("chart payload missing 'close' array")?;
    let volumes = quote["volume"]
        .as_array()
        .context("chart payload missing 'volume' array")?;

    let mut rows = Vec::with_capacity(timestamps.len());

    for (i, ts) in timestamps.iter().enumerate() {
        let Some(ts) = ts.as_i64() else {
            warn!(index = i, "skipping kline entry with non-numeric timestamp");
            continue;
        };

        let (open, high, low, close) = match (
            opens.get(i).and_then(|v| v.as_f64()),
            highs.get(i).and_then(|v| v.as_f64()),
            lows.get(i).and_then(|v| v.as_f64()),
            closes.get(i).and_then(|v| v.as_f64()),
        ) {
            (Some(o), Some(h), Some(l), Some(c)) => (o, h, l, c),
            _ => continue, // partially reported day
        };

        let volume = volumes.get(i).and_then(|v| v.as_f64()).unwrap_or(0.0);

        let date = chrono::DateTime::from_timestamp(ts, 0)
            .with_context(|| format!("timestamp {ts} out of range"))?
            .date_naive();

        rows.push(PriceRow::new(date, open, high, low, close, volume));
    }

    // The payload is normally already ordered, but the API contract (sorted
    // ascending, unique per date) is enforced here rather than assumed.
    rows.sort_by_key(|r| r.date);
    rows.dedup_by_key(|r| r.date);

    Ok(rows)
}

/// Pull `trailingEps.raw` out of a quoteSummary payload.
fn extract_trailing_eps(body: &serde_json::Value) -> Option<f64> {
    body["quoteSummary"]["result"][0]["defaultKeyStatistics"]["trailingEps"]["raw"].as_f64()
}
