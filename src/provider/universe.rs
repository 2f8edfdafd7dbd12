// =============================================================================
// S&P 500 Ticker Universe
// =============================================================================
//
// The symbol selector on the dashboard is populated from the current S&P 500
// constituent list, scraped from the Wikipedia constituents table. The scrape
// is best-effort: on any failure the caller keeps the previous universe (the
// builtin fallback list at startup), so the dashboard always has symbols to
// offer.
// =============================================================================

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, instrument};

/// Source page for the constituent list.
const UNIVERSE_URL: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";

/// Liquid large-caps used until the first successful universe fetch.
pub const FALLBACK_SYMBOLS: &[&str] = &[
    "AAPL", "ABBV", "AMZN", "AVGO", "BAC", "BRK.B", "COST", "CVX", "GOOGL", "HD",
    "JNJ", "JPM", "KO", "LLY", "MA", "META", "MRK", "MSFT", "NFLX", "NVDA",
    "PEP", "PG", "TSLA", "UNH", "V", "WMT", "XOM",
];

/// Download and parse the current S&P 500 constituent symbols, sorted
/// ascending and de-duplicated.
#[instrument(name = "universe::fetch_sp500_symbols")]
pub async fn fetch_sp500_symbols(timeout_secs: u64) -> Result<Vec<String>> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build universe client")?;

    let resp = client
        .get(UNIVERSE_URL)
        .send()
        .await
        .context("GET constituents page failed")?;

    let status = resp.status();
    if !status.is_success() {
        anyhow::bail!("constituents page returned {status}");
    }

    let html = resp.text().await.context("failed to read constituents page")?;

    let symbols = extract_symbols(&html);
    if symbols.is_empty() {
        anyhow::bail!("no symbols found in constituents table");
    }

    debug!(count = symbols.len(), "ticker universe fetched");
    Ok(symbols)
}

/// Extract ticker symbols from the constituents table of the page HTML.
///
/// The symbol is always the first linked cell of each table row, rendered as
/// an uppercase ticker (share classes use a dot, e.g. `BRK.B`). Only the
/// first match per row is taken so company-name links never leak in.
fn extract_symbols(html: &str) -> Vec<String> {
    // Narrow to the constituents table; the page carries a second table of
    // historical changes that must not contribute rows.
    let table = match html.find("id=\"constituents\"") {
        Some(start) => {
            let rest = &html[start..];
            match rest.find("</table>") {
                Some(end) => &rest[..end],
                None => rest,
            }
        }
        None => return Vec::new(),
    };

    let ticker_re = Regex::new(r">([A-Z]{1,6}(?:\.[A-Z])?)</a>").expect("valid ticker regex");

    let mut symbols: Vec<String> = table
        .split("<tr")
        .skip(1) // prefix before the first row; the header row has no link to match
        .filter_map(|row| ticker_re.captures(row))
        .map(|caps| caps[1].to_string())
        .collect();

    symbols.sort();
    symbols.dedup();
    symbols
}
