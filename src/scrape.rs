//! Statistics-table fetching and extraction.
//!
//! The fetch is split in two halves: [`fetch_table`] does the network
//! round-trip, [`extract_table`] is the pure HTML-to-[`RawTable`]
//! transcription. Keeping the second half pure makes the table walk
//! testable against inline fixtures.
//!
//! A missing table is not an error. Some town/date queries legitimately
//! have no data, so the fetcher reports that as `Ok(None)` and leaves the
//! decision to the caller.

use crate::error::ReportError;
use crate::models::{ListingType, RawTable};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// The `id` of the statistics table on the source page.
pub const STATS_TABLE_ID: &str = "tableStats";

/// Upper bound on the page fetch; the source occasionally hangs.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by the run's fetches.
pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder().timeout(FETCH_TIMEOUT).build()
}

/// Derive the sales or rent variant of `base` by appending its `pn` value.
pub fn listing_url(base: &str, listing: ListingType) -> Result<String, ReportError> {
    let mut url = Url::parse(base).map_err(|source| ReportError::Url {
        url: base.to_string(),
        source,
    })?;
    url.query_pairs_mut()
        .append_pair("pn", &listing.page_number().to_string());
    Ok(url.to_string())
}

/// Fetch `url` and locate the table with the given `id`.
///
/// Fails with [`ReportError::Fetch`] on transport failure or a non-2xx
/// status; no retry. Returns `Ok(None)` when the page parsed fine but no
/// matching table exists.
#[instrument(level = "info", skip(client))]
pub async fn fetch_table(
    client: &Client,
    url: &str,
    table_id: &str,
) -> Result<Option<RawTable>, ReportError> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|source| ReportError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let body = response.text().await.map_err(|source| ReportError::Fetch {
        url: url.to_string(),
        source,
    })?;

    debug!(bytes = body.len(), "Fetched statistics page");
    let table = extract_table(&body, table_id);
    match &table {
        Some(t) => info!(rows = t.rows.len(), columns = t.width(), "Located statistics table"),
        None => warn!(%url, table_id, "Statistics table not found in page"),
    }
    Ok(table)
}

/// Transcribe the table with `id == table_id` out of `html`.
///
/// The first `<tr>` becomes the header; every other row is kept verbatim
/// (raw cell text, no trimming, no coercion; normalization happens later).
pub fn extract_table(html: &str, table_id: &str) -> Option<RawTable> {
    let document = Html::parse_document(html);
    let tables = Selector::parse("table").unwrap();
    let rows = Selector::parse("tr").unwrap();
    let cells = Selector::parse("th, td").unwrap();

    let table = document
        .select(&tables)
        .find(|t| t.value().attr("id") == Some(table_id))?;

    let mut extracted: Vec<Vec<String>> = Vec::new();
    for row in table.select(&rows) {
        let texts: Vec<String> = row
            .select(&cells)
            .map(|cell| cell.text().collect::<String>())
            .collect();
        if !texts.is_empty() {
            extracted.push(texts);
        }
    }

    let mut iter = extracted.into_iter();
    let header = iter.next()?;
    Some(RawTable {
        header,
        rows: iter.collect(),
    })
}
