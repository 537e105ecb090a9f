//! Error taxonomy for the report pipeline.
//!
//! Only genuinely fatal conditions live here. Two signals deliberately do
//! not: a page without the statistics table yields `Ok(None)` from the
//! fetcher (some queries legitimately have no data), and an unparseable
//! numeric cell is coerced to `None` by the normalizer.

use crate::models::ListingType;
use thiserror::Error;

/// Fatal pipeline failures, surfaced to the caller without retry.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Transport failure or non-2xx response for the statistics page.
    #[error("request for {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The base URL could not be parsed when building the sales/rent pair.
    #[error("invalid base url {url:?}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL carried a `date=` parameter that matched the expected
    /// pattern but is not a real calendar date.
    #[error("malformed report date {value:?} in url")]
    DateFormat { value: String },

    /// The raw table layout does not fit the configured column map.
    #[error("raw table has {found} columns, column map expects at least {expected}")]
    Schema { expected: usize, found: usize },

    /// One of the two paired tables is missing; no combined report is written.
    #[error("{listing} table missing, combined report not written")]
    PartialAssembly { listing: ListingType },

    /// Workbook construction or save failure, including the underlying
    /// filesystem error on a failed save.
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
