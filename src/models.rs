//! Data models for the scrape → normalize → report pipeline.
//!
//! This module defines the core data structures passed between pipeline
//! stages:
//! - [`RawTable`]: The statistics table exactly as extracted from the page
//! - [`ReportRow`]: One normalized row with the eight canonical fields
//! - [`ReportTable`]: An ordered set of normalized rows ready for rendering
//! - [`ListingType`]: The sales/rent tag used by the combined pipeline
//!
//! Each stage exclusively owns its output; nothing here is shared or
//! mutated across stages.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Canonical column headers, in output order.
///
/// These are the eight semantic columns every normalized row exposes.
/// The spreadsheet and console renderers both bind to this order.
pub const CANONICAL_HEADERS: [&str; 8] = [
    "Region",
    "1_Room_Price",
    "1_Room_Price_Sqm",
    "2_Room_Price",
    "2_Room_Price_Sqm",
    "3_Room_Price",
    "3_Room_Price_Sqm",
    "Avg_Price_Sqm",
];

/// A statistics table as extracted from the fetched page.
///
/// Cell text is kept verbatim: no trimming, no numeric coercion. All of
/// that happens later in the normalizer, so the fetch stage stays a dumb
/// transcription of the page.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// The header row of the source table.
    pub header: Vec<String>,
    /// All data rows, in page order.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Number of columns declared by the header row.
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

/// Sales vs. rent tag distinguishing the two fetches in the combined pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Sales,
    Rent,
}

impl ListingType {
    /// The `pn` query value selecting this listing on the source page.
    pub fn page_number(self) -> u8 {
        match self {
            ListingType::Sales => 0,
            ListingType::Rent => 1,
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingType::Sales => write!(f, "sales"),
            ListingType::Rent => write!(f, "rent"),
        }
    }
}

/// One normalized row of the market-statistics report.
///
/// Numeric fields are `None` where the source printed its `-` placeholder
/// or an unparseable cell. A row whose numeric fields are all `None` never
/// survives normalization, and `region` is guaranteed non-empty and never
/// the source page's repeated header token.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    /// Region name as printed by the source page.
    pub region: String,
    pub price_1room: Option<f64>,
    pub price_1room_per_sqm: Option<f64>,
    pub price_2room: Option<f64>,
    pub price_2room_per_sqm: Option<f64>,
    pub price_3room: Option<f64>,
    pub price_3room_per_sqm: Option<f64>,
    pub avg_price_per_sqm: Option<f64>,
    /// Reporting date broadcast from the source URL, if it carried one.
    pub report_date: Option<NaiveDate>,
    /// Set only by the combined sales/rent pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<ListingType>,
}

/// One finished dataset, ready for rendering. Row order is source order.
pub type ReportTable = Vec<ReportRow>;

impl ReportRow {
    /// The seven numeric fields in canonical column order.
    pub fn numeric_fields(&self) -> [Option<f64>; 7] {
        [
            self.price_1room,
            self.price_1room_per_sqm,
            self.price_2room,
            self.price_2room_per_sqm,
            self.price_3room,
            self.price_3room_per_sqm,
            self.avg_price_per_sqm,
        ]
    }

    /// True when every numeric field is `None`.
    ///
    /// Such a row carries no information and is pruned by the normalizer.
    pub fn is_all_null(&self) -> bool {
        self.numeric_fields().iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(region: &str, avg: Option<f64>) -> ReportRow {
        ReportRow {
            region: region.to_string(),
            price_1room: None,
            price_1room_per_sqm: None,
            price_2room: None,
            price_2room_per_sqm: None,
            price_3room: None,
            price_3room_per_sqm: None,
            avg_price_per_sqm: avg,
            report_date: None,
            listing_type: None,
        }
    }

    #[test]
    fn test_raw_table_width() {
        let raw = RawTable {
            header: vec!["a".into(), "b".into(), "c".into()],
            rows: vec![],
        };
        assert_eq!(raw.width(), 3);
    }

    #[test]
    fn test_listing_type_display_and_page_number() {
        assert_eq!(ListingType::Sales.to_string(), "sales");
        assert_eq!(ListingType::Rent.to_string(), "rent");
        assert_eq!(ListingType::Sales.page_number(), 0);
        assert_eq!(ListingType::Rent.page_number(), 1);
    }

    #[test]
    fn test_listing_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ListingType::Rent).unwrap(),
            "\"rent\""
        );
    }

    #[test]
    fn test_all_null_detection() {
        assert!(row("Център", None).is_all_null());
        assert!(!row("Център", Some(1850.0)).is_all_null());
    }

    #[test]
    fn test_report_row_serialization_skips_missing_tag() {
        let untagged = serde_json::to_string(&row("Лозенец", Some(2100.0))).unwrap();
        assert!(!untagged.contains("listing_type"));

        let mut tagged = row("Лозенец", Some(2100.0));
        tagged.listing_type = Some(ListingType::Sales);
        let json = serde_json::to_string(&tagged).unwrap();
        assert!(json.contains("\"listing_type\":\"sales\""));
    }
}
