//! Raw-table normalization into canonical report rows.
//!
//! The source page's table is decorated: spacer columns interleave the data
//! columns, the region header repeats mid-table, and a footnote row trails
//! the data. Normalization reduces all of that to the eight canonical
//! fields, with these policies applied in order:
//!
//! 1. Footnote rows dropped (first cell contains the note marker)
//! 2. Column projection through an explicit [`ColumnMap`], with schema
//!    validation against the raw header width
//! 3. Locale-tolerant numeric parsing (`-` placeholder and unparseable
//!    cells become `None`)
//! 4. Rows whose numeric fields are all `None` dropped
//! 5. Report date broadcast onto every surviving row
//! 6. Region filter: empty regions and repeated header tokens dropped
//!
//! Repeated sub-header rows are recognized by content, not position: their
//! region cell is the header token or their cells carry no parseable
//! numbers, so they fall to policies 4 and 6 wherever they appear.

use crate::error::ReportError;
use crate::models::{RawTable, ReportRow, ReportTable, CANONICAL_HEADERS};
use chrono::NaiveDate;
use tracing::{debug, info, instrument};

/// Footnote indicator used by the source page. Matching is substring
/// containment against the first cell, not equality.
pub const NOTE_MARKER: &str = "*Забележка:";

/// The source-language header word for the region column, lowercased.
/// Rows repeating it are artifacts of the page's repeated header rows.
const REGION_HEADER_TOKEN: &str = "район";

/// Ordered projection from raw column positions to canonical headers.
///
/// The positional prune is deliberately data, not code: the page template's
/// fragility is isolated here, and a template change surfaces as a
/// [`ReportError::Schema`] instead of silently mis-assigned labels.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    columns: Vec<(usize, &'static str)>,
}

impl Default for ColumnMap {
    /// The imot.bg statistics layout: 12 raw columns with decorative
    /// spacers at indices 1, 4, 7 and 10.
    fn default() -> Self {
        let keep = [0, 2, 3, 5, 6, 8, 9, 11];
        ColumnMap {
            columns: keep.into_iter().zip(CANONICAL_HEADERS).collect(),
        }
    }
}

impl ColumnMap {
    /// Minimum raw width this map can project from.
    pub fn required_width(&self) -> usize {
        self.columns
            .iter()
            .map(|(index, _)| index + 1)
            .max()
            .unwrap_or(0)
    }

    /// Validate the map against a raw header row.
    ///
    /// The header must be wide enough for every mapped index, and the map
    /// must yield exactly the eight canonical columns.
    fn check(&self, raw: &RawTable) -> Result<(), ReportError> {
        if self.columns.len() != CANONICAL_HEADERS.len() {
            return Err(ReportError::Schema {
                expected: CANONICAL_HEADERS.len(),
                found: self.columns.len(),
            });
        }
        if raw.width() < self.required_width() {
            return Err(ReportError::Schema {
                expected: self.required_width(),
                found: raw.width(),
            });
        }
        Ok(())
    }

    /// Project one raw row into canonical column order.
    ///
    /// Data rows can be narrower than the header (colspan artifacts);
    /// missing cells project as empty strings and parse to `None`.
    fn project<'a>(&self, row: &'a [String]) -> Vec<&'a str> {
        self.columns
            .iter()
            .map(|(index, _)| row.get(*index).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

/// Parse one numeric cell.
///
/// Embedded whitespace (the page's thousands separators, including NBSP
/// variants) is stripped first. The `-` placeholder and empty cells mean
/// "no data"; anything else that fails to parse is treated the same way
/// rather than failing the run.
pub fn parse_cell(cell: &str) -> Option<f64> {
    let cleaned: String = cell.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Normalize a raw statistics table into canonical report rows.
///
/// `report_date` is broadcast onto every surviving row. Row order is the
/// source order of the rows that survive filtering.
#[instrument(level = "info", skip_all, fields(rows = raw.rows.len()))]
pub fn normalize(
    raw: &RawTable,
    report_date: Option<NaiveDate>,
    map: &ColumnMap,
) -> Result<ReportTable, ReportError> {
    map.check(raw)?;

    let mut table = ReportTable::new();
    for row in &raw.rows {
        if row.first().is_some_and(|cell| cell.contains(NOTE_MARKER)) {
            debug!("Dropped footnote row");
            continue;
        }

        let projected = map.project(row);
        let region = projected[0].trim();
        let numeric: Vec<Option<f64>> = projected[1..].iter().map(|c| parse_cell(c)).collect();

        let report_row = ReportRow {
            region: region.to_string(),
            price_1room: numeric[0],
            price_1room_per_sqm: numeric[1],
            price_2room: numeric[2],
            price_2room_per_sqm: numeric[3],
            price_3room: numeric[4],
            price_3room_per_sqm: numeric[5],
            avg_price_per_sqm: numeric[6],
            report_date,
            listing_type: None,
        };

        if report_row.is_all_null() {
            debug!(region, "Dropped row with no numeric data");
            continue;
        }
        if region.is_empty() || region.to_lowercase() == REGION_HEADER_TOKEN {
            debug!(region, "Dropped repeated header or empty region row");
            continue;
        }

        table.push(report_row);
    }

    info!(
        input = raw.rows.len(),
        output = table.len(),
        "Normalized statistics table"
    );
    Ok(table)
}
