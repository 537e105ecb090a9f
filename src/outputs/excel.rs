//! Styled spreadsheet rendering of a report table.
//!
//! One sheet, one worksheet table: a bold white-on-blue wrapped header
//! row, Euro-formatted price columns at a fixed width, and the full
//! row/column extent declared as a styled table region so spreadsheet
//! applications treat it as structured data rather than bare cells.

use crate::error::ReportError;
use crate::models::{ReportRow, CANONICAL_HEADERS};
use chrono::NaiveDate;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, Table, TableColumn, TableStyle, Workbook,
};
use std::path::Path;
use tracing::{info, instrument};

/// Header fill color used by the source report template.
const HEADER_FILL: Color = Color::RGB(0x007DDF);

/// Euro accounting format applied to every price column.
const EURO_FORMAT: &str = "€ #,##0.00";

/// Fixed width of the price columns.
const PRICE_COLUMN_WIDTH: f64 = 18.0;

/// Derive the artifact file name from the report date and caller label.
///
/// `"{date} - {label}.xlsx"` when a date is available, else
/// `"{label}.xlsx"`.
pub fn output_file_name(report_date: Option<NaiveDate>, label: &str) -> String {
    match report_date {
        Some(date) => format!("{date} - {label}.xlsx"),
        None => format!("{label}.xlsx"),
    }
}

/// Column headers for a given row set: the canonical eight, the report
/// date, and the listing tag when any row carries one.
fn column_headers(rows: &[ReportRow]) -> Vec<&'static str> {
    let mut headers: Vec<&'static str> = CANONICAL_HEADERS.to_vec();
    headers.push("report_date");
    if rows.iter().any(|r| r.listing_type.is_some()) {
        headers.push("type");
    }
    headers
}

/// Write `rows` to a styled `.xlsx` file at `path`.
///
/// The workbook is built in memory and saved in one scoped operation;
/// a failed save leaves no partial artifact behind.
#[instrument(level = "info", skip(rows), fields(path = %path.display(), rows = rows.len()))]
pub fn write_report(rows: &[ReportRow], path: &Path) -> Result<(), ReportError> {
    let headers = column_headers(rows);
    let with_listing = headers.len() > CANONICAL_HEADERS.len() + 1;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_background_color(HEADER_FILL)
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);
    let euro_format = Format::new()
        .set_num_format(EURO_FORMAT)
        .set_align(FormatAlign::Right);

    for col in 1..=7u16 {
        worksheet.set_column_width(col, PRICE_COLUMN_WIDTH)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, &row.region)?;
        for (j, value) in row.numeric_fields().into_iter().enumerate() {
            if let Some(value) = value {
                worksheet.write_number_with_format(r, (j + 1) as u16, value, &euro_format)?;
            }
        }
        if let Some(date) = row.report_date {
            worksheet.write_string(r, 8, date.to_string())?;
        }
        if with_listing {
            if let Some(listing) = row.listing_type {
                worksheet.write_string(r, 9, listing.to_string())?;
            }
        }
    }

    let columns: Vec<TableColumn> = headers
        .iter()
        .map(|h| {
            TableColumn::new()
                .set_header(*h)
                .set_header_format(&header_format)
        })
        .collect();
    let table = Table::new()
        .set_style(TableStyle::Medium2)
        .set_columns(&columns);

    // Tables need at least one data row; an empty report still declares one.
    let last_row = rows.len().max(1) as u32;
    let last_col = (headers.len() - 1) as u16;
    worksheet.add_table(0, 0, last_row, last_col, &table)?;

    workbook.save(path)?;
    info!("Wrote spreadsheet artifact");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingType;
    use calamine::{open_workbook, Data, Reader, Xlsx};

    fn row(region: &str, one_room: Option<f64>, avg: Option<f64>) -> ReportRow {
        ReportRow {
            region: region.to_string(),
            price_1room: one_room,
            price_1room_per_sqm: Some(1850.0),
            price_2room: Some(143000.0),
            price_2room_per_sqm: Some(1790.0),
            price_3room: None,
            price_3room_per_sqm: Some(1900.0),
            avg_price_per_sqm: avg,
            report_date: NaiveDate::from_ymd_opt(2023, 11, 21),
            listing_type: None,
        }
    }

    #[test]
    fn test_output_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(output_file_name(date, "scrape"), "2024-03-05 - scrape.xlsx");
        assert_eq!(output_file_name(None, "scrape"), "scrape.xlsx");
    }

    #[test]
    fn test_listing_column_only_when_tagged() {
        assert_eq!(column_headers(&[row("Център", None, None)]).len(), 9);

        let mut tagged = row("Център", None, None);
        tagged.listing_type = Some(ListingType::Rent);
        let headers = column_headers(&[tagged]);
        assert_eq!(headers.len(), 10);
        assert_eq!(*headers.last().unwrap(), "type");
    }

    #[test]
    fn test_round_trip_preserves_values_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2023-11-21 - scrape.xlsx");

        let mut first = row("Център", Some(102000.0), Some(1845.0));
        first.listing_type = Some(ListingType::Sales);
        let mut second = row("Лозенец", None, Some(2100.0));
        second.listing_type = Some(ListingType::Rent);

        write_report(&[first, second], &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        let cells: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();

        // Header row carries the bound column names.
        assert_eq!(cells[0][0], Data::String("Region".into()));
        assert_eq!(cells[0][7], Data::String("Avg_Price_Sqm".into()));
        assert_eq!(cells[0][9], Data::String("type".into()));

        // Data rows in source order, values intact, placeholder cells empty.
        assert_eq!(cells[1][0], Data::String("Център".into()));
        assert_eq!(cells[1][1], Data::Float(102000.0));
        assert_eq!(cells[1][5], Data::Empty);
        assert_eq!(cells[1][8], Data::String("2023-11-21".into()));
        assert_eq!(cells[1][9], Data::String("sales".into()));
        assert_eq!(cells[2][0], Data::String("Лозенец".into()));
        assert_eq!(cells[2][1], Data::Empty);
        assert_eq!(cells[2][7], Data::Float(2100.0));
        assert_eq!(cells[2][9], Data::String("rent".into()));
    }

    #[test]
    fn test_empty_report_still_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        write_report(&[], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let err = write_report(
            &[row("Център", None, Some(1.0))],
            Path::new("/nonexistent-dir/report.xlsx"),
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::Xlsx(_)));
    }
}
