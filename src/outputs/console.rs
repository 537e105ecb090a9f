//! Plain-text rendering of a report table for standard output.
//!
//! The CLI prints the assembled table before it exits, mirroring what the
//! spreadsheet will contain: same columns, same row order. `-` stands in
//! for missing values.

use crate::models::{ReportRow, CANONICAL_HEADERS};

/// Render one numeric cell; whole euro amounts print without decimals.
fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v}"),
        None => "-".to_string(),
    }
}

/// Flatten a row into display cells matching the output column order.
fn display_cells(row: &ReportRow, with_listing: bool) -> Vec<String> {
    let mut cells = vec![row.region.clone()];
    cells.extend(row.numeric_fields().into_iter().map(format_value));
    cells.push(
        row.report_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
    );
    if with_listing {
        cells.push(
            row.listing_type
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    cells
}

/// Render `rows` as a width-aligned text table.
pub fn render_table(rows: &[ReportRow]) -> String {
    let with_listing = rows.iter().any(|r| r.listing_type.is_some());
    let mut headers: Vec<String> = CANONICAL_HEADERS.iter().map(|h| h.to_string()).collect();
    headers.push("report_date".to_string());
    if with_listing {
        headers.push("type".to_string());
    }

    let mut lines: Vec<Vec<String>> = vec![headers];
    lines.extend(rows.iter().map(|r| display_cells(r, with_listing)));

    let columns = lines[0].len();
    let mut widths = vec![0usize; columns];
    for line in &lines {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for line in &lines {
        let rendered: Vec<String> = line
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let pad = widths[i] - cell.chars().count();
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect();
        out.push_str(rendered.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// Render `rows` as pretty-printed JSON.
pub fn render_json(rows: &[ReportRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}
