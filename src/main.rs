//! # Imot Stats
//!
//! A scraper that turns the imot.bg market-statistics page into a styled
//! Excel report. It fetches the page, extracts the `tableStats` HTML
//! table, normalizes its columns and value encodings, and writes one
//! `.xlsx` artifact named after the reporting date embedded in the URL.
//!
//! ## Usage
//!
//! ```sh
//! imot_stats -l 'https://www.imot.bg/pcgi/imot.cgi?act=14&town=София&year=2023&date=21.11.2023'
//! ```
//!
//! ## Architecture
//!
//! The application is a value-passing pipeline:
//! 1. **Date extraction**: Pull the reporting date out of the URL's query
//! 2. **Fetching**: Retrieve the page(s) and locate the statistics table
//!    (sales and rent variants are fetched concurrently by default)
//! 3. **Normalization**: Project decorative columns away, parse numbers,
//!    filter artifact rows
//! 4. **Assembly**: Tag and concatenate the sales/rent pair, sales first
//! 5. **Output**: Print the table to stdout and write the styled workbook

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod date;
mod error;
mod models;
mod normalize;
mod outputs;
mod report;
mod scrape;
mod utils;

use cli::Cli;
use models::{ListingType, ReportTable};
use normalize::ColumnMap;
use outputs::{console, excel};
use scrape::STATS_TABLE_ID;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("imot_stats starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.url, ?args.output, args.single, "Parsed CLI arguments");

    // ---- Extract the reporting date ----
    let report_date = date::extract_report_date(&args.url)?;
    match report_date {
        Some(date) => info!(%date, "Report date extracted from url"),
        None => info!("No report date in url; output name falls back to the label"),
    }

    // ---- Fetch and normalize ----
    let client = scrape::build_client()?;
    let map = ColumnMap::default();

    let table: ReportTable = if args.single {
        info!(url = %args.url, "Single-table scrape");
        match scrape::fetch_table(&client, &args.url, STATS_TABLE_ID).await? {
            Some(raw) => normalize::normalize(&raw, report_date, &map)?,
            None => {
                warn!(url = %args.url, "No statistics table on page; nothing written");
                return Ok(());
            }
        }
    } else {
        let sales_url = scrape::listing_url(&args.url, ListingType::Sales)?;
        let rent_url = scrape::listing_url(&args.url, ListingType::Rent)?;
        info!(%sales_url, %rent_url, "Combined sales/rent scrape");

        // Independent fetches, joined deterministically: sales before rent.
        let (sales_raw, rent_raw) = tokio::try_join!(
            scrape::fetch_table(&client, &sales_url, STATS_TABLE_ID),
            scrape::fetch_table(&client, &rent_url, STATS_TABLE_ID),
        )?;

        let sales = sales_raw
            .map(|raw| normalize::normalize(&raw, report_date, &map))
            .transpose()?;
        let rent = rent_raw
            .map(|raw| normalize::normalize(&raw, report_date, &map))
            .transpose()?;
        report::combine(sales, rent)?
    };

    // ---- Write the artifact ----
    let file_name = excel::output_file_name(report_date, &args.output);
    excel::write_report(&table, Path::new(&file_name))?;
    info!(path = %file_name, rows = table.len(), "Report written");

    // ---- Console output ----
    if args.json {
        println!("{}", console::render_json(&table)?);
    } else {
        print!("{}", console::render_table(&table));
    }

    if args.excel {
        utils::open_in_spreadsheet(&file_name);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
