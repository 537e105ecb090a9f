//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap`
//! crate.

use clap::Parser;

/// Command-line arguments for the imot.bg statistics scraper.
///
/// # Examples
///
/// ```sh
/// # Combined sales + rent report for a reporting date
/// imot_stats -l 'https://www.imot.bg/pcgi/imot.cgi?act=14&town=София&year=2023&date=21.11.2023'
///
/// # Single-table scrape of exactly the given URL, opened after writing
/// imot_stats -l '<url>' --single -o sofia -e
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Base URL of the statistics page to scrape
    #[arg(short = 'l', long)]
    pub url: String,

    /// Output file name, without extension
    #[arg(short, long, default_value = "scrape")]
    pub output: String,

    /// Open the report in a spreadsheet application after writing
    #[arg(short, long)]
    pub excel: bool,

    /// Scrape only the given URL instead of the sales/rent pair
    #[arg(long)]
    pub single: bool,

    /// Print the table as JSON instead of aligned text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(&[
            "imot_stats",
            "--url",
            "https://www.imot.bg/pcgi/imot.cgi?act=14",
            "--output",
            "sofia",
        ]);

        assert_eq!(cli.url, "https://www.imot.bg/pcgi/imot.cgi?act=14");
        assert_eq!(cli.output, "sofia");
        assert!(!cli.excel);
        assert!(!cli.single);
    }

    #[test]
    fn test_cli_short_flags_and_defaults() {
        let cli = Cli::parse_from(&["imot_stats", "-l", "http://example.com", "-e"]);

        assert_eq!(cli.url, "http://example.com");
        assert_eq!(cli.output, "scrape");
        assert!(cli.excel);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_requires_url() {
        assert!(Cli::try_parse_from(&["imot_stats"]).is_err());
    }
}
