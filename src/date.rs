//! Reporting-date extraction from the source URL.
//!
//! The statistics page encodes the reporting date as a query parameter in
//! the fixed form `&date=DD.MM.YYYY`. A URL without the parameter is a
//! valid input; it only means the output file name loses its date prefix.

use crate::error::ReportError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static DATE_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&date=(\d{2}\.\d{2}\.\d{4})").unwrap());

/// Extract the reporting date embedded in `url`.
///
/// Returns `Ok(None)` when the URL carries no `date` parameter. A value
/// that matches the pattern but is not a real calendar date (for example
/// `31.02.2024`) is a [`ReportError::DateFormat`], not a silent `None`.
/// A present-but-broken date should stop the run, not mislabel the output.
///
/// # Examples
///
/// ```ignore
/// let d = extract_report_date("https://example.com/stats?x=1&date=05.03.2024")?;
/// assert_eq!(d, Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
/// ```
pub fn extract_report_date(url: &str) -> Result<Option<NaiveDate>, ReportError> {
    let Some(captures) = DATE_PARAM.captures(url) else {
        debug!(%url, "No date parameter in url");
        return Ok(None);
    };

    let value = &captures[1];
    let date = NaiveDate::parse_from_str(value, "%d.%m.%Y").map_err(|_| {
        ReportError::DateFormat {
            value: value.to_string(),
        }
    })?;

    debug!(%url, %date, "Extracted report date");
    Ok(Some(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_date_as_iso() {
        let date = extract_report_date(
            "https://www.imot.bg/pcgi/imot.cgi?act=14&town=София&year=2024&date=05.03.2024",
        )
        .unwrap()
        .unwrap();
        assert_eq!(date.to_string(), "2024-03-05");
    }

    #[test]
    fn test_first_match_wins() {
        let date = extract_report_date("http://x/?a=1&date=21.11.2023&date=01.01.2020")
            .unwrap()
            .unwrap();
        assert_eq!(date.to_string(), "2023-11-21");
    }

    #[test]
    fn test_missing_parameter_is_none() {
        assert!(extract_report_date("https://www.imot.bg/pcgi/imot.cgi?act=14")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_date_as_first_query_parameter_is_not_matched() {
        // The source page always puts `date` after other parameters; the
        // fixed `&date=` pattern intentionally ignores a leading `?date=`.
        assert!(extract_report_date("http://x/?date=05.03.2024")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_impossible_calendar_date_fails() {
        let err = extract_report_date("http://x/?a=1&date=31.02.2024").unwrap_err();
        assert!(matches!(err, ReportError::DateFormat { value } if value == "31.02.2024"));
    }

    #[test]
    fn test_partial_pattern_is_ignored() {
        assert!(extract_report_date("http://x/?a=1&date=5.3.2024")
            .unwrap()
            .is_none());
    }
}
