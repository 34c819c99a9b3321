//! Date helper functions
//!
//! Post dates live as `YYYY-MM-DD` strings throughout the data model;
//! these helpers parse them only at the display edge.

use chrono::NaiveDate;

/// Format an ISO `YYYY-MM-DD` date string for display.
///
/// `format` uses Moment.js-style patterns; `"LL"` is the long form
/// ("January 1, 2020"). A string that is not actually an ISO date is
/// returned unchanged - dates are trusted author input end to end.
///
/// # Examples
/// ```ignore
/// format_date_string("2020-01-01", "LL") // -> "January 1, 2020"
/// ```
pub fn format_date_string(date: &str, format: &str) -> String {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(parsed) if format == "LL" => parsed.format("%B %-d, %Y").to_string(),
        Ok(parsed) => parsed.format(&moment_to_chrono_format(format)).to_string(),
        Err(_) => date.to_string(),
    }
}

/// RFC 3339 timestamp (midnight UTC) for a `YYYY-MM-DD` date string.
///
/// Returns `None` when the string is not an ISO date; feed generation
/// falls back to the raw string in that case.
pub fn iso_to_rfc3339(date: &str) -> Option<String> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    Some(format!("{}T00:00:00Z", parsed.format("%Y-%m-%d")))
}

/// Convert a Moment.js date format to a chrono format.
///
/// Only date-granular tokens are mapped; post dates carry no time of day.
fn moment_to_chrono_format(format: &str) -> String {
    // Longest patterns first within each category
    let replacements = [
        // Year
        ("YYYY", "%Y"),
        ("YY", "%y"),
        // Month
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        // Day of month
        ("DD", "%d"),
        ("D", "%-d"),
        // Day of week
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();
    for (from, to) in replacements {
        result = result.replace(from, to);
    }
    result
}
