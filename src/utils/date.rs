use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Same as [`parse_date`], failing with `InvalidDate`.
pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Date header formats found in templates edited by hand.
const HEADER_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%y", "%d.%m.%Y"];

/// Parse the textual form of a date header cell.
pub fn parse_header_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // a date-time string keeps only its date part
    let s = s.split([' ', 'T']).next().unwrap_or(s);
    HEADER_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
