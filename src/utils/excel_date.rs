// src/utils/excel_date.rs

use chrono::{Duration, NaiveDate};

/// Day zero of the Excel 1900 date system (serial 1 is 1900-01-01,
/// counting the fictitious 1900-02-29).
const EXCEL_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1899, 12, 30) {
    Some(d) => d,
    None => panic!("invalid excel epoch"),
};

/// Number format applied to the date header cells.
pub const HEADER_DATE_FORMAT: &str = "DD.MM.YY";

pub fn date_to_excel_serial(date: NaiveDate) -> f64 {
    (date - EXCEL_EPOCH).num_days() as f64
}

/// Date part of an Excel serial; the fractional time part is ignored.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let days = serial.floor() as i64;
    EXCEL_EPOCH.checked_add_signed(Duration::try_days(days)?)
}
