mod common;

use chrono::NaiveDate;
use common::template_sheet;
use shiftledger::errors::AppError;
use shiftledger::matrix::layout::{DATE_ROW, FIRST_DYNAMIC_COL, SHIFT_ROW};
use shiftledger::matrix::{ColumnMap, DateRange, read_column_meta, rebuild};
use shiftledger::models::Shift;
use shiftledger::sheet::{BorderLine, CellValue, MergeRange};
use shiftledger::utils::excel_date::{date_to_excel_serial, excel_serial_to_date};
use std::collections::HashSet;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn range(a: &str, b: &str) -> DateRange {
    DateRange::parse(a, b).unwrap()
}

#[test]
fn test_reversed_range_is_rejected() {
    let err = DateRange::parse("2024-06-02", "2024-06-01").unwrap_err();
    assert!(matches!(err, AppError::InvalidRange { .. }));
}

#[test]
fn test_unparsable_date_is_rejected() {
    let err = DateRange::parse("2024-13-01", "2024-06-01").unwrap_err();
    assert!(matches!(err, AppError::InvalidDate(_)));
    let err = DateRange::parse("2024-06-01", "01/06/2024").unwrap_err();
    assert!(matches!(err, AppError::InvalidDate(_)));
}

#[test]
fn test_range_wider_than_a_sheet_is_rejected() {
    let err = DateRange::parse("2000-01-01", "2030-01-01").unwrap_err();
    assert!(matches!(err, AppError::RangeTooLong { .. }));
}

#[test]
fn test_single_day_range() {
    let r = range("2024-06-01", "2024-06-01");
    assert_eq!(r.days(), 1);
    assert_eq!(ColumnMap::new(r).dynamic_width(), 3);
}

#[test]
fn test_two_days_allocate_six_columns() {
    let map = ColumnMap::new(range("2024-06-01", "2024-06-02"));
    assert_eq!(map.dynamic_width(), 6);
    assert_eq!(map.slots().count(), 6);
    assert_eq!(map.column_for(d("2024-06-01"), Shift::Morning), Some(FIRST_DYNAMIC_COL));
    assert_eq!(map.column_for(d("2024-06-01"), Shift::Night), Some(FIRST_DYNAMIC_COL + 2));
    assert_eq!(map.column_for(d("2024-06-02"), Shift::Morning), Some(FIRST_DYNAMIC_COL + 3));
    assert_eq!(map.column_for(d("2024-06-03"), Shift::Morning), None);
    assert_eq!(map.last_col(), FIRST_DYNAMIC_COL + 5);
}

#[test]
fn test_column_allocation_is_a_bijection() {
    let map = ColumnMap::new(range("2024-02-01", "2024-03-31"));
    let mut seen = HashSet::new();
    for (date, shift, col) in map.slots() {
        assert!(seen.insert(col), "column {col} allocated twice");
        assert_eq!(map.column_for(date, shift), Some(col));
        assert_eq!(map.slot_at(col), Some((date, shift)));
    }
    assert_eq!(seen.len() as u32, 3 * 60);
}

#[test]
fn test_rebuild_lays_out_day_blocks() {
    let mut sheet = template_sheet();
    let map = rebuild(&mut sheet, range("2024-06-01", "2024-06-02"));

    assert_eq!(map.dynamic_width(), 6);
    assert_eq!(sheet.max_col(), Some(FIRST_DYNAMIC_COL + 5));

    for (date, first) in map.day_blocks() {
        assert!(sheet.merges().contains(&MergeRange::new(DATE_ROW, first, DATE_ROW, first + 2)));
        assert_eq!(
            sheet.value(DATE_ROW, first),
            &CellValue::Number(date_to_excel_serial(date))
        );
        let date_cell = sheet.cell(DATE_ROW, first).unwrap();
        assert!(date_cell.style.bold);
        assert_eq!(date_cell.style.num_format.as_deref(), Some("DD.MM.YY"));

        for shift in Shift::ALL {
            let col = first + shift.index();
            assert_eq!(
                sheet.value(SHIFT_ROW, col),
                &CellValue::Text(format!("משמרת {}", shift.name()))
            );
            assert!(sheet.col_width(col).is_some());
        }

        // thick outline, thin inside
        let left = sheet.cell(SHIFT_ROW, first).unwrap().style.borders;
        assert_eq!(left.left, Some(BorderLine::Thick));
        assert_eq!(left.bottom, Some(BorderLine::Thick));
        assert_eq!(left.right, Some(BorderLine::Thin));
        let right = sheet.cell(DATE_ROW, first + 2).unwrap().style.borders;
        assert_eq!(right.right, Some(BorderLine::Thick));
        assert_eq!(right.top, Some(BorderLine::Thick));
        assert_eq!(right.bottom, Some(BorderLine::Thin));
    }
}

#[test]
fn test_rebuild_keeps_static_region() {
    let mut sheet = template_sheet();
    let title = MergeRange::new(0, 0, 0, 1);
    let team_b = MergeRange::new(9, 0, 9, 1);
    let stale_date = MergeRange::new(3, 2, 3, 4);
    let team_a = MergeRange::new(6, 0, 6, 4);
    assert!(sheet.merges().contains(&stale_date));
    assert!(sheet.merges().contains(&team_a));

    rebuild(&mut sheet, range("2024-06-01", "2024-06-01"));

    assert!(sheet.merges().contains(&title));
    assert!(sheet.merges().contains(&team_b));
    assert!(!sheet.merges().contains(&team_a));
    assert_eq!(sheet.value(0, 0), &CellValue::Text("דוח נוכחות".into()));
    assert_eq!(sheet.value(7, 0), &CellValue::Text("David".into()));
    assert!(sheet.col_width(0).is_some());
    // no trace of the stale block
    assert_ne!(sheet.value(DATE_ROW, 2), &CellValue::Text("old".into()));
}

#[test]
fn test_rebuild_is_idempotent() {
    let r = range("2024-06-01", "2024-06-03");

    let mut once = template_sheet();
    rebuild(&mut once, r);

    let mut twice = template_sheet();
    rebuild(&mut twice, r);
    rebuild(&mut twice, r);

    assert_eq!(once, twice);
}

#[test]
fn test_rebuild_shrinks_a_wider_layout() {
    let mut sheet = template_sheet();
    rebuild(&mut sheet, range("2024-06-01", "2024-06-10"));
    rebuild(&mut sheet, range("2024-06-01", "2024-06-02"));

    assert_eq!(sheet.max_col(), Some(FIRST_DYNAMIC_COL + 5));
    assert_eq!(read_column_meta(&sheet).len(), 6);
}

#[test]
fn test_headers_read_back_from_rebuilt_sheet() {
    let mut sheet = template_sheet();
    let map = rebuild(&mut sheet, range("2024-12-30", "2025-01-02"));
    let meta = read_column_meta(&sheet);

    assert_eq!(meta.len(), 12);
    for (date, shift, col) in map.slots() {
        let m = meta[&col];
        assert_eq!((m.date, m.shift), (date, shift));
    }
}

#[test]
fn test_text_date_headers_are_accepted() {
    let mut sheet = template_sheet();
    rebuild(&mut sheet, range("2024-06-01", "2024-06-02"));
    sheet.set_value(DATE_ROW, 2, CellValue::Text("01.06.24".into()));
    sheet.set_value(DATE_ROW, 5, CellValue::Text("2024-06-02".into()));
    sheet.set_value(SHIFT_ROW, 3, CellValue::Text("משמרת\u{a0}ערב".into()));

    let meta = read_column_meta(&sheet);
    assert_eq!(meta[&2].date, d("2024-06-01"));
    assert_eq!(meta[&3].shift, Shift::Evening);
    assert_eq!(meta[&4].date, d("2024-06-01"));
    assert_eq!(meta[&7].date, d("2024-06-02"));
}

#[test]
fn test_excel_serials() {
    assert_eq!(date_to_excel_serial(d("2024-06-01")), 45444.0);
    assert_eq!(excel_serial_to_date(45444.75), Some(d("2024-06-01")));
    assert_eq!(excel_serial_to_date(0.0), None);
}
