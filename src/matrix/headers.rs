use super::layout::{DATE_ROW, FIRST_DYNAMIC_COL, SHIFT_ROW};
use crate::models::Shift;
use crate::sheet::{CellValue, ColNum, Sheet};
use crate::utils::date::parse_header_date;
use crate::utils::excel_date::excel_serial_to_date;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Date and shift a dynamic column stands for, as read back from its headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMeta {
    pub date: NaiveDate,
    pub shift: Shift,
}

/// Recover `column → (date, shift)` from the header rows of an exported
/// matrix. Columns whose headers do not parse are left out.
pub fn read_column_meta(sheet: &Sheet) -> BTreeMap<ColNum, ColumnMeta> {
    let mut meta = BTreeMap::new();
    let Some(max_col) = sheet.max_col() else {
        return meta;
    };

    for col in FIRST_DYNAMIC_COL..=max_col {
        let Some(date) = header_date(sheet, col) else {
            continue;
        };
        let Some(shift) = sheet
            .value(SHIFT_ROW, col)
            .as_text()
            .and_then(|s| Shift::from_header_label(&s))
        else {
            continue;
        };
        meta.insert(col, ColumnMeta { date, shift });
    }
    meta
}

/// The date heading `col`. Merged date headers only carry their value in
/// the leftmost cell, so blank cells walk left to the nearest value.
fn header_date(sheet: &Sheet, col: ColNum) -> Option<NaiveDate> {
    let mut c = col;
    while sheet.value(DATE_ROW, c).is_blank() {
        if c == FIRST_DYNAMIC_COL {
            return None;
        }
        c -= 1;
    }
    parse_date_value(sheet.value(DATE_ROW, c))
}

fn parse_date_value(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Number(serial) => excel_serial_to_date(*serial),
        CellValue::Text(s) => parse_header_date(s),
        CellValue::Empty | CellValue::Bool(_) => None,
    }
}
