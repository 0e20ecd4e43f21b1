use super::classifier::classify;
use super::headers::read_column_meta;
use super::layout::{FIRST_DATA_ROW, ID_COL, NAME_COL};
use super::template::is_team_row;
use crate::errors::{AppError, AppResult};
use crate::models::EntryKey;
use crate::sheet::Sheet;

/// Result of scanning an exported matrix for payroll marks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayrollScan {
    /// Keys of the marked cells, in sheet order.
    pub marked: Vec<EntryKey>,
    pub scanned_cells: usize,
    pub marked_cells: usize,
    /// Dynamic columns whose date and shift headers were recognised.
    pub meta_columns: usize,
}

/// Classify every employee cell under a recognised date/shift header.
///
/// Team header rows and rows missing a name or an id are skipped.
/// A sheet without any recognisable header is rejected as a whole.
pub fn scan_payroll_marks(sheet: &Sheet) -> AppResult<PayrollScan> {
    let meta = read_column_meta(sheet);
    if meta.is_empty() {
        return Err(AppError::MalformedDocument(
            "no date/shift headers found in rows 4-5".into(),
        ));
    }

    let mut scan = PayrollScan {
        meta_columns: meta.len(),
        ..Default::default()
    };
    let Some(max_row) = sheet.max_row() else {
        return Ok(scan);
    };

    for row in FIRST_DATA_ROW..=max_row {
        if is_team_row(sheet, row) {
            continue;
        }
        let (Some(name), Some(_)) = (
            sheet.value(row, NAME_COL).as_text(),
            sheet.value(row, ID_COL).as_text(),
        ) else {
            continue;
        };

        for (col, column) in &meta {
            scan.scanned_cells += 1;
            if sheet.cell(row, *col).is_some_and(classify) {
                scan.marked_cells += 1;
                scan.marked
                    .push(EntryKey::new(column.date, &name, Some(column.shift)));
            }
        }
    }

    Ok(scan)
}
