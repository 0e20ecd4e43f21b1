use super::columns::{ColumnMap, DateRange};
use super::layout::{DATE_ROW, FIRST_DYNAMIC_COL, MAX_DYNAMIC_WIDTH, MIN_DYNAMIC_WIDTH, SHIFT_ROW};
use super::styles::{date_header_style, header_style, outline};
use crate::models::Shift;
use crate::sheet::{BorderLine, CellValue, ColNum, MAX_COLS, MergeRange, Sheet};
use crate::utils::excel_date::{HEADER_DATE_FORMAT, date_to_excel_serial};
use chrono::NaiveDate;
use unicode_width::UnicodeWidthStr;

/// Replace the dynamic region of `sheet` with one 3-column block per day
/// of `range`. The name and id columns, and merges confined to them, are
/// left untouched. Returns the column allocation that was laid out.
pub fn rebuild(sheet: &mut Sheet, range: DateRange) -> ColumnMap {
    clear_dynamic_region(sheet);

    let map = ColumnMap::new(range);
    for (date, first) in map.day_blocks() {
        write_day_block(sheet, date, first);
    }
    map
}

/// Dissolve every merge reaching the dynamic columns, then delete them.
pub fn clear_dynamic_region(sheet: &mut Sheet) {
    let dynamic: Vec<MergeRange> = sheet
        .merges()
        .iter()
        .filter(|m| m.last_col >= FIRST_DYNAMIC_COL)
        .copied()
        .collect();
    for m in dynamic {
        // hand-edited templates may hold odd merges, skip what fails
        sheet.unmerge(m).ok();
    }

    sheet.delete_cols(FIRST_DYNAMIC_COL, MAX_COLS - u32::from(FIRST_DYNAMIC_COL));
}

fn write_day_block(sheet: &mut Sheet, date: NaiveDate, first: ColNum) {
    let last = first + 2;

    sheet.merge(MergeRange::new(DATE_ROW, first, DATE_ROW, last)).ok();
    for col in first..=last {
        sheet.cell_mut(DATE_ROW, col).style = date_header_style();
    }
    sheet.set_value(DATE_ROW, first, CellValue::Number(date_to_excel_serial(date)));

    for shift in Shift::ALL {
        let col = first + shift.index();
        let label = shift.header_label();
        let cell = sheet.cell_mut(SHIFT_ROW, col);
        cell.value = CellValue::Text(label.clone());
        cell.style = header_style();
        sheet.set_col_width(col, fitted_width(&label, None));
    }

    outline(
        sheet,
        DATE_ROW..=SHIFT_ROW,
        first..=last,
        BorderLine::Thick,
        BorderLine::Thin,
    );
}

/// Width fitting `text` (and the date header), never narrower than
/// `current`, clamped to the dynamic column bounds.
pub(crate) fn fitted_width(text: &str, current: Option<f64>) -> f64 {
    let text_width = UnicodeWidthStr::width(text).max(HEADER_DATE_FORMAT.len()) as f64 + 2.0;
    let wanted = text_width.max(current.unwrap_or(MIN_DYNAMIC_WIDTH));
    wanted.clamp(MIN_DYNAMIC_WIDTH, MAX_DYNAMIC_WIDTH)
}
