use super::builder::fitted_width;
use super::columns::{ColumnMap, DateRange};
use super::layout::NAME_COL;
use super::styles::{entry_style, team_style};
use crate::models::{Entry, Roster};
use crate::sheet::{BorderLine, CellValue, ColNum, MergeRange, RowNum, Sheet};
use serde::Serialize;
use std::collections::HashMap;

/// Outcome of a projection: entries written and entries dropped as
/// unresolvable (unknown name, blank or unknown shift, bad or out-of-range date).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionReport {
    pub placed: usize,
    pub dropped: usize,
}

/// Write `entries` into the matrix laid out for `range`, then redraw the
/// grid borders and the team header rows over the final column extent.
///
/// `roster` must come from the template before the dynamic region was
/// rebuilt, since rebuilding dissolves the wide team merges.
pub fn project(
    sheet: &mut Sheet,
    roster: &Roster,
    entries: &[Entry],
    range: DateRange,
) -> ProjectionReport {
    let map = ColumnMap::new(range);
    let rows = roster.row_index();
    let mut report = ProjectionReport::default();

    for entry in entries {
        match resolve(entry, &rows, &map) {
            Some((row, col)) => {
                write_entry(sheet, row, col, &entry.display_text());
                report.placed += 1;
            }
            None => report.dropped += 1,
        }
    }

    apply_grid_borders(sheet);
    restamp_teams(sheet, roster);

    report
}

fn resolve(
    entry: &Entry,
    rows: &HashMap<&str, RowNum>,
    map: &ColumnMap,
) -> Option<(RowNum, ColNum)> {
    let row = *rows.get(entry.employee()?)?;
    let col = map.column_for(entry.parsed_date()?, entry.parsed_shift()?)?;
    Some((row, col))
}

/// Last write wins: the cell is overwritten whatever it held.
fn write_entry(sheet: &mut Sheet, row: RowNum, col: ColNum, text: &str) {
    let cell = sheet.cell_mut(row, col);
    cell.value = if text.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(text.to_string())
    };
    cell.style = entry_style();

    let width = fitted_width(text, sheet.col_width(col));
    sheet.set_col_width(col, width);
}

/// Thin borders on every cell of the used area. Edges already drawn
/// (the thick day block outlines) are kept.
pub fn apply_grid_borders(sheet: &mut Sheet) {
    let (Some(max_row), Some(max_col)) = (sheet.max_row(), sheet.max_col()) else {
        return;
    };
    for row in 0..=max_row {
        for col in 0..=max_col {
            let borders = &mut sheet.cell_mut(row, col).style.borders;
            *borders = borders.or_all(BorderLine::Thin);
        }
    }
}

/// Merge each team header row across the current width and restyle it.
pub fn restamp_teams(sheet: &mut Sheet, roster: &Roster) {
    let Some(max_col) = sheet.max_col() else {
        return;
    };

    for (name, row) in roster.anchors() {
        let stale: Vec<MergeRange> = sheet
            .merges()
            .iter()
            .filter(|m| m.first_row == row && m.is_single_row())
            .copied()
            .collect();
        for m in stale {
            sheet.unmerge(m).ok();
        }
        if max_col > NAME_COL {
            sheet.merge(MergeRange::new(row, NAME_COL, row, max_col)).ok();
        }

        for col in NAME_COL..=max_col {
            let cell = sheet.cell_mut(row, col);
            cell.value = CellValue::Empty;
            cell.style = team_style();
        }
        sheet.set_value(row, NAME_COL, CellValue::Text(name.to_string()));
    }
}
