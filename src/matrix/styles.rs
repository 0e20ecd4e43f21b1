use super::layout::{EXPORT_HIGHLIGHT, HEADER_FILL, TEAM_FILL};
use crate::sheet::{Align, BorderLine, Borders, CellStyle, ColNum, Fill, RowNum, Sheet};
use crate::utils::excel_date::HEADER_DATE_FORMAT;
use std::ops::RangeInclusive;

pub fn header_style() -> CellStyle {
    CellStyle {
        fill: Some(Fill::solid(HEADER_FILL)),
        bold: true,
        align: Align::centered_wrapped(),
        ..Default::default()
    }
}

pub fn date_header_style() -> CellStyle {
    CellStyle {
        num_format: Some(HEADER_DATE_FORMAT.to_string()),
        ..header_style()
    }
}

pub fn entry_style() -> CellStyle {
    CellStyle {
        fill: Some(Fill::solid(EXPORT_HIGHLIGHT)),
        borders: Borders::all(BorderLine::Thin),
        align: Align::centered_wrapped(),
        ..Default::default()
    }
}

pub fn team_style() -> CellStyle {
    CellStyle {
        fill: Some(Fill::solid(TEAM_FILL)),
        borders: Borders::all(BorderLine::Thick),
        bold: true,
        align: Align::centered_wrapped(),
        ..Default::default()
    }
}

/// Draw `outer` around the rectangle and `inner` between its cells.
pub fn outline(
    sheet: &mut Sheet,
    rows: RangeInclusive<RowNum>,
    cols: RangeInclusive<ColNum>,
    outer: BorderLine,
    inner: BorderLine,
) {
    let (top, bottom) = (*rows.start(), *rows.end());
    let (left, right) = (*cols.start(), *cols.end());

    for row in rows {
        for col in cols.clone() {
            let borders = &mut sheet.cell_mut(row, col).style.borders;
            borders.left = Some(if col == left { outer } else { inner });
            borders.right = Some(if col == right { outer } else { inner });
            borders.top = Some(if row == top { outer } else { inner });
            borders.bottom = Some(if row == bottom { outer } else { inner });
        }
    }
}
