// src/sheet/writer.rs

use super::{
    BorderLine, CellColor, CellStyle, CellValue, ColNum, HAlign, PatternType, RowNum, Sheet,
};
use crate::errors::AppResult;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;

/// Write the sheet as a single-worksheet `.xlsx` file.
pub fn write_xlsx(sheet: &Sheet, path: &Path) -> AppResult<()> {
    let mut workbook = build_workbook(sheet)?;
    workbook.save(path)?;
    Ok(())
}

/// Same as [`write_xlsx`], returning the file bytes.
pub fn write_xlsx_bytes(sheet: &Sheet) -> AppResult<Vec<u8>> {
    let mut workbook = build_workbook(sheet)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(sheet: &Sheet) -> AppResult<Workbook> {
    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        let name = if sheet.name.trim().is_empty() {
            "Sheet1"
        } else {
            sheet.name.as_str()
        };
        worksheet.set_name(name)?;
        if sheet.right_to_left {
            worksheet.set_right_to_left(true);
        }

        for (col, width) in sheet.col_widths() {
            worksheet.set_column_width(col, width)?;
        }
        for (row, height) in sheet.row_heights() {
            worksheet.set_row_height(row, height)?;
        }

        // merges first: merge_range writes formatted blanks over the whole
        // region, the real cell contents are written on top afterwards
        for m in sheet.merges() {
            let format = sheet
                .cell(m.first_row, m.first_col)
                .map(|c| to_format(&c.style))
                .unwrap_or_else(Format::new);
            worksheet.merge_range(m.first_row, m.first_col, m.last_row, m.last_col, "", &format)?;
        }

        for ((row, col), cell) in sheet.cells() {
            write_cell(worksheet, row, col, &cell.value, &cell.style)?;
        }
    }
    Ok(workbook)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: &CellValue,
    style: &CellStyle,
) -> AppResult<()> {
    let format = to_format(style);
    match value {
        CellValue::Empty => {
            if !style.is_default() {
                worksheet.write_blank(row, col, &format)?;
            }
        }
        CellValue::Text(s) => {
            worksheet.write_string_with_format(row, col, s, &format)?;
        }
        CellValue::Number(n) => {
            worksheet.write_number_with_format(row, col, *n, &format)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean_with_format(row, col, *b, &format)?;
        }
    }
    Ok(())
}

fn to_format(style: &CellStyle) -> Format {
    let mut format = Format::new();

    if let Some(fill) = &style.fill
        && fill.pattern == PatternType::Solid
        && let Some(color) = fill.fg.and_then(to_color)
    {
        format = format
            .set_background_color(color)
            .set_pattern(FormatPattern::Solid);
    }

    let b = &style.borders;
    if let Some(line) = b.left {
        format = format.set_border_left(to_border(line));
    }
    if let Some(line) = b.right {
        format = format.set_border_right(to_border(line));
    }
    if let Some(line) = b.top {
        format = format.set_border_top(to_border(line));
    }
    if let Some(line) = b.bottom {
        format = format.set_border_bottom(to_border(line));
    }

    if style.bold {
        format = format.set_bold();
    }

    match style.align.horizontal {
        Some(HAlign::Left) => format = format.set_align(FormatAlign::Left),
        Some(HAlign::Center) => format = format.set_align(FormatAlign::Center),
        Some(HAlign::Right) => format = format.set_align(FormatAlign::Right),
        None => {}
    }
    if style.align.vertical_center {
        format = format.set_align(FormatAlign::VerticalCenter);
    }
    if style.align.wrap {
        format = format.set_text_wrap();
    }

    if let Some(num_format) = &style.num_format {
        format = format.set_num_format(num_format);
    }

    format
}

fn to_color(color: CellColor) -> Option<Color> {
    match color {
        CellColor::Rgb(_) => color
            .normalized_argb()
            .map(|argb| Color::RGB(argb & 0x00FF_FFFF)),
        CellColor::Theme(theme) if theme <= 9 => Some(Color::Theme(theme as u8, 0)),
        // legacy palette entries are outside the supported colors
        CellColor::Theme(_) | CellColor::Indexed(_) => None,
    }
}

fn to_border(line: BorderLine) -> FormatBorder {
    match line {
        BorderLine::Thin => FormatBorder::Thin,
        BorderLine::Medium => FormatBorder::Medium,
        BorderLine::Thick => FormatBorder::Thick,
    }
}
