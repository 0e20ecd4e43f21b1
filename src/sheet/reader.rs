//! `.xlsx` → [`Sheet`] for the active worksheet.
//!
//! Only the parts the matrix engine relies on are read: cell values, the
//! style table (number formats, fonts, fills, borders, cell xfs), merges,
//! column widths, row heights and the right-to-left view flag.

use super::{Align, BorderLine, Borders, CellColor, CellStyle, CellValue, ColNum, Fill, HAlign};
use super::{MergeRange, PatternType, RowNum, Sheet, parse_a1};
use crate::errors::{AppError, AppResult};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

pub fn read_xlsx(path: &Path) -> AppResult<Sheet> {
    let bytes = fs::read(path)?;
    read_xlsx_bytes(&bytes)
}

pub fn read_xlsx_bytes(bytes: &[u8]) -> AppResult<Sheet> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(read_err)?;

    let workbook = read_part(&mut archive, "xl/workbook.xml")?
        .ok_or_else(|| AppError::MalformedDocument("missing xl/workbook.xml".into()))?;
    let (sheet_name, rel_id) = active_sheet(&workbook)?;

    let rels = read_part(&mut archive, "xl/_rels/workbook.xml.rels")?
        .map(|xml| parse_relationships(&xml))
        .transpose()?
        .unwrap_or_default();
    let sheet_path = rels
        .get(&rel_id)
        .map(|target| resolve_target(target))
        .unwrap_or_else(|| "xl/worksheets/sheet1.xml".to_string());

    let shared = read_part(&mut archive, "xl/sharedStrings.xml")?
        .map(|xml| parse_shared_strings(&xml))
        .transpose()?
        .unwrap_or_default();
    let styles = read_part(&mut archive, "xl/styles.xml")?
        .map(|xml| parse_styles(&xml))
        .transpose()?
        .unwrap_or_default();

    let sheet_xml = read_part(&mut archive, &sheet_path)?.ok_or_else(|| {
        AppError::MalformedDocument(format!("worksheet part {sheet_path} not found"))
    })?;

    parse_worksheet(&sheet_xml, &sheet_name, &shared, &styles)
}

fn read_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::WorkbookRead(e.to_string())
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> AppResult<Option<String>> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut xml = String::new();
            file.read_to_string(&mut xml)?;
            Ok(Some(xml))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(read_err(e)),
    }
}

fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target.trim_start_matches("./")),
    }
}

/// Unescaped value of the attribute whose local name is `name`.
fn attr(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

fn attr_num<T: std::str::FromStr>(e: &BytesStart<'_>, name: &[u8]) -> Option<T> {
    attr(e, name).and_then(|v| v.trim().parse().ok())
}

fn attr_flag(e: &BytesStart<'_>, name: &[u8]) -> bool {
    matches!(attr(e, name).as_deref(), Some("1") | Some("true"))
}

// ---------------------------
// workbook.xml + rels
// ---------------------------

fn active_sheet(xml: &str) -> AppResult<(String, String)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut active_tab = 0usize;
    let mut sheets: Vec<(String, String)> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(read_err)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"workbookView" => active_tab = attr_num(&e, b"activeTab").unwrap_or(0),
                b"sheet" => sheets.push((
                    attr(&e, b"name").unwrap_or_else(|| "Sheet1".into()),
                    attr(&e, b"id").unwrap_or_default(),
                )),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let index = if active_tab < sheets.len() { active_tab } else { 0 };
    sheets
        .into_iter()
        .nth(index)
        .ok_or_else(|| AppError::MalformedDocument("workbook has no worksheets".into()))
}

fn parse_relationships(xml: &str) -> AppResult<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut rels = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(read_err)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attr(&e, b"Id"), attr(&e, b"Target")) {
                    rels.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

// ---------------------------
// sharedStrings.xml
// ---------------------------

fn parse_shared_strings(xml: &str) -> AppResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_t = false;
    // phonetic runs are not part of the visible text
    let mut in_phonetic = false;

    loop {
        match reader.read_event_into(&mut buf).map_err(read_err)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current.clear(),
                b"t" => in_t = true,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(t) if in_t && !in_phonetic => {
                current.push_str(&t.unescape().map_err(read_err)?);
            }
            Event::CData(c) if in_t && !in_phonetic => {
                current.push_str(&String::from_utf8_lossy(&c));
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => strings.push(std::mem::take(&mut current)),
                b"t" => in_t = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

// ---------------------------
// styles.xml
// ---------------------------

#[derive(Clone, Copy, PartialEq, Default)]
enum Section {
    #[default]
    None,
    NumFmts,
    Fonts,
    Fills,
    Borders,
    CellXfs,
    Other,
}

#[derive(Default)]
struct XfRef {
    num_fmt_id: u32,
    font_id: usize,
    fill_id: usize,
    border_id: usize,
    align: Align,
}

fn builtin_num_format(id: u32) -> Option<&'static str> {
    match id {
        14 => Some("mm-dd-yy"),
        15 => Some("d-mmm-yy"),
        16 => Some("d-mmm"),
        17 => Some("mmm-yy"),
        22 => Some("m/d/yy h:mm"),
        _ => None,
    }
}

fn parse_color(e: &BytesStart<'_>) -> Option<CellColor> {
    if let Some(rgb) = attr(e, b"rgb") {
        return CellColor::from_hex(&rgb);
    }
    if let Some(theme) = attr_num(e, b"theme") {
        return Some(CellColor::Theme(theme));
    }
    attr_num(e, b"indexed").map(CellColor::Indexed)
}

#[derive(Default)]
struct StylesBuilder {
    section: Section,
    num_fmts: HashMap<u32, String>,
    fonts: Vec<bool>,
    fills: Vec<Fill>,
    borders: Vec<Borders>,
    xfs: Vec<XfRef>,
}

impl StylesBuilder {
    fn open(&mut self, e: &BytesStart<'_>, is_start: bool) {
        let name = e.local_name();
        match (self.section, name.as_ref()) {
            (_, b"numFmts") if is_start => self.section = Section::NumFmts,
            (_, b"fonts") if is_start => self.section = Section::Fonts,
            (_, b"fills") if is_start => self.section = Section::Fills,
            (_, b"borders") if is_start => self.section = Section::Borders,
            (_, b"cellXfs") if is_start => self.section = Section::CellXfs,
            (_, b"cellStyleXfs" | b"dxfs") if is_start => self.section = Section::Other,

            (Section::NumFmts, b"numFmt") => {
                if let (Some(id), Some(code)) = (attr_num(e, b"numFmtId"), attr(e, b"formatCode")) {
                    self.num_fmts.insert(id, code);
                }
            }

            (Section::Fonts, b"font") => self.fonts.push(false),
            (Section::Fonts, b"b") => {
                if let Some(bold) = self.fonts.last_mut() {
                    *bold = !matches!(attr(e, b"val").as_deref(), Some("0") | Some("false"));
                }
            }

            (Section::Fills, b"fill") => self.fills.push(Fill::default()),
            (Section::Fills, b"patternFill") => {
                if let Some(fill) = self.fills.last_mut() {
                    let pattern = attr(e, b"patternType").unwrap_or_default();
                    fill.pattern = PatternType::from_xml(&pattern);
                }
            }
            (Section::Fills, b"gradientFill") => {
                if let Some(fill) = self.fills.last_mut() {
                    fill.pattern = PatternType::Other;
                }
            }
            (Section::Fills, b"fgColor") => {
                if let Some(fill) = self.fills.last_mut() {
                    fill.fg = parse_color(e);
                }
            }

            (Section::Borders, b"border") => self.borders.push(Borders::default()),
            (
                Section::Borders,
                edge @ (b"left" | b"right" | b"top" | b"bottom" | b"start" | b"end"),
            ) => {
                let line = attr(e, b"style").and_then(|s| BorderLine::from_xml(&s));
                if let Some(border) = self.borders.last_mut() {
                    match edge {
                        b"left" | b"start" => border.left = line,
                        b"right" | b"end" => border.right = line,
                        b"top" => border.top = line,
                        _ => border.bottom = line,
                    }
                }
            }

            (Section::CellXfs, b"xf") => self.xfs.push(XfRef {
                num_fmt_id: attr_num(e, b"numFmtId").unwrap_or(0),
                font_id: attr_num(e, b"fontId").unwrap_or(0),
                fill_id: attr_num(e, b"fillId").unwrap_or(0),
                border_id: attr_num(e, b"borderId").unwrap_or(0),
                align: Align::default(),
            }),
            (Section::CellXfs, b"alignment") => {
                if let Some(xf) = self.xfs.last_mut() {
                    xf.align = Align {
                        horizontal: match attr(e, b"horizontal").as_deref() {
                            Some("center") | Some("centerContinuous") => Some(HAlign::Center),
                            Some("left") => Some(HAlign::Left),
                            Some("right") => Some(HAlign::Right),
                            _ => None,
                        },
                        vertical_center: attr(e, b"vertical").as_deref() == Some("center"),
                        wrap: attr_flag(e, b"wrapText"),
                    };
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        if matches!(
            name,
            b"numFmts" | b"fonts" | b"fills" | b"borders" | b"cellXfs" | b"cellStyleXfs" | b"dxfs"
        ) {
            self.section = Section::None;
        }
    }

    fn finish(self) -> Vec<CellStyle> {
        let StylesBuilder {
            num_fmts,
            fonts,
            fills,
            borders,
            xfs,
            ..
        } = self;

        xfs.into_iter()
            .map(|xf| CellStyle {
                fill: fills
                    .get(xf.fill_id)
                    .copied()
                    .filter(|f| f.pattern != PatternType::None),
                borders: borders.get(xf.border_id).copied().unwrap_or_default(),
                bold: fonts.get(xf.font_id).copied().unwrap_or(false),
                align: xf.align,
                num_format: num_fmts
                    .get(&xf.num_fmt_id)
                    .cloned()
                    .or_else(|| builtin_num_format(xf.num_fmt_id).map(str::to_string)),
            })
            .collect()
    }
}

/// Resolved style per cell xf index.
fn parse_styles(xml: &str) -> AppResult<Vec<CellStyle>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut builder = StylesBuilder::default();

    loop {
        match reader.read_event_into(&mut buf).map_err(read_err)? {
            Event::Start(e) => builder.open(&e, true),
            Event::Empty(e) => builder.open(&e, false),
            Event::End(e) => builder.close(e.local_name().as_ref()),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(builder.finish())
}

// ---------------------------
// worksheet xml
// ---------------------------

struct PendingCell {
    row: RowNum,
    col: ColNum,
    style: Option<usize>,
    kind: String,
    raw: String,
}

fn parse_worksheet(
    xml: &str,
    name: &str,
    shared: &[String],
    styles: &[CellStyle],
) -> AppResult<Sheet> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    let mut sheet = Sheet::new(name);
    let mut current_row: RowNum = 0;
    let mut next_col: ColNum = 0;
    let mut pending: Option<PendingCell> = None;
    let mut in_value = false;

    let style_of = |idx: Option<usize>| -> CellStyle {
        idx.and_then(|i| styles.get(i)).cloned().unwrap_or_default()
    };

    loop {
        match reader.read_event_into(&mut buf).map_err(read_err)? {
            Event::Start(e) | Event::Empty(e)
                if matches!(
                    e.local_name().as_ref(),
                    b"sheetView" | b"row" | b"col" | b"mergeCell"
                ) =>
            {
                match e.local_name().as_ref() {
                    b"sheetView" => sheet.right_to_left = attr_flag(&e, b"rightToLeft"),
                    b"row" => {
                        if let Some(r) = attr_num::<RowNum>(&e, b"r").filter(|r| *r > 0) {
                            current_row = r - 1;
                        }
                        next_col = 0;
                        if let Some(ht) = attr_num::<f64>(&e, b"ht") {
                            sheet.set_row_height(current_row, ht);
                        }
                    }
                    b"col" => {
                        let min: u32 = attr_num(&e, b"min").unwrap_or(1).max(1);
                        let max: u32 = attr_num(&e, b"max").unwrap_or(min).min(super::MAX_COLS);
                        if let Some(width) = attr_num::<f64>(&e, b"width") {
                            for c in min..=max {
                                if let Ok(col) = ColNum::try_from(c - 1) {
                                    sheet.set_col_width(col, width);
                                }
                            }
                        }
                    }
                    _ => {
                        let range = attr(&e, b"ref").and_then(|r| MergeRange::from_a1(&r));
                        if let Some(range) = range {
                            // overlapping merges in a hand-edited file are dropped
                            sheet.merge(range).ok();
                        }
                    }
                }
            }
            Event::Start(e) if e.local_name().as_ref() == b"c" => {
                let (row, col) = attr(&e, b"r")
                    .and_then(|r| parse_a1(&r))
                    .unwrap_or((current_row, next_col));
                next_col = col.saturating_add(1);
                pending = Some(PendingCell {
                    row,
                    col,
                    style: attr_num(&e, b"s"),
                    kind: attr(&e, b"t").unwrap_or_default(),
                    raw: String::new(),
                });
            }
            Event::Empty(e) if e.local_name().as_ref() == b"c" => {
                let (row, col) = attr(&e, b"r")
                    .and_then(|r| parse_a1(&r))
                    .unwrap_or((current_row, next_col));
                next_col = col.saturating_add(1);
                let style = style_of(attr_num(&e, b"s"));
                if !style.is_default() {
                    sheet.cell_mut(row, col).style = style;
                }
            }
            Event::Start(e) if matches!(e.local_name().as_ref(), b"v" | b"t") => {
                in_value = pending.is_some();
            }
            Event::Text(t) if in_value => {
                if let Some(cell) = pending.as_mut() {
                    cell.raw.push_str(&t.unescape().map_err(read_err)?);
                }
            }
            Event::CData(c) if in_value => {
                if let Some(cell) = pending.as_mut() {
                    cell.raw.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" => {
                    if let Some(cell) = pending.take() {
                        let value = decode_value(&cell.kind, &cell.raw, shared);
                        let style = style_of(cell.style);
                        if value != CellValue::Empty || !style.is_default() {
                            let target = sheet.cell_mut(cell.row, cell.col);
                            target.value = value;
                            target.style = style;
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheet)
}

fn decode_value(kind: &str, raw: &str, shared: &[String]) -> CellValue {
    match kind {
        "s" => raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|i| shared.get(i))
            .map(|s| CellValue::Text(s.clone()))
            .unwrap_or_default(),
        "b" => CellValue::Bool(raw.trim() == "1"),
        "str" | "inlineStr" | "e" => {
            if raw.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(raw.to_string())
            }
        }
        _ => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                CellValue::Empty
            } else {
                trimmed
                    .parse::<f64>()
                    .map(CellValue::Number)
                    .unwrap_or_else(|_| CellValue::Text(trimmed.to_string()))
            }
        }
    }
}
