//! In-memory worksheet model shared by the xlsx reader, the xlsx writer and
//! the matrix engine.
//!
//! Rows and columns are zero-based, exactly as in `rust_xlsxwriter`
//! (`A1` is `(0, 0)`). Cells are stored sparsely: a cell exists as soon as it
//! carries a value or a style.

mod reader;
mod style;
mod writer;

pub use reader::{read_xlsx, read_xlsx_bytes};
pub use style::{Align, BorderLine, Borders, CellColor, CellStyle, Fill, HAlign, PatternType};
pub use writer::{write_xlsx, write_xlsx_bytes};

use crate::errors::SheetError;
use std::collections::BTreeMap;
use std::fmt;

pub type RowNum = u32;
pub type ColNum = u16;

/// Column count of an xlsx worksheet (A..XFD).
pub const MAX_COLS: u32 = 16_384;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// `true` for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) | CellValue::Bool(_) => false,
        }
    }

    /// Trimmed textual rendering, `None` when blank.
    /// Integral numbers render without decimals (ids are often stored as numbers).
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let t = s.trim();
                (!t.is_empty()).then(|| t.to_string())
            }
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

/// Rectangular merge region, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MergeRange {
    pub first_row: RowNum,
    pub first_col: ColNum,
    pub last_row: RowNum,
    pub last_col: ColNum,
}

impl MergeRange {
    pub fn new(first_row: RowNum, first_col: ColNum, last_row: RowNum, last_col: ColNum) -> Self {
        Self {
            first_row: first_row.min(last_row),
            first_col: first_col.min(last_col),
            last_row: first_row.max(last_row),
            last_col: first_col.max(last_col),
        }
    }

    /// Parse an `A1:C1` reference.
    pub fn from_a1(s: &str) -> Option<Self> {
        let (a, b) = s.split_once(':').unwrap_or((s, s));
        let (r1, c1) = parse_a1(a)?;
        let (r2, c2) = parse_a1(b)?;
        Some(Self::new(r1, c1, r2, c2))
    }

    pub fn contains(&self, row: RowNum, col: ColNum) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }

    pub fn overlaps(&self, other: &MergeRange) -> bool {
        self.first_row <= other.last_row
            && other.first_row <= self.last_row
            && self.first_col <= other.last_col
            && other.first_col <= self.last_col
    }

    pub fn is_single_row(&self) -> bool {
        self.first_row == self.last_row
    }

    pub fn is_single_cell(&self) -> bool {
        self.is_single_row() && self.first_col == self.last_col
    }
}

impl fmt::Display for MergeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            a1(self.first_row, self.first_col),
            a1(self.last_row, self.last_col)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    pub right_to_left: bool,
    cells: BTreeMap<(RowNum, ColNum), Cell>,
    merges: Vec<MergeRange>,
    col_widths: BTreeMap<ColNum, f64>,
    row_heights: BTreeMap<RowNum, f64>,
}

static EMPTY_VALUE: CellValue = CellValue::Empty;

impl Sheet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn cell(&self, row: RowNum, col: ColNum) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Value at `(row, col)`, `Empty` when the cell does not exist.
    pub fn value(&self, row: RowNum, col: ColNum) -> &CellValue {
        self.cells
            .get(&(row, col))
            .map(|c| &c.value)
            .unwrap_or(&EMPTY_VALUE)
    }

    /// Cell at `(row, col)`, created empty if missing.
    pub fn cell_mut(&mut self, row: RowNum, col: ColNum) -> &mut Cell {
        self.cells.entry((row, col)).or_default()
    }

    pub fn set_value(&mut self, row: RowNum, col: ColNum, value: CellValue) {
        self.cell_mut(row, col).value = value;
    }

    pub fn cells(&self) -> impl Iterator<Item = ((RowNum, ColNum), &Cell)> {
        self.cells.iter().map(|(k, v)| (*k, v))
    }

    /// Highest row holding a cell or covered by a merge.
    pub fn max_row(&self) -> Option<RowNum> {
        let cells = self.cells.keys().map(|(r, _)| *r).max();
        let merges = self.merges.iter().map(|m| m.last_row).max();
        cells.max(merges)
    }

    /// Highest column holding a cell or covered by a merge.
    pub fn max_col(&self) -> Option<ColNum> {
        let cells = self.cells.keys().map(|(_, c)| *c).max();
        let merges = self.merges.iter().map(|m| m.last_col).max();
        cells.max(merges)
    }

    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    pub fn merge(&mut self, range: MergeRange) -> Result<(), SheetError> {
        if range.is_single_cell() {
            return Err(SheetError::SingleCellMerge(range.to_string()));
        }
        if let Some(existing) = self.merges.iter().find(|m| m.overlaps(&range)) {
            return Err(SheetError::MergeOverlap(
                range.to_string(),
                existing.to_string(),
            ));
        }
        self.merges.push(range);
        Ok(())
    }

    pub fn unmerge(&mut self, range: MergeRange) -> Result<(), SheetError> {
        let before = self.merges.len();
        self.merges.retain(|m| *m != range);
        if self.merges.len() == before {
            return Err(SheetError::UnknownMerge(range.to_string()));
        }
        Ok(())
    }

    pub fn col_width(&self, col: ColNum) -> Option<f64> {
        self.col_widths.get(&col).copied()
    }

    pub fn set_col_width(&mut self, col: ColNum, width: f64) {
        self.col_widths.insert(col, width);
    }

    pub fn col_widths(&self) -> impl Iterator<Item = (ColNum, f64)> + '_ {
        self.col_widths.iter().map(|(c, w)| (*c, *w))
    }

    pub fn set_row_height(&mut self, row: RowNum, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn row_heights(&self) -> impl Iterator<Item = (RowNum, f64)> + '_ {
        self.row_heights.iter().map(|(r, h)| (*r, *h))
    }

    /// Delete `count` columns starting at `first`, shifting everything to the
    /// right of them leftwards. Merges intersecting the deleted span are dropped.
    pub fn delete_cols(&mut self, first: ColNum, count: u32) {
        if count == 0 {
            return;
        }
        let first = u32::from(first);
        let end = first.saturating_add(count);

        let shift = |col: ColNum| -> Option<ColNum> {
            let c = u32::from(col);
            if c < first {
                Some(col)
            } else if c >= end {
                ColNum::try_from(c - count).ok()
            } else {
                None
            }
        };

        self.cells = std::mem::take(&mut self.cells)
            .into_iter()
            .filter_map(|((r, c), cell)| shift(c).map(|c| ((r, c), cell)))
            .collect();

        self.col_widths = std::mem::take(&mut self.col_widths)
            .into_iter()
            .filter_map(|(c, w)| shift(c).map(|c| (c, w)))
            .collect();

        self.merges = std::mem::take(&mut self.merges)
            .into_iter()
            .filter_map(|m| {
                let touches = u32::from(m.last_col) >= first && u32::from(m.first_col) < end;
                if touches {
                    return None;
                }
                Some(MergeRange::new(
                    m.first_row,
                    shift(m.first_col)?,
                    m.last_row,
                    shift(m.last_col)?,
                ))
            })
            .collect();
    }
}

/// Column letters for a zero-based column (`0` → `A`, `26` → `AA`).
pub fn col_letter(col: ColNum) -> String {
    let mut n = u32::from(col) + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        out.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

pub fn a1(row: RowNum, col: ColNum) -> String {
    format!("{}{}", col_letter(col), row + 1)
}

/// Parse an `A1`-style reference (absolute markers allowed) into zero-based
/// `(row, col)`.
pub fn parse_a1(s: &str) -> Option<(RowNum, ColNum)> {
    let s = s.trim().replace('$', "");
    let split = s.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = s.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut col: u32 = 0;
    for ch in letters.chars() {
        col = col * 26 + (ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 || col == 0 || col > MAX_COLS {
        return None;
    }
    Some((row - 1, ColNum::try_from(col - 1).ok()?))
}
