//! Fixed geometry and palette of the roster matrix.
//!
//! Positions are zero-based: the name column is `A`, the date header
//! is sheet row 4 and employees start at sheet row 6.

use crate::sheet::{ColNum, RowNum};

pub const NAME_COL: ColNum = 0;
pub const ID_COL: ColNum = 1;
pub const FIRST_DYNAMIC_COL: ColNum = 2;

pub const DATE_ROW: RowNum = 3;
pub const SHIFT_ROW: RowNum = 4;
pub const FIRST_DATA_ROW: RowNum = 5;

/// Consecutive empty rows that end the roster table.
pub const EMPTY_RUN_LIMIT: u32 = 10;

/// Fill of projected entry cells.
pub const EXPORT_HIGHLIGHT: u32 = 0xFFFF_F2CC;
pub const TEAM_FILL: u32 = 0xFFFF_E699;
pub const HEADER_FILL: u32 = 0xFFE7_E6E6;

pub const DEFAULT_TEAM: &str = "מנהלי משמרת";

/// Bounds of the width given to dynamic columns.
pub const MIN_DYNAMIC_WIDTH: f64 = 12.0;
pub const MAX_DYNAMIC_WIDTH: f64 = 40.0;
