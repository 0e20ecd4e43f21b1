use super::layout::EXPORT_HIGHLIGHT;
use crate::sheet::{Cell, CellColor, PatternType};

/// What a cell fill color means on a re-imported matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    /// The fill the export itself applied to entry cells.
    SystemHighlight,
    /// Anything else: someone recolored the cell after export.
    ExternalMark,
}

impl ColorRole {
    /// Theme and indexed colors have no literal value, they never
    /// match the highlight and count as external marks.
    pub fn of(color: &CellColor) -> Self {
        match color.normalized_argb() {
            Some(EXPORT_HIGHLIGHT) => ColorRole::SystemHighlight,
            _ => ColorRole::ExternalMark,
        }
    }
}

/// `true` when the cell counts as processed for payroll: a solid fill whose
/// foreground is anything but the export highlight, on a non-blank value.
/// A solid fill without a foreground color reads as black, so it is a mark.
pub fn classify(cell: &Cell) -> bool {
    let Some(fill) = cell.style.fill else {
        return false;
    };
    if fill.pattern != PatternType::Solid || cell.value.is_blank() {
        return false;
    }
    fill.fg
        .is_none_or(|fg| ColorRole::of(&fg) == ColorRole::ExternalMark)
}
