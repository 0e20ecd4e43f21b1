use super::layout::FIRST_DYNAMIC_COL;
use crate::errors::{AppError, AppResult};
use crate::models::Shift;
use crate::sheet::{ColNum, MAX_COLS};
use crate::utils::date::require_date;
use chrono::{Days, NaiveDate};

/// Inclusive, ascending, non-empty date range of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if end < start {
            return Err(AppError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let days = (end - start).num_days() + 1;
        let available = i64::from(MAX_COLS - u32::from(FIRST_DYNAMIC_COL)) / 3;
        if days > available {
            return Err(AppError::RangeTooLong {
                days: u32::try_from(days).unwrap_or(u32::MAX),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` bounds.
    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        Self::new(require_date(start)?, require_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn days(&self) -> u32 {
        // bounded by the column check in `new`
        (self.end - self.start).num_days() as u32 + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }

    /// Zero-based position of `date` inside the range.
    pub fn ordinal(&self, date: NaiveDate) -> Option<u32> {
        self.contains(date)
            .then(|| (date - self.start).num_days() as u32)
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let (start, days) = (self.start, self.days());
        (0..days).filter_map(move |i| start.checked_add_days(Days::new(u64::from(i))))
    }
}

/// `(date, shift) → column` allocation for a range: three columns per day
/// in shift order, starting at the first dynamic column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    range: DateRange,
}

impl ColumnMap {
    pub fn new(range: DateRange) -> Self {
        Self { range }
    }

    pub fn column_for(&self, date: NaiveDate, shift: Shift) -> Option<ColNum> {
        let ordinal = self.range.ordinal(date)?;
        let col = u32::from(FIRST_DYNAMIC_COL) + 3 * ordinal + u32::from(shift.index());
        ColNum::try_from(col).ok()
    }

    /// Inverse of [`column_for`](Self::column_for).
    pub fn slot_at(&self, col: ColNum) -> Option<(NaiveDate, Shift)> {
        let offset = u32::from(col).checked_sub(u32::from(FIRST_DYNAMIC_COL))?;
        if offset >= self.dynamic_width() {
            return None;
        }
        let date = self
            .range
            .start
            .checked_add_days(Days::new(u64::from(offset / 3)))?;
        Some((date, Shift::ALL[(offset % 3) as usize]))
    }

    /// Number of dynamic columns.
    pub fn dynamic_width(&self) -> u32 {
        self.range.days() * 3
    }

    pub fn last_col(&self) -> ColNum {
        // DateRange::new keeps the allocation inside the sheet
        (u32::from(FIRST_DYNAMIC_COL) + self.dynamic_width() - 1) as ColNum
    }

    /// First column of each day block, in date order.
    pub fn day_blocks(&self) -> impl Iterator<Item = (NaiveDate, ColNum)> + use<> {
        self.range
            .iter()
            .zip((0u32..).map(|i| (u32::from(FIRST_DYNAMIC_COL) + 3 * i) as ColNum))
    }

    /// Every `(date, shift, column)` slot, in allocation order.
    pub fn slots(&self) -> impl Iterator<Item = (NaiveDate, Shift, ColNum)> + use<> {
        self.day_blocks().flat_map(|(date, first)| {
            Shift::ALL
                .into_iter()
                .map(move |shift| (date, shift, first + shift.index()))
        })
    }
}
