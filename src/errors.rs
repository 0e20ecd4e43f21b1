//! Unified application error type.
//! All modules (sheet, matrix, ledger, db, core, cli) return AppError to keep
//! the error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Ledger serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Workbook
    // ---------------------------
    #[error("Failed to read xlsx: {0}")]
    WorkbookRead(String),

    #[error("Failed to write xlsx: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    // ---------------------------
    // Validation
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange { start: String, end: String },

    #[error("Date range of {days} days does not fit in a worksheet")]
    RangeTooLong { days: u32 },

    #[error("Invalid entries file: {0}")]
    InvalidEntries(String),

    #[error("No entries to export")]
    NoEntries,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

/// Structural failures on the in-memory worksheet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("merge {0} overlaps existing merge {1}")]
    MergeOverlap(String, String),

    #[error("merge {0} covers a single cell")]
    SingleCellMerge(String),

    #[error("no merge {0} on this sheet")]
    UnknownMerge(String),
}

pub type AppResult<T> = Result<T, AppError>;
