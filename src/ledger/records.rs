use super::stamp::Stamp;
use serde::{Deserialize, Serialize};

/// Last edit of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchRecord {
    pub touched_at: Stamp,
    pub by: String,
}

/// Payroll sign-off of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub done: bool,
    pub updated_at: Stamp,
    pub by: String,
}

/// An entry edited after its payroll sign-off. `by` is the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirtyEntry {
    pub payroll_at: Stamp,
    pub touched_at: Stamp,
    pub by: String,
}
