use super::key::EntryKey;
use super::shift::Shift;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One attendance action as submitted by the editing UI.
/// Every field is optional: partial submissions are expected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub date: Option<String>,
    pub name: Option<String>,
    pub shift: Option<String>,
    pub action: Option<String>,
    pub note: Option<String>,
}

fn trimmed(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Entry {
    pub fn new(date: &str, name: &str, shift: &str, action: &str, note: &str) -> Self {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            date: opt(date),
            name: opt(name),
            shift: opt(shift),
            action: opt(action),
            note: opt(note),
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        trimmed(&self.date).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    pub fn employee(&self) -> Option<&str> {
        trimmed(&self.name)
    }

    pub fn parsed_shift(&self) -> Option<Shift> {
        trimmed(&self.shift).and_then(Shift::from_name)
    }

    /// `action`, `note`, or `action – note` when both are present.
    pub fn display_text(&self) -> String {
        match (trimmed(&self.action), trimmed(&self.note)) {
            (Some(action), Some(note)) => format!("{action} – {note}"),
            (Some(action), None) => action.to_string(),
            (None, Some(note)) => note.to_string(),
            (None, None) => String::new(),
        }
    }

    /// Ledger key for a touch event. A blank shift leaves the shift segment
    /// empty; a missing date or name, or an unknown shift, yields `None`.
    pub fn touch_key(&self) -> Option<EntryKey> {
        let shift = match trimmed(&self.shift) {
            None => None,
            Some(s) => Some(Shift::from_name(s)?),
        };
        Some(EntryKey::new(self.parsed_date()?, self.employee()?, shift))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntriesFile {
    List(Vec<Entry>),
    Wrapped { entries: Vec<Entry> },
}

/// Read entries from a JSON file holding either a bare array or
/// an object with an `entries` array.
pub fn load_entries(path: &Path) -> AppResult<Vec<Entry>> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::InvalidEntries(format!("{}: {e}", path.display())))?;
    parse_entries(&content)
}

pub fn parse_entries(json: &str) -> AppResult<Vec<Entry>> {
    match serde_json::from_str::<EntriesFile>(json) {
        Ok(EntriesFile::List(entries)) | Ok(EntriesFile::Wrapped { entries }) => Ok(entries),
        Err(e) => Err(AppError::InvalidEntries(e.to_string())),
    }
}
