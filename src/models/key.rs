use super::shift::Shift;
use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Ledger key `date|employee|shift`.
///
/// The shift segment may be empty: touch events from the editing UI can
/// arrive before a shift is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    pub date: NaiveDate,
    pub employee: String,
    pub shift: Option<Shift>,
}

impl EntryKey {
    pub fn new(date: NaiveDate, employee: &str, shift: Option<Shift>) -> Self {
        Self {
            date,
            employee: employee.trim().to_string(),
            shift,
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            self.date.format("%Y-%m-%d"),
            self.employee,
            self.shift.map(Shift::name).unwrap_or("")
        )
    }
}

impl FromStr for EntryKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // employee names may contain '|', so split from both ends
        let (date, rest) = s
            .split_once('|')
            .ok_or_else(|| format!("invalid ledger key '{s}'"))?;
        let (employee, shift) = rest
            .rsplit_once('|')
            .ok_or_else(|| format!("invalid ledger key '{s}'"))?;

        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| format!("invalid date in ledger key '{s}'"))?;
        let shift = if shift.trim().is_empty() {
            None
        } else {
            let shift = Shift::from_name(shift)
                .ok_or_else(|| format!("invalid shift in ledger key '{s}'"))?;
            Some(shift)
        };

        Ok(EntryKey::new(date, employee, shift))
    }
}

impl Serialize for EntryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntryKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
