use chrono::{Local, NaiveDateTime, Timelike};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// On-disk timestamp format of both ledgers.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Second-precision local timestamp. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stamp(NaiveDateTime);

impl Stamp {
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    /// Sub-second precision is dropped, as the file format cannot hold it.
    pub fn at(dt: NaiveDateTime) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    pub fn parse(s: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(s.trim(), STAMP_FORMAT)
            .ok()
            .map(Self)
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(STAMP_FORMAT))
    }
}

impl Serialize for Stamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Stamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Stamp::parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}
