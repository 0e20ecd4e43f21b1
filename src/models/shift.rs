use serde::Serialize;

/// Label prefix written in the shift header row (`משמרת בוקר`).
pub const SHIFT_LABEL_PREFIX: &str = "משמרת";

/// The three shifts of a day, in display order.
/// The order fixes the column sub-offset inside a day block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Shift {
    Morning, // בוקר
    Evening, // ערב
    Night,   // לילה
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Evening, Shift::Night];

    /// Sub-offset of the shift column within its day block (0, 1, 2).
    pub fn index(self) -> u16 {
        match self {
            Shift::Morning => 0,
            Shift::Evening => 1,
            Shift::Night => 2,
        }
    }

    /// Name used in entries, ledger keys and headers.
    pub fn name(self) -> &'static str {
        match self {
            Shift::Morning => "בוקר",
            Shift::Evening => "ערב",
            Shift::Night => "לילה",
        }
    }

    /// Text of the shift header cell.
    pub fn header_label(self) -> String {
        format!("{SHIFT_LABEL_PREFIX} {}", self.name())
    }

    /// Accepts the Hebrew name or the English one (any case).
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Shift::ALL
            .into_iter()
            .find(|shift| shift.name() == s)
            .or_else(|| match s.to_lowercase().as_str() {
                "morning" => Some(Shift::Morning),
                "evening" => Some(Shift::Evening),
                "night" => Some(Shift::Night),
                _ => None,
            })
    }

    /// Parse a shift header cell, tolerating the label prefix and
    /// non-breaking spaces left by spreadsheet editors.
    pub fn from_header_label(s: &str) -> Option<Self> {
        let cleaned = s.replace('\u{a0}', " ").replace(SHIFT_LABEL_PREFIX, "");
        Shift::from_name(&cleaned)
    }
}
