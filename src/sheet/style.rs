//! Cell formatting as far as the matrix engine needs it: fill, borders,
//! boldness, alignment and number format.

/// Color as stored in an xlsx style part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellColor {
    /// `AARRGGBB` as written (alpha may be `00`).
    Rgb(u32),
    Theme(u32),
    Indexed(u32),
}

impl CellColor {
    /// Parse `RRGGBB` or `AARRGGBB` hex.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#');
        if s.len() != 6 && s.len() != 8 {
            return None;
        }
        u32::from_str_radix(s, 16).ok().map(CellColor::Rgb)
    }

    /// Opaque ARGB for literal colors. A zero alpha byte (`00RRGGBB`, or a
    /// 6-digit `RRGGBB`) is read as fully opaque, which is how spreadsheet
    /// editors mean it. Theme and indexed colors have no literal value.
    pub fn normalized_argb(&self) -> Option<u32> {
        match *self {
            CellColor::Rgb(v) if v >> 24 == 0 => Some(v | 0xFF00_0000),
            CellColor::Rgb(v) => Some(v),
            CellColor::Theme(_) | CellColor::Indexed(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternType {
    #[default]
    None,
    Solid,
    Other,
}

impl PatternType {
    pub fn from_xml(s: &str) -> Self {
        match s {
            "none" | "" => PatternType::None,
            "solid" => PatternType::Solid,
            _ => PatternType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fill {
    pub pattern: PatternType,
    pub fg: Option<CellColor>,
}

impl Fill {
    pub fn solid(argb: u32) -> Self {
        Self {
            pattern: PatternType::Solid,
            fg: Some(CellColor::Rgb(argb)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderLine {
    Thin,
    Medium,
    Thick,
}

impl BorderLine {
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "none" | "" => None,
            "medium" | "mediumDashed" | "mediumDashDot" | "mediumDashDotDot" => {
                Some(BorderLine::Medium)
            }
            "thick" | "double" => Some(BorderLine::Thick),
            _ => Some(BorderLine::Thin),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Borders {
    pub left: Option<BorderLine>,
    pub right: Option<BorderLine>,
    pub top: Option<BorderLine>,
    pub bottom: Option<BorderLine>,
}

impl Borders {
    pub fn all(line: BorderLine) -> Self {
        Self {
            left: Some(line),
            right: Some(line),
            top: Some(line),
            bottom: Some(line),
        }
    }

    /// Fill every missing edge with `line`, keeping edges already set.
    pub fn or_all(self, line: BorderLine) -> Self {
        Self {
            left: self.left.or(Some(line)),
            right: self.right.or(Some(line)),
            top: self.top.or(Some(line)),
            bottom: self.bottom.or(Some(line)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.top.is_none() && self.bottom.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Align {
    pub horizontal: Option<HAlign>,
    pub vertical_center: bool,
    pub wrap: bool,
}

impl Align {
    pub fn centered_wrapped() -> Self {
        Self {
            horizontal: Some(HAlign::Center),
            vertical_center: true,
            wrap: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellStyle {
    pub fill: Option<Fill>,
    pub borders: Borders,
    pub bold: bool,
    pub align: Align,
    pub num_format: Option<String>,
}

impl CellStyle {
    pub fn is_default(&self) -> bool {
        *self == CellStyle::default()
    }
}
