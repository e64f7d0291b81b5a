use serde::{Deserialize, Serialize};

/// RGB color, each component in 0.0–1.0.
///
/// Serialized as a `#RRGGBB` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    pub const fn gray(level: f64) -> Self {
        Color::rgb(level, level, level)
    }

    /// From a `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xFF) as f64 / 255.0;
        Color::rgb(channel(16), channel(8), channel(0))
    }

    fn to_hex(self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let digits = value.strip_prefix('#').unwrap_or(&value);
        if digits.len() != 6 {
            return Err(format!("invalid color '{value}': expected #RRGGBB"));
        }
        u32::from_str_radix(digits, 16)
            .map(Color::from_hex)
            .map_err(|_| format!("invalid color '{value}': expected #RRGGBB"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Font state applied to text written through the layout context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub size: f64,
    pub color: Color,
}

impl TextStyle {
    pub const fn regular(size: f64) -> Self {
        TextStyle {
            weight: FontWeight::Regular,
            size,
            color: Color::BLACK,
        }
    }

    pub const fn bold(size: f64) -> Self {
        TextStyle {
            weight: FontWeight::Bold,
            size,
            color: Color::BLACK,
        }
    }

    pub const fn with_color(self, color: Color) -> Self {
        TextStyle { color, ..self }
    }

    pub const fn with_weight(self, weight: FontWeight) -> Self {
        TextStyle { weight, ..self }
    }

    /// Distance the cursor moves for one line of this style.
    pub fn line_height(&self) -> f64 {
        self.size * 1.2
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle::regular(12.0)
    }
}

/// Horizontal placement of text inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Stroke weight of a horizontal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleWeight {
    Light,
    Heavy,
}

impl RuleWeight {
    pub fn line_width(self) -> f64 {
        match self {
            RuleWeight::Light => 1.0,
            RuleWeight::Heavy => 3.0,
        }
    }
}

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl Default for PageSetup {
    /// US Letter with one-inch margins.
    fn default() -> Self {
        PageSetup {
            width: 612.0,
            height: 792.0,
            margin_top: 72.0,
            margin_bottom: 72.0,
            margin_left: 72.0,
            margin_right: 72.0,
        }
    }
}

impl PageSetup {
    /// A4 with one-inch margins.
    pub fn a4() -> Self {
        PageSetup {
            width: 595.0,
            height: 842.0,
            ..PageSetup::default()
        }
    }

    /// Horizontal space between the left and right margins.
    pub fn usable_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn content_left(&self) -> f64 {
        self.margin_left
    }

    pub fn content_right(&self) -> f64 {
        self.width - self.margin_right
    }

    /// Lowest cursor position text may start at.
    pub fn content_bottom(&self) -> f64 {
        self.height - self.margin_bottom
    }
}
