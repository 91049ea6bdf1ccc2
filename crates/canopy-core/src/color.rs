//! Color values shared by the base layer, the brush and the session.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Preset canopy fill colors offered by the designer.
pub const PRESET_FILL_COLORS: [&str; 7] = [
    "#1e293b", // classic black
    "#1e40af", // navy blue
    "#059669", // emerald
    "#d97706", // amber
    "#be123c", // rose
    "#7e22ce", // purple
    "#f1f5f9", // cloud white
];

/// Preset brush colors for the paint tool.
pub const PRESET_BRUSH_COLORS: [&str; 7] = [
    "#ffffff", "#000000", "#f43f5e", "#fbbf24", "#34d399", "#3b82f6", "#a855f7",
];

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RgbaColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn white() -> Self {
        Self::opaque(255, 255, 255)
    }

    pub const fn black() -> Self {
        Self::opaque(0, 0, 0)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a `#rrggbb`, `#rrggbbaa` or `#rgb` hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let short = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
                Some(Self::opaque(short(0)?, short(1)?, short(2)?))
            }
            6 => Some(Self::opaque(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Format as lowercase `#rrggbb`, appending alpha only when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for RgbaColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<RgbaColor> for Color {
    fn from(color: RgbaColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Parse a CSS hex color like "#1e40af" into a [`Color`].
pub fn parse_hex_color(s: &str) -> Option<Color> {
    RgbaColor::from_hex(s).map(Color::from)
}

/// Whether `color` is one of the preset fill colors.
pub fn is_preset_fill(color: RgbaColor) -> bool {
    PRESET_FILL_COLORS
        .iter()
        .filter_map(|hex| RgbaColor::from_hex(hex))
        .any(|preset| preset == color)
}
