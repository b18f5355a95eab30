use serde::{Deserialize, Serialize};

/// An RGBA color. The host platform represents colors as packed ARGB
/// integers; `from_argb`/`to_argb` convert between the two forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::from_rgba(255, 255, 255, 255);

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Accepts `#RRGGBB` and `#AARRGGBB`, with or without the leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => {
                let rgb = u32::from_str_radix(hex, 16).ok()?;
                Some(Self::from_argb(0xFF00_0000 | rgb))
            }
            8 => {
                let argb = u32::from_str_radix(hex, 16).ok()?;
                Some(Self::from_argb(argb))
            }
            _ => None,
        }
    }

    /// `#RRGGBB` from the low 24 bits of the ARGB value. Alpha is dropped.
    pub fn to_rgb_hex(self) -> String {
        format!("#{:06X}", self.to_argb() & 0x00FF_FFFF)
    }

    /// `#AARRGGBB`, the lossless form used for config files.
    pub fn to_argb_hex(self) -> String {
        format!("#{:08X}", self.to_argb())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color '{value}'"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        if color.a == 255 {
            color.to_rgb_hex()
        } else {
            color.to_argb_hex()
        }
    }
}
