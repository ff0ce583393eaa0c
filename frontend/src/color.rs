use std::str::FromStr;

use sdl2::pixels::Color;

pub const DEFAULT_BACKGROUND: PixelColor = PixelColor::new(0x10, 0x1D, 0x2B);
pub const DEFAULT_FOREGROUND: PixelColor = PixelColor::new(0x90, 0x91, 0x85);

/// RGB color for the display, parseable from a `0xRRGGBB` CLI argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("colors must be six hex digits, optionally prefixed with 0x")]
pub struct ParseColorError;

impl PixelColor {
    pub const fn new(r: u8, g: u8, b: u8) -> PixelColor {
        PixelColor { r, g, b }
    }
}

impl FromStr for PixelColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<PixelColor, ParseColorError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError);
        }

        let r = u8::from_str_radix(&digits[0..2], 16).map_err(|_| ParseColorError)?;
        let g = u8::from_str_radix(&digits[2..4], 16).map_err(|_| ParseColorError)?;
        let b = u8::from_str_radix(&digits[4..6], 16).map_err(|_| ParseColorError)?;

        Ok(PixelColor::new(r, g, b))
    }
}

impl From<PixelColor> for Color {
    fn from(color: PixelColor) -> Color {
        Color::RGB(color.r, color.g, color.b)
    }
}
