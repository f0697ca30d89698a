use serde::{Deserialize, Serialize};

use crate::export::ExportError;
use crate::models::ColorPalette;

/// An RGB colour with components in 0.0–1.0, as PDF operators expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    /// Parses `#rgb` or `#rrggbb` (the `#` is optional).
    pub fn parse_hex(field: &'static str, value: &str) -> Result<Self, ExportError> {
        let invalid = || ExportError::InvalidColor {
            field,
            value: value.to_string(),
        };
        let hex = value.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(invalid()),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map(|v| f32::from(v) / 255.0)
                .map_err(|_| invalid())
        };
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn is_white(&self) -> bool {
        *self == Rgb::WHITE
    }
}

/// A palette with every colour parsed. Fails on the first malformed colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPalette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub text: Rgb,
    pub background: Rgb,
}

impl ResolvedPalette {
    pub fn parse(palette: &ColorPalette) -> Result<Self, ExportError> {
        Ok(Self {
            primary: Rgb::parse_hex("primary", &palette.primary)?,
            secondary: Rgb::parse_hex("secondary", &palette.secondary)?,
            accent: Rgb::parse_hex("accent", &palette.accent)?,
            text: Rgb::parse_hex("text", &palette.text)?,
            background: Rgb::parse_hex("background", &palette.background)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_hex() {
        assert_eq!(Rgb::parse_hex("text", "#ffffff"), Ok(Rgb::WHITE));
        assert_eq!(Rgb::parse_hex("text", "000"), Ok(Rgb::BLACK));
        let red = Rgb::parse_hex("accent", "#f00").unwrap();
        assert_eq!((red.r, red.g, red.b), (1.0, 0.0, 0.0));
    }

    #[test]
    fn test_malformed_colours_rejected() {
        for bad in ["", "#12", "#gggggg", "blue", "#1234567", "#ééé"] {
            assert!(
                matches!(Rgb::parse_hex("primary", bad), Err(ExportError::InvalidColor { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_default_palette_parses() {
        assert!(ResolvedPalette::parse(&ColorPalette::default()).is_ok());
    }
}
