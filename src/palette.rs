// src/palette.rs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of colors the model is asked for and a palette must hold.
pub const PALETTE_SIZE: usize = 5;

/// "#" followed by exactly six hex digits.
static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

/// One color named by the model: a short human-friendly label plus its
/// "#RRGGBB" code.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColorEntry {
    pub name: String,
    pub hex: String,
}

impl ColorEntry {
    /// Label shown next to a swatch, e.g. "Sky Blue #87CEEB".
    pub fn to_display(&self) -> String {
        format!("{} {}", self.name, self.hex)
    }

    /// Decode the hex code into RGB channels. Returns `None` for anything
    /// that is not a 6-digit hex color; entries that passed shape
    /// validation always decode.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        hex_to_rgb(&self.hex)
    }
}

/// Validate hex format: must match `#RRGGBB` exactly (no shorthand "#FFF",
/// no named colors).
pub fn is_valid_hex(hex: &str) -> bool {
    HEX_COLOR_RE.is_match(hex)
}

/// Parse a "#RRGGBB" string into (r, g, b). Tolerates a missing "#".
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let s = hex.strip_prefix('#').unwrap_or(hex);
    if s.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some((r, g, b))
}

#[derive(Debug, Error)]
#[error("expected {PALETTE_SIZE} colors, got {0}")]
pub struct WrongColorCount(pub usize);

/// An ordered run of exactly [`PALETTE_SIZE`] colors, most dominant first.
/// Built per request, rendered once, then dropped - never persisted.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct Palette {
    entries: Vec<ColorEntry>,
}

impl Palette {
    /// Wrap already-validated entries, enforcing the exact-count invariant.
    /// Entry-level validation (hex pattern, non-empty name) happens in the
    /// extractor before entries reach this point.
    pub fn from_entries(entries: Vec<ColorEntry>) -> Result<Self, WrongColorCount> {
        if entries.len() != PALETTE_SIZE {
            return Err(WrongColorCount(entries.len()));
        }
        Ok(Self { entries })
    }

    /// Entries in dominance order, rank 1 first.
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, hex: &str) -> ColorEntry {
        ColorEntry {
            name: name.to_string(),
            hex: hex.to_string(),
        }
    }

    #[test]
    fn test_valid_hex_codes() {
        assert!(is_valid_hex("#000000"));
        assert!(is_valid_hex("#FFFFFF"));
        assert!(is_valid_hex("#87CEEB"));
        assert!(is_valid_hex("#87ceeb")); // lowercase digits allowed
        assert!(is_valid_hex("#aB12cD"));
    }

    #[test]
    fn test_invalid_hex_codes() {
        assert!(!is_valid_hex("red")); // named color
        assert!(!is_valid_hex("#FFF")); // shorthand
        assert!(!is_valid_hex("#ZZZZZZ")); // not hex digits
        assert!(!is_valid_hex("87CEEB")); // missing #
        assert!(!is_valid_hex("#87CEEB1")); // too long
        assert!(!is_valid_hex("#87CEEB ")); // trailing junk
        assert!(!is_valid_hex(""));
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#000000"), Some((0, 0, 0)));
        assert_eq!(hex_to_rgb("#FFFFFF"), Some((255, 255, 255)));
        assert_eq!(hex_to_rgb("#87CEEB"), Some((0x87, 0xCE, 0xEB)));
        // "#" is optional for the raw conversion
        assert_eq!(hex_to_rgb("FF7F50"), Some((255, 127, 80)));
        assert_eq!(hex_to_rgb("#FFF"), None);
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
    }

    #[test]
    fn test_entry_display_and_rgb() {
        let e = entry("Sky Blue", "#87CEEB");
        assert_eq!(e.to_display(), "Sky Blue #87CEEB");
        assert_eq!(e.rgb(), Some((135, 206, 235)));
    }

    #[test]
    fn test_palette_enforces_count() {
        let four: Vec<ColorEntry> = (0..4).map(|i| entry(&format!("c{i}"), "#101010")).collect();
        let err = Palette::from_entries(four).unwrap_err();
        assert_eq!(err.0, 4);

        let five: Vec<ColorEntry> = (0..5).map(|i| entry(&format!("c{i}"), "#101010")).collect();
        let palette = Palette::from_entries(five).unwrap();
        assert_eq!(palette.entries().len(), PALETTE_SIZE);
        assert_eq!(palette.entries()[0].name, "c0");
    }

    #[test]
    fn test_palette_serializes_as_bare_array() {
        let five: Vec<ColorEntry> = (0..5).map(|i| entry(&format!("c{i}"), "#101010")).collect();
        let palette = Palette::from_entries(five).unwrap();
        let json = serde_json::to_string(&palette).unwrap();
        assert!(json.starts_with('['), "transparent palette should serialize as the entry array");
        assert!(json.contains("\"c4\""));
    }
}
