// src/render.rs
// Terminal presentation of a validated palette: one truecolor swatch row
// per color, rank order, name and hex label. Non-interactive output only.

use crate::palette::Palette;

/// Width of the colored block, in terminal cells.
const SWATCH_WIDTH: usize = 8;

/// Render the palette as ANSI truecolor swatch rows, most dominant color
/// first. The caller prints the returned string to stdout as-is.
pub fn render_swatches(palette: &Palette) -> String {
    let name_width = palette
        .entries()
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in palette.entries() {
        let (r, g, b) = entry.rgb().unwrap_or((0, 0, 0));
        out.push_str(&format!(
            "\x1b[48;2;{r};{g};{b}m{blank:SWATCH_WIDTH$}\x1b[0m  {name:<name_width$}  {hex}\n",
            blank = "",
            name = entry.name,
            hex = entry.hex,
        ));
    }
    out
}

/// Machine-readable rendition: the palette as a pretty-printed JSON array,
/// mirroring the shape the model was asked for.
pub fn render_json(palette: &Palette) -> serde_json::Result<String> {
    serde_json::to_string_pretty(palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{ColorEntry, Palette};

    fn sample_palette() -> Palette {
        let entries = vec![
            ("Sky Blue", "#87CEEB"),
            ("Coral", "#FF7F50"),
            ("Mint", "#98FF98"),
            ("Charcoal", "#36454F"),
            ("Gold", "#FFD700"),
        ]
        .into_iter()
        .map(|(name, hex)| ColorEntry {
            name: name.to_string(),
            hex: hex.to_string(),
        })
        .collect();
        Palette::from_entries(entries).unwrap()
    }

    #[test]
    fn test_one_row_per_color_in_rank_order() {
        let out = render_swatches(&sample_palette());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Sky Blue") && lines[0].contains("#87CEEB"));
        assert!(lines[4].contains("Gold") && lines[4].contains("#FFD700"));
    }

    #[test]
    fn test_swatch_uses_truecolor_background() {
        let out = render_swatches(&sample_palette());
        // #87CEEB = rgb(135, 206, 235)
        assert!(out.contains("\x1b[48;2;135;206;235m"));
        // Every row resets its color
        assert_eq!(out.matches("\x1b[0m").count(), 5);
    }

    #[test]
    fn test_json_rendition_round_trips() {
        let palette = sample_palette();
        let json = render_json(&palette).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 5);
        assert_eq!(value[1]["name"], "Coral");
        assert_eq!(value[1]["hex"], "#FF7F50");
    }
}
