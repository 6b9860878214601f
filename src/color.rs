use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;
use serde::Serializer;

// ---------------------------------------------------------------------------
// Trace colour palette
// ---------------------------------------------------------------------------

/// Hue of the first trace; the rest are spaced evenly around the wheel.
const BASE_HUE: f32 = 210.0;

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    (0..n)
        .map(|i| {
            let hue = (BASE_HUE + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            RGBColor(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

/// CSS hex form (`#rrggbb`).
pub fn to_hex(color: &RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

/// `serialize_with` adapter writing a colour as its hex string.
pub fn serialize_hex<S: Serializer>(color: &RGBColor, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_hex(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        let colors = generate_palette(2);
        assert_eq!(colors.len(), 2);
        assert_ne!(colors[0], colors[1]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn hex_is_lowercase_rrggbb() {
        assert_eq!(to_hex(&RGBColor(31, 119, 180)), "#1f77b4");
        for c in generate_palette(3) {
            let hex = to_hex(&c);
            assert_eq!(hex.len(), 7);
            assert!(hex[1..].chars().all(|ch| ch.is_ascii_hexdigit()));
        }
    }
}
