use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Categorical mapping: label → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of one chart to distinct colours.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Build a colour mapping for a sorted set of category labels.
    pub fn new<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(l, c)| (l.to_string(), c))
            .collect();
        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous ramp: fraction → Color32
// ---------------------------------------------------------------------------

/// Red→green ramp for the by-country salary chart: 0.0 maps to the low end
/// of the observed range, 1.0 to the high end.
pub fn salary_ramp(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let low: Srgb = Hsl::new(8.0, 0.70, 0.50).into_color();
    let high: Srgb = Hsl::new(130.0, 0.60, 0.42).into_color();
    let rgb = low.into_linear().mix(high.into_linear(), t);
    let rgb: Srgb = Srgb::from_linear(rgb);
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_sizes() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn category_lookup_falls_back_to_grey() {
        let colors = CategoryColors::new(["remote", "hybrid"]);
        assert_ne!(colors.color_for("remote"), colors.color_for("hybrid"));
        assert_eq!(colors.color_for("unknown"), Color32::GRAY);
    }

    #[test]
    fn ramp_endpoints_differ() {
        assert_ne!(salary_ramp(0.0), salary_ramp(1.0));
        // Out-of-range input clamps instead of panicking.
        assert_eq!(salary_ramp(-2.0), salary_ramp(0.0));
        assert_eq!(salary_ramp(3.0), salary_ramp(1.0));
    }
}
