use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

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
// Series colours: label → Color32
// ---------------------------------------------------------------------------

/// Maps series labels (countries, metric names) to distinct colours.
#[derive(Debug, Clone, Default)]
pub struct SeriesColors {
    mapping: BTreeMap<String, Color32>,
}

impl SeriesColors {
    /// Build a colour map from a sorted label set.
    pub fn new(labels: &BTreeSet<String>) -> Self {
        let palette = generate_palette(labels.len());
        let mapping = labels
            .iter()
            .zip(palette.into_iter())
            .map(|(l, c): (&String, Color32)| (l.clone(), c))
            .collect();
        SeriesColors { mapping }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}

// ---------------------------------------------------------------------------
// Diverging colormap for correlation cells
// ---------------------------------------------------------------------------

/// Map a correlation coefficient in [-1, 1] onto a cool-warm gradient
/// (blue → light grey → red).  NaN maps to a neutral grey so undefined
/// coefficients stay visually distinct from zero.
pub fn diverging_color(coefficient: f64) -> Color32 {
    if coefficient.is_nan() {
        return Color32::DARK_GRAY;
    }
    let t = coefficient.clamp(-1.0, 1.0) as f32;

    let cold = Srgb::new(0.23f32, 0.30, 0.75).into_linear();
    let mid = Srgb::new(0.86f32, 0.86, 0.86).into_linear();
    let warm = Srgb::new(0.71f32, 0.02, 0.15).into_linear();

    let mixed: LinSrgb = if t < 0.0 {
        mid.mix(cold, -t)
    } else {
        mid.mix(warm, t)
    };
    let rgb: Srgb<u8> = Srgb::from_linear(mixed);
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}
