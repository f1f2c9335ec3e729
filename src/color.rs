use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.65, 0.5);
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
// Color mapping: organizational unit → Color32
// ---------------------------------------------------------------------------

/// Gives every organizational unit a stable colour, so a unit keeps its
/// colour when the selected year changes.
#[derive(Debug, Clone, Default)]
pub struct UnitColors {
    mapping: BTreeMap<String, Color32>,
}

impl UnitColors {
    /// Build the map from the sorted distinct units.
    pub fn new(units: &[String]) -> Self {
        let mapping = units
            .iter()
            .cloned()
            .zip(generate_palette(units.len()))
            .collect();
        UnitColors { mapping }
    }

    /// Colour for `unit`, grey for units the map has never seen.
    pub fn color_for(&self, unit: &str) -> Color32 {
        self.mapping.get(unit).copied().unwrap_or(Color32::GRAY)
    }
}
