use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour scale for log10(net weight)
// ---------------------------------------------------------------------------

/// Dark violet → teal → yellow, close to Viridis.
fn ramp(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let hue = 275.0 - t * 215.0;
    let lightness = 0.30 + t * 0.30;
    let hsl = Hsl::new(hue, 0.70, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Maps log volumes in `[min, max]` onto the ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    pub fn new(min: f64, max: f64) -> Self {
        ColorScale { min, max }
    }

    /// Colour for a log value. A zero-width range paints everything mid-scale.
    pub fn color_for(&self, value: f64) -> Color32 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            return ramp(0.5);
        }
        ramp(((value - self.min) / span) as f32)
    }

    /// `n` evenly spaced (value, colour) stops for the legend.
    pub fn legend_entries(&self, n: usize) -> Vec<(f64, Color32)> {
        if n < 2 {
            return vec![(self.min, self.color_for(self.min))];
        }
        (0..n)
            .map(|i| {
                let v = self.min + (self.max - self.min) * i as f64 / (n - 1) as f64;
                (v, self.color_for(v))
            })
            .collect()
    }
}
