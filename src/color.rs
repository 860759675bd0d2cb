use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::ShotOutcome;

// ---------------------------------------------------------------------------
// Fixed pitch / marker colours
// ---------------------------------------------------------------------------

/// Pitch background (`#22312b`).
pub const PITCH_COLOR: Color32 = Color32::from_rgb(0x22, 0x31, 0x2b);
pub const LINE_COLOR: Color32 = Color32::WHITE;
pub const MARKER_EDGE: Color32 = Color32::BLACK;

pub const GOAL_ALPHA: f32 = 0.7;
pub const MISS_ALPHA: f32 = 0.3;

/// Marker fill for a goal: green at 0.7 opacity.
pub fn goal_color() -> Color32 {
    with_alpha(Color32::from_rgb(0x00, 0x80, 0x00), GOAL_ALPHA)
}

/// Marker fill for any other outcome: red at 0.3 opacity.
pub fn miss_color() -> Color32 {
    with_alpha(Color32::from_rgb(0xff, 0x00, 0x00), MISS_ALPHA)
}

fn with_alpha(c: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), (alpha * 255.0).round() as u8)
}

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
// Outcome colours for the bar chart
// ---------------------------------------------------------------------------

/// Maps each outcome present in a view to a distinct colour. Goals always
/// keep the goal green so the chart agrees with the pitch.
#[derive(Debug, Clone)]
pub struct OutcomeColors {
    mapping: BTreeMap<ShotOutcome, Color32>,
    default_color: Color32,
}

impl OutcomeColors {
    pub fn new<'a>(outcomes: impl IntoIterator<Item = &'a ShotOutcome>) -> Self {
        let others: Vec<&ShotOutcome> = outcomes.into_iter().filter(|o| !o.is_goal()).collect();
        let palette = generate_palette(others.len());

        let mut mapping: BTreeMap<ShotOutcome, Color32> = others
            .into_iter()
            .zip(palette)
            .map(|(o, c)| (o.clone(), c))
            .collect();
        mapping.insert(ShotOutcome::Goal, Color32::from_rgb(0x00, 0x80, 0x00));

        OutcomeColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, outcome: &ShotOutcome) -> Color32 {
        self.mapping
            .get(outcome)
            .copied()
            .unwrap_or(self.default_color)
    }
}
