use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, MarkerShape, Plot, PlotPoint, Points, Polygon};

use crate::color::{self, OutcomeColors};
use crate::pitch;
use crate::render::ShotMarker;
use crate::view::DashboardView;

/// Hover distance (pitch yards) within which a shot's annotation is shown.
const HOVER_RADIUS: f64 = 2.0;

// ---------------------------------------------------------------------------
// Shot map (central panel)
// ---------------------------------------------------------------------------

/// Draw the half pitch and one marker per shot.
pub fn shot_map(ui: &mut Ui, view: &DashboardView, height: f32) {
    let hover: Vec<([f64; 2], String)> = view
        .shots
        .markers
        .iter()
        .map(|m| (m.position, m.annotation.clone()))
        .collect();

    Plot::new("shot_map")
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_background(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .include_x(-2.0)
        .include_x(pitch::PITCH_WIDTH + 2.0)
        .include_y(pitch::PITCH_LENGTH / 2.0 - 2.0)
        .include_y(pitch::PITCH_LENGTH + 4.0)
        .label_formatter(move |_name: &str, value: &PlotPoint| {
            nearest_annotation(&hover, [value.x, value.y])
                .unwrap_or_default()
                .to_string()
        })
        .show(ui, |plot_ui| {
            plot_ui.polygon(
                Polygon::new(pitch::half_pitch_area())
                    .fill_color(color::PITCH_COLOR)
                    .stroke(Stroke::NONE),
            );
            for line in pitch::half_pitch_markings() {
                plot_ui.line(Line::new(line).color(color::LINE_COLOR).width(1.5));
            }

            // Markers arrive in draw order: misses first, goals on top.
            for marker in &view.shots.markers {
                for points in marker_points(marker) {
                    plot_ui.points(points);
                }
            }
        });
}

/// Filled disc plus a black edge for one marker.
fn marker_points(marker: &ShotMarker) -> [Points; 2] {
    let radius = marker.radius();
    [
        Points::new(vec![marker.position])
            .shape(MarkerShape::Circle)
            .radius(radius)
            .filled(true)
            .color(marker.fill),
        Points::new(vec![marker.position])
            .shape(MarkerShape::Circle)
            .radius(radius)
            .filled(false)
            .color(marker.edge),
    ]
}

fn nearest_annotation(hover: &[([f64; 2], String)], at: [f64; 2]) -> Option<&str> {
    hover
        .iter()
        .map(|(p, text)| (((p[0] - at[0]).powi(2) + (p[1] - at[1]).powi(2)).sqrt(), text))
        .filter(|(d, _)| *d <= HOVER_RADIUS)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, text)| text.as_str())
}

// ---------------------------------------------------------------------------
// Outcome bar chart
// ---------------------------------------------------------------------------

/// One bar per outcome in the current selection.
pub fn outcome_chart(ui: &mut Ui, view: &DashboardView, height: f32) {
    let colors = OutcomeColors::new(view.outcomes.iter().map(|(o, _)| o));

    Plot::new("outcome_chart")
        .height(height)
        .legend(Legend::default())
        .y_axis_label("Shots")
        .show_x(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for (i, (outcome, count)) in view.outcomes.iter().enumerate() {
                let color = colors.color_for(outcome);
                let name = outcome.to_string();
                let bar = Bar::new(i as f64, *count as f64)
                    .width(0.7)
                    .name(&name)
                    .fill(color);
                plot_ui.bar_chart(BarChart::new(vec![bar]).color(color).name(name));
            }
        });
}
