//! StatsBomb pitch geometry (120 × 80 yards) for a vertical half pitch with
//! the attacked goal at the top.
//!
//! Plot space: `plot_x = 80 - y`, `plot_y = x`.

use std::f64::consts::PI;

use crate::data::model::Coordinate;

pub const PITCH_LENGTH: f64 = 120.0;
pub const PITCH_WIDTH: f64 = 80.0;
const HALFWAY: f64 = PITCH_LENGTH / 2.0;
const CENTRE_Y: f64 = PITCH_WIDTH / 2.0;

const PENALTY_AREA_DEPTH: f64 = 18.0;
const PENALTY_AREA_HALF_WIDTH: f64 = 22.0;
const SIX_YARD_DEPTH: f64 = 6.0;
const SIX_YARD_HALF_WIDTH: f64 = 10.0;
const GOAL_HALF_WIDTH: f64 = 4.0;
const GOAL_DEPTH: f64 = 2.0;
const PENALTY_SPOT: f64 = 108.0;
const CIRCLE_RADIUS: f64 = 10.0;

const ARC_SEGMENTS: usize = 48;

/// Project a pitch coordinate into plot space.
pub fn to_plot(c: Coordinate) -> [f64; 2] {
    [PITCH_WIDTH - c.y, c.x]
}

/// A polyline in plot space.
pub type Polyline = Vec<[f64; 2]>;

/// The background rectangle of the half pitch, in plot space.
pub fn half_pitch_area() -> Polyline {
    rectangle(HALFWAY, PITCH_LENGTH, 0.0, PITCH_WIDTH)
}

/// All line markings of the attacking half, in plot space.
pub fn half_pitch_markings() -> Vec<Polyline> {
    let box_x = PITCH_LENGTH - PENALTY_AREA_DEPTH;
    let six_x = PITCH_LENGTH - SIX_YARD_DEPTH;

    // The arc is the part of the penalty-spot circle outside the box.
    let arc_start = ((box_x - PENALTY_SPOT) / CIRCLE_RADIUS).acos();

    vec![
        half_pitch_area(),
        vec![to_plot_xy(HALFWAY, 0.0), to_plot_xy(HALFWAY, PITCH_WIDTH)],
        rectangle(
            box_x,
            PITCH_LENGTH,
            CENTRE_Y - PENALTY_AREA_HALF_WIDTH,
            CENTRE_Y + PENALTY_AREA_HALF_WIDTH,
        ),
        rectangle(
            six_x,
            PITCH_LENGTH,
            CENTRE_Y - SIX_YARD_HALF_WIDTH,
            CENTRE_Y + SIX_YARD_HALF_WIDTH,
        ),
        rectangle(
            PITCH_LENGTH,
            PITCH_LENGTH + GOAL_DEPTH,
            CENTRE_Y - GOAL_HALF_WIDTH,
            CENTRE_Y + GOAL_HALF_WIDTH,
        ),
        arc(PENALTY_SPOT, CENTRE_Y, arc_start, 2.0 * PI - arc_start),
        arc(HALFWAY, CENTRE_Y, -PI / 2.0, PI / 2.0),
        spot(PENALTY_SPOT, CENTRE_Y),
    ]
}

fn to_plot_xy(x: f64, y: f64) -> [f64; 2] {
    to_plot(Coordinate::new(x, y))
}

/// Closed rectangle between two pitch-x and two pitch-y values.
fn rectangle(x0: f64, x1: f64, y0: f64, y1: f64) -> Polyline {
    vec![
        to_plot_xy(x0, y0),
        to_plot_xy(x1, y0),
        to_plot_xy(x1, y1),
        to_plot_xy(x0, y1),
        to_plot_xy(x0, y0),
    ]
}

/// Arc of radius `CIRCLE_RADIUS` around a pitch point, angles in radians
/// measured from the +x (towards goal) direction.
fn arc(cx: f64, cy: f64, from: f64, to: f64) -> Polyline {
    (0..=ARC_SEGMENTS)
        .map(|i| {
            let t = from + (to - from) * i as f64 / ARC_SEGMENTS as f64;
            to_plot_xy(cx + CIRCLE_RADIUS * t.cos(), cy + CIRCLE_RADIUS * t.sin())
        })
        .collect()
}

fn spot(x: f64, y: f64) -> Polyline {
    let r = 0.3;
    (0..=8)
        .map(|i| {
            let t = 2.0 * PI * i as f64 / 8.0;
            to_plot_xy(x + r * t.cos(), y + r * t.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_puts_goal_at_top() {
        assert_eq!(to_plot(Coordinate::new(120.0, 40.0)), [40.0, 120.0]);
        assert_eq!(to_plot(Coordinate::new(60.0, 0.0)), [80.0, 60.0]);
    }

    #[test]
    fn markings_stay_on_the_attacking_half() {
        for line in half_pitch_markings() {
            assert!(line.len() >= 2);
            for [px, py] in line {
                assert!((-1e-9..=PITCH_WIDTH + 1e-9).contains(&px), "x {px}");
                assert!((HALFWAY - 1e-9..=PITCH_LENGTH + GOAL_DEPTH).contains(&py), "y {py}");
            }
        }
    }

    #[test]
    fn penalty_arc_lies_outside_the_box() {
        let box_x = PITCH_LENGTH - PENALTY_AREA_DEPTH;
        let arc_start = ((box_x - PENALTY_SPOT) / CIRCLE_RADIUS).acos();
        let arc = arc(PENALTY_SPOT, CENTRE_Y, arc_start, 2.0 * PI - arc_start);
        assert!(arc.iter().all(|[_, py]| *py <= box_x + 1e-9));
    }
}
