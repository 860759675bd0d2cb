use eframe::egui::Color32;
use thiserror::Error;

use crate::color;
use crate::data::filter::{ALL_TEAMS, ShotFilter};
use crate::data::model::ShotEvent;
use crate::pitch;

/// Marker area per unit of xG.
pub const SIZE_PER_XG: f64 = 1000.0;

/// Why a single shot could not be drawn.
#[derive(Debug, Error, PartialEq)]
pub enum ShotRenderError {
    #[error("{player} ({team}) minute {minute}: xG {xg} is outside [0, 1]")]
    XgOutOfRange {
        player: String,
        team: String,
        minute: u32,
        xg: f64,
    },
    #[error("{player} ({team}) minute {minute}: location is not finite")]
    BadLocation {
        player: String,
        team: String,
        minute: u32,
    },
}

// ---------------------------------------------------------------------------
// ShotMarker – one drawable shot
// ---------------------------------------------------------------------------

/// A shot ready to be drawn on the pitch, in plot space.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotMarker {
    pub position: [f64; 2],
    /// Marker area, linear in xG.
    pub size: f64,
    pub fill: Color32,
    pub edge: Color32,
    pub goal: bool,
    /// Hover text describing the shot.
    pub annotation: String,
}

impl ShotMarker {
    /// Radius in screen points for a marker of this area.
    pub fn radius(&self) -> f32 {
        (self.size.sqrt() / 2.0) as f32
    }
}

/// Markers in draw order (non-goals first, goals on top) plus warnings for
/// shots that were skipped.
#[derive(Debug, Clone, Default)]
pub struct RenderedShots {
    pub markers: Vec<ShotMarker>,
    pub warnings: Vec<String>,
}

pub fn marker_size(xg: f64) -> f64 {
    SIZE_PER_XG * xg
}

/// Build the pitch markers for a set of shots. A shot that cannot be
/// drawn is logged, reported in `warnings`, and skipped.
pub fn plot_shots<'a>(shots: impl IntoIterator<Item = &'a ShotEvent>) -> RenderedShots {
    let mut misses = Vec::new();
    let mut goals = Vec::new();
    let mut warnings = Vec::new();

    for shot in shots {
        match shot_marker(shot) {
            Ok(marker) if marker.goal => goals.push(marker),
            Ok(marker) => misses.push(marker),
            Err(e) => {
                log::warn!("Error plotting shot: {e}");
                warnings.push(format!("Error plotting shot: {e}"));
            }
        }
    }

    misses.append(&mut goals);
    RenderedShots {
        markers: misses,
        warnings,
    }
}

pub fn shot_marker(shot: &ShotEvent) -> Result<ShotMarker, ShotRenderError> {
    if !shot.location.is_finite() {
        return Err(ShotRenderError::BadLocation {
            player: shot.player.clone(),
            team: shot.team.clone(),
            minute: shot.minute,
        });
    }
    if !(0.0..=1.0).contains(&shot.xg) {
        return Err(ShotRenderError::XgOutOfRange {
            player: shot.player.clone(),
            team: shot.team.clone(),
            minute: shot.minute,
            xg: shot.xg,
        });
    }

    let goal = shot.is_goal();
    Ok(ShotMarker {
        position: pitch::to_plot(shot.location),
        size: marker_size(shot.xg),
        fill: if goal {
            color::goal_color()
        } else {
            color::miss_color()
        },
        edge: color::MARKER_EDGE,
        goal,
        annotation: annotation(shot),
    })
}

fn annotation(shot: &ShotEvent) -> String {
    let mut text = format!(
        "{} ({}) - {}'\n{}, xG {:.2}",
        shot.player, shot.team, shot.minute, shot.outcome, shot.xg
    );
    let details: Vec<&str> = [&shot.shot_type, &shot.technique, &shot.body_part]
        .into_iter()
        .filter_map(|d| d.as_deref())
        .collect();
    if !details.is_empty() {
        text.push('\n');
        text.push_str(&details.join(", "));
    }
    if shot.location_defaulted {
        text.push_str("\n(location unknown)");
    }
    text
}

/// Heading above the pitch: "Shot Map - <team or All Teams>[ - <player>]".
pub fn map_title(filter: &ShotFilter) -> String {
    let mut title = format!(
        "Shot Map - {}",
        filter.team.as_deref().unwrap_or(ALL_TEAMS)
    );
    if let Some(player) = &filter.player {
        title.push_str(" - ");
        title.push_str(player);
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::shot;
    use crate::data::model::Coordinate;

    #[test]
    fn size_is_linear_in_xg() {
        assert_eq!(marker_size(0.0), 0.0);
        assert_eq!(marker_size(0.25), 250.0);
        assert_eq!(marker_size(1.0), 1000.0);
    }

    #[test]
    fn goals_are_green_and_drawn_last() {
        let shots = vec![
            shot("Spain", "Morata", "Goal", 0.4),
            shot("Spain", "Yamal", "Saved", 0.1),
            shot("Spain", "Olmo", "Goal", 0.2),
            shot("Spain", "Pedri", "Blocked", 0.05),
        ];
        let rendered = plot_shots(&shots);
        assert!(rendered.warnings.is_empty());

        let goals: Vec<bool> = rendered.markers.iter().map(|m| m.goal).collect();
        assert_eq!(goals, [false, false, true, true]);
        assert!(rendered.markers[..2].iter().all(|m| m.fill == color::miss_color()));
        assert!(rendered.markers[2..].iter().all(|m| m.fill == color::goal_color()));
        assert_eq!(rendered.markers[2].size, 400.0);
    }

    #[test]
    fn bad_shots_are_skipped_with_a_warning() {
        let mut high = shot("Spain", "Morata", "Goal", 1.5);
        high.minute = 77;
        let mut nan = shot("Spain", "Yamal", "Saved", 0.1);
        nan.location = Coordinate::new(f64::NAN, 10.0);
        let ok = shot("Spain", "Olmo", "Saved", 0.1);

        let rendered = plot_shots([&high, &nan, &ok]);
        assert_eq!(rendered.markers.len(), 1);
        assert_eq!(rendered.warnings.len(), 2);
        assert!(rendered.warnings[0].contains("Morata"));
        assert!(rendered.warnings[0].contains("77"));
        assert_eq!(
            shot_marker(&nan),
            Err(ShotRenderError::BadLocation {
                player: "Yamal".to_string(),
                team: "Spain".to_string(),
                minute: 10,
            })
        );
    }

    #[test]
    fn annotation_summarises_the_shot() {
        let marker = shot_marker(&shot("England", "Kane", "Goal", 0.76)).unwrap();
        assert!(marker.annotation.contains("Kane (England)"));
        assert!(marker.annotation.contains("xG 0.76"));
        assert!(marker.annotation.contains("Right Foot"));
        assert_eq!(marker.position, [40.0, 105.0]);
    }

    #[test]
    fn title_reflects_filter() {
        assert_eq!(map_title(&ShotFilter::default()), "Shot Map - All Teams");
        assert_eq!(
            map_title(&ShotFilter::new(Some("Spain"), Some("Morata"))),
            "Shot Map - Spain - Morata"
        );
        assert_eq!(
            map_title(&ShotFilter::new(None, Some("Kane"))),
            "Shot Map - All Teams - Kane"
        );
    }
}
