use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Coordinate – a typed pitch location
// ---------------------------------------------------------------------------

/// A point in StatsBomb pitch coordinates (x along the 120 yard length,
/// y across the 80 yard width).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// ShotOutcome
// ---------------------------------------------------------------------------

/// Outcome of a shot as recorded in the `shot_outcome` column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShotOutcome {
    Goal,
    Saved,
    Blocked,
    OffTarget,
    Wayward,
    Post,
    SavedOffTarget,
    SavedToPost,
    Other(String),
    Unknown,
}

impl ShotOutcome {
    /// Parse a (possibly padded) outcome label.
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "" => ShotOutcome::Unknown,
            "Goal" => ShotOutcome::Goal,
            "Saved" => ShotOutcome::Saved,
            "Blocked" => ShotOutcome::Blocked,
            "Off T" => ShotOutcome::OffTarget,
            "Wayward" => ShotOutcome::Wayward,
            "Post" => ShotOutcome::Post,
            "Saved Off Target" => ShotOutcome::SavedOffTarget,
            "Saved to Post" => ShotOutcome::SavedToPost,
            other => ShotOutcome::Other(other.to_string()),
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, ShotOutcome::Goal)
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotOutcome::Goal => write!(f, "Goal"),
            ShotOutcome::Saved => write!(f, "Saved"),
            ShotOutcome::Blocked => write!(f, "Blocked"),
            ShotOutcome::OffTarget => write!(f, "Off T"),
            ShotOutcome::Wayward => write!(f, "Wayward"),
            ShotOutcome::Post => write!(f, "Post"),
            ShotOutcome::SavedOffTarget => write!(f, "Saved Off Target"),
            ShotOutcome::SavedToPost => write!(f, "Saved to Post"),
            ShotOutcome::Other(s) => write!(f, "{s}"),
            ShotOutcome::Unknown => write!(f, "<unknown>"),
        }
    }
}

// ---------------------------------------------------------------------------
// ShotEvent – one cleaned "Shot" row
// ---------------------------------------------------------------------------

/// A single shot after cleaning. Only rows whose `type` is "Shot" become
/// a `ShotEvent`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotEvent {
    pub team: String,
    pub player: String,
    pub minute: u32,
    pub location: Coordinate,
    /// StatsBomb expected-goal value.
    pub xg: f64,
    pub outcome: ShotOutcome,
    pub shot_type: Option<String>,
    pub technique: Option<String>,
    pub body_part: Option<String>,
    /// True when `location` could not be parsed and fell back to the origin.
    pub location_defaulted: bool,
}

impl ShotEvent {
    pub fn is_goal(&self) -> bool {
        self.outcome.is_goal()
    }
}

// ---------------------------------------------------------------------------
// LoadReport – data-quality counters gathered while loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows seen in the source file (all event types).
    pub rows_read: usize,
    /// Rows that could not be decoded at all.
    pub rows_skipped: usize,
    /// Rows kept as shots.
    pub shots_kept: usize,
    /// Shot rows dropped because the team or player was blank.
    pub unnamed_shots: usize,
    /// Shots whose location fell back to (0, 0).
    pub bad_locations: usize,
    /// Shots whose xG fell back to the default.
    pub missing_xg: usize,
}

// ---------------------------------------------------------------------------
// ShotDataset – the complete loaded event set
// ---------------------------------------------------------------------------

/// All shots of a session plus the selector indices derived from them.
/// Never mutated after construction; filters produce index subsets.
#[derive(Debug, Clone, Default)]
pub struct ShotDataset {
    pub shots: Vec<ShotEvent>,
    /// Sorted unique team names.
    pub teams: BTreeSet<String>,
    /// Sorted unique player names per team.
    pub players_by_team: BTreeMap<String, BTreeSet<String>>,
    pub report: LoadReport,
}

impl ShotDataset {
    /// Build selector indices from the cleaned shots.
    pub fn from_shots(shots: Vec<ShotEvent>, report: LoadReport) -> Self {
        let mut teams = BTreeSet::new();
        let mut players_by_team: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for shot in &shots {
            teams.insert(shot.team.clone());
            players_by_team
                .entry(shot.team.clone())
                .or_default()
                .insert(shot.player.clone());
        }

        ShotDataset {
            shots,
            teams,
            players_by_team,
            report,
        }
    }

    /// Players selectable for the given team: that team's squad, or every
    /// player when no team is selected.
    pub fn players(&self, team: Option<&str>) -> Vec<String> {
        match team {
            Some(team) => self
                .players_by_team
                .get(team)
                .map(|players| players.iter().cloned().collect())
                .unwrap_or_default(),
            None => self
                .players_by_team
                .values()
                .flatten()
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn shot(team: &str, player: &str, outcome: &str, xg: f64) -> ShotEvent {
        ShotEvent {
            team: team.to_string(),
            player: player.to_string(),
            minute: 10,
            location: Coordinate::new(105.0, 40.0),
            xg,
            outcome: ShotOutcome::parse(outcome),
            shot_type: Some("Open Play".to_string()),
            technique: Some("Normal".to_string()),
            body_part: Some("Right Foot".to_string()),
            location_defaulted: false,
        }
    }

    #[test]
    fn outcome_labels_round_trip() {
        for label in ["Goal", "Saved", "Off T", "Saved to Post", "Wayward"] {
            assert_eq!(ShotOutcome::parse(label).to_string(), label);
        }
        assert_eq!(ShotOutcome::parse(" Goal "), ShotOutcome::Goal);
        assert_eq!(ShotOutcome::parse(""), ShotOutcome::Unknown);
        assert_eq!(
            ShotOutcome::parse("Deflected"),
            ShotOutcome::Other("Deflected".to_string())
        );
    }

    #[test]
    fn only_goal_counts_as_goal() {
        assert!(ShotOutcome::Goal.is_goal());
        assert!(!ShotOutcome::Post.is_goal());
        assert!(!ShotOutcome::Other("goal".to_string()).is_goal());
    }

    #[test]
    fn dataset_indexes_teams_and_players() {
        let ds = ShotDataset::from_shots(
            vec![
                shot("Spain", "Morata", "Goal", 0.3),
                shot("Spain", "Yamal", "Saved", 0.1),
                shot("England", "Kane", "Blocked", 0.2),
                shot("England", "Kane", "Goal", 0.6),
            ],
            LoadReport::default(),
        );

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.teams.iter().cloned().collect::<Vec<_>>(), ["England", "Spain"]);
        assert_eq!(ds.players(Some("Spain")), ["Morata", "Yamal"]);
        assert_eq!(ds.players(None), ["Kane", "Morata", "Yamal"]);
        assert!(ds.players(Some("France")).is_empty());
    }
}
