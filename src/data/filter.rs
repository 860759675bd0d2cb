use super::model::{ShotDataset, ShotEvent};

/// Selector label meaning "no team constraint".
pub const ALL_TEAMS: &str = "All Teams";
/// Selector label meaning "no player constraint".
pub const ALL_PLAYERS: &str = "All Players";

// ---------------------------------------------------------------------------
// Filter predicate: optional team and player equality constraints
// ---------------------------------------------------------------------------

/// Current team/player selection. `None` means no constraint on that
/// dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotFilter {
    pub team: Option<String>,
    pub player: Option<String>,
}

impl ShotFilter {
    /// Build a filter from raw selector values. Empty strings and the
    /// "All Teams" / "All Players" sentinels are treated as no filter.
    pub fn new(team: Option<&str>, player: Option<&str>) -> Self {
        ShotFilter {
            team: selection(team, ALL_TEAMS),
            player: selection(player, ALL_PLAYERS),
        }
    }

    /// Whether this filter constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.team.is_none() && self.player.is_none()
    }

    /// A shot passes when it equals every active constraint.
    pub fn matches(&self, shot: &ShotEvent) -> bool {
        self.team.as_deref().map_or(true, |t| shot.team == t)
            && self.player.as_deref().map_or(true, |p| shot.player == p)
    }
}

fn selection(value: Option<&str>, sentinel: &str) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != sentinel)
        .map(str::to_string)
}

/// Return indices of shots that pass the filter, in load order.
pub fn filtered_indices(dataset: &ShotDataset, filter: &ShotFilter) -> Vec<usize> {
    dataset
        .shots
        .iter()
        .enumerate()
        .filter(|(_, shot)| filter.matches(shot))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::shot;
    use crate::data::model::LoadReport;

    fn dataset() -> ShotDataset {
        ShotDataset::from_shots(
            vec![
                shot("Spain", "Morata", "Goal", 0.3),
                shot("Spain", "Yamal", "Saved", 0.1),
                shot("England", "Kane", "Blocked", 0.2),
                shot("England", "Saka", "Goal", 0.6),
                shot("Spain", "Morata", "Off T", 0.05),
            ],
            LoadReport::default(),
        )
    }

    #[test]
    fn sentinels_and_blanks_mean_no_filter() {
        assert!(ShotFilter::new(Some(ALL_TEAMS), Some(ALL_PLAYERS)).is_empty());
        assert!(ShotFilter::new(Some(""), Some("  ")).is_empty());
        assert!(ShotFilter::new(None, None).is_empty());
        assert_eq!(
            ShotFilter::new(Some(" Spain "), None).team.as_deref(),
            Some("Spain")
        );
    }

    #[test]
    fn empty_filter_is_identity() {
        let ds = dataset();
        assert_eq!(
            filtered_indices(&ds, &ShotFilter::default()),
            (0..ds.len()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn team_and_player_constraints() {
        let ds = dataset();
        assert_eq!(
            filtered_indices(&ds, &ShotFilter::new(Some("Spain"), None)),
            [0, 1, 4]
        );
        assert_eq!(
            filtered_indices(&ds, &ShotFilter::new(Some("Spain"), Some("Morata"))),
            [0, 4]
        );
        assert!(filtered_indices(&ds, &ShotFilter::new(Some("England"), Some("Morata"))).is_empty());
    }

    #[test]
    fn filtering_is_commutative_and_idempotent() {
        let ds = dataset();
        let by_team = ShotFilter::new(Some("England"), None);
        let by_player = ShotFilter::new(None, Some("Kane"));

        let team_then_player: Vec<usize> = filtered_indices(&ds, &by_team)
            .into_iter()
            .filter(|&i| by_player.matches(&ds.shots[i]))
            .collect();
        let player_then_team: Vec<usize> = filtered_indices(&ds, &by_player)
            .into_iter()
            .filter(|&i| by_team.matches(&ds.shots[i]))
            .collect();

        assert_eq!(team_then_player, player_then_team);
        assert_eq!(team_then_player, [2]);

        let once = filtered_indices(&ds, &by_team);
        let twice: Vec<usize> = once
            .iter()
            .copied()
            .filter(|&i| by_team.matches(&ds.shots[i]))
            .collect();
        assert_eq!(once, twice);
    }
}
