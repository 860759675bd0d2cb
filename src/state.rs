use std::path::{Path, PathBuf};

use crate::data::filter::ShotFilter;
use crate::data::loader;
use crate::data::model::ShotDataset;
use crate::view::{DashboardView, build_view};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// A failed load, kept for the error panel.
#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub message: String,
    /// Full error chain for diagnostics.
    pub details: String,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded shots (None until a file loads successfully).
    pub dataset: Option<ShotDataset>,

    /// Current team / player selection.
    pub filter: ShotFilter,

    /// Derived view for `filter` (cached; rebuilt only when inputs change).
    pub view: Option<DashboardView>,

    /// Path of the loaded (or last attempted) file.
    pub source: Option<PathBuf>,

    /// Last load error, shown in place of the dashboard.
    pub load_error: Option<LoadFailure>,
}

impl AppState {
    /// Load a file, replacing the dataset on success. On failure the
    /// previous dataset is dropped and the error is kept for display.
    pub fn load(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
        match loader::load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.dataset = None;
                self.view = None;
                self.load_error = Some(LoadFailure {
                    path: path.to_path_buf(),
                    message: format!("An error occurred: {e:#}"),
                    details: format!("{e:?}"),
                });
            }
        }
    }

    /// Ingest a newly loaded dataset, keeping any selection that still
    /// exists in it.
    pub fn set_dataset(&mut self, dataset: ShotDataset) {
        if let Some(team) = &self.filter.team {
            if !dataset.teams.contains(team) {
                self.filter.team = None;
            }
        }
        self.dataset = Some(dataset);
        self.load_error = None;
        self.reset_player_if_foreign();
        self.refresh();
    }

    /// Select a team ("All Teams" / empty clears it). A selected player
    /// who does not play for the new team is cleared.
    pub fn set_team(&mut self, team: Option<&str>) {
        let filter = ShotFilter::new(team, self.filter.player.as_deref());
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        self.reset_player_if_foreign();
        self.refresh();
    }

    /// Select a player ("All Players" / empty clears it).
    pub fn set_player(&mut self, player: Option<&str>) {
        let filter = ShotFilter::new(self.filter.team.as_deref(), player);
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        self.refresh();
    }

    fn reset_player_if_foreign(&mut self) {
        let (Some(ds), Some(player)) = (&self.dataset, &self.filter.player) else {
            return;
        };
        if !ds.players(self.filter.team.as_deref()).contains(player) {
            self.filter.player = None;
        }
    }

    /// Recompute the view from the current dataset and filter.
    pub fn refresh(&mut self) {
        self.view = self
            .dataset
            .as_ref()
            .map(|ds| build_view(ds, &self.filter));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::shot;
    use crate::data::model::LoadReport;

    fn state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(ShotDataset::from_shots(
            vec![
                shot("Spain", "Morata", "Goal", 0.4),
                shot("Spain", "Yamal", "Saved", 0.1),
                shot("England", "Kane", "Goal", 0.8),
            ],
            LoadReport::default(),
        ));
        state
    }

    fn shots_in_view(state: &AppState) -> usize {
        state.view.as_ref().map_or(0, |v| v.summary.shots)
    }

    #[test]
    fn dataset_builds_an_unfiltered_view() {
        let state = state();
        assert_eq!(shots_in_view(&state), 3);
        assert!(state.load_error.is_none());
    }

    #[test]
    fn selecting_team_then_player_narrows_the_view() {
        let mut state = state();
        state.set_team(Some("Spain"));
        assert_eq!(shots_in_view(&state), 2);
        state.set_player(Some("Yamal"));
        assert_eq!(shots_in_view(&state), 1);
        assert_eq!(state.view.as_ref().map(|v| v.title.as_str()), Some("Shot Map - Spain - Yamal"));
    }

    #[test]
    fn changing_team_clears_a_foreign_player() {
        let mut state = state();
        state.set_player(Some("Kane"));
        state.set_team(Some("Spain"));
        assert_eq!(state.filter.player, None);
        assert_eq!(shots_in_view(&state), 2);

        state.set_player(Some("Morata"));
        state.set_team(Some("All Teams"));
        assert_eq!(state.filter.player.as_deref(), Some("Morata"));
        assert_eq!(shots_in_view(&state), 1);
    }

    #[test]
    fn failed_load_keeps_the_error() {
        let mut state = state();
        state.load(Path::new("does/not/exist.csv"));
        assert!(state.dataset.is_none());
        assert!(state.view.is_none());
        let failure = state.load_error.as_ref().unwrap();
        assert!(failure.message.starts_with("An error occurred"));
        assert!(failure.details.contains("opening CSV"));
    }
}
