//! The derived dashboard for one filter selection.
//!
//! Every interaction is a plain request/response: given the loaded dataset
//! and the current [`ShotFilter`], [`build_view`] recomputes everything the
//! UI shows. Nothing else is kept between requests.

use std::fmt;
use std::path::Path;

use anyhow::Result;

use crate::data::filter::{ShotFilter, filtered_indices};
use crate::data::loader;
use crate::data::model::{LoadReport, ShotDataset, ShotOutcome};
use crate::render::{self, RenderedShots};
use crate::stats::{
    self, PlayerStats, Ranking, ShotSummary, TOP_N, TeamStats, player_stats, team_stats,
};

/// One ranking table (top [`TOP_N`] rows).
#[derive(Debug, Clone)]
pub struct RankingTable<T> {
    pub ranking: Ranking,
    pub rows: Vec<T>,
}

/// Everything the dashboard displays for one filter selection.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub title: String,
    pub filter: ShotFilter,
    /// Team selector options, sorted.
    pub team_options: Vec<String>,
    /// Player selector options for the selected team, sorted.
    pub player_options: Vec<String>,
    pub summary: ShotSummary,
    pub shots: RenderedShots,
    pub outcomes: Vec<(ShotOutcome, usize)>,
    /// Tournament-wide team rankings.
    pub team_rankings: Vec<RankingTable<TeamStats>>,
    /// Tournament-wide player rankings.
    pub player_rankings: Vec<RankingTable<PlayerStats>>,
    /// Data-quality counters from loading, shown as a notice.
    pub load_report: LoadReport,
}

/// Recompute the dashboard for `filter`.
pub fn build_view(dataset: &ShotDataset, filter: &ShotFilter) -> DashboardView {
    let selected: Vec<_> = filtered_indices(dataset, filter)
        .into_iter()
        .map(|i| &dataset.shots[i])
        .collect();

    let teams = team_stats(&dataset.shots);
    let players = player_stats(&dataset.shots);

    DashboardView {
        title: render::map_title(filter),
        filter: filter.clone(),
        team_options: dataset.teams.iter().cloned().collect(),
        player_options: dataset.players(filter.team.as_deref()),
        summary: ShotSummary::from_shots(selected.iter().copied()),
        shots: render::plot_shots(selected.iter().copied()),
        outcomes: stats::outcome_counts(selected.iter().copied()),
        team_rankings: Ranking::ALL
            .iter()
            .map(|&ranking| RankingTable {
                ranking,
                rows: stats::top_teams(&teams, ranking, TOP_N),
            })
            .collect(),
        player_rankings: Ranking::ALL
            .iter()
            .map(|&ranking| RankingTable {
                ranking,
                rows: stats::top_players(&players, ranking, TOP_N),
            })
            .collect(),
        load_report: dataset.report.clone(),
    }
}

/// Load `path` and build the view for `filter` in one step.
pub fn run(path: &Path, filter: &ShotFilter) -> Result<DashboardView> {
    let dataset = loader::load_file(path)?;
    Ok(build_view(&dataset, filter))
}

impl DashboardView {
    /// Plain-text rendering of the view, for terminals and logs.
    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(out, "{}", self.title)?;
        writeln!(out, "{}", "=".repeat(self.title.chars().count()))?;
        writeln!(out, "Total Shots      {}", s.shots)?;
        writeln!(out, "Goals            {}", s.goals)?;
        writeln!(out, "Average xG       {:.3}", s.avg_xg)?;
        writeln!(out, "Total xG         {:.2}", s.total_xg)?;
        writeln!(out, "Conversion Rate  {:.1}%", s.conversion_rate)?;

        if self.load_report.bad_locations > 0 {
            writeln!(
                out,
                "\nNote: {} shots had an unreadable location and are drawn at (0, 0).",
                self.load_report.bad_locations
            )?;
        }
        for warning in &self.shots.warnings {
            writeln!(out, "Warning: {warning}")?;
        }

        writeln!(out, "\nShot Outcomes")?;
        for (outcome, count) in &self.outcomes {
            writeln!(out, "  {:<18} {count}", outcome.to_string())?;
        }

        for table in &self.team_rankings {
            writeln!(out, "\nTop Teams by {}", table.ranking)?;
            for (i, row) in table.rows.iter().enumerate() {
                writeln!(
                    out,
                    "  {}. {:<24} {}",
                    i + 1,
                    row.team,
                    format_metric(&row.summary, table.ranking)
                )?;
            }
        }

        for table in &self.player_rankings {
            writeln!(out, "\nTop Players by {}", table.ranking)?;
            for (i, row) in table.rows.iter().enumerate() {
                writeln!(
                    out,
                    "  {}. {:<32} {}",
                    i + 1,
                    format!("{} ({})", row.player, row.team),
                    format_metric(&row.summary, table.ranking)
                )?;
            }
        }
        Ok(())
    }
}

/// Display a ranking metric the way the tables show it.
pub fn format_metric(summary: &ShotSummary, ranking: Ranking) -> String {
    match ranking {
        Ranking::TotalXg => format!("{:.2}", summary.total_xg),
        Ranking::AverageXg => format!("{:.3}", summary.avg_xg),
        Ranking::Goals => summary.goals.to_string(),
        Ranking::ConversionRate => format!("{:.1}%", summary.conversion_rate),
    }
}
