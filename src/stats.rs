//! Per-team and per-player shot aggregates and the top-N rankings built
//! on them.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::data::model::{ShotEvent, ShotOutcome};

/// Rows shown in each ranking table.
pub const TOP_N: usize = 5;

/// Players need at least this many shots to appear in the average-xG and
/// conversion-rate rankings.
pub const MIN_PLAYER_SHOTS: usize = 3;

// ---------------------------------------------------------------------------
// ShotSummary
// ---------------------------------------------------------------------------

/// Counts and xG totals for any group of shots.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShotSummary {
    pub shots: usize,
    pub goals: usize,
    pub total_xg: f64,
    /// Mean xG per shot; 0 for an empty group.
    pub avg_xg: f64,
    /// Goals per shot as a percentage; 0 for an empty group.
    pub conversion_rate: f64,
}

impl ShotSummary {
    pub fn from_shots<'a>(shots: impl IntoIterator<Item = &'a ShotEvent>) -> Self {
        let mut summary = ShotSummary::default();
        for shot in shots {
            summary.add(shot);
        }
        summary.finish()
    }

    fn add(&mut self, shot: &ShotEvent) {
        self.shots += 1;
        if shot.is_goal() {
            self.goals += 1;
        }
        self.total_xg += shot.xg;
    }

    fn finish(mut self) -> Self {
        if self.shots > 0 {
            self.avg_xg = self.total_xg / self.shots as f64;
            self.conversion_rate = self.goals as f64 / self.shots as f64 * 100.0;
        } else {
            self.avg_xg = 0.0;
            self.conversion_rate = 0.0;
        }
        self
    }

    /// Goals scored minus goals expected.
    pub fn xg_difference(&self) -> f64 {
        self.goals as f64 - self.total_xg
    }

    pub fn metric(&self, ranking: Ranking) -> f64 {
        match ranking {
            Ranking::TotalXg => self.total_xg,
            Ranking::AverageXg => self.avg_xg,
            Ranking::Goals => self.goals as f64,
            Ranking::ConversionRate => self.conversion_rate,
        }
    }
}

// ---------------------------------------------------------------------------
// Grouped statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TeamStats {
    pub team: String,
    pub summary: ShotSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub player: String,
    pub team: String,
    pub summary: ShotSummary,
}

/// Aggregate shots by team, sorted by team name.
pub fn team_stats<'a>(shots: impl IntoIterator<Item = &'a ShotEvent>) -> Vec<TeamStats> {
    let mut groups: BTreeMap<&str, ShotSummary> = BTreeMap::new();
    for shot in shots {
        groups.entry(shot.team.as_str()).or_default().add(shot);
    }
    groups
        .into_iter()
        .map(|(team, summary)| TeamStats {
            team: team.to_string(),
            summary: summary.finish(),
        })
        .collect()
}

/// Aggregate shots by (player, team), sorted by player then team.
pub fn player_stats<'a>(shots: impl IntoIterator<Item = &'a ShotEvent>) -> Vec<PlayerStats> {
    let mut groups: BTreeMap<(&str, &str), ShotSummary> = BTreeMap::new();
    for shot in shots {
        groups
            .entry((shot.player.as_str(), shot.team.as_str()))
            .or_default()
            .add(shot);
    }
    groups
        .into_iter()
        .map(|((player, team), summary)| PlayerStats {
            player: player.to_string(),
            team: team.to_string(),
            summary: summary.finish(),
        })
        .collect()
}

/// Shot count per outcome, most frequent first; ties by label.
pub fn outcome_counts<'a>(
    shots: impl IntoIterator<Item = &'a ShotEvent>,
) -> Vec<(ShotOutcome, usize)> {
    let mut counts: BTreeMap<ShotOutcome, usize> = BTreeMap::new();
    for shot in shots {
        *counts.entry(shot.outcome.clone()).or_default() += 1;
    }
    let mut counts: Vec<(ShotOutcome, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| a.0.to_string().cmp(&b.0.to_string()))
    });
    counts
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

/// Metric a ranking table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ranking {
    TotalXg,
    AverageXg,
    Goals,
    ConversionRate,
}

impl Ranking {
    pub const ALL: [Ranking; 4] = [
        Ranking::TotalXg,
        Ranking::AverageXg,
        Ranking::Goals,
        Ranking::ConversionRate,
    ];

    /// Rankings that are distorted by tiny samples.
    pub fn needs_min_shots(self) -> bool {
        matches!(self, Ranking::AverageXg | Ranking::ConversionRate)
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ranking::TotalXg => write!(f, "Total xG"),
            Ranking::AverageXg => write!(f, "Average xG"),
            Ranking::Goals => write!(f, "Goals"),
            Ranking::ConversionRate => write!(f, "Conversion Rate"),
        }
    }
}

fn by_metric_desc(a: &ShotSummary, b: &ShotSummary, ranking: Ranking) -> Ordering {
    b.metric(ranking).total_cmp(&a.metric(ranking))
}

/// Top `n` teams by the given metric; ties go to the alphabetically first.
pub fn top_teams(stats: &[TeamStats], ranking: Ranking, n: usize) -> Vec<TeamStats> {
    let mut ranked: Vec<TeamStats> = stats.to_vec();
    ranked.sort_by(|a, b| {
        by_metric_desc(&a.summary, &b.summary, ranking).then_with(|| a.team.cmp(&b.team))
    });
    ranked.truncate(n);
    ranked
}

/// Top `n` players by the given metric. Average-xG and conversion-rate
/// rankings only consider players with [`MIN_PLAYER_SHOTS`] or more shots.
pub fn top_players(stats: &[PlayerStats], ranking: Ranking, n: usize) -> Vec<PlayerStats> {
    let mut ranked: Vec<PlayerStats> = stats
        .iter()
        .filter(|p| !ranking.needs_min_shots() || p.summary.shots >= MIN_PLAYER_SHOTS)
        .cloned()
        .collect();
    ranked.sort_by(|a, b| {
        by_metric_desc(&a.summary, &b.summary, ranking)
            .then_with(|| a.player.cmp(&b.player))
            .then_with(|| a.team.cmp(&b.team))
    });
    ranked.truncate(n);
    ranked
}
