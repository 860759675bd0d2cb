use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::{ALL_PLAYERS, ALL_TEAMS};
use crate::state::{AppState, LoadFailure};
use crate::stats::{Ranking, ShotSummary, TOP_N};
use crate::view::{DashboardView, format_metric};

// ---------------------------------------------------------------------------
// Left side panel – selectors and metrics
// ---------------------------------------------------------------------------

/// Render the left panel: team / player selectors, then the shot metrics.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.label("Filter to any team/player to see all their shots taken!");
    ui.separator();

    let Some(view) = &state.view else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state after the widgets.
    let team_options = view.team_options.clone();
    let player_options = view.player_options.clone();
    let current_team = state.filter.team.clone();
    let current_player = state.filter.player.clone();

    ui.strong("Team");
    let team_choice = selector(ui, "team_select", ALL_TEAMS, &team_options, current_team);
    if let Some(team) = team_choice {
        state.set_team(team.as_deref());
    }
    ui.add_space(4.0);

    ui.strong("Player");
    let player_choice = selector(ui, "player_select", ALL_PLAYERS, &player_options, current_player);
    if let Some(player) = player_choice {
        state.set_player(player.as_deref());
    }
    ui.separator();

    if let Some(view) = &state.view {
        metrics(ui, view);
    }
}

/// A combo box with an "all" entry. Returns the new selection when the
/// user picked something (`Some(None)` for the "all" entry).
fn selector(
    ui: &mut Ui,
    id: &str,
    all_label: &str,
    options: &[String],
    current: Option<String>,
) -> Option<Option<String>> {
    let mut choice = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.as_deref().unwrap_or(all_label))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), all_label).clicked() {
                choice = Some(None);
            }
            for option in options {
                let selected = current.as_deref() == Some(option.as_str());
                if ui.selectable_label(selected, option).clicked() {
                    choice = Some(Some(option.clone()));
                }
            }
        });
    choice.filter(|c| *c != current)
}

fn metrics(ui: &mut Ui, view: &DashboardView) {
    ui.heading("Shot Statistics");
    let s = &view.summary;
    egui::Grid::new("shot_metrics")
        .num_columns(2)
        .spacing([16.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            metric(ui, "Total Shots", s.shots.to_string());
            metric(ui, "Goals", s.goals.to_string());
            metric(ui, "Average xG", format!("{:.3}", s.avg_xg));
            metric(ui, "Total xG", format!("{:.2}", s.total_xg));
            metric(ui, "Conversion Rate", format!("{:.1}%", s.conversion_rate));
            metric(ui, "Goals - xG", format!("{:+.2}", s.xg_difference()));
        });

    let bad = view.load_report.bad_locations;
    if bad > 0 {
        ui.add_space(6.0);
        ui.label(
            RichText::new(format!(
                "{bad} shots have an unreadable location and are drawn at (0, 0). \
                 This may be a data-quality problem in the source file."
            ))
            .color(Color32::YELLOW),
        );
    }

    if !view.shots.warnings.is_empty() {
        ui.add_space(6.0);
        let header = format!("{} shots could not be plotted", view.shots.warnings.len());
        egui::CollapsingHeader::new(RichText::new(header).color(Color32::YELLOW))
            .id_salt("render_warnings")
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ScrollArea::vertical()
                    .max_height(160.0)
                    .show(ui, |ui: &mut Ui| {
                        for warning in &view.shots.warnings {
                            ui.label(warning.as_str());
                        }
                    });
            });
    }
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.label(label);
    ui.strong(value);
    ui.end_row();
}

// ---------------------------------------------------------------------------
// Ranking tables
// ---------------------------------------------------------------------------

/// Team rankings on the left, player rankings on the right.
pub fn rankings(ui: &mut Ui, view: &DashboardView) {
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].heading("Team Rankings");
        for table in &view.team_rankings {
            let rows: Vec<(String, &ShotSummary)> = table
                .rows
                .iter()
                .map(|t| (t.team.clone(), &t.summary))
                .collect();
            ranking_table(&mut cols[0], "team", "Team", table.ranking, &rows);
        }

        cols[1].heading("Player Rankings");
        for table in &view.player_rankings {
            let rows: Vec<(String, &ShotSummary)> = table
                .rows
                .iter()
                .map(|p| (format!("{} ({})", p.player, p.team), &p.summary))
                .collect();
            ranking_table(&mut cols[1], "player", "Player", table.ranking, &rows);
        }
    });
}

fn ranking_table(
    ui: &mut Ui,
    kind: &str,
    label: &str,
    ranking: Ranking,
    rows: &[(String, &ShotSummary)],
) {
    ui.push_id((kind, ranking), |ui: &mut Ui| {
        ui.add_space(8.0);
        ui.strong(format!("Top {TOP_N} by {ranking}"));
        if rows.is_empty() {
            ui.label("No eligible entries.");
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::exact(20.0))
            .column(Column::auto().at_least(140.0))
            .column(Column::auto().at_least(50.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["#", label, "Shots", &ranking.to_string()] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (i, (name, summary)) in rows.iter().enumerate() {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label((i + 1).to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(name.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(summary.shots.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format_metric(summary, ranking));
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Error panel
// ---------------------------------------------------------------------------

/// Shown instead of the dashboard when loading failed.
pub fn error_panel(ui: &mut Ui, failure: &LoadFailure) {
    ui.add_space(12.0);
    ui.label(
        RichText::new(failure.message.as_str())
            .color(Color32::RED)
            .strong(),
    );
    ui.label("Please check your data file and try again.");
    ui.label(format!("File: {}", failure.path.display()));
    ui.add_space(6.0);
    egui::CollapsingHeader::new("Details")
        .id_salt("load_error_details")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.monospace(failure.details.as_str());
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let reload = state.source.clone();
            if ui
                .add_enabled(reload.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                if let Some(path) = reload {
                    state.load(&path);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!(
                "{} shots loaded, {} shown",
                ds.len(),
                view.summary.shots
            ));
        }

        if let Some(failure) = &state.load_error {
            ui.separator();
            ui.label(RichText::new("Load failed").color(Color32::RED));
            ui.label(failure.path.display().to_string());
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open shot events")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
