use std::path::Path;

use eframe::egui::{self, ScrollArea, Ui};

use crate::data::filter::ShotFilter;
use crate::state::AppState;
use crate::ui::{panels, plot};

const SHOT_MAP_HEIGHT: f32 = 560.0;
const OUTCOME_CHART_HEIGHT: f32 = 220.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ShotMapApp {
    pub state: AppState,
}

impl ShotMapApp {
    /// Start with `data` loaded and `filter` applied (a load failure is
    /// shown in the window rather than returned).
    pub fn new(data: &Path, filter: ShotFilter) -> Self {
        let mut state = AppState {
            filter,
            ..Default::default()
        };
        state.load(data);
        Self { state }
    }
}

impl eframe::App for ShotMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors and metrics ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: shot map, outcomes, rankings ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &self.state);
        });
    }
}

fn central_panel(ui: &mut Ui, state: &AppState) {
    if let Some(failure) = &state.load_error {
        panels::error_panel(ui, failure);
        return;
    }

    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view shots  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(view.title.as_str());
            });
            plot::shot_map(ui, view, SHOT_MAP_HEIGHT);
            ui.separator();

            ui.heading("Shot Outcomes");
            plot::outcome_chart(ui, view, OUTCOME_CHART_HEIGHT);
            ui.separator();

            panels::rankings(ui, view);
        });
}
