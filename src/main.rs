use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use eframe::egui;

use shot_map::app::ShotMapApp;
use shot_map::data::filter::ShotFilter;
use shot_map::view;

#[derive(Parser)]
#[command(name = "shot-map")]
#[command(about = "Euros 2024 shot map and xG dashboard", long_about = None)]
struct Cli {
    /// Shot event file (.csv, .json or .parquet)
    #[arg(long, default_value = "euros_2024_shot_map.csv")]
    data: PathBuf,

    /// Initial team selection
    #[arg(long)]
    team: Option<String>,

    /// Initial player selection
    #[arg(long)]
    player: Option<String>,

    /// Print the dashboard as text instead of opening a window
    #[arg(long, default_value = "false")]
    report: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let filter = ShotFilter::new(cli.team.as_deref(), cli.player.as_deref());

    if cli.report {
        let view = view::run(&cli.data, &filter)?;
        print!("{}", view.report());
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let app = ShotMapApp::new(&cli.data, filter);
    eframe::run_native(
        "Euros 2024 Shot Map",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("{e}"))
}
