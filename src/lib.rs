//! Euros 2024 shot map: load StatsBomb shot events, filter them by team and
//! player, and show where the shots were taken alongside xG statistics and
//! rankings.

pub mod app;
pub mod color;
pub mod data;
pub mod pitch;
pub mod render;
pub mod state;
pub mod stats;
pub mod ui;
pub mod view;
