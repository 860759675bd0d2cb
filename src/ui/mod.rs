//! egui widgets for the dashboard. Everything here reads a
//! [`DashboardView`](crate::view::DashboardView) and only mutates
//! [`AppState`](crate::state::AppState) through its setters.

pub mod panels;
pub mod plot;
