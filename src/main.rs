mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::BudgetDashboardApp;
use config::{DashboardConfig, CONFIG_FILE_NAME};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match DashboardConfig::load(Path::new(CONFIG_FILE_NAME)) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("Ignoring settings file: {e:#}");
            DashboardConfig::default()
        }
    }
    .with_args(std::env::args().skip(1));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(BudgetDashboardApp::new(config)))),
    )
}
