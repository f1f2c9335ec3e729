use std::path::PathBuf;

use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::source::DatasetSource;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BudgetDashboardApp {
    pub config: DashboardConfig,
    /// The file currently on display; read once, then served from memory.
    source: DatasetSource,
    pub state: AppState,
}

impl BudgetDashboardApp {
    /// Load the configured data file. A failure is kept in the state and
    /// shown in place of the dashboard.
    pub fn new(config: DashboardConfig) -> Self {
        let source = DatasetSource::new(&config.data_path);
        let mut state = AppState::default();
        match source.load() {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", source.path().display());
                state.set_load_error(&e);
            }
        }
        Self {
            config,
            source,
            state,
        }
    }

    /// Switch to another data file picked by the user. The current table
    /// stays on screen if the new one cannot be read.
    fn open(&mut self, path: PathBuf) {
        let source = DatasetSource::new(path);
        match source.load() {
            Ok(dataset) => {
                self.state.set_dataset(dataset);
                self.source = source;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", source.path().display());
                if self.state.dataset.is_some() {
                    self.state.status_message = Some(format!("Error: {e}"));
                } else {
                    // The error view names this file, so it becomes the current one.
                    self.state.set_load_error(&e);
                    self.source = source;
                }
            }
        }
    }
}

impl eframe::App for BudgetDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        let mut picked = None;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            picked = panels::top_bar(ui, &mut self.state, &self.config);
        });
        if let Some(path) = picked {
            self.open(path);
        }

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = &self.state.load_error {
                panels::load_error(ui, self.source.path(), err);
                return;
            }
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::page_heading(ui, &self.state);
                    table::filtered_table(ui, &self.state);
                    ui.add_space(12.0);
                    plot::budget_bar_chart(ui, &self.state);
                    plot::budget_trend_chart(ui, &self.state);
                });
        });
    }
}
