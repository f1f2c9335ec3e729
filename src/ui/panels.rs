use std::path::{Path, PathBuf};

use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::DashboardConfig;
use crate::data::export::write_csv;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the year and unit selectors.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Year selector ----
    ui.strong("Select Year");
    let years = state.years.clone();
    let current_year = state.selected_year;
    egui::ComboBox::from_id_salt("select_year")
        .selected_text(current_year.map(|y| y.to_string()).unwrap_or_default())
        .show_ui(ui, |ui: &mut Ui| {
            for year in years {
                if ui
                    .selectable_label(current_year == Some(year), year.to_string())
                    .clicked()
                {
                    state.select_year(year);
                }
            }
        });
    ui.add_space(8.0);

    // ---- Unit selector ("All" first) ----
    ui.strong("Select Ministry");
    let options = state.unit_options();
    let current_unit = state.selected_unit.clone();
    egui::ComboBox::from_id_salt("select_unit")
        .selected_text(current_unit.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                let label = option.to_string();
                if ui
                    .selectable_label(current_unit == option, label)
                    .clicked()
                {
                    state.select_unit(option);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
///
/// Returns the path of a data file the user asked to open.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, config: &DashboardConfig) -> Option<PathBuf> {
    let mut picked = None;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                picked = open_file_dialog();
                ui.close_menu();
            }
        });

        ui.separator();

        let can_export = state.dataset.is_some();
        if ui
            .add_enabled(can_export, egui::Button::new("Download CSV"))
            .clicked()
        {
            save_file_dialog(state, &config.export_file_name);
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} shown",
                ds.len(),
                state.visible_records().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
    picked
}

// ---------------------------------------------------------------------------
// Central panel pieces
// ---------------------------------------------------------------------------

/// Page title with the covered year range.
pub fn page_heading(ui: &mut Ui, state: &AppState) {
    let title = match state.year_span() {
        Some((first, last)) => format!("Budget Analysis — {first} to {last}"),
        None => "Budget Analysis".to_string(),
    };
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(8.0);
}

/// Shown instead of the dashboard when the data file could not be read.
pub fn load_error(ui: &mut Ui, path: &Path, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(
            RichText::new(format!(
                "Could not load {}\n\n{message}\n\nUse File → Open… to pick another file.",
                path.display()
            ))
            .color(Color32::RED)
            .size(16.0),
        );
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open budget data")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("Delimited text", &["csv", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}

/// Export the full, unfiltered table to a user-chosen CSV file.
fn save_file_dialog(state: &mut AppState, file_name: &str) {
    let Some(dataset) = state.dataset.clone() else {
        return;
    };
    let target = rfd::FileDialog::new()
        .set_title("Download CSV")
        .set_file_name(file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = target {
        match write_csv(&dataset, &path) {
            Ok(()) => {
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export CSV: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
