use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Filtered data table
// ---------------------------------------------------------------------------

/// Render the rows matching the current selection, every source column.
pub fn filtered_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.heading("Filtered Data");

    let rows = state.visible_records();
    if rows.is_empty() {
        ui.label("No rows match the current selection.");
        return;
    }

    ui.push_id("filtered_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(60.0), dataset.columns.len())
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .header(ROW_HEIGHT, |mut header| {
                for name in &dataset.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let record = rows[row.index()];
                    for col in 0..dataset.columns.len() {
                        let text = record.cells.get(col).map(String::as_str).unwrap_or("");
                        row.col(|ui: &mut Ui| {
                            ui.label(text);
                        });
                    }
                });
            });
    });
}
