use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Bar chart: total by unit for the selected year
// ---------------------------------------------------------------------------

/// One bar per organizational unit in the filtered rows.
pub fn budget_bar_chart(ui: &mut Ui, state: &AppState) {
    let Some(year) = state.selected_year else {
        return;
    };

    ui.heading(format!("Budget Breakdown — {year}"));

    let totals = state.bar_totals();
    if totals.is_empty() {
        ui.label("Nothing to chart for this selection.");
        return;
    }

    let bars: Vec<Bar> = totals
        .iter()
        .enumerate()
        .map(|(i, (unit, total))| {
            Bar::new(i as f64, *total)
                .name(unit)
                .width(0.7)
                .fill(state.unit_colors.color_for(unit))
        })
        .collect();

    let labels: Vec<String> = totals.into_iter().map(|(unit, _)| unit).collect();

    Plot::new("budget_bar_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Ministry Name")
        .y_axis_label("Total Budget")
        .x_axis_formatter(move |mark: GridMark, _range| unit_label(&labels, mark.value))
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(format!("Total Budget for {year}")));
        });
    ui.add_space(12.0);
}

/// Axis label for a bar position; blank between bars.
fn unit_label(labels: &[String], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Line chart: one unit across years
// ---------------------------------------------------------------------------

/// Year-by-year totals for the selected unit. Hidden for "All".
pub fn budget_trend_chart(ui: &mut Ui, state: &AppState) {
    let Some(unit) = state.selected_unit.unit() else {
        return;
    };

    ui.heading(format!("Budget Trend for {unit}"));

    // Absent totals leave a gap in the series rather than a zero dip.
    let points: Vec<[f64; 2]> = state
        .trend_records()
        .iter()
        .filter_map(|r| Some([r.year as f64, r.total_amount?]))
        .collect();

    if points.is_empty() {
        ui.label("No figures recorded for this ministry.");
        return;
    }

    let color = state.unit_colors.color_for(unit);
    let name = format!("Budget Trend — {unit}");

    Plot::new("budget_trend_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Total Plan & Non-Plan")
        .x_axis_formatter(|mark: GridMark, _range| year_label(mark.value))
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(&name)
                    .color(color)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .name(&name)
                    .color(color)
                    .radius(4.0),
            );
        });
    ui.add_space(12.0);
}

/// Whole years only; fractional grid marks get no label.
fn year_label(value: f64) -> String {
    if value.fract().abs() > 1e-6 {
        String::new()
    } else {
        format!("{value:.0}")
    }
}
