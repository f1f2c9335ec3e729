use std::sync::Arc;

use crate::color::UnitColors;
use crate::data::error::DataUnavailable;
use crate::data::filter::{
    distinct_units, distinct_years, filter_by_year_and_unit, totals_by_unit, trend_for_unit,
    UnitSelection,
};
use crate::data::model::{BudgetDataset, BudgetRecord};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<BudgetDataset>>,

    /// Year selector options, ascending.
    pub years: Vec<i32>,

    /// Unit selector options, sorted, without the "All" sentinel.
    pub units: Vec<String>,

    pub selected_year: Option<i32>,
    pub selected_unit: UnitSelection,

    /// Stable colour per unit for the bar chart.
    pub unit_colors: UnitColors,

    /// Set when the dataset could not be loaded; the dashboard is hidden.
    pub load_error: Option<String>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset and reset the selection to
    /// the first year and "All".
    pub fn set_dataset(&mut self, dataset: Arc<BudgetDataset>) {
        self.years = distinct_years(&dataset.records);
        self.units = distinct_units(&dataset.records);
        self.unit_colors = UnitColors::new(&self.units);
        self.selected_year = self.years.first().copied();
        self.selected_unit = UnitSelection::All;

        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
    }

    /// Record a load failure that leaves no dataset to show.
    pub fn set_load_error(&mut self, err: &DataUnavailable) {
        *self = Self {
            load_error: Some(err.to_string()),
            ..Self::default()
        };
    }

    pub fn select_year(&mut self, year: i32) {
        log::debug!("Year selected: {year}");
        self.selected_year = Some(year);
    }

    pub fn select_unit(&mut self, unit: UnitSelection) {
        log::debug!("Unit selected: {unit}");
        self.selected_unit = unit;
    }

    /// Unit selector options: "All" followed by every unit.
    pub fn unit_options(&self) -> Vec<UnitSelection> {
        std::iter::once(UnitSelection::All)
            .chain(self.units.iter().cloned().map(UnitSelection::Unit))
            .collect()
    }

    /// Records matching the current selection, in source order.
    ///
    /// Recomputed on every call; the relation is small and never mutated.
    pub fn visible_records(&self) -> Vec<&BudgetRecord> {
        match (&self.dataset, self.selected_year) {
            (Some(ds), Some(year)) => filter_by_year_and_unit(&ds.records, year, &self.selected_unit),
            _ => Vec::new(),
        }
    }

    /// The selected unit's records ordered by year; empty for "All".
    pub fn trend_records(&self) -> Vec<&BudgetRecord> {
        match (&self.dataset, self.selected_unit.unit()) {
            (Some(ds), Some(unit)) => trend_for_unit(&ds.records, unit),
            _ => Vec::new(),
        }
    }

    /// Bar chart series for the current selection.
    pub fn bar_totals(&self) -> Vec<(String, f64)> {
        totals_by_unit(self.visible_records())
    }

    /// First and last year, for the page heading.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> AppState {
        let ds = BudgetDataset::from_records(vec![
            BudgetRecord::new(2016, "Health", Some(150.0)),
            BudgetRecord::new(2015, "Health", Some(100.0)),
            BudgetRecord::new(2015, "Defence", Some(200.0)),
        ]);
        let mut state = AppState::default();
        state.set_dataset(Arc::new(ds));
        state
    }

    #[test]
    fn new_dataset_selects_first_year_and_all() {
        let state = loaded();
        assert_eq!(state.years, vec![2015, 2016]);
        assert_eq!(state.selected_year, Some(2015));
        assert_eq!(state.selected_unit, UnitSelection::All);
        let visible: Vec<(i32, &str)> = state
            .visible_records()
            .iter()
            .map(|r| (r.year, r.organizational_unit.as_str()))
            .collect();
        assert_eq!(visible, vec![(2015, "Health"), (2015, "Defence")]);
        assert!(state.trend_records().is_empty());
        assert_eq!(state.year_span(), Some((2015, 2016)));
    }

    #[test]
    fn unit_options_start_with_all() {
        let state = loaded();
        assert_eq!(
            state.unit_options(),
            vec![
                UnitSelection::All,
                UnitSelection::Unit("Defence".to_string()),
                UnitSelection::Unit("Health".to_string()),
            ]
        );
    }

    #[test]
    fn selecting_a_unit_fills_trend_and_all_clears_it() {
        let mut state = loaded();
        state.select_unit(UnitSelection::Unit("Health".to_string()));

        let visible: Vec<i32> = state.visible_records().iter().map(|r| r.year).collect();
        assert_eq!(visible, vec![2015]);
        let trend: Vec<i32> = state.trend_records().iter().map(|r| r.year).collect();
        assert_eq!(trend, vec![2015, 2016]);

        state.select_unit(UnitSelection::All);
        assert!(state.trend_records().is_empty());
        assert_eq!(state.visible_records().len(), 2);
    }

    #[test]
    fn selecting_an_absent_year_shows_nothing() {
        let mut state = loaded();
        state.select_year(2099);
        assert!(state.visible_records().is_empty());
        assert!(state.bar_totals().is_empty());
    }

    #[test]
    fn bar_totals_follow_the_selection() {
        let mut state = loaded();
        state.select_year(2015);
        assert_eq!(
            state.bar_totals(),
            vec![("Health".to_string(), 100.0), ("Defence".to_string(), 200.0)]
        );
    }

    #[test]
    fn load_error_clears_previous_dataset() {
        let mut state = loaded();
        state.set_load_error(&DataUnavailable::MissingColumn("Year".to_string()));
        assert!(state.dataset.is_none());
        assert!(state.visible_records().is_empty());
        assert_eq!(
            state.load_error.as_deref(),
            Some("required column 'Year' is missing")
        );
    }
}
