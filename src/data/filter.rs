use std::collections::BTreeSet;
use std::fmt;

use super::model::BudgetRecord;

// ---------------------------------------------------------------------------
// Unit selection: a specific organizational unit or the "All" sentinel
// ---------------------------------------------------------------------------

/// The organizational-unit selector's value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnitSelection {
    /// No unit filter.
    #[default]
    All,
    Unit(String),
}

impl UnitSelection {
    pub const ALL_LABEL: &'static str = "All";

    /// The selected unit, if any.
    pub fn unit(&self) -> Option<&str> {
        match self {
            UnitSelection::All => None,
            UnitSelection::Unit(u) => Some(u),
        }
    }
}

impl fmt::Display for UnitSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSelection::All => write!(f, "{}", Self::ALL_LABEL),
            UnitSelection::Unit(u) => write!(f, "{u}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Selector values
// ---------------------------------------------------------------------------

/// Every distinct year, ascending.
pub fn distinct_years(records: &[BudgetRecord]) -> Vec<i32> {
    records
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every distinct organizational unit, lexicographically sorted.
pub fn distinct_units(records: &[BudgetRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.organizational_unit.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Narrowing
// ---------------------------------------------------------------------------

/// Indices of records in `year`, further restricted to the selected unit.
///
/// Source order is preserved. A year or unit that does not occur simply
/// matches nothing.
fn year_unit_indices(records: &[BudgetRecord], year: i32, unit: &UnitSelection) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.year == year)
        .filter(|(_, r)| match unit {
            UnitSelection::All => true,
            UnitSelection::Unit(u) => r.organizational_unit == *u,
        })
        .map(|(i, _)| i)
        .collect()
}

/// Records in `year`, optionally restricted to one unit.
pub fn filter_by_year_and_unit<'a>(
    records: &'a [BudgetRecord],
    year: i32,
    unit: &UnitSelection,
) -> Vec<&'a BudgetRecord> {
    year_unit_indices(records, year, unit)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Indices of every record of `unit`, ordered by year ascending.
///
/// The sort is stable, so records sharing a year keep their source order.
fn trend_indices(records: &[BudgetRecord], unit: &str) -> Vec<usize> {
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.organizational_unit == unit)
        .map(|(i, _)| i)
        .collect();
    indices.sort_by_key(|&i| records[i].year);
    indices
}

/// The unit's records across all years, ordered by year ascending.
pub fn trend_for_unit<'a>(records: &'a [BudgetRecord], unit: &str) -> Vec<&'a BudgetRecord> {
    trend_indices(records, unit)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Sum of present totals per unit, in order of first appearance.
///
/// Units whose totals are all absent still get an entry of `0.0`.
pub fn totals_by_unit<'a, I>(records: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a BudgetRecord>,
{
    let mut totals: Vec<(String, f64)> = Vec::new();
    for r in records {
        let amount = r.total_amount.unwrap_or(0.0);
        match totals.iter_mut().find(|(u, _)| *u == r.organizational_unit) {
            Some((_, sum)) => *sum += amount,
            None => totals.push((r.organizational_unit.clone(), amount)),
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<BudgetRecord> {
        vec![
            BudgetRecord::new(2015, "Health", Some(100.0)),
            BudgetRecord::new(2015, "Defence", Some(200.0)),
            BudgetRecord::new(2016, "Health", Some(150.0)),
        ]
    }

    fn wider() -> Vec<BudgetRecord> {
        vec![
            BudgetRecord::new(2017, "Health", Some(170.0)),
            BudgetRecord::new(2015, "Railways", None),
            BudgetRecord::new(2016, "Defence", Some(210.0)),
            BudgetRecord::new(2015, "Health", Some(100.0)),
            BudgetRecord::new(2016, "Health", Some(150.0)),
            BudgetRecord::new(2015, "Defence", Some(-5.0)),
            BudgetRecord::new(2017, "Agriculture", Some(0.0)),
        ]
    }

    #[test]
    fn all_filter_returns_year_rows_in_source_order() {
        let data = sample();
        let rows = filter_by_year_and_unit(&data, 2015, &UnitSelection::All);
        assert_eq!(rows, vec![&data[0], &data[1]]);
    }

    #[test]
    fn unit_filter_narrows_to_one_row() {
        let data = sample();
        let rows = filter_by_year_and_unit(&data, 2015, &UnitSelection::Unit("Health".to_string()));
        assert_eq!(rows, vec![&BudgetRecord::new(2015, "Health", Some(100.0))]);
    }

    #[test]
    fn trend_collects_unit_across_years() {
        let data = sample();
        let trend = trend_for_unit(&data, "Health");
        assert_eq!(
            trend,
            vec![
                &BudgetRecord::new(2015, "Health", Some(100.0)),
                &BudgetRecord::new(2016, "Health", Some(150.0)),
            ]
        );
    }

    #[test]
    fn absent_year_yields_empty_result() {
        let data = sample();
        assert!(filter_by_year_and_unit(&data, 2099, &UnitSelection::All).is_empty());
    }

    #[test]
    fn unknown_unit_yields_empty_result() {
        let data = sample();
        let unit = UnitSelection::Unit("Space".to_string());
        assert!(filter_by_year_and_unit(&data, 2015, &unit).is_empty());
        assert!(trend_for_unit(&data, "Space").is_empty());
    }

    #[test]
    fn all_filter_matches_every_record_of_the_year() {
        let data = wider();
        for year in distinct_years(&data) {
            let rows = filter_by_year_and_unit(&data, year, &UnitSelection::All);
            assert!(rows.iter().all(|r| r.year == year));
            assert_eq!(rows.len(), data.iter().filter(|r| r.year == year).count());
        }
    }

    #[test]
    fn unit_filter_is_subset_of_all_filter() {
        let data = wider();
        for year in distinct_years(&data) {
            let all = filter_by_year_and_unit(&data, year, &UnitSelection::All);
            for unit in distinct_units(&data) {
                let narrowed = filter_by_year_and_unit(&data, year, &UnitSelection::Unit(unit));
                assert!(narrowed.iter().all(|r| all.contains(r)));
            }
        }
    }

    #[test]
    fn distinct_values_are_sorted_and_unique() {
        let data = wider();
        assert_eq!(distinct_years(&data), vec![2015, 2016, 2017]);
        assert_eq!(
            distinct_units(&data),
            vec!["Agriculture", "Defence", "Health", "Railways"]
        );
        assert!(distinct_years(&[]).is_empty());
        assert!(distinct_units(&[]).is_empty());
    }

    #[test]
    fn trend_is_year_ordered_and_single_unit() {
        let data = wider();
        let trend = trend_for_unit(&data, "Health");
        let years: Vec<i32> = trend.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2015, 2016, 2017]);
        assert!(trend.iter().all(|r| r.organizational_unit == "Health"));
    }

    #[test]
    fn filtering_is_idempotent() {
        let data = wider();
        let unit = UnitSelection::Unit("Defence".to_string());
        assert_eq!(
            filter_by_year_and_unit(&data, 2016, &unit),
            filter_by_year_and_unit(&data, 2016, &unit)
        );
        assert_eq!(year_unit_indices(&data, 2016, &unit), vec![2]);
    }

    #[test]
    fn totals_sum_duplicates_and_treat_absent_as_zero() {
        let data = vec![
            BudgetRecord::new(2015, "Health", Some(100.0)),
            BudgetRecord::new(2015, "Railways", None),
            BudgetRecord::new(2015, "Health", Some(20.0)),
        ];
        assert_eq!(
            totals_by_unit(&data),
            vec![("Health".to_string(), 120.0), ("Railways".to_string(), 0.0)]
        );
    }

    #[test]
    fn unit_selection_labels() {
        assert_eq!(UnitSelection::All.to_string(), "All");
        assert_eq!(UnitSelection::Unit("Health".to_string()).unit(), Some("Health"));
        assert_eq!(UnitSelection::All.unit(), None);
    }
}
