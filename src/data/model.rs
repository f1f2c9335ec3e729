use std::collections::BTreeMap;

use super::error::DataUnavailable;

/// Fiscal year column.
pub const YEAR_COLUMN: &str = "Year";
/// Organizational unit column ("Ministry" in the source data).
pub const UNIT_COLUMN: &str = "Ministry Name";
/// Combined planned and non-planned allocation.
pub const TOTAL_COLUMN: &str = "Total Plan & Non-Plan";

// ---------------------------------------------------------------------------
// BudgetRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single budget line: one organizational unit in one fiscal year.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRecord {
    pub year: i32,
    pub organizational_unit: String,
    /// `None` when the source cell is empty.
    pub total_amount: Option<f64>,
    /// Raw cells in the dataset's column order, kept for the table and export.
    pub cells: Vec<String>,
}

#[cfg(test)]
impl BudgetRecord {
    /// Build a record that only carries the three core columns.
    pub fn new(year: i32, organizational_unit: &str, total_amount: Option<f64>) -> Self {
        let total_cell = total_amount.map(|v| v.to_string()).unwrap_or_default();
        Self {
            year,
            organizational_unit: organizational_unit.to_string(),
            total_amount,
            cells: vec![year.to_string(), organizational_unit.to_string(), total_cell],
        }
    }
}

// ---------------------------------------------------------------------------
// BudgetDataset – the complete loaded relation
// ---------------------------------------------------------------------------

/// The full parsed table. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetDataset {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// All records in source order.
    pub records: Vec<BudgetRecord>,
}

impl BudgetDataset {
    /// Type raw text rows against the three required columns.
    ///
    /// Every row must have one cell per column. Extra columns are carried
    /// through untouched.
    pub fn from_rows(
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, DataUnavailable> {
        let year_idx = column_position(&columns, YEAR_COLUMN)?;
        let unit_idx = column_position(&columns, UNIT_COLUMN)?;
        let total_idx = column_position(&columns, TOTAL_COLUMN)?;

        let mut records = Vec::with_capacity(rows.len());
        for (row, cells) in rows.into_iter().enumerate() {
            let year_text = cell(&cells, year_idx);
            let year = parse_year(year_text).ok_or_else(|| DataUnavailable::InvalidValue {
                row,
                column: YEAR_COLUMN.to_string(),
                value: year_text.to_string(),
                reason: "not an integer year",
            })?;

            let unit = cell(&cells, unit_idx);
            if unit.is_empty() {
                return Err(DataUnavailable::InvalidValue {
                    row,
                    column: UNIT_COLUMN.to_string(),
                    value: String::new(),
                    reason: "organizational unit is empty",
                });
            }

            let total_text = cell(&cells, total_idx);
            let total_amount = if total_text.is_empty() {
                None
            } else {
                let invalid = |reason| DataUnavailable::InvalidValue {
                    row,
                    column: TOTAL_COLUMN.to_string(),
                    value: total_text.to_string(),
                    reason,
                };
                let amount = total_text.parse::<f64>().map_err(|_| invalid("not a number"))?;
                if !amount.is_finite() {
                    return Err(invalid("not a finite number"));
                }
                Some(amount)
            };

            records.push(BudgetRecord {
                year,
                organizational_unit: unit.to_string(),
                total_amount,
                cells,
            });
        }

        Ok(Self { columns, records })
    }

    /// Wrap records built with [`BudgetRecord::new`] under the core columns.
    #[cfg(test)]
    pub fn from_records(records: Vec<BudgetRecord>) -> Self {
        Self {
            columns: vec![
                YEAR_COLUMN.to_string(),
                UNIT_COLUMN.to_string(),
                TOTAL_COLUMN.to_string(),
            ],
            records,
        }
    }

    /// `(year, unit)` keys that occur more than once, with their counts.
    pub fn duplicate_keys(&self) -> Vec<((i32, String), usize)> {
        let mut counts: BTreeMap<(i32, &str), usize> = BTreeMap::new();
        for r in &self.records {
            *counts
                .entry((r.year, r.organizational_unit.as_str()))
                .or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|((year, unit), n)| ((year, unit.to_string()), n))
            .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn cell(cells: &[String], idx: usize) -> &str {
    cells.get(idx).map(|s| s.trim()).unwrap_or("")
}

fn column_position(columns: &[String], name: &str) -> Result<usize, DataUnavailable> {
    columns
        .iter()
        .position(|c| c.trim() == name)
        .ok_or_else(|| DataUnavailable::MissingColumn(name.to_string()))
}

/// Accepts `2015` as well as `2015.0`, which is how float-typed sources
/// render whole years.
fn parse_year(s: &str) -> Option<i32> {
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        ["Year", "Ministry Name", "Plan", "Total Plan & Non-Plan"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn from_rows_types_core_columns_and_keeps_extras() {
        let ds = BudgetDataset::from_rows(
            header(),
            vec![row(&["2015", "Health", "60", "100"]), row(&["2016", "Defence", "", ""])],
        )
        .unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].year, 2015);
        assert_eq!(ds.records[0].organizational_unit, "Health");
        assert_eq!(ds.records[0].total_amount, Some(100.0));
        assert_eq!(ds.records[0].cells[2], "60");
        assert_eq!(ds.records[1].total_amount, None);
    }

    #[test]
    fn from_rows_accepts_float_rendered_years() {
        let ds = BudgetDataset::from_rows(header(), vec![row(&["2015.0", "Health", "", "1.5"])])
            .unwrap();
        assert_eq!(ds.records[0].year, 2015);
    }

    #[test]
    fn from_rows_rejects_missing_column() {
        let columns = row(&["Year", "Ministry Name"]);
        let err = BudgetDataset::from_rows(columns, vec![]).unwrap_err();
        assert!(matches!(err, DataUnavailable::MissingColumn(c) if c == TOTAL_COLUMN));
    }

    #[test]
    fn from_rows_rejects_bad_year_and_empty_unit() {
        let err = BudgetDataset::from_rows(header(), vec![row(&["FY15", "Health", "", "1"])])
            .unwrap_err();
        assert!(matches!(err, DataUnavailable::InvalidValue { row: 0, ref column, .. } if column == YEAR_COLUMN));

        let err = BudgetDataset::from_rows(
            header(),
            vec![row(&["2015", "Health", "", "1"]), row(&["2015", " ", "", "1"])],
        )
        .unwrap_err();
        assert!(matches!(err, DataUnavailable::InvalidValue { row: 1, ref column, .. } if column == UNIT_COLUMN));
    }

    #[test]
    fn from_rows_rejects_non_numeric_total() {
        let err = BudgetDataset::from_rows(header(), vec![row(&["2015", "Health", "", "lots"])])
            .unwrap_err();
        assert!(matches!(err, DataUnavailable::InvalidValue { ref column, .. } if column == TOTAL_COLUMN));
    }

    #[test]
    fn from_rows_rejects_non_finite_totals() {
        for text in ["NaN", "inf", "-infinity"] {
            let err = BudgetDataset::from_rows(header(), vec![row(&["2015", "Health", "", text])])
                .unwrap_err();
            assert!(
                matches!(err, DataUnavailable::InvalidValue { ref value, reason: "not a finite number", .. } if value == text),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn duplicate_keys_reports_repeated_pairs() {
        let ds = BudgetDataset::from_records(vec![
            BudgetRecord::new(2015, "Health", Some(1.0)),
            BudgetRecord::new(2015, "Health", Some(2.0)),
            BudgetRecord::new(2016, "Health", Some(3.0)),
        ]);
        assert_eq!(ds.duplicate_keys(), vec![((2015, "Health".to_string()), 2)]);
    }
}
