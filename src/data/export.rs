use std::path::Path;

use anyhow::{Context, Result};

use super::error::DataUnavailable;
use super::model::BudgetDataset;

/// Serialize the whole, unfiltered dataset as CSV: header row followed by
/// every record's raw cells in load order.
pub fn to_csv_string(dataset: &BudgetDataset) -> Result<String, DataUnavailable> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&dataset.columns)?;
    for record in &dataset.records {
        writer.write_record(&record.cells)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    // Every cell came from a `String`, so the output is valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the CSV export to `path`, replacing any existing file.
pub fn write_csv(dataset: &BudgetDataset, path: &Path) -> Result<()> {
    let text = to_csv_string(dataset).context("serializing budget table")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} rows to {}", dataset.len(), path.display());
    Ok(())
}
