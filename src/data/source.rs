use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::error::DataUnavailable;
use super::loader::load_file;
use super::model::BudgetDataset;

/// A data file that is read at most once.
///
/// The first successful [`load`](Self::load) parses the file; every later
/// call hands out the same shared dataset without touching the filesystem.
/// Failures are not cached.
#[derive(Debug)]
pub struct DatasetSource {
    path: PathBuf,
    cell: OnceCell<Arc<BudgetDataset>>,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Arc<BudgetDataset>, DataUnavailable> {
        self.cell
            .get_or_try_init(|| {
                let dataset = load_file(&self.path)?;
                log_loaded(&self.path, &dataset);
                Ok(Arc::new(dataset))
            })
            .map(Arc::clone)
    }
}

fn log_loaded(path: &Path, dataset: &BudgetDataset) {
    if dataset.is_empty() {
        log::info!("Loaded an empty budget table from {}", path.display());
    } else {
        let years = dataset.records.iter().map(|r| r.year);
        let first = years.clone().min().unwrap_or_default();
        let last = years.max().unwrap_or_default();
        log::info!(
            "Loaded {} budget rows ({first}–{last}) from {}",
            dataset.len(),
            path.display()
        );
    }

    for ((year, unit), n) in dataset.duplicate_keys() {
        log::warn!("{n} rows share year {year} and unit '{unit}'; the bar chart sums them");
    }
}
