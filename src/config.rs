use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Optional settings file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "budget-dashboard.json";

/// Where the data comes from and how the export is named.
///
/// Every field has a default, so a settings file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub export_file_name: String,
    pub window_title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("Budget 2014-2025.csv"),
            export_file_name: "Budget_2014_2025.csv".to_string(),
            window_title: "Budget Dashboard".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read settings from `path`, or fall back to defaults when it does not
    /// exist. A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Apply command-line overrides: the first positional argument, if any,
    /// replaces the data path.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        if let Some(path) = args.into_iter().next() {
            self.data_path = PathBuf::from(path);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DashboardConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.data_path, PathBuf::from("Budget 2014-2025.csv"));
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{ "data_path": "data/budget.parquet" }"#).unwrap();

        let cfg = DashboardConfig::load(&path).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("data/budget.parquet"));
        assert_eq!(cfg.export_file_name, "Budget_2014_2025.csv");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not json").unwrap();
        assert!(DashboardConfig::load(&path).is_err());
    }

    #[test]
    fn positional_argument_replaces_data_path() {
        let cfg = DashboardConfig::default().with_args(vec!["other.tsv".to_string()]);
        assert_eq!(cfg.data_path, PathBuf::from("other.tsv"));

        let cfg = DashboardConfig::default().with_args(Vec::new());
        assert_eq!(cfg, DashboardConfig::default());
    }
}
