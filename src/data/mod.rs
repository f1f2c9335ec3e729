/// Data layer: core types, loading, filtering and export.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BudgetDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DatasetSource │  read once, share Arc<BudgetDataset>
///   └──────────────┘
///        │
///        ├──────────────────────────┐
///        ▼                          ▼
///   ┌──────────┐              ┌──────────┐
///   │  filter   │  year/unit   │  export   │  full table → CSV
///   └──────────┘  → indices   └──────────┘
/// ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod source;
