use std::io::Read;
use std::path::Path;

use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataUnavailable;
use super::model::BudgetDataset;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a budget table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-delimited text with a header row
/// * `.tsv`     – tab-delimited text with a header row
/// * `.json`    – `[{ "Year": 2015, "Ministry Name": "...", ... }, ...]`
/// * `.parquet` – flat Parquet table
pub fn load_file(path: &Path) -> Result<BudgetDataset, DataUnavailable> {
    if !path.exists() {
        return Err(DataUnavailable::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_delimited(open(path)?, b','),
        "tsv" => read_delimited(open(path)?, b'\t'),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataUnavailable::UnsupportedFormat(other.to_string())),
    }
}

fn open(path: &Path) -> Result<std::fs::File, DataUnavailable> {
    std::fs::File::open(path).map_err(|source| DataUnavailable::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Parse delimited text with a header row.
///
/// Rows with a different number of fields than the header are rejected by
/// the reader.
pub fn read_delimited<R: Read>(source: R, delimiter: u8) -> Result<BudgetDataset, DataUnavailable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(source);

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    BudgetDataset::from_rows(columns, rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Year": 2015, "Ministry Name": "Health", "Total Plan & Non-Plan": 100.0 },
///   ...
/// ]
/// ```
///
/// The column set is the union of all keys, in the order they are first met.
fn load_json(path: &Path) -> Result<BudgetDataset, DataUnavailable> {
    let text = std::fs::read_to_string(path).map_err(|source| DataUnavailable::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<BudgetDataset, DataUnavailable> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = match root {
        JsonValue::Array(records) => records,
        _ => return Err(not_json_records("expected a top-level JSON array")),
    };

    let mut columns: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for rec in records {
        let JsonValue::Object(obj) = rec else {
            return Err(not_json_records("every array element must be an object"));
        };
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .iter()
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or_default())
                .collect()
        })
        .collect();

    BudgetDataset::from_rows(columns, rows)
}

fn not_json_records(msg: &str) -> DataUnavailable {
    DataUnavailable::Json(serde::de::Error::custom(msg))
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table.
///
/// Every cell is rendered through Arrow's display formatter, so integer,
/// float and string columns all arrive as text and are typed the same way
/// as CSV input. Nulls render as empty cells.
fn load_parquet(path: &Path) -> Result<BudgetDataset, DataUnavailable> {
    let file = open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| array_value_to_string(col.as_ref(), row))
                .collect::<Result<Vec<String>, _>>()?;
            rows.push(cells);
        }
    }

    BudgetDataset::from_rows(columns, rows)
}
