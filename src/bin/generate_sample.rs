use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const CSV_PATH: &str = "Budget 2014-2025.csv";
const PARQUET_PATH: &str = "Budget 2014-2025.parquet";

/// (ministry, 2014 allocation in crore, yearly growth)
const MINISTRIES: &[(&str, f64, f64)] = &[
    ("Ministry of Agriculture and Farmers Welfare", 31_000.0, 0.11),
    ("Ministry of Defence", 229_000.0, 0.07),
    ("Ministry of Education", 82_000.0, 0.06),
    ("Ministry of External Affairs", 11_700.0, 0.05),
    ("Ministry of Finance", 680_000.0, 0.08),
    ("Ministry of Health and Family Welfare", 35_000.0, 0.09),
    ("Ministry of Home Affairs", 64_000.0, 0.08),
    ("Ministry of Railways", 66_000.0, 0.10),
    ("Ministry of Road Transport and Highways", 34_000.0, 0.16),
    ("Ministry of Rural Development", 83_000.0, 0.06),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }
}

struct SampleRow {
    year: i64,
    ministry: &'static str,
    plan: f64,
    non_plan: f64,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate(rng: &mut SimpleRng) -> Vec<SampleRow> {
    let mut rows = Vec::new();
    for year in 2014..=2025_i64 {
        let t = (year - 2014) as i32;
        for &(ministry, base, growth) in MINISTRIES {
            let total = base * (1.0 + growth).powi(t) * rng.uniform(0.94, 1.06);
            let plan_share = rng.uniform(0.25, 0.55);
            rows.push(SampleRow {
                year,
                ministry,
                plan: round2(total * plan_share),
                non_plan: round2(total * (1.0 - plan_share)),
            });
        }
    }
    rows
}

fn write_csv(rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating CSV file")?;
    writer.write_record(["Year", "Ministry Name", "Plan", "Non-Plan", "Total Plan & Non-Plan"])?;
    for r in rows {
        writer.write_record([
            r.year.to_string(),
            r.ministry.to_string(),
            r.plan.to_string(),
            r.non_plan.to_string(),
            round2(r.plan + r.non_plan).to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Year", DataType::Int64, false),
        Field::new("Ministry Name", DataType::Utf8, false),
        Field::new("Plan", DataType::Float64, false),
        Field::new("Non-Plan", DataType::Float64, false),
        Field::new("Total Plan & Non-Plan", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.year))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.ministry))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.plan))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.non_plan))),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| round2(r.plan + r.non_plan)),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(PARQUET_PATH).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(2014);
    let rows = generate(&mut rng);

    write_csv(&rows)?;
    write_parquet(&rows)?;

    println!(
        "Wrote {} budget rows ({} ministries × 12 years) to {CSV_PATH} and {PARQUET_PATH}",
        rows.len(),
        MINISTRIES.len()
    );
    Ok(())
}
