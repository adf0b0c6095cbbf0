use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Schema: required columns and their source-file aliases
// ---------------------------------------------------------------------------

/// The eight required columns. Each is accepted under its schema name or
/// the name the original survey export uses; mapping between the two is
/// owned here, not by the engine.
const COLUMNS: [(&str, &str); 8] = [
    ("year", "ano"),
    ("seniority", "senioridade"),
    ("contract_type", "contrato"),
    ("company_size", "tamanho_empresa"),
    ("role", "cargo"),
    ("remote_status", "remoto"),
    ("residence_country", "residencia_iso3"),
    ("salary_usd", "usd"),
];

/// A required column or numeric type missing from the loaded file.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Find the position of a required column among the file's headers,
/// accepting either the schema name or its source alias.
fn resolve_column(headers: &[String], slot: usize) -> Result<usize, SchemaError> {
    let (name, alias) = COLUMNS[slot];
    headers
        .iter()
        .position(|h| h == name || h == alias)
        .ok_or(SchemaError::MissingColumn(name))
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a salary dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – delimited file with a header row (primary input)
/// * `.json`    – records-oriented array of row objects
/// * `.parquet` – flat scalar columns
pub fn load_file(path: &Path) -> Result<SalaryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<SalaryDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    load_csv_reader(file)
}

/// Parse CSV rows from any reader. Split from [`load_csv`] so tests can
/// run over in-memory input.
pub fn load_csv_reader<R: Read>(input: R) -> Result<SalaryDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut idx = [0usize; 8];
    for slot in 0..COLUMNS.len() {
        idx[slot] = resolve_column(&headers, slot)?;
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |slot: usize| record.get(idx[slot]).unwrap_or("").trim();

        let year: i32 = cell(0)
            .parse()
            .with_context(|| format!("CSV row {row_no}: '{}' is not a year", cell(0)))?;
        let salary_usd: f64 = cell(7)
            .parse()
            .with_context(|| format!("CSV row {row_no}: '{}' is not a salary", cell(7)))?;

        records.push(validate(
            SalaryRecord {
                year,
                seniority: cell(1).to_string(),
                contract_type: cell(2).to_string(),
                company_size: cell(3).to_string(),
                role: cell(4).to_string(),
                remote_status: cell(5).to_string(),
                residence_country: cell(6).to_string(),
                salary_usd,
            },
            row_no,
        )?);
    }

    Ok(SalaryDataset::from_records(records))
}

fn validate(rec: SalaryRecord, row_no: usize) -> Result<SalaryRecord> {
    if !rec.salary_usd.is_finite() || rec.salary_usd < 0.0 {
        bail!("row {row_no}: salary must be a non-negative number, got {}", rec.salary_usd);
    }
    Ok(rec)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One row as it appears in a records-oriented JSON export
/// (`df.to_json(orient='records')`). Source column names are accepted
/// as aliases of the schema names.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(alias = "ano")]
    year: i32,
    #[serde(alias = "senioridade")]
    seniority: String,
    #[serde(alias = "contrato")]
    contract_type: String,
    #[serde(alias = "tamanho_empresa")]
    company_size: String,
    #[serde(alias = "cargo")]
    role: String,
    #[serde(alias = "remoto")]
    remote_status: String,
    #[serde(alias = "residencia_iso3")]
    residence_country: String,
    #[serde(alias = "usd")]
    salary_usd: f64,
}

impl From<RawRecord> for SalaryRecord {
    fn from(raw: RawRecord) -> Self {
        SalaryRecord {
            year: raw.year,
            seniority: raw.seniority,
            contract_type: raw.contract_type,
            company_size: raw.company_size,
            role: raw.role,
            remote_status: raw.remote_status,
            residence_country: raw.residence_country,
            salary_usd: raw.salary_usd,
        }
    }
}

fn load_json(path: &Path) -> Result<SalaryDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    load_json_str(&text)
}

pub fn load_json_str(text: &str) -> Result<SalaryDataset> {
    let raw: Vec<RawRecord> = serde_json::from_str(text).context("parsing JSON records")?;
    let records = raw
        .into_iter()
        .enumerate()
        .map(|(row_no, r)| validate(r.into(), row_no))
        .collect::<Result<Vec<_>>>()?;
    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat scalar columns. Works with files written
/// by both **Pandas** (`df.to_parquet()`) and **Polars**
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<SalaryDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let headers: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();

        let mut idx = [0usize; 8];
        for slot in 0..COLUMNS.len() {
            idx[slot] = resolve_column(&headers, slot)?;
        }

        for row in 0..batch.num_rows() {
            let year = int_at(batch.column(idx[0]), row)
                .with_context(|| format!("row {row}: failed to read year column"))?;
            let salary_usd = float_at(batch.column(idx[7]), row)
                .with_context(|| format!("row {row}: failed to read salary column"))?;

            records.push(validate(
                SalaryRecord {
                    year: year as i32,
                    seniority: string_at(batch.column(idx[1]), row)?,
                    contract_type: string_at(batch.column(idx[2]), row)?,
                    company_size: string_at(batch.column(idx[3]), row)?,
                    role: string_at(batch.column(idx[4]), row)?,
                    remote_status: string_at(batch.column(idx[5]), row)?,
                    residence_country: string_at(batch.column(idx[6]), row)?,
                    salary_usd,
                },
                row,
            )?);
        }
    }

    Ok(SalaryDataset::from_records(records))
}

// -- Arrow helpers --

fn string_at(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<LargeStringArray>()
                .context("expected LargeStringArray")?;
            Ok(arr.value(row).to_string())
        }
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn int_at(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        other => bail!("expected an integer column, got {other:?}"),
    }
}

fn float_at(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        // Integer salaries are fine, some exports write them that way.
        DataType::Int32 | DataType::Int64 => int_at(col, row).map(|v| v as f64),
        other => bail!("expected a numeric column, got {other:?}"),
    }
}
