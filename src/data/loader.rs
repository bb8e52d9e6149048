use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Record, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` (and anything unrecognised) – header row, one record per line
/// * `.json`    – `[{ "name": "iphone", "price": 999 }, ...]`
/// * `.parquet` – any flat schema; every column is rendered to text
///
/// Every cell ends up as text; typing happens later, per operation.
pub fn load_file(path: &Path) -> Result<Table> {
    if !path.exists() {
        bail!("File {} not found", path.display());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        _ => load_csv(path),
    }
    .with_context(|| format!("reading {}", path.display()))?;

    info!(
        "loaded {} rows x {} columns from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then data rows.
/// Rows shorter than the header simply lack the trailing cells; extra cells
/// beyond the header are dropped.
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        if row.len() != headers.len() {
            debug!(
                "CSV row {row_no}: {} cells for {} columns",
                row.len(),
                headers.len()
            );
        }
        records.push(headers.iter().map(String::as_str).zip(row.iter()).collect::<Record>());
    }

    Ok(Table::new(headers, records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "name": "iphone", "brand": "apple", "price": 999, "rating": 4.9 },
///   ...
/// ]
/// ```
///
/// Scalars are kept as their JSON text, `null` becomes an empty cell.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let obj = row
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            Ok(obj
                .iter()
                .map(|(key, val)| (key.as_str(), json_to_cell(val)))
                .collect::<Record>())
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Table::from_records(records))
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

/// Load a Parquet file, rendering each cell with arrow's display formatter
/// (`null` → empty cell). Nested columns come out in their display form.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let options = FormatOptions::default();
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let formatters = batch
            .columns()
            .iter()
            .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
            .collect::<Result<Vec<_>, _>>()
            .context("preparing column formatters")?;

        for row in 0..batch.num_rows() {
            records.push(
                columns
                    .iter()
                    .zip(&formatters)
                    .map(|(name, fmt)| (name.as_str(), fmt.value(row).to_string()))
                    .collect::<Record>(),
            );
        }
    }

    Ok(Table::new(columns, records))
}
