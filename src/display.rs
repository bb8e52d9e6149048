use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::data::model::Table;
use crate::query::QueryOutput;

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

/// Render `table` as a boxed text grid, columns in header order.
///
/// A table without columns (e.g. nothing could be loaded) renders as an
/// empty string.
pub fn render_table(table: &Table) -> Result<String> {
    if table.columns.is_empty() {
        return Ok(String::new());
    }
    let batch = to_record_batch(table)?;
    let formatted = pretty_format_batches(&[batch]).context("formatting table")?;
    Ok(formatted.to_string())
}

/// Every column becomes a non-null Utf8 array; missing cells are empty text.
fn to_record_batch(table: &Table) -> Result<RecordBatch> {
    let fields: Vec<Field> = table
        .columns
        .iter()
        .map(|name| Field::new(name, DataType::Utf8, false))
        .collect();

    let arrays: Vec<ArrayRef> = table
        .columns
        .iter()
        .map(|col| {
            let values: Vec<&str> = table.iter().map(|rec| rec.get(col).unwrap_or("")).collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).context("building record batch")
}

// ---------------------------------------------------------------------------
// Aggregate rendering
// ---------------------------------------------------------------------------

/// Format a statistic the way a float repr reads.
///
/// Whole numbers keep one decimal (`799.0`), decimal exponents below -4 or
/// from 16 up switch to scientific form with a signed two-digit exponent
/// (`1e+16`, `1.5e-05`), and non-finite values print as `nan` / `inf`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` gives the shortest round-trip digits, e.g. `1.5e-5`.
    let scientific = format!("{value:e}");
    if let Some((mantissa, exponent)) = scientific.split_once('e') {
        if let Ok(exponent) = exponent.parse::<i32>() {
            if !(-4..16).contains(&exponent) {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{mantissa}e{sign}{:02}", exponent.abs());
            }
        }
    }

    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Text printed for a finished query.
pub fn render_output(output: &QueryOutput) -> Result<String> {
    match output {
        QueryOutput::Rows(table) => render_table(table),
        QueryOutput::Aggregate { expression, value } => {
            Ok(format!("{expression} = {}", format_number(*value)))
        }
    }
}
