use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use super::model::Table;
use crate::error::{QueryError, QueryResult};

// ---------------------------------------------------------------------------
// Operation registry
// ---------------------------------------------------------------------------

/// A numeric reduction applied by `--aggregate`.
///
/// The set is closed; adding an operation means adding a variant, its name in
/// [`Operation::name`], and its arm in [`Operation::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Avg,
    Min,
    Max,
    Median,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Avg,
        Operation::Min,
        Operation::Max,
        Operation::Median,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Avg => "avg",
            Operation::Min => "min",
            Operation::Max => "max",
            Operation::Median => "median",
        }
    }

    /// Comma-separated list of the registered names.
    pub fn available() -> String {
        Self::ALL.map(Operation::name).join(", ")
    }

    /// Reduce `values` to one number. Callers pass a non-empty slice; an
    /// empty one yields NaN.
    pub fn apply(self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        match self {
            Operation::Avg => {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                round_to_tenths(mean)
            }
            Operation::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Operation::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Operation::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(f64::total_cmp);
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 1 {
                    sorted[mid]
                } else {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                }
            }
        }
    }
}

impl FromStr for Operation {
    type Err = QueryError;

    fn from_str(name: &str) -> QueryResult<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| QueryError::UnsupportedOperation {
                name: name.to_string(),
                available: Self::available(),
            })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up an operation by its (already lower-cased) name.
pub fn get_operation(name: &str) -> QueryResult<Operation> {
    name.parse()
}

/// Round to one decimal place, ties to even, on the exact binary value.
///
/// `0.25` → `0.2`, `0.75` → `0.8`; `0.35` is stored slightly below the tie and
/// becomes `0.3`. Decimal formatting in `core::fmt` is exact, so going through
/// it gives the correctly rounded result.
pub fn round_to_tenths(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

// ---------------------------------------------------------------------------
// Aggregation expression: `column=operation`
// ---------------------------------------------------------------------------

/// A parsed `--aggregate` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationSpec {
    pub column: String,
    /// Lower-cased operation name, not yet resolved against the registry.
    pub operation: String,
}

/// Parse `<column>=<operation>`.
///
/// Exactly one `=` is required; `a=b=c` and `price` are both rejected.
pub fn parse_aggregation(raw: &str) -> QueryResult<AggregationSpec> {
    let mut parts = raw.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(column), Some(operation), None) => Ok(AggregationSpec {
            column: column.trim().to_string(),
            operation: operation.trim().to_lowercase(),
        }),
        _ => Err(QueryError::InvalidAggregationFormat(raw.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Reduce one numeric column of `table` according to `spec`.
///
/// Returns `Ok(None)` when no (or an empty) expression is given. Rows whose
/// cell is missing or non-numeric are skipped. The operation name is resolved
/// only after values are collected, so a column without numbers reports
/// [`QueryError::NoNumericValues`] even if the operation is also unknown.
pub fn aggregate_rows(table: &Table, spec: Option<&str>) -> QueryResult<Option<f64>> {
    let Some(raw) = spec.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let spec = parse_aggregation(raw)?;

    let values: Vec<f64> = table
        .iter()
        .filter_map(|rec| rec.get_number(&spec.column))
        .collect();

    if values.is_empty() {
        warn!("column '{}' has no numeric values", spec.column);
        return Err(QueryError::NoNumericValues {
            column: spec.column,
        });
    }
    let operation = get_operation(&spec.operation)?;
    debug!(
        "{operation} over {} numeric values of '{}' out of {} rows",
        values.len(),
        spec.column,
        table.len()
    );
    Ok(Some(operation.apply(&values)))
}
