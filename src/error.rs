use thiserror::Error;

pub type QueryResult<T> = Result<T, QueryError>;

/// Errors caused by a malformed query expression.
///
/// Bad *data* (missing columns, unparseable cells) is never an error; rows are
/// skipped instead. Only bad *specifications* end up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Invalid condition format: '{0}' (expected <column><op><value> with op one of =, >, <)")]
    InvalidConditionFormat(String),

    #[error("Unsupported operation: {name}. Available: {available}")]
    UnsupportedOperation { name: String, available: String },

    #[error("No numeric values in column '{column}'")]
    NoNumericValues { column: String },

    #[error("Invalid aggregation format: '{0}' (expected <column>=<operation>)")]
    InvalidAggregationFormat(String),

    #[error("Invalid order-by: '{0}' (expected <column> or <column>=asc|desc)")]
    InvalidOrderBy(String),
}
