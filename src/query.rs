use log::info;

use crate::data::aggregate::aggregate_rows;
use crate::data::filter::filter_rows;
use crate::data::model::Table;
use crate::data::sort::{parse_order_by, sort_rows};
use crate::error::QueryResult;

// ---------------------------------------------------------------------------
// Query – what the user asked for, independent of the CLI
// ---------------------------------------------------------------------------

/// The raw expressions of one run. `None` means the stage is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// `column(=|>|<)value`
    pub where_clause: Option<String>,
    /// `column` or `column=asc|desc`
    pub order_by: Option<String>,
    /// `column=avg|min|max|median`
    pub aggregate: Option<String>,
}

/// Result of running a [`Query`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// No aggregation requested: the filtered, sorted rows.
    Rows(Table),
    /// A single statistic, with the expression that produced it.
    Aggregate { expression: String, value: f64 },
}

/// Filter → sort → aggregate-or-rows.
pub fn run_query(table: &Table, query: &Query) -> QueryResult<QueryOutput> {
    let mut rows = filter_rows(table, query.where_clause.as_deref())?;

    if let Some(raw) = query.order_by.as_deref().filter(|s| !s.is_empty()) {
        let order = parse_order_by(raw)?;
        rows = sort_rows(&rows, &order.column, order.descending);
    }

    let aggregate = query.aggregate.as_deref().filter(|s| !s.is_empty());
    match aggregate_rows(&rows, aggregate)? {
        Some(value) => {
            let expression = aggregate.unwrap_or_default().to_string();
            info!("{expression} = {value}");
            Ok(QueryOutput::Aggregate { expression, value })
        }
        None => {
            info!("query produced {} of {} rows", rows.len(), table.len());
            Ok(QueryOutput::Rows(rows))
        }
    }
}
