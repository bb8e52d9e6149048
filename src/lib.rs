//! Filter, sort and aggregate tabular files.
//!
//! The engine works on a [`Table`](data::model::Table) of text cells and
//! decides per operation whether a cell is numeric.

pub mod data;
pub mod display;
pub mod error;
pub mod query;

pub use data::model::{Record, Table};
pub use error::{QueryError, QueryResult};
pub use query::{run_query, Query, QueryOutput};
