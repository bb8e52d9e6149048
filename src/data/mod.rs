/// Data layer: row model, loading, and the filter / sort / aggregate engine.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (text cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  --where  column(=|>|<)value
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   sort    │  --order-by column[=asc|desc]
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  --aggregate column=avg|min|max|median
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
