use std::collections::BTreeMap;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Try to interpret a cell as an `f64`.
///
/// Surrounding whitespace is ignored, so `" 42 "` is numeric. Anything
/// `f64::from_str` rejects (including the empty string) is text.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Record – one row of the input file
// ---------------------------------------------------------------------------

/// A single row: column_name → cell text.
///
/// Records are never mutated after loading. Column order for display lives
/// on the owning [`Table`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    cells: BTreeMap<String, String>,
}

impl Record {
    /// Cell text for `column`, or `None` if this row has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Cell for `column` parsed as a number. `None` when missing or non-numeric.
    pub fn get_number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(parse_number)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded file
// ---------------------------------------------------------------------------

/// An ordered sequence of records plus the header order.
///
/// Records are shared behind `Arc`, so filtering and sorting only select and
/// reorder handles; no row is ever copied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column names in header order.
    pub columns: Vec<String>,
    /// Rows in file order (or the order produced by the last transformation).
    pub records: Vec<Arc<Record>>,
}

impl Table {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Table {
            columns,
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    /// Build a table whose column order is the first-seen order across `records`.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for rec in &records {
            for col in rec.cells.keys() {
                if !columns.contains(col) {
                    columns.push(col.clone());
                }
            }
        }
        Table::new(columns, records)
    }

    /// A table with the same header but a different selection of rows.
    pub fn with_records(&self, records: Vec<Arc<Record>>) -> Self {
        Table {
            columns: self.columns.clone(),
            records,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().map(|r| r.as_ref())
    }
}
