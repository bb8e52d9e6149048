use std::cmp::Ordering;

use log::debug;

use super::model::{parse_number, Record, Table};
use crate::error::{QueryError, QueryResult};

// ---------------------------------------------------------------------------
// SortKey – typed per-row key
// ---------------------------------------------------------------------------

/// Sort key extracted from one cell.
///
/// Total order: every `Numeric` key sorts before every `Text` key. Numbers
/// compare with `f64::total_cmp`; text compares lexicographically on the
/// lower-cased cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Numeric(f64),
    Text(String),
}

impl SortKey {
    /// Key for `column` of `record`. A missing column counts as empty text.
    ///
    /// `-0.0` is normalised to `0.0` so that `total_cmp` keeps equal zeros tied.
    pub fn extract(record: &Record, column: &str) -> Self {
        let cell = record.get(column).unwrap_or("");
        match parse_number(cell) {
            Some(v) if v == 0.0 => SortKey::Numeric(0.0),
            Some(v) => SortKey::Numeric(v),
            None => SortKey::Text(cell.to_lowercase()),
        }
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Numeric(a), SortKey::Numeric(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Numeric(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Numeric(_)) => Ordering::Greater,
        }
    }
}

// ---------------------------------------------------------------------------
// --order-by
// ---------------------------------------------------------------------------

/// Parsed `--order-by` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub descending: bool,
}

/// Parse `<column>` or `<column>=asc|desc`.
///
/// Only `desc` (any case) sorts descending; every other direction, or none,
/// is ascending.
pub fn parse_order_by(raw: &str) -> QueryResult<OrderBy> {
    let (column, direction) = match raw.split_once('=') {
        Some((column, direction)) => (column.trim(), direction.trim()),
        None => (raw.trim(), ""),
    };
    if column.is_empty() {
        return Err(QueryError::InvalidOrderBy(raw.to_string()));
    }
    Ok(OrderBy {
        column: column.to_string(),
        descending: direction.eq_ignore_ascii_case("desc"),
    })
}

// ---------------------------------------------------------------------------
// Row sorter
// ---------------------------------------------------------------------------

/// Stable sort of the rows by `column`.
///
/// With `reverse` the key order is flipped but ties keep their input order.
pub fn sort_rows(table: &Table, column: &str, reverse: bool) -> Table {
    let mut keyed: Vec<_> = table
        .records
        .iter()
        .map(|rec| (SortKey::extract(rec, column), rec.clone()))
        .collect();

    if reverse {
        keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    } else {
        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    debug!("sorted {} rows by '{column}' (reverse={reverse})", keyed.len());
    table.with_records(keyed.into_iter().map(|(_, rec)| rec).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{names, products};

    #[test]
    fn first_row_per_key() {
        let table = products();
        let cases = [
            ("rating", false, "redmi"),
            ("rating", true, "iphone"),
            ("price", false, "redmi"),
            ("price", true, "galaxy"),
            ("name", false, "galaxy"),
        ];
        for (column, reverse, first) in cases {
            let out = sort_rows(&table, column, reverse);
            assert_eq!(names(&out)[0], first, "{column} reverse={reverse}");
        }
    }

    #[test]
    fn numeric_not_lexicographic() {
        // "1199" < "199" as text; numerically it is the largest.
        let out = sort_rows(&products(), "price", false);
        assert_eq!(names(&out), vec!["redmi", "iphone", "galaxy"]);
    }

    #[test]
    fn descending_is_exact_reverse_without_ties() {
        let table = products();
        let asc = sort_rows(&table, "price", false);
        let mut desc = names(&sort_rows(&table, "price", true))
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        desc.reverse();
        assert_eq!(names(&asc), desc);
    }

    #[test]
    fn ties_keep_input_order_both_ways() {
        let rows = [("a", "1"), ("b", "2"), ("c", "1"), ("d", "2")];
        let table = Table::from_records(
            rows.iter()
                .map(|(id, k)| [("id", *id), ("k", *k)].into_iter().collect())
                .collect(),
        );
        let ids = |t: &Table| t.iter().filter_map(|r| r.get("id")).map(String::from).collect::<Vec<_>>();
        assert_eq!(ids(&sort_rows(&table, "k", false)), vec!["a", "c", "b", "d"]);
        assert_eq!(ids(&sort_rows(&table, "k", true)), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn signed_zeros_are_ties() {
        let rows = [("a", "0"), ("b", "-0"), ("c", "0.0")];
        let table = Table::from_records(
            rows.iter()
                .map(|(id, k)| [("id", *id), ("k", *k)].into_iter().collect())
                .collect(),
        );
        let ids = |t: &Table| t.iter().filter_map(|r| r.get("id")).map(String::from).collect::<Vec<_>>();
        assert_eq!(ids(&sort_rows(&table, "k", false)), vec!["a", "b", "c"]);
        assert_eq!(ids(&sort_rows(&table, "k", true)), vec!["a", "b", "c"]);
    }

    #[test]
    fn mixed_keys_numbers_first() {
        let cells = ["banana", "10", "Apple", "", "2"];
        let table = Table::from_records(
            cells.iter().map(|c| [("v", *c)].into_iter().collect()).collect(),
        );
        let out = sort_rows(&table, "v", false);
        let values: Vec<_> = out.iter().filter_map(|r| r.get("v")).collect();
        assert_eq!(values, vec!["2", "10", "", "Apple", "banana"]);
    }

    #[test]
    fn missing_column_sorts_as_empty_text() {
        let with: Record = [("v", "5")].into_iter().collect();
        let without: Record = [("other", "x")].into_iter().collect();
        assert_eq!(SortKey::extract(&without, "v"), SortKey::Text(String::new()));
        assert!(SortKey::extract(&with, "v") < SortKey::extract(&without, "v"));
    }

    #[test]
    fn order_by_parsing() {
        assert_eq!(
            parse_order_by("price").unwrap(),
            OrderBy { column: "price".into(), descending: false }
        );
        assert!(parse_order_by("price=DESC").unwrap().descending);
        assert!(!parse_order_by("price=asc").unwrap().descending);
        assert!(!parse_order_by("price=sideways").unwrap().descending);
        assert_eq!(parse_order_by(" rating = desc ").unwrap().column, "rating");
        assert!(matches!(parse_order_by("=desc"), Err(QueryError::InvalidOrderBy(_))));
    }

    #[test]
    fn empty_table_sorts_to_empty() {
        assert!(sort_rows(&Table::default(), "price", true).is_empty());
    }
}
