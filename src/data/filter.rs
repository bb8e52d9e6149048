use std::fmt;
use std::str::FromStr;

use log::debug;

use super::model::{parse_number, Record, Table};
use crate::error::{QueryError, QueryResult};

// ---------------------------------------------------------------------------
// Condition: `column op value`
// ---------------------------------------------------------------------------

/// Comparison operator of a `--where` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gt,
    Lt,
}

impl Operator {
    /// Scan order when parsing: `=` wins over `>`, which wins over `<`.
    const PRECEDENCE: [Operator; 3] = [Operator::Eq, Operator::Gt, Operator::Lt];

    pub fn symbol(self) -> char {
        match self {
            Operator::Eq => '=',
            Operator::Gt => '>',
            Operator::Lt => '<',
        }
    }

    /// `=` is exact float equality; `>` and `<` are strict.
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Operator::Eq => lhs == rhs,
            Operator::Gt => lhs > rhs,
            Operator::Lt => lhs < rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A parsed filter predicate. Column and value are already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: String,
    pub operator: Operator,
    pub value: String,
}

impl Condition {
    /// Whether `record` satisfies this condition.
    ///
    /// * column missing → no match
    /// * cell and value both numeric → numeric comparison
    /// * otherwise → trimmed, case-sensitive text equality, for `=` only
    pub fn matches(&self, record: &Record) -> bool {
        let Some(cell) = record.get(&self.column) else {
            return false;
        };
        match (parse_number(cell), parse_number(&self.value)) {
            (Some(lhs), Some(rhs)) => self.operator.compare(lhs, rhs),
            _ => self.operator == Operator::Eq && cell.trim() == self.value,
        }
    }
}

impl FromStr for Condition {
    type Err = QueryError;

    fn from_str(raw: &str) -> QueryResult<Self> {
        let (operator, (column, value)) = Operator::PRECEDENCE
            .iter()
            .find_map(|op| raw.split_once(op.symbol()).map(|parts| (*op, parts)))
            .ok_or_else(|| QueryError::InvalidConditionFormat(raw.to_string()))?;

        Ok(Condition {
            column: column.trim().to_string(),
            operator,
            value: value.trim().to_string(),
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.column, self.operator, self.value)
    }
}

/// Parse a raw `--where` expression.
///
/// Splits on the first `=`, else the first `>`, else the first `<`.
pub fn parse_condition(raw: &str) -> QueryResult<Condition> {
    raw.parse()
}

// ---------------------------------------------------------------------------
// Row filter
// ---------------------------------------------------------------------------

/// Keep the rows matching `condition`, in their original order.
///
/// An absent (or empty) condition returns the table unchanged.
pub fn filter_rows(table: &Table, condition: Option<&str>) -> QueryResult<Table> {
    let Some(raw) = condition.filter(|c| !c.is_empty()) else {
        return Ok(table.clone());
    };
    let condition = parse_condition(raw)?;

    let kept = table
        .records
        .iter()
        .filter(|rec| condition.matches(rec))
        .cloned()
        .collect::<Vec<_>>();

    debug!(
        "filter '{condition}': kept {} of {} rows",
        kept.len(),
        table.len()
    );
    Ok(table.with_records(kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{names, products};

    fn cond(column: &str, operator: Operator, value: &str) -> Condition {
        Condition {
            column: column.to_string(),
            operator,
            value: value.to_string(),
        }
    }

    #[test]
    fn parse_each_operator() {
        assert_eq!(parse_condition("brand=apple").unwrap(), cond("brand", Operator::Eq, "apple"));
        assert_eq!(parse_condition("price > 1000").unwrap(), cond("price", Operator::Gt, "1000"));
        assert_eq!(parse_condition(" price<500 ").unwrap(), cond("price", Operator::Lt, "500"));
    }

    #[test]
    fn equals_takes_precedence() {
        // `=` wins even though `>` comes first in the string.
        assert_eq!(parse_condition("a>b=c").unwrap(), cond("a>b", Operator::Eq, "c"));
        assert_eq!(parse_condition("a<b>c").unwrap(), cond("a<b", Operator::Gt, "c"));
    }

    #[test]
    fn splits_on_first_occurrence() {
        assert_eq!(parse_condition("a=b=c").unwrap(), cond("a", Operator::Eq, "b=c"));
    }

    #[test]
    fn rejects_missing_operator() {
        assert_eq!(
            parse_condition("invalid_condition"),
            Err(QueryError::InvalidConditionFormat("invalid_condition".to_string()))
        );
        let err = filter_rows(&Table::default(), Some("invalid_condition")).unwrap_err();
        assert!(matches!(err, QueryError::InvalidConditionFormat(_)));
    }

    #[test]
    fn filter_by_condition() {
        let table = products();
        let cases = [
            ("brand=apple", vec!["iphone"]),
            ("brand=xiaomi", vec!["redmi"]),
            ("price>1000", vec!["galaxy"]),
            ("price<500", vec!["redmi"]),
            ("rating>4.7", vec!["iphone", "galaxy"]),
            ("price=999.0", vec!["iphone"]),
            ("brand=Apple", vec![]),
        ];
        for (raw, expected) in cases {
            let out = filter_rows(&table, Some(raw)).unwrap();
            assert_eq!(names(&out), expected, "condition {raw}");
        }
    }

    #[test]
    fn absent_condition_is_identity() {
        let table = products();
        assert_eq!(filter_rows(&table, None).unwrap(), table);
        assert_eq!(filter_rows(&table, Some("")).unwrap(), table);
    }

    #[test]
    fn missing_column_excludes_row() {
        let out = filter_rows(&products(), Some("color=red")).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.columns, products().columns);
    }

    #[test]
    fn ordering_never_falls_back_to_text() {
        let out = filter_rows(&products(), Some("name>a")).unwrap();
        assert!(out.is_empty());
        let out = filter_rows(&products(), Some("name<zzz")).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn text_equality_trims_cell() {
        let rec: Record = [("brand", "  apple ")].into_iter().collect();
        assert!(cond("brand", Operator::Eq, "apple").matches(&rec));
        assert!(!cond("brand", Operator::Gt, "apple").matches(&rec));
    }

    #[test]
    fn numeric_cell_against_text_value() {
        let rec: Record = [("price", "999")].into_iter().collect();
        assert!(!cond("price", Operator::Eq, "cheap").matches(&rec));
        assert!(cond("price", Operator::Eq, "999").matches(&rec));
    }

    #[test]
    fn result_is_subsequence_of_input() {
        let table = products();
        let out = filter_rows(&table, Some("price>100")).unwrap();
        assert_eq!(out.records.len(), 3);
        for (a, b) in out.records.iter().zip(&table.records) {
            assert!(std::sync::Arc::ptr_eq(a, b));
        }
    }
}
