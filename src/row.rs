// ABOUTME: Result row and buffered row set types returned by queries
// ABOUTME: Preserves provider column names, order, and values without alteration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Async-IO.org

//! # Rows and Row Sets
//!
//! A [`RowSet`] is a fully materialized snapshot of a query result: an
//! ordered sequence of [`Row`]s sharing one column header. Rows are
//! name-keyed and index-keyed; whatever the provider reports is surfaced
//! as-is, with no schema validation by the gateway.

use std::sync::Arc;

use crate::value::Value;

/// One result row: a shared column header plus this row's cell values
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Cell value for the named column, if present in this row
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.values.get(index)
    }

    /// Cell value by column position
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Column names, in provider order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of cells in this row
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the row has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate (column name, value) pairs in provider order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Render the row as a JSON object keyed by column name
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .iter()
            .map(|(name, value)| (name.to_owned(), serde_json::Value::from(value.clone())))
            .collect();
        serde_json::Value::Object(map)
    }
}

/// A fully buffered, ordered query result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    columns: Arc<[String]>,
    rows: Vec<Row>,
}

impl RowSet {
    pub(crate) fn new(columns: Arc<[String]>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// An empty result with no column header
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Column names, in provider order. Empty when the result had no rows.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The buffered rows, in provider order
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row by position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of buffered rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the result holds no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the rows by reference
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Consume the set, yielding its rows
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RowSet {
        let columns: Arc<[String]> = vec!["id".to_owned(), "name".to_owned()].into();
        let rows = vec![
            Row::new(
                Arc::clone(&columns),
                vec![Value::Integer(1), Value::Text("a".into())],
            ),
            Row::new(
                Arc::clone(&columns),
                vec![Value::Integer(2), Value::Null],
            ),
        ];
        RowSet::new(columns, rows)
    }

    #[test]
    fn name_and_index_access_agree() {
        let set = sample();
        let row = set.get(0).unwrap();
        assert_eq!(row.get("id"), Some(&Value::Integer(1)));
        assert_eq!(row.get_index(0), Some(&Value::Integer(1)));
        assert_eq!(row.get("name"), Some(&Value::Text("a".into())));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn iteration_preserves_column_order() {
        let set = sample();
        let pairs: Vec<_> = set.get(1).unwrap().iter().collect();
        assert_eq!(pairs[0], ("id", &Value::Integer(2)));
        assert_eq!(pairs[1], ("name", &Value::Null));
    }

    #[test]
    fn empty_set_has_no_header() {
        let set = RowSet::empty();
        assert!(set.is_empty());
        assert!(set.columns().is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn row_to_json_keys_by_column() {
        let set = sample();
        let json = set.get(0).unwrap().to_json();
        assert_eq!(json["id"], serde_json::json!(1));
        assert_eq!(json["name"], serde_json::json!("a"));
    }
}
