//! Time-indexed table of named numeric series.
//!
//! # Design
//! Columns are kept in a `Vec` so their order is the order in which they
//! were first added. Inserting under an existing name replaces the values in
//! place, so the last write wins without moving the column.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One named series. `None` marks a missing data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    index: Vec<DateTime<Utc>>,
    columns: Vec<Column>,
}

/// A borrowed row: its timestamp and one value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    pub timestamp: DateTime<Utc>,
    pub values: Vec<(&'a str, Option<f64>)>,
}

impl Table {
    /// A table with the given index and no columns yet.
    pub fn new(index: Vec<DateTime<Utc>>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// The "no rows" result used when the API had nothing to return.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when there are no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty() || self.columns.is_empty()
    }

    pub fn num_rows(&self) -> usize {
        self.index.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Add a column, or replace the values of an existing one in place.
    ///
    /// Length is not checked here; the normalizer validates series against
    /// the index before inserting.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        let name = name.into();
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => column.values = values,
            None => self.columns.push(Column { name, values }),
        }
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Table {
        let n = n.min(self.index.len());
        Table {
            index: self.index[..n].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values.iter().take(n).copied().collect(),
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.index.iter().enumerate().map(move |(i, ts)| Row {
            timestamp: *ts,
            values: self
                .columns
                .iter()
                .map(|c| (c.name.as_str(), c.values.get(i).copied().flatten()))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn hours(n: u32) -> Vec<DateTime<Utc>> {
        (0..n)
            .map(|h| Utc.with_ymd_and_hms(2023, 1, 1, h, 0, 0).unwrap())
            .collect()
    }

    #[test]
    fn empty_table() {
        let table = Table::empty();
        assert!(table.is_empty());
        assert_eq!(table.shape(), (0, 0));
    }

    #[test]
    fn index_without_columns_has_rows() {
        let table = Table::new(hours(3));
        assert_eq!(table.shape(), (3, 0));
        assert!(table.is_empty());
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut table = Table::new(hours(2));
        table.insert_column("solar", vec![Some(1.0), Some(2.0)]);
        table.insert_column("wind", vec![Some(3.0), Some(4.0)]);
        table.insert_column("solar", vec![Some(5.0), None]);

        assert_eq!(table.column_names(), vec!["solar", "wind"]);
        assert_eq!(table.column("solar").unwrap(), &[Some(5.0), None]);
        assert_eq!(table.num_columns(), 2);
    }

    #[test]
    fn head_truncates_every_column() {
        let mut table = Table::new(hours(3));
        table.insert_column("load", vec![Some(1.0), Some(2.0), Some(3.0)]);
        let head = table.head(2);
        assert_eq!(head.shape(), (2, 1));
        assert_eq!(head.column("load").unwrap(), &[Some(1.0), Some(2.0)]);
        assert_eq!(table.head(10).shape(), (3, 1));
    }

    #[test]
    fn rows_pair_timestamps_with_values() {
        let mut table = Table::new(hours(2));
        table.insert_column("solar", vec![Some(100.0), Some(200.0)]);
        table.insert_column("wind", vec![Some(300.0), None]);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].timestamp, hours(2)[1]);
        assert_eq!(rows[1].values, vec![("solar", Some(200.0)), ("wind", None)]);
    }

    #[test]
    fn serializes_columns_in_order() {
        let mut table = Table::new(hours(1));
        table.insert_column("b", vec![Some(1.0)]);
        table.insert_column("a", vec![None]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["columns"][0]["name"], "b");
        assert_eq!(json["columns"][1]["values"][0], serde_json::Value::Null);
        assert_eq!(json["index"][0], "2023-01-01T00:00:00Z");
    }
}
