//! Field-keyed RRF row.
//!
//! This module provides the `RrfRow` struct, the owned form of one line of a
//! pipe-delimited RRF file after its values have been assigned to column names.

use std::collections::BTreeMap;

/// One RRF record as a mapping from column name to an optional value.
///
/// Empty fields are stored as `None`. Keys are kept in sorted order so that
/// serialized rows are stable across runs.
///
/// # Examples
///
/// ```
/// use umls_types::RrfRow;
///
/// let mut row = RrfRow::new();
/// row.insert("CUI", Some("C0000005".to_string()));
/// row.insert("LAT", None);
///
/// assert_eq!(row.get("CUI"), Some("C0000005"));
/// assert_eq!(row.get("LAT"), None);
/// assert!(row.contains_column("LAT"));
/// assert!(!row.contains_column("STR"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RrfRow {
    fields: BTreeMap<String, Option<String>>,
}

impl RrfRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the non-null value of a column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(|v| v.as_deref())
    }

    /// Sets a column value, returning the previous value if the column was present.
    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) -> Option<Option<String>> {
        self.fields.insert(column.into(), value)
    }

    /// Returns true if the column is present, even with a null value.
    pub fn contains_column(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Returns true if the column holds exactly `value`.
    pub fn has_value(&self, column: &str, value: &str) -> bool {
        self.get(column) == Some(value)
    }

    /// Iterates over column names in sorted order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over `(column, value)` pairs in sorted column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for RrfRow {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_iter_keeps_last_duplicate() {
        let row: RrfRow = [
            ("SAB", Some("MSH".to_string())),
            ("SAB", Some("ICD9CM".to_string())),
            ("TTY", None),
        ]
        .into_iter()
        .collect();

        assert_eq!(row.len(), 2);
        assert_eq!(row.get("SAB"), Some("ICD9CM"));
        assert!(row.contains_column("TTY"));
    }

    #[test]
    fn test_columns_sorted() {
        let row: RrfRow = [("STR", None), ("AUI", None), ("CUI", None)]
            .into_iter()
            .collect();
        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["AUI", "CUI", "STR"]);
    }

    #[test]
    fn test_has_value() {
        let mut row = RrfRow::new();
        row.insert("REL", Some("PAR".to_string()));
        assert!(row.has_value("REL", "PAR"));
        assert!(!row.has_value("REL", "CHD"));
        assert!(!row.has_value("RELA", "PAR"));
    }
}
