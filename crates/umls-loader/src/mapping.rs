//! Cross-vocabulary mapping table.
//!
//! The table is a comma-separated file with a header row. Only the four
//! columns named by [`MappingColumns`] are read; any other columns are
//! ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::types::{UmlsError, UmlsResult};

/// Header names of the mapping table columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingColumns {
    /// Code in the "from" vocabulary.
    pub source_code: String,
    /// CUI of the "from" code.
    pub source_cui: String,
    /// Code in the "to" vocabulary.
    pub destination_code: String,
    /// CUI of the "to" code.
    pub destination_cui: String,
}

impl Default for MappingColumns {
    fn default() -> Self {
        Self {
            source_code: "source_code".to_string(),
            source_cui: "source_cui".to_string(),
            destination_code: "destination_code".to_string(),
            destination_cui: "destination_cui".to_string(),
        }
    }
}

/// One row of the mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    /// Code in the "from" vocabulary.
    pub source_code: String,
    /// CUI of the source code, if given.
    pub source_cui: Option<String>,
    /// Code in the "to" vocabulary.
    pub destination_code: String,
    /// CUI of the destination code, if given.
    pub destination_cui: Option<String>,
}

impl MappingRow {
    /// Creates a row.
    pub fn new(
        source_code: impl Into<String>,
        source_cui: Option<String>,
        destination_code: impl Into<String>,
        destination_cui: Option<String>,
    ) -> Self {
        Self {
            source_code: source_code.into(),
            source_cui,
            destination_code: destination_code.into(),
            destination_cui,
        }
    }

    /// Returns true when both sides name the same concept.
    ///
    /// A row with a missing CUI on either side is never exact.
    pub fn is_exact(&self) -> bool {
        matches!(
            (&self.source_cui, &self.destination_cui),
            (Some(source), Some(destination)) if source == destination
        )
    }
}

/// Reads the mapping table from a file.
pub fn read_mapping_file<P: AsRef<Path>>(path: P, columns: &MappingColumns) -> UmlsResult<Vec<MappingRow>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(UmlsError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let rows = read_mapping_table(File::open(path)?, columns)?;
    info!("Read {} mapping rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Reads the mapping table from any reader.
///
/// Rows are returned in file order, duplicates included. Rows with an empty
/// source or destination code are skipped.
pub fn read_mapping_table<R: Read>(reader: R, columns: &MappingColumns) -> UmlsResult<Vec<MappingRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| UmlsError::MissingColumn {
                column: name.to_string(),
            })
    };
    let source_code = position(&columns.source_code)?;
    let source_cui = position(&columns.source_cui)?;
    let destination_code = position(&columns.destination_code)?;
    let destination_cui = position(&columns.destination_cui)?;

    let field = |record: &csv::StringRecord, idx: usize| {
        record
            .get(idx)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in csv_reader.records() {
        let record = result?;
        match (field(&record, source_code), field(&record, destination_code)) {
            (Some(source), Some(destination)) => rows.push(MappingRow {
                source_code: source,
                source_cui: field(&record, source_cui),
                destination_code: destination,
                destination_cui: field(&record, destination_cui),
            }),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} mapping rows without both codes", skipped);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
source_code,source_cui,destination_code,destination_cui,note
001.0,C0001,A00.0,C0001,same
001.1,C0002,A00.1,C0003,wider
001.1,C0002,A00.1,C0003,wider
002,,A01,C0004,
,C0005,A02,C0005,
";

    #[test]
    fn test_read_mapping_table() {
        let rows = read_mapping_table(TABLE.as_bytes(), &MappingColumns::default()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].source_code, "001.0");
        assert_eq!(rows[0].destination_cui.as_deref(), Some("C0001"));
        assert_eq!(rows[1], rows[2]);
        assert_eq!(rows[3].source_cui, None);
    }

    #[test]
    fn test_exact_classification() {
        let rows = read_mapping_table(TABLE.as_bytes(), &MappingColumns::default()).unwrap();
        assert!(rows[0].is_exact());
        assert!(!rows[1].is_exact());
        assert!(!rows[3].is_exact());
        assert!(!MappingRow::new("a", None, "b", None).is_exact());
    }

    #[test]
    fn test_missing_column() {
        let table = "source_code,source_cui,destination_code\n1,C1,2\n";
        let err = read_mapping_table(table.as_bytes(), &MappingColumns::default()).unwrap_err();
        assert!(matches!(err, UmlsError::MissingColumn { ref column } if column == "destination_cui"));
    }

    #[test]
    fn test_custom_columns() {
        let table = "from,from_cui,to,to_cui\nX1,C1,Y1,C1\n";
        let columns = MappingColumns {
            source_code: "from".to_string(),
            source_cui: "from_cui".to_string(),
            destination_code: "to".to_string(),
            destination_cui: "to_cui".to_string(),
        };
        let rows = read_mapping_table(table.as_bytes(), &columns).unwrap();
        assert_eq!(rows, vec![MappingRow::new("X1", Some("C1".into()), "Y1", Some("C1".into()))]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_mapping_file(dir.path().join("nope.csv"), &MappingColumns::default()).unwrap_err();
        assert!(matches!(err, UmlsError::FileNotFound { .. }));
    }
}
