//! Column layouts of RRF files.
//!
//! RRF files carry no header row. Column order is taken from the MySQL load
//! script shipped with a UMLS extract, which holds one block per table:
//!
//! ```text
//! CREATE TABLE MRCONSO (
//!     CUI char(8) NOT NULL,
//!     LAT char(3) NOT NULL,
//!     ...
//! ) CHARACTER SET utf8;
//! ```
//!
//! The parsed layout is persisted as JSON mapping each file name to an object
//! of stringified positions, e.g. `{"MRCONSO.RRF": {"0": "CUI", "1": "LAT"}}`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;
use umls_types::well_known::RRF_EXTENSION;

use crate::types::{UmlsError, UmlsResult};

const TABLE_PREFIX: &str = "CREATE TABLE ";
const TABLE_TERMINATOR: &str = ") CHARACTER SET utf8;";

/// Ordered column names per RRF file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    files: BTreeMap<String, Vec<String>>,
}

enum ScanState {
    Scan,
    ReadingColumns { file: String, columns: Vec<String> },
}

impl ColumnLayout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a schema dump into a layout.
    ///
    /// # Errors
    /// Returns [`UmlsError::UnterminatedTable`] if input ends inside a
    /// `CREATE TABLE` block.
    pub fn parse_schema<R: BufRead>(reader: R) -> UmlsResult<Self> {
        let mut layout = Self::new();
        let mut state = ScanState::Scan;

        for line in reader.lines() {
            let line = line?;

            state = match state {
                ScanState::Scan => match table_name(&line) {
                    Some(table) => ScanState::ReadingColumns {
                        file: format!("{}{}", table, RRF_EXTENSION),
                        columns: Vec::new(),
                    },
                    None => ScanState::Scan,
                },
                ScanState::ReadingColumns { file, mut columns } => {
                    if line.starts_with(TABLE_TERMINATOR) {
                        debug!("Read {} columns for {}", columns.len(), file);
                        layout.files.insert(file, columns);
                        ScanState::Scan
                    } else {
                        if let Some(column) = line.split_whitespace().next() {
                            columns.push(column.to_string());
                        }
                        ScanState::ReadingColumns { file, columns }
                    }
                }
            };
        }

        match state {
            ScanState::Scan => Ok(layout),
            ScanState::ReadingColumns { file, .. } => Err(UmlsError::UnterminatedTable {
                table: file.trim_end_matches(RRF_EXTENSION).to_string(),
            }),
        }
    }

    /// Parses a schema dump file.
    pub fn from_schema_path<P: AsRef<Path>>(path: P) -> UmlsResult<Self> {
        let file = open(path.as_ref())?;
        Self::parse_schema(BufReader::new(file))
    }

    /// Adds or replaces the columns of a file.
    pub fn insert(&mut self, file: impl Into<String>, columns: Vec<String>) {
        self.files.insert(file.into(), columns);
    }

    /// Returns the columns of a file, if known.
    pub fn get(&self, file: &str) -> Option<&[String]> {
        self.files.get(file).map(Vec::as_slice)
    }

    /// Returns the columns of a file.
    ///
    /// # Errors
    /// Returns [`UmlsError::MissingLayout`] if the file is not in the layout.
    pub fn columns(&self, file: &str) -> UmlsResult<&[String]> {
        self.get(file).ok_or_else(|| UmlsError::MissingLayout {
            file: file.to_string(),
        })
    }

    /// Iterates over file names in sorted order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of files in the layout.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the layout is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Writes the layout as JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> UmlsResult<()> {
        let positional: BTreeMap<&str, BTreeMap<usize, &str>> = self
            .files
            .iter()
            .map(|(file, columns)| {
                let by_position = columns
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (i, c.as_str()))
                    .collect();
                (file.as_str(), by_position)
            })
            .collect();
        serde_json::to_writer(writer, &positional)?;
        Ok(())
    }

    /// Reads a layout from JSON.
    ///
    /// # Errors
    /// Returns [`UmlsError::InvalidLayout`] if a file's positions are not
    /// exactly `0..n`.
    pub fn read_json<R: Read>(reader: R) -> UmlsResult<Self> {
        let positional: BTreeMap<String, BTreeMap<usize, String>> =
            serde_json::from_reader(reader)?;

        let mut layout = Self::new();
        for (file, by_position) in positional {
            let mut columns = Vec::with_capacity(by_position.len());
            for (expected, (position, column)) in by_position.into_iter().enumerate() {
                if position != expected {
                    return Err(UmlsError::InvalidLayout(format!(
                        "{} has no column at position {}",
                        file, expected
                    )));
                }
                columns.push(column);
            }
            layout.files.insert(file, columns);
        }
        Ok(layout)
    }

    /// Saves the layout to a JSON file, overwriting it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> UmlsResult<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Loads a layout from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> UmlsResult<Self> {
        let file = open(path.as_ref())?;
        Self::read_json(BufReader::new(file))
    }
}

/// Extracts `<name>` from a `CREATE TABLE <name> (` line.
fn table_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(TABLE_PREFIX)?;
    let end = rest.rfind(" (")?;
    let name = rest[..end].trim().trim_matches('`');
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn open(path: &Path) -> UmlsResult<File> {
    if !path.exists() {
        return Err(UmlsError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = "\
DROP TABLE IF EXISTS MRCONSO;
CREATE TABLE MRCONSO (
\tCUI\tchar(8) NOT NULL,
\tLAT\tchar(3) NOT NULL,
\tAUI\tvarchar(9) NOT NULL,
\tSAB\tvarchar(40) NOT NULL
) CHARACTER SET utf8;

DROP TABLE IF EXISTS MRDEF;
CREATE TABLE MRDEF (
\tCUI\tchar(8) NOT NULL,
\tAUI\tvarchar(9) NOT NULL,
\tDEF\ttext NOT NULL
) CHARACTER SET utf8;
";

    #[test]
    fn test_parse_schema_blocks() {
        let layout = ColumnLayout::parse_schema(SCHEMA.as_bytes()).unwrap();

        assert_eq!(layout.len(), 2);
        assert_eq!(
            layout.columns("MRCONSO.RRF").unwrap(),
            &["CUI", "LAT", "AUI", "SAB"]
        );
        assert_eq!(layout.columns("MRDEF.RRF").unwrap(), &["CUI", "AUI", "DEF"]);
    }

    #[test]
    fn test_unterminated_block_is_an_error() {
        let schema = "CREATE TABLE MRREL (\n\tCUI1\tchar(8) NOT NULL,\n";
        let err = ColumnLayout::parse_schema(schema.as_bytes()).unwrap_err();
        assert!(matches!(err, UmlsError::UnterminatedTable { ref table } if table == "MRREL"));
    }

    #[test]
    fn test_missing_layout() {
        let layout = ColumnLayout::parse_schema(SCHEMA.as_bytes()).unwrap();
        assert!(matches!(
            layout.columns("MRSAT.RRF"),
            Err(UmlsError::MissingLayout { .. })
        ));
    }

    #[test]
    fn test_table_name() {
        assert_eq!(table_name("CREATE TABLE MRSAB ("), Some("MRSAB"));
        assert_eq!(table_name("CREATE TABLE `MRHIER` ("), Some("MRHIER"));
        assert_eq!(table_name("CREATE INDEX X_MRSAB ON MRSAB(RSAB);"), None);
        assert_eq!(table_name("CREATE TABLE ("), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut layout = ColumnLayout::new();
        let columns: Vec<String> = (0..12).map(|i| format!("COL{}", i)).collect();
        layout.insert("MRSAT.RRF", columns);

        let mut buf = Vec::new();
        layout.write_json(&mut buf).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["MRSAT.RRF"]["10"], "COL10");

        let parsed = ColumnLayout::read_json(buf.as_slice()).unwrap();
        assert_eq!(parsed, layout);
    }

    #[test]
    fn test_json_with_gap_is_rejected() {
        let json = r#"{"MRDEF.RRF": {"0": "CUI", "2": "DEF"}}"#;
        assert!(matches!(
            ColumnLayout::read_json(json.as_bytes()),
            Err(UmlsError::InvalidLayout(_))
        ));
    }
}
