//! Streaming RRF file reader.
//!
//! Reads pipe-delimited RRF files record-by-record, assigning values to
//! column names from a [`ColumnLayout`]. Files are never buffered whole.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use csv::{Reader, ReaderBuilder, StringRecord};
use umls_types::well_known::RRF_DELIMITER;
use umls_types::RrfRow;

use crate::layout::ColumnLayout;
use crate::types::{UmlsError, UmlsResult};

/// One line of an RRF file with its values bound to column names.
///
/// Column names are shared between all records of a reader; a record only
/// owns its values.
#[derive(Debug, Clone)]
pub struct RrfRecord {
    columns: Arc<[String]>,
    values: Vec<Option<String>>,
    line: u64,
}

impl RrfRecord {
    /// Returns the non-null value of a column.
    ///
    /// When a column name appears twice in the layout the last position wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .rposition(|c| c == column)
            .and_then(|i| self.values[i].as_deref())
    }

    /// Returns true if the column holds exactly `value`.
    pub fn has_value(&self, column: &str, value: &str) -> bool {
        self.get(column) == Some(value)
    }

    /// Iterates over the column names of this record, layout order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// 1-based line number in the source file.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Converts the record into an owned row.
    pub fn into_row(self) -> RrfRow {
        self.columns.iter().cloned().zip(self.values).collect()
    }
}

/// A forward-only reader over an RRF file.
///
/// Each call to `next` reads one more line; once it returns `None` the file
/// is exhausted and the reader cannot be restarted.
///
/// # Example
///
/// ```ignore
/// use umls_loader::{ColumnLayout, RrfReader};
///
/// let layout = ColumnLayout::load("umls_file_layout.json")?;
/// let reader = RrfReader::open("/data/umls", &layout, "MRCONSO.RRF")?;
/// for record in reader {
///     let record = record?;
///     println!("{:?}", record.get("STR"));
/// }
/// ```
pub struct RrfReader<R: Read> {
    reader: Reader<R>,
    file: String,
    columns: Arc<[String]>,
    records_read: usize,
}

impl RrfReader<BufReader<File>> {
    /// Creates a reader from a file path.
    ///
    /// # Errors
    /// Returns [`UmlsError::FileNotFound`] immediately if the file does not exist.
    pub fn from_path<P: AsRef<Path>>(path: P, columns: &[String]) -> UmlsResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(UmlsError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::from_reader(BufReader::new(file), name, columns, RRF_DELIMITER))
    }

    /// Opens `file_name` in `directory` using its columns from `layout`.
    pub fn open<P: AsRef<Path>>(
        directory: P,
        layout: &ColumnLayout,
        file_name: &str,
    ) -> UmlsResult<Self> {
        let columns = layout.columns(file_name)?;
        Self::from_path(directory.as_ref().join(file_name), columns)
    }
}

impl<R: Read> RrfReader<R> {
    /// Creates a reader over any byte source.
    pub fn from_reader(reader: R, file: impl Into<String>, columns: &[String], delimiter: u8) -> Self {
        let csv_reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        Self {
            reader: csv_reader,
            file: file.into(),
            columns: columns.into(),
            records_read: 0,
        }
    }

    /// Returns the number of records read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Name of the file being read.
    pub fn file_name(&self) -> &str {
        &self.file
    }

    fn to_record(&self, record: &StringRecord) -> UmlsResult<RrfRecord> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        // Every RRF line ends with the delimiter; the empty segment after it is not a field.
        let found = record.len().saturating_sub(1);
        if found != self.columns.len() {
            return Err(UmlsError::ColumnCountMismatch {
                file: self.file.clone(),
                line,
                expected: self.columns.len(),
                found,
            });
        }

        let values = record
            .iter()
            .take(found)
            .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
            .collect();

        Ok(RrfRecord {
            columns: Arc::clone(&self.columns),
            values,
            line,
        })
    }
}

impl<R: Read> Iterator for RrfReader<R> {
    type Item = UmlsResult<RrfRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    // Skip empty lines
                    if record.len() == 1 && record.get(0).is_some_and(str::is_empty) {
                        continue;
                    }
                    self.records_read += 1;
                    return Some(self.to_record(&record));
                }
                Ok(false) => return None, // End of file
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
