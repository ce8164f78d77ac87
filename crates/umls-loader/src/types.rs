//! Loader-specific types for RRF extraction.

use std::path::PathBuf;

use thiserror::Error;
use umls_types::SabSet;

/// Errors that can occur while extracting or exporting UMLS data.
#[derive(Error, Debug)]
pub enum UmlsError {
    /// I/O error reading or writing a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON cache error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Required RRF files missing from the extract directory.
    #[error("Required RRF file not found: {files} in {directory}")]
    RequiredFileMissing {
        /// Names of the missing files.
        files: String,
        /// The directory that was searched.
        directory: String,
    },

    /// The file layout has no entry for an RRF file.
    #[error("No column layout for {file}")]
    MissingLayout {
        /// The RRF file name.
        file: String,
    },

    /// A `CREATE TABLE` block was never closed.
    #[error("Unterminated CREATE TABLE block for {table}")]
    UnterminatedTable {
        /// The table whose terminator is missing.
        table: String,
    },

    /// A data line does not have one value per layout column.
    #[error("{file} line {line}: expected {expected} fields, found {found}")]
    ColumnCountMismatch {
        /// The RRF file name.
        file: String,
        /// 1-based line number.
        line: u64,
        /// Number of columns in the layout.
        expected: usize,
        /// Number of values on the line.
        found: usize,
    },

    /// The persisted file layout is malformed.
    #[error("Invalid file layout: {0}")]
    InvalidLayout(String),

    /// Missing required column in a layout or CSV header.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// The name of the missing column.
        column: String,
    },

    /// A source abbreviation is not in the vocabulary registry.
    #[error("Unknown source vocabulary: {sab}")]
    UnknownVocabulary {
        /// The unknown SAB.
        sab: String,
    },
}

/// Result type for UMLS loader operations.
pub type UmlsResult<T> = Result<T, UmlsError>;

/// Configuration for extracting one vocabulary.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Source abbreviations to keep.
    pub sabs: SabSet,
    /// Term types to keep (empty = all term types).
    pub term_types: Vec<String>,
    /// Re-extract even when a cache file exists.
    pub refresh: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            sabs: SabSet::single("ICD9CM"),
            term_types: vec!["HT".to_string(), "PT".to_string()],
            refresh: false,
        }
    }
}

impl ExtractConfig {
    /// Creates a config for the given sources and term types.
    pub fn new(sabs: SabSet, term_types: Vec<String>) -> Self {
        Self {
            sabs,
            term_types,
            refresh: false,
        }
    }

    /// Returns the config with the refresh flag set.
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// Returns true if `tty` passes the term type filter.
    pub fn accepts_term_type(&self, tty: Option<&str>) -> bool {
        if self.term_types.is_empty() {
            return true;
        }
        tty.is_some_and(|t| self.term_types.iter().any(|wanted| wanted == t))
    }

    /// Name used for cache files, e.g. `ICD9CM` or `ICD10CM_ICD10PCS`.
    pub fn abbreviation(&self) -> String {
        self.sabs.to_string()
    }
}

/// Statistics from the four extraction passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// MRCONSO rows read.
    pub total_entries: usize,
    /// Distinct atoms kept from MRCONSO.
    pub kept_entries: usize,
    /// MRREL rows read.
    pub total_relationships: usize,
    /// MRREL rows attached to a kept atom.
    pub kept_relationships: usize,
    /// MRREL rows of a requested source whose AUI1 was not kept.
    pub dropped_relationships: usize,
    /// MRSAT rows read.
    pub total_attributes: usize,
    /// MRSAT rows attached to a kept atom.
    pub kept_attributes: usize,
    /// MRSAT rows of a requested source whose METAUI was not kept.
    pub dropped_attributes: usize,
    /// MRDEF rows read.
    pub total_definitions: usize,
    /// MRDEF rows attached to a kept atom.
    pub kept_definitions: usize,
    /// MRDEF rows of a requested source whose AUI was not kept.
    pub dropped_definitions: usize,
    /// Definitions that overwrote an earlier one for the same atom.
    pub replaced_definitions: usize,
}

impl ExtractStats {
    /// Returns the percentage of MRCONSO rows that passed the filters.
    pub fn entry_rate(&self) -> f64 {
        if self.total_entries == 0 {
            0.0
        } else {
            (self.kept_entries as f64 / self.total_entries as f64) * 100.0
        }
    }

    /// Total rows dropped because their atom was not kept.
    pub fn referential_gaps(&self) -> usize {
        self.dropped_relationships + self.dropped_attributes + self.dropped_definitions
    }
}

/// Discovered RRF files in an extract directory.
#[derive(Debug, Clone, Default)]
pub struct RrfFiles {
    /// The directory that was scanned.
    pub directory: PathBuf,
    /// Path to MRCONSO.RRF.
    pub mrconso: Option<PathBuf>,
    /// Path to MRREL.RRF.
    pub mrrel: Option<PathBuf>,
    /// Path to MRSAT.RRF.
    pub mrsat: Option<PathBuf>,
    /// Path to MRDEF.RRF.
    pub mrdef: Option<PathBuf>,
    /// Path to MRSAB.RRF.
    pub mrsab: Option<PathBuf>,
}

impl RrfFiles {
    /// Creates a new empty RrfFiles for a directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Default::default()
        }
    }

    /// Returns true if all required files (MRCONSO, MRREL, MRSAB) are present.
    pub fn has_required_files(&self) -> bool {
        self.mrconso.is_some() && self.mrrel.is_some() && self.mrsab.is_some()
    }

    /// Returns a list of missing required files.
    pub fn missing_files(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.mrconso.is_none() {
            missing.push(umls_types::well_known::MRCONSO);
        }
        if self.mrrel.is_none() {
            missing.push(umls_types::well_known::MRREL);
        }
        if self.mrsab.is_none() {
            missing.push(umls_types::well_known::MRSAB);
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_config_default() {
        let config = ExtractConfig::default();
        assert_eq!(config.sabs, SabSet::single("ICD9CM"));
        assert_eq!(config.term_types, vec!["HT", "PT"]);
        assert!(!config.refresh);
    }

    #[test]
    fn test_term_type_filter() {
        let config = ExtractConfig::default();
        assert!(config.accepts_term_type(Some("PT")));
        assert!(!config.accepts_term_type(Some("AB")));
        assert!(!config.accepts_term_type(None));

        let all = ExtractConfig::new(SabSet::single("MSH"), vec![]);
        assert!(all.accepts_term_type(Some("MH")));
        assert!(all.accepts_term_type(None));
    }

    #[test]
    fn test_abbreviation_for_merged_sources() {
        let sabs: SabSet = ["ICD10PCS", "ICD10CM"].into_iter().collect();
        let config = ExtractConfig::new(sabs, vec!["PT".to_string()]);
        assert_eq!(config.abbreviation(), "ICD10CM_ICD10PCS");
    }

    #[test]
    fn test_extract_stats_rates() {
        let stats = ExtractStats {
            total_entries: 200,
            kept_entries: 50,
            dropped_relationships: 3,
            dropped_definitions: 1,
            ..Default::default()
        };
        assert!((stats.entry_rate() - 25.0).abs() < 0.01);
        assert_eq!(stats.referential_gaps(), 4);
    }

    #[test]
    fn test_rrf_files_missing() {
        let files = RrfFiles {
            mrconso: Some(PathBuf::from("MRCONSO.RRF")),
            ..RrfFiles::new("/tmp/umls")
        };

        assert!(!files.has_required_files());
        let missing = files.missing_files();
        assert_eq!(missing, vec!["MRREL.RRF", "MRSAB.RRF"]);
    }
}
