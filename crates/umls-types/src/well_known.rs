//! Well-known UMLS file and column names.
//!
//! This module provides constants for the RRF files read by the extractor and
//! the column names it relies on. Column positions are never hard-coded; they
//! come from the file layout parsed out of the schema dump.
//!
//! # Examples
//!
//! ```
//! use umls_types::well_known::{self, columns};
//!
//! assert_eq!(well_known::MRREL, "MRREL.RRF");
//! assert_eq!(columns::METAUI, "METAUI");
//! ```

// =============================================================================
// RRF Files
// =============================================================================

/// Concept names and sources (one row per atom).
pub const MRCONSO: &str = "MRCONSO.RRF";

/// Related concepts and atoms.
pub const MRREL: &str = "MRREL.RRF";

/// Simple concept, term and string attributes.
pub const MRSAT: &str = "MRSAT.RRF";

/// Definitions.
pub const MRDEF: &str = "MRDEF.RRF";

/// Source information (the vocabulary registry).
pub const MRSAB: &str = "MRSAB.RRF";

/// Extension shared by every RRF file.
pub const RRF_EXTENSION: &str = ".RRF";

/// Default field delimiter of RRF files.
pub const RRF_DELIMITER: u8 = b'|';

// =============================================================================
// Registry Values
// =============================================================================

/// Flag value used by MRSAB for "yes" (current version, included source).
pub const FLAG_YES: &str = "Y";

/// Columns referenced by the extractor and exporter.
pub mod columns {
    /// Atom identifier.
    pub const AUI: &str = "AUI";
    /// Concept identifier.
    pub const CUI: &str = "CUI";
    /// String identifier.
    pub const SUI: &str = "SUI";
    /// Source abbreviation.
    pub const SAB: &str = "SAB";
    /// Term type in source.
    pub const TTY: &str = "TTY";
    /// Source code.
    pub const CODE: &str = "CODE";
    /// String.
    pub const STR: &str = "STR";
    /// First atom of a relationship row.
    pub const AUI1: &str = "AUI1";
    /// Second atom of a relationship row.
    pub const AUI2: &str = "AUI2";
    /// Relationship label.
    pub const REL: &str = "REL";
    /// Additional relationship label.
    pub const RELA: &str = "RELA";
    /// Metathesaurus identifier an attribute belongs to.
    pub const METAUI: &str = "METAUI";
    /// Definition text.
    pub const DEF: &str = "DEF";
    /// Root source abbreviation (registry).
    pub const RSAB: &str = "RSAB";
    /// Versioned source abbreviation (registry).
    pub const VSAB: &str = "VSAB";
    /// Source official name (registry).
    pub const SON: &str = "SON";
    /// Source version (registry).
    pub const SVER: &str = "SVER";
    /// Current version flag (registry).
    pub const CURVER: &str = "CURVER";
    /// Source in subset flag (registry).
    pub const SABIN: &str = "SABIN";
}
