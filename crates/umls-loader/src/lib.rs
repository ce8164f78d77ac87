//! # umls-loader
//!
//! Streaming extraction of UMLS source vocabularies from RRF files and their
//! export as SKOS N-Triples.
//!
//! The pipeline runs in four steps:
//!
//! 1. [`ColumnLayout::parse_schema`] reads the column order of every RRF file
//!    from the MySQL load script shipped with the release.
//! 2. [`ConceptExtractor`] streams MRSAB, MRCONSO, MRREL, MRSAT and MRDEF once
//!    each and builds a [`ConceptSet`] keyed by AUI.
//! 3. [`HierarchyExporter`] writes the set as a SKOS concept scheme.
//! 4. [`CrossVocabularyLinker`] links two exported vocabularies through
//!    shared CUIs and a mapping table.
//!
//! ```no_run
//! use umls_loader::{ColumnLayout, ConceptExtractor, HierarchyExporter, SchemeConfig, VocabularyProfile};
//!
//! let layout = ColumnLayout::from_schema_path("META/mysql_tables.sql")?;
//! let profile = VocabularyProfile::ICD9CM;
//! let extract_config = profile.to_extract_config();
//! let sabs = extract_config.sabs.clone();
//! let extraction = ConceptExtractor::new("META", &layout, extract_config).extract_or_load()?;
//!
//! let config = SchemeConfig::from_registry(
//!     &sabs,
//!     &extraction.registry,
//!     profile.hierarchy(),
//! )?;
//! let stats = HierarchyExporter::new(&config, &extraction.concepts).write_to_path("ICD9CM_isf_skos.nt")?;
//! println!("{} concepts", stats.concepts);
//! # Ok::<(), umls_loader::UmlsError>(())
//! ```

#![warn(missing_docs)]

pub mod cache;
mod extractor;
mod index;
mod layout;
mod linker;
mod loader;
mod mapping;
pub mod ntriples;
mod parser;
mod profile;
mod registry;
mod skos;
mod types;

pub use extractor::{
    attach_attributes, attach_definitions, attach_relationships, collect_entries, ConceptExtractor,
    ConceptSet, Extraction,
};
pub use index::VocabularyIndex;
pub use layout::ColumnLayout;
pub use linker::{CrossVocabularyLinker, LinkOutputs, LinkStats};
pub use loader::{discover_rrf_files, format_bytes};
pub use mapping::{read_mapping_file, read_mapping_table, MappingColumns, MappingRow};
pub use ntriples::{escape_literal, NTriplesWriter, Object};
pub use parser::{RrfReader, RrfRecord};
pub use profile::{extract_config_for, hierarchy_for, VocabularyProfile};
pub use registry::VocabularyRegistry;
pub use skos::{
    url_safe_code, ExportStats, HierarchyExporter, SchemeConfig, DEFAULT_BASE_URI,
    DEFAULT_EXTERNAL_AUI_PREFIX,
};
pub use types::{ExtractConfig, ExtractStats, RrfFiles, UmlsError, UmlsResult};

// Re-export umls-types for convenience
pub use umls_types;
