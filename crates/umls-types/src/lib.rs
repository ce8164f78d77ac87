//! # umls-types
//!
//! Type definitions for UMLS Metathesaurus extracts.
//!
//! This crate provides the plain data types shared by the loader and the
//! command-line tools: field-keyed RRF rows, consolidated per-AUI concept
//! entries, source-vocabulary metadata and hierarchy selectors.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   The loader's JSON caches depend on it.
//!
//! ## Usage
//!
//! ```rust
//! use umls_types::{ConceptEntry, HierarchyRelation, RrfRow, SabSet};
//!
//! let mut fields = RrfRow::new();
//! fields.insert("AUI", Some("A1".to_string()));
//! fields.insert("CODE", Some("100.1".to_string()));
//! fields.insert("SAB", Some("ICD9CM".to_string()));
//!
//! let entry = ConceptEntry::new(fields);
//! assert_eq!(entry.code(), Some("100.1"));
//!
//! let sabs = SabSet::single("ICD9CM");
//! assert!(sabs.contains("ICD9CM"));
//!
//! let parent = HierarchyRelation::parent();
//! assert_eq!(parent.to_string(), "REL=PAR");
//! ```

#![warn(missing_docs)]

mod concept;
mod enums;
mod row;
mod vocabulary;
pub mod well_known;

// Re-export all public types at crate root
pub use concept::ConceptEntry;
pub use enums::{HierarchyRelation, HierarchyRelationParseError, RelationField};
pub use row::RrfRow;
pub use vocabulary::{SabSet, VocabularyMeta};
