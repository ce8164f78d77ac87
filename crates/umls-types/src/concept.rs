//! Consolidated per-atom concept record.
//!
//! This module provides the `ConceptEntry` struct: one MRCONSO row together
//! with the MRREL, MRSAT and MRDEF rows that reference the same AUI.

use crate::well_known::columns;
use crate::{HierarchyRelation, RrfRow};

/// One atom of a source vocabulary with everything attached to it.
///
/// The MRCONSO fields are kept as-is; relationship and attribute rows are
/// appended in file order and never deduplicated.
///
/// # Examples
///
/// ```
/// use umls_types::{ConceptEntry, HierarchyRelation, RrfRow};
///
/// let mut fields = RrfRow::new();
/// fields.insert("AUI", Some("A1".to_string()));
/// fields.insert("CUI", Some("C1".to_string()));
/// let mut entry = ConceptEntry::new(fields);
///
/// let mut rel = RrfRow::new();
/// rel.insert("REL", Some("PAR".to_string()));
/// rel.insert("AUI2", Some("A2".to_string()));
/// entry.relationships.push(rel);
///
/// let relation = HierarchyRelation::parent();
/// let parents: Vec<&str> = entry.hierarchy_targets(&relation).collect();
/// assert_eq!(parents, vec!["A2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConceptEntry {
    /// MRCONSO columns of the atom.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub fields: RrfRow,
    /// MRREL rows whose `AUI1` is this atom.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub relationships: Vec<RrfRow>,
    /// MRSAT rows whose `METAUI` is this atom.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub attributes: Vec<RrfRow>,
    /// MRDEF definition text (last one read wins).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub definition: Option<String>,
}

impl ConceptEntry {
    /// Creates an entry from its MRCONSO row.
    pub fn new(fields: RrfRow) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }

    /// Atom identifier.
    pub fn aui(&self) -> Option<&str> {
        self.fields.get(columns::AUI)
    }

    /// Concept identifier.
    pub fn cui(&self) -> Option<&str> {
        self.fields.get(columns::CUI)
    }

    /// String identifier.
    pub fn sui(&self) -> Option<&str> {
        self.fields.get(columns::SUI)
    }

    /// Source code.
    pub fn code(&self) -> Option<&str> {
        self.fields.get(columns::CODE)
    }

    /// The atom's string, used as its preferred label.
    pub fn preferred_string(&self) -> Option<&str> {
        self.fields.get(columns::STR)
    }

    /// Source abbreviation.
    pub fn sab(&self) -> Option<&str> {
        self.fields.get(columns::SAB)
    }

    /// Term type.
    pub fn tty(&self) -> Option<&str> {
        self.fields.get(columns::TTY)
    }

    /// Iterates over `AUI2` of the relationship rows matching `relation`, in file order.
    pub fn hierarchy_targets<'a>(
        &'a self,
        relation: &'a HierarchyRelation,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.relationships
            .iter()
            .filter(move |row| relation.matches(row))
            .filter_map(|row| row.get(columns::AUI2))
    }

    /// Returns true if nothing from MRREL, MRSAT or MRDEF was attached.
    pub fn is_bare(&self) -> bool {
        self.relationships.is_empty() && self.attributes.is_empty() && self.definition.is_none()
    }
}
