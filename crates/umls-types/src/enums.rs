//! Hierarchy selectors.
//!
//! Source vocabularies encode their taxonomy differently in MRREL: some use
//! `REL=PAR`, others only carry the parent link in `RELA` (for example
//! `RELA=inverse_isa`). A [`HierarchyRelation`] names the column and value
//! that mark a row as pointing at a broader concept.

use std::fmt;
use std::str::FromStr;

use crate::well_known::columns;
use crate::RrfRow;

/// Error returned when parsing a hierarchy selector such as `REL=PAR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyRelationParseError {
    /// Invalid format - expected "FIELD=VALUE"
    InvalidFormat(String),
    /// Unknown relationship column
    UnknownField(String),
}

impl fmt::Display for HierarchyRelationParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => {
                write!(f, "invalid hierarchy relation: '{}' (expected REL=VALUE or RELA=VALUE)", s)
            }
            Self::UnknownField(s) => write!(f, "unknown relationship column: '{}'", s),
        }
    }
}

impl std::error::Error for HierarchyRelationParseError {}

/// Relationship column used to select hierarchy rows.
///
/// # Examples
///
/// ```
/// use umls_types::RelationField;
///
/// assert_eq!(RelationField::Rel.column(), "REL");
/// assert_eq!(RelationField::from_column("RELA"), Some(RelationField::Rela));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationField {
    /// The `REL` column (e.g. PAR, CHD, RB, RN).
    Rel,
    /// The `RELA` column (e.g. isa, inverse_isa).
    Rela,
}

impl RelationField {
    /// Returns the MRREL column name.
    pub fn column(self) -> &'static str {
        match self {
            Self::Rel => columns::REL,
            Self::Rela => columns::RELA,
        }
    }

    /// Creates a field from its MRREL column name.
    pub fn from_column(column: &str) -> Option<Self> {
        match column {
            columns::REL => Some(Self::Rel),
            columns::RELA => Some(Self::Rela),
            _ => None,
        }
    }
}

/// Selects the relationship rows that denote a "broader" edge.
///
/// A row matches when its `field` column equals `value`; the row's `AUI1`
/// is then narrower than its `AUI2`.
///
/// # Examples
///
/// ```
/// use umls_types::{HierarchyRelation, RelationField};
///
/// let relation: HierarchyRelation = "RELA=inverse_isa".parse().unwrap();
/// assert_eq!(relation.field, RelationField::Rela);
/// assert_eq!(relation.value, "inverse_isa");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchyRelation {
    /// Column holding the relationship label.
    pub field: RelationField,
    /// Label value marking the hierarchy edge.
    pub value: String,
}

impl HierarchyRelation {
    /// Creates a selector for an arbitrary column/value pair.
    pub fn new(field: RelationField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// `REL=PAR`, the generic parent relationship.
    pub fn parent() -> Self {
        Self::new(RelationField::Rel, "PAR")
    }

    /// `RELA=inverse_isa`, used by vocabularies with explicit is-a links.
    pub fn inverse_isa() -> Self {
        Self::new(RelationField::Rela, "inverse_isa")
    }

    /// Returns true if the relationship row carries this selector.
    pub fn matches(&self, row: &RrfRow) -> bool {
        row.has_value(self.field.column(), &self.value)
    }
}

impl Default for HierarchyRelation {
    fn default() -> Self {
        Self::parent()
    }
}

impl fmt::Display for HierarchyRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field.column(), self.value)
    }
}

impl FromStr for HierarchyRelation {
    type Err = HierarchyRelationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| HierarchyRelationParseError::InvalidFormat(s.to_string()))?;

        let field = field.trim();
        let value = value.trim();
        if value.is_empty() {
            return Err(HierarchyRelationParseError::InvalidFormat(s.to_string()));
        }

        let field = RelationField::from_column(&field.to_ascii_uppercase())
            .ok_or_else(|| HierarchyRelationParseError::UnknownField(field.to_string()))?;

        Ok(Self::new(field, value))
    }
}
