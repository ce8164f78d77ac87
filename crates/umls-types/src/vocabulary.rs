//! Source vocabulary identifiers and registry metadata.

use std::collections::BTreeSet;
use std::fmt;

use crate::well_known::{columns, FLAG_YES};
use crate::RrfRow;

/// A non-ordered set of source abbreviations (SABs).
///
/// A caller asking for one vocabulary and a caller asking for a merged
/// multi-source vocabulary both pass a `SabSet`; a single SAB is simply a
/// one-element set. Iteration is in sorted order.
///
/// # Examples
///
/// ```
/// use umls_types::SabSet;
///
/// let single = SabSet::single("ICD9CM");
/// assert!(!single.is_merged());
///
/// let merged: SabSet = ["ICD10PCS", "ICD10CM"].into_iter().collect();
/// assert!(merged.is_merged());
/// assert_eq!(merged.to_string(), "ICD10CM_ICD10PCS");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SabSet {
    sabs: BTreeSet<String>,
}

impl SabSet {
    /// Creates a set holding one SAB.
    pub fn single(sab: impl Into<String>) -> Self {
        let mut sabs = BTreeSet::new();
        sabs.insert(sab.into());
        Self { sabs }
    }

    /// Returns true if `sab` is a member.
    pub fn contains(&self, sab: &str) -> bool {
        self.sabs.contains(sab)
    }

    /// Returns true if `sab` is present and a member.
    pub fn contains_opt(&self, sab: Option<&str>) -> bool {
        sab.is_some_and(|s| self.contains(s))
    }

    /// Iterates over the SABs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sabs.iter().map(String::as_str)
    }

    /// Number of SABs.
    pub fn len(&self) -> usize {
        self.sabs.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.sabs.is_empty()
    }

    /// Returns true if more than one source is merged into this vocabulary.
    pub fn is_merged(&self) -> bool {
        self.sabs.len() > 1
    }
}

impl<S: Into<String>> FromIterator<S> for SabSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            sabs: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&str> for SabSet {
    fn from(sab: &str) -> Self {
        Self::single(sab)
    }
}

impl fmt::Display for SabSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join("_"))
    }
}

/// One MRSAB registry record.
///
/// The full row is kept so that the registry cache can be written back
/// unchanged; accessors expose the fields the exporter needs.
///
/// # Examples
///
/// ```
/// use umls_types::{RrfRow, VocabularyMeta};
///
/// let row: RrfRow = [
///     ("RSAB", Some("ICD9CM".to_string())),
///     ("SVER", Some("2012".to_string())),
///     ("CURVER", Some("Y".to_string())),
///     ("SABIN", Some("Y".to_string())),
/// ]
/// .into_iter()
/// .collect();
///
/// let meta = VocabularyMeta::new(row);
/// assert_eq!(meta.rsab(), Some("ICD9CM"));
/// assert_eq!(meta.version(), Some("2012"));
/// assert!(meta.is_current());
/// assert!(meta.is_included());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VocabularyMeta {
    record: RrfRow,
}

impl VocabularyMeta {
    /// Wraps an MRSAB row.
    pub fn new(record: RrfRow) -> Self {
        Self { record }
    }

    /// Root source abbreviation.
    pub fn rsab(&self) -> Option<&str> {
        self.record.get(columns::RSAB)
    }

    /// Versioned source abbreviation.
    pub fn vsab(&self) -> Option<&str> {
        self.record.get(columns::VSAB)
    }

    /// Source official name.
    pub fn official_name(&self) -> Option<&str> {
        self.record.get(columns::SON)
    }

    /// Source version string.
    pub fn version(&self) -> Option<&str> {
        self.record.get(columns::SVER)
    }

    /// Returns true if this row describes the current version of the source.
    pub fn is_current(&self) -> bool {
        self.record.has_value(columns::CURVER, FLAG_YES)
    }

    /// Returns true if the source is included in the subset.
    pub fn is_included(&self) -> bool {
        self.record.has_value(columns::SABIN, FLAG_YES)
    }

    /// The underlying MRSAB row.
    pub fn record(&self) -> &RrfRow {
        &self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sab_set_membership() {
        let sabs: SabSet = vec!["MSH".to_string(), "ICD9CM".to_string()].into_iter().collect();
        assert!(sabs.contains("MSH"));
        assert!(!sabs.contains("LNC"));
        assert!(sabs.contains_opt(Some("ICD9CM")));
        assert!(!sabs.contains_opt(None));
        assert_eq!(sabs.len(), 2);
    }

    #[test]
    fn test_sab_set_sorted_iteration() {
        let sabs: SabSet = ["SNOMEDCT_US", "ICD10CM", "MSH"].into_iter().collect();
        let ordered: Vec<&str> = sabs.iter().collect();
        assert_eq!(ordered, vec!["ICD10CM", "MSH", "SNOMEDCT_US"]);
    }

    #[test]
    fn test_single_from_str() {
        let sabs = SabSet::from("LNC");
        assert_eq!(sabs, SabSet::single("LNC"));
        assert_eq!(sabs.to_string(), "LNC");
    }

    #[test]
    fn test_vocabulary_meta_flags() {
        let row: RrfRow = [
            ("RSAB", Some("MSH".to_string())),
            ("CURVER", Some("N".to_string())),
            ("SABIN", None),
        ]
        .into_iter()
        .collect();
        let meta = VocabularyMeta::new(row);
        assert!(!meta.is_current());
        assert!(!meta.is_included());
        assert_eq!(meta.version(), None);
    }
}
