//! Helper indexes over a concept set.

use std::collections::BTreeMap;

use crate::extractor::ConceptSet;

/// AUIs grouped by CUI and by source code.
///
/// AUI lists are in AUI order, matching the iteration order of the
/// [`ConceptSet`] they were built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyIndex {
    by_cui: BTreeMap<String, Vec<String>>,
    by_code: BTreeMap<String, Vec<String>>,
}

impl VocabularyIndex {
    /// Builds both indexes in one pass over the set.
    pub fn build(concepts: &ConceptSet) -> Self {
        let mut index = Self::default();

        for (aui, entry) in concepts.iter() {
            if let Some(cui) = entry.cui() {
                index
                    .by_cui
                    .entry(cui.to_string())
                    .or_default()
                    .push(aui.to_string());
            }
            if let Some(code) = entry.code() {
                index
                    .by_code
                    .entry(code.to_string())
                    .or_default()
                    .push(aui.to_string());
            }
        }

        index
    }

    /// AUIs sharing a CUI.
    pub fn auis_for_cui(&self, cui: &str) -> &[String] {
        self.by_cui.get(cui).map(Vec::as_slice).unwrap_or_default()
    }

    /// AUIs sharing a source code.
    pub fn auis_for_code(&self, code: &str) -> &[String] {
        self.by_code.get(code).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns true if at least one atom carries the source code.
    pub fn has_code(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Iterates over CUIs in sorted order.
    pub fn cuis(&self) -> impl Iterator<Item = &str> {
        self.by_cui.keys().map(String::as_str)
    }

    /// CUIs present in both indexes, sorted.
    pub fn shared_cuis<'a>(&'a self, other: &'a VocabularyIndex) -> impl Iterator<Item = &'a str> + 'a {
        self.cuis().filter(move |cui| other.by_cui.contains_key(*cui))
    }

    /// Number of distinct CUIs.
    pub fn cui_count(&self) -> usize {
        self.by_cui.len()
    }

    /// Number of distinct codes.
    pub fn code_count(&self) -> usize {
        self.by_code.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umls_types::{ConceptEntry, RrfRow};

    fn make_entry(aui: &str, cui: &str, code: &str) -> ConceptEntry {
        let fields: RrfRow = [
            ("AUI", Some(aui.to_string())),
            ("CUI", Some(cui.to_string())),
            ("CODE", Some(code.to_string())),
        ]
        .into_iter()
        .collect();
        ConceptEntry::new(fields)
    }

    #[test]
    fn test_build_groups_auis() {
        let concepts: ConceptSet = [
            make_entry("A3", "C1", "100"),
            make_entry("A1", "C1", "100"),
            make_entry("A2", "C2", "200"),
        ]
        .into_iter()
        .collect();

        let index = VocabularyIndex::build(&concepts);
        assert_eq!(index.auis_for_cui("C1"), &["A1", "A3"]);
        assert_eq!(index.auis_for_code("200"), &["A2"]);
        assert!(index.has_code("100"));
        assert!(!index.has_code("999"));
        assert!(index.auis_for_cui("C9").is_empty());
        assert_eq!(index.cui_count(), 2);
        assert_eq!(index.code_count(), 2);
    }

    #[test]
    fn test_shared_cuis() {
        let x: ConceptSet = [make_entry("A1", "C1", "100"), make_entry("A2", "C2", "200")]
            .into_iter()
            .collect();
        let y: ConceptSet = [make_entry("B1", "C2", "X"), make_entry("B2", "C3", "Y")]
            .into_iter()
            .collect();

        let xi = VocabularyIndex::build(&x);
        let yi = VocabularyIndex::build(&y);
        assert_eq!(xi.shared_cuis(&yi).collect::<Vec<_>>(), vec!["C2"]);
    }
}
