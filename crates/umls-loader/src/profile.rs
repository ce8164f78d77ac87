//! Per-vocabulary extraction and hierarchy presets.

use umls_types::{HierarchyRelation, SabSet};

use crate::types::ExtractConfig;

/// Default term types and hierarchy selector for a known source vocabulary.
///
/// Hierarchy encoding differs between sources: classification systems mark
/// their tree with `REL=PAR`, ontologies such as SNOMED CT with
/// `RELA=inverse_isa`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyProfile {
    /// Source abbreviation.
    pub sab: &'static str,
    /// Term types extracted by default.
    pub term_types: &'static [&'static str],
    /// `true` when the hierarchy is encoded as `RELA=inverse_isa`.
    pub inverse_isa: bool,
}

impl VocabularyProfile {
    /// ICD-9-CM: hierarchical and preferred terms, `REL=PAR`.
    pub const ICD9CM: Self = Self {
        sab: "ICD9CM",
        term_types: &["HT", "PT"],
        inverse_isa: false,
    };

    /// ICD-10-CM.
    pub const ICD10CM: Self = Self {
        sab: "ICD10CM",
        term_types: &["HT", "PT"],
        inverse_isa: false,
    };

    /// ICD-10-PCS.
    pub const ICD10PCS: Self = Self {
        sab: "ICD10PCS",
        term_types: &["HT", "PT"],
        inverse_isa: false,
    };

    /// SNOMED CT US edition: preferred terms, `RELA=inverse_isa`.
    pub const SNOMEDCT_US: Self = Self {
        sab: "SNOMEDCT_US",
        term_types: &["PT"],
        inverse_isa: true,
    };

    /// MeSH main headings.
    pub const MSH: Self = Self {
        sab: "MSH",
        term_types: &["MH"],
        inverse_isa: false,
    };

    /// All presets.
    pub const ALL: &'static [Self] = &[
        Self::ICD9CM,
        Self::ICD10CM,
        Self::ICD10PCS,
        Self::SNOMEDCT_US,
        Self::MSH,
    ];

    /// Finds the preset for a source abbreviation.
    pub fn lookup(sab: &str) -> Option<&'static Self> {
        Self::ALL.iter().find(|p| p.sab == sab)
    }

    /// Hierarchy selector of this source.
    pub fn hierarchy(&self) -> HierarchyRelation {
        if self.inverse_isa {
            HierarchyRelation::inverse_isa()
        } else {
            HierarchyRelation::parent()
        }
    }

    /// Extraction config for this source alone.
    pub fn to_extract_config(&self) -> ExtractConfig {
        ExtractConfig::new(
            SabSet::single(self.sab),
            self.term_types.iter().map(|t| t.to_string()).collect(),
        )
    }
}

/// Resolves the extraction config for a set of sources.
///
/// Term types of all known members are merged; if no member has a preset
/// and no term types are given, every term type is accepted.
pub fn extract_config_for(sabs: &SabSet, term_types: &[String]) -> ExtractConfig {
    if !term_types.is_empty() {
        return ExtractConfig::new(sabs.clone(), term_types.to_vec());
    }

    let mut merged: Vec<String> = Vec::new();
    for profile in sabs.iter().filter_map(VocabularyProfile::lookup) {
        for tty in profile.term_types {
            if !merged.iter().any(|t| t == tty) {
                merged.push(tty.to_string());
            }
        }
    }
    ExtractConfig::new(sabs.clone(), merged)
}

/// Resolves the hierarchy selector for a set of sources.
///
/// The first member with a preset decides; unknown sources default to `REL=PAR`.
pub fn hierarchy_for(sabs: &SabSet) -> HierarchyRelation {
    sabs.iter()
        .find_map(VocabularyProfile::lookup)
        .map(VocabularyProfile::hierarchy)
        .unwrap_or_default()
}
