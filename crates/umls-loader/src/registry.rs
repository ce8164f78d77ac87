//! Source vocabulary registry (MRSAB).

use std::collections::BTreeMap;
use std::io::Read;

use tracing::{debug, info};
use umls_types::{SabSet, VocabularyMeta};

use crate::parser::RrfReader;
use crate::types::{UmlsError, UmlsResult};

/// Active registry records keyed by root source abbreviation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyRegistry {
    sources: BTreeMap<String, VocabularyMeta>,
}

impl VocabularyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from an MRSAB reader.
    ///
    /// Only rows that are both the current version (`CURVER`) and included
    /// in the subset (`SABIN`) are kept.
    pub fn from_rrf<R: Read>(reader: RrfReader<R>) -> UmlsResult<Self> {
        let mut registry = Self::new();
        let mut total = 0;

        for record in reader {
            let meta = VocabularyMeta::new(record?.into_row());
            total += 1;
            if meta.is_current() && meta.is_included() {
                debug!(
                    "Registered {} ({})",
                    meta.vsab().unwrap_or_default(),
                    meta.official_name().unwrap_or_default()
                );
                registry.insert(meta);
            }
        }

        info!(
            "Registered {} active sources from a total of {}",
            registry.len(),
            total
        );
        Ok(registry)
    }

    /// Adds a registry record under its RSAB; records without one are ignored.
    pub fn insert(&mut self, meta: VocabularyMeta) {
        if let Some(rsab) = meta.rsab() {
            self.sources.insert(rsab.to_string(), meta);
        }
    }

    /// Looks up a source by abbreviation.
    pub fn get(&self, sab: &str) -> Option<&VocabularyMeta> {
        self.sources.get(sab)
    }

    /// Returns the version string for a possibly merged vocabulary.
    ///
    /// Member versions are joined with `_` in sorted SAB order.
    ///
    /// # Errors
    /// Returns [`UmlsError::UnknownVocabulary`] if a member is not registered.
    pub fn version_for(&self, sabs: &SabSet) -> UmlsResult<String> {
        let mut versions = Vec::with_capacity(sabs.len());
        for sab in sabs.iter() {
            let meta = self.get(sab).ok_or_else(|| UmlsError::UnknownVocabulary {
                sab: sab.to_string(),
            })?;
            versions.push(meta.version().unwrap_or_default());
        }
        Ok(versions.join("_"))
    }

    /// Iterates over `(RSAB, record)` in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VocabularyMeta)> {
        self.sources.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true if no sources are registered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub(crate) fn sources(&self) -> &BTreeMap<String, VocabularyMeta> {
        &self.sources
    }

    pub(crate) fn from_sources(sources: BTreeMap<String, VocabularyMeta>) -> Self {
        Self { sources }
    }
}
