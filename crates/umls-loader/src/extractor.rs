//! Multi-file extraction of one source vocabulary.
//!
//! Extraction runs four forward-only passes in a fixed order:
//!
//! 1. MRCONSO: keep atoms of the requested sources and term types, keyed by AUI.
//! 2. MRREL: append rows whose `AUI1` is a kept atom.
//! 3. MRSAT: append rows whose `METAUI` is a kept atom.
//! 4. MRDEF: set the definition of kept atoms (last row wins).
//!
//! Rows of a requested source that point at an atom outside the kept set are
//! dropped and counted in [`ExtractStats`]; they are never an error.
//!
//! ```ignore
//! let layout = ColumnLayout::load("umls_file_layout.json")?;
//! let config = ExtractConfig::new(SabSet::single("ICD9CM"), vec!["HT".into(), "PT".into()]);
//! let extraction = ConceptExtractor::new("/data/umls", &layout, config).extract_or_load()?;
//! println!("{} atoms", extraction.concepts.len());
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use umls_types::well_known::{columns, MRCONSO, MRDEF, MRREL, MRSAB, MRSAT};
use umls_types::{ConceptEntry, SabSet};

use crate::cache::{self, concept_cache_path, registry_cache_path};
use crate::layout::ColumnLayout;
use crate::loader::discover_rrf_files;
use crate::parser::RrfReader;
use crate::registry::VocabularyRegistry;
use crate::types::{ExtractConfig, ExtractStats, UmlsResult};

/// Consolidated atoms of a vocabulary, keyed and ordered by AUI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptSet {
    entries: BTreeMap<String, ConceptEntry>,
}

impl ConceptSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry under its AUI, replacing any previous entry.
    ///
    /// Returns `true` only when the AUI was not in the set before. Entries
    /// without an AUI are ignored.
    pub fn insert(&mut self, entry: ConceptEntry) -> bool {
        match entry.aui() {
            Some(aui) => {
                let aui = aui.to_string();
                self.entries.insert(aui, entry).is_none()
            }
            None => false,
        }
    }

    /// Looks up an atom.
    pub fn get(&self, aui: &str) -> Option<&ConceptEntry> {
        self.entries.get(aui)
    }

    /// Looks up an atom mutably.
    pub fn get_mut(&mut self, aui: &str) -> Option<&mut ConceptEntry> {
        self.entries.get_mut(aui)
    }

    /// Returns true if the atom is in the set.
    pub fn contains(&self, aui: &str) -> bool {
        self.entries.contains_key(aui)
    }

    /// Iterates over `(AUI, entry)` in AUI order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConceptEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over AUIs in order.
    pub fn auis(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of atoms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total relationship rows attached across all atoms.
    pub fn relationship_count(&self) -> usize {
        self.entries.values().map(|e| e.relationships.len()).sum()
    }

    /// Total attribute rows attached across all atoms.
    pub fn attribute_count(&self) -> usize {
        self.entries.values().map(|e| e.attributes.len()).sum()
    }

    /// Number of atoms carrying a definition.
    pub fn definition_count(&self) -> usize {
        self.entries.values().filter(|e| e.definition.is_some()).count()
    }
}

impl FromIterator<ConceptEntry> for ConceptSet {
    fn from_iter<I: IntoIterator<Item = ConceptEntry>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}

/// Result of extracting a vocabulary.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The consolidated atoms.
    pub concepts: ConceptSet,
    /// Current registry records.
    pub registry: VocabularyRegistry,
    /// Pass statistics (all zero when loaded from cache).
    pub stats: ExtractStats,
    /// True if the atoms came from an existing cache file.
    pub from_cache: bool,
}

/// Extracts one (possibly merged) source vocabulary from an RRF directory.
#[derive(Debug, Clone)]
pub struct ConceptExtractor<'a> {
    directory: PathBuf,
    layout: &'a ColumnLayout,
    config: ExtractConfig,
}

impl<'a> ConceptExtractor<'a> {
    /// Creates an extractor over `directory`.
    pub fn new<P: AsRef<Path>>(directory: P, layout: &'a ColumnLayout, config: ExtractConfig) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            layout,
            config,
        }
    }

    /// Returns the extractor configuration.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Path of this vocabulary's concept cache.
    pub fn cache_path(&self) -> PathBuf {
        concept_cache_path(&self.directory, &self.config.abbreviation())
    }

    /// Loads the caches if present and no refresh was requested, otherwise
    /// extracts and rewrites them.
    pub fn extract_or_load(&self) -> UmlsResult<Extraction> {
        let concept_cache = self.cache_path();
        let registry_cache = registry_cache_path(&self.directory);

        if !self.config.refresh && concept_cache.exists() && registry_cache.exists() {
            warn!(
                "Reusing cached {} (source files are not checked for changes)",
                concept_cache.display()
            );
            let concepts: ConceptSet = cache::read_json(&concept_cache)?;
            let registry =
                VocabularyRegistry::from_sources(cache::read_json(&registry_cache)?);
            info!("Loaded {} cached AUIs", concepts.len());
            return Ok(Extraction {
                concepts,
                registry,
                stats: ExtractStats::default(),
                from_cache: true,
            });
        }

        let extraction = self.extract()?;
        cache::write_json(&concept_cache, &extraction.concepts)?;
        cache::write_json(&registry_cache, extraction.registry.sources())?;
        Ok(extraction)
    }

    /// Runs all extraction passes without touching the caches.
    pub fn extract(&self) -> UmlsResult<Extraction> {
        let files = discover_rrf_files(&self.directory)?;
        let sabs = &self.config.sabs;
        let mut stats = ExtractStats::default();

        info!(
            "Extracting source '{}' and term types {:?}",
            sabs, self.config.term_types
        );

        let registry = VocabularyRegistry::from_rrf(self.reader(MRSAB)?)?;

        let mut concepts = collect_entries(self.reader(MRCONSO)?, &self.config, &mut stats)?;
        info!(
            "Extracted {} AUIs from a total of {} ({:.1}%)",
            stats.kept_entries,
            stats.total_entries,
            stats.entry_rate()
        );

        attach_relationships(&mut concepts, self.reader(MRREL)?, sabs, &mut stats)?;
        info!(
            "Extracted {} relationships from a total of {}",
            stats.kept_relationships, stats.total_relationships
        );

        if files.mrsat.is_some() {
            attach_attributes(&mut concepts, self.reader(MRSAT)?, sabs, &mut stats)?;
            info!(
                "Extracted {} attributes from a total of {}",
                stats.kept_attributes, stats.total_attributes
            );
        } else {
            warn!("{} not found, skipping attributes", MRSAT);
        }

        if files.mrdef.is_some() {
            attach_definitions(&mut concepts, self.reader(MRDEF)?, sabs, &mut stats)?;
            info!(
                "Extracted {} definitions from a total of {}",
                stats.kept_definitions, stats.total_definitions
            );
        } else {
            warn!("{} not found, skipping definitions", MRDEF);
        }

        if stats.referential_gaps() > 0 {
            info!(
                "Dropped {} relationships, {} attributes and {} definitions referencing atoms outside the subset",
                stats.dropped_relationships, stats.dropped_attributes, stats.dropped_definitions
            );
        }
        if stats.replaced_definitions > 0 {
            warn!(
                "{} atoms had more than one definition; the last one was kept",
                stats.replaced_definitions
            );
        }

        Ok(Extraction {
            concepts,
            registry,
            stats,
            from_cache: false,
        })
    }

    fn reader(&self, file_name: &str) -> UmlsResult<RrfReader<std::io::BufReader<std::fs::File>>> {
        RrfReader::open(&self.directory, self.layout, file_name)
    }
}

/// MRCONSO pass: keeps atoms whose SAB and TTY pass the filters.
pub fn collect_entries<R: Read>(
    reader: RrfReader<R>,
    config: &ExtractConfig,
    stats: &mut ExtractStats,
) -> UmlsResult<ConceptSet> {
    let mut concepts = ConceptSet::new();

    for record in reader {
        let record = record?;
        stats.total_entries += 1;

        if config.sabs.contains_opt(record.get(columns::SAB))
            && config.accepts_term_type(record.get(columns::TTY))
            && concepts.insert(ConceptEntry::new(record.into_row()))
        {
            stats.kept_entries += 1;
        }
    }

    Ok(concepts)
}

/// MRREL pass: appends rows to the atom named by `AUI1`.
pub fn attach_relationships<R: Read>(
    concepts: &mut ConceptSet,
    reader: RrfReader<R>,
    sabs: &SabSet,
    stats: &mut ExtractStats,
) -> UmlsResult<()> {
    for record in reader {
        let record = record?;
        stats.total_relationships += 1;

        if !sabs.contains_opt(record.get(columns::SAB)) {
            continue;
        }

        let aui = record.get(columns::AUI1).map(str::to_string);
        match aui.as_deref().and_then(|aui| concepts.get_mut(aui)) {
            Some(entry) => {
                entry.relationships.push(record.into_row());
                stats.kept_relationships += 1;
            }
            None => stats.dropped_relationships += 1,
        }
    }

    Ok(())
}

/// MRSAT pass: appends rows to the atom named by `METAUI`.
pub fn attach_attributes<R: Read>(
    concepts: &mut ConceptSet,
    reader: RrfReader<R>,
    sabs: &SabSet,
    stats: &mut ExtractStats,
) -> UmlsResult<()> {
    for record in reader {
        let record = record?;
        stats.total_attributes += 1;

        if !sabs.contains_opt(record.get(columns::SAB)) {
            continue;
        }

        let aui = record.get(columns::METAUI).map(str::to_string);
        match aui.as_deref().and_then(|aui| concepts.get_mut(aui)) {
            Some(entry) => {
                entry.attributes.push(record.into_row());
                stats.kept_attributes += 1;
            }
            None => stats.dropped_attributes += 1,
        }
    }

    Ok(())
}

/// MRDEF pass: sets the definition of the atom named by `AUI`.
pub fn attach_definitions<R: Read>(
    concepts: &mut ConceptSet,
    reader: RrfReader<R>,
    sabs: &SabSet,
    stats: &mut ExtractStats,
) -> UmlsResult<()> {
    for record in reader {
        let record = record?;
        stats.total_definitions += 1;

        if !sabs.contains_opt(record.get(columns::SAB)) {
            continue;
        }

        let Some(entry) = record.get(columns::AUI).and_then(|aui| concepts.get_mut(aui)) else {
            stats.dropped_definitions += 1;
            continue;
        };

        let definition = record.get(columns::DEF).map(str::to_string);
        if definition.is_some() {
            if entry.definition.is_some() {
                stats.replaced_definitions += 1;
            }
            entry.definition = definition;
            stats.kept_definitions += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MRCONSO_COLUMNS: &[&str] = &["CUI", "AUI", "SAB", "TTY", "CODE", "STR", "SUI"];
    const MRREL_COLUMNS: &[&str] = &["CUI1", "AUI1", "REL", "CUI2", "AUI2", "RELA", "SAB"];
    const MRSAT_COLUMNS: &[&str] = &["CUI", "METAUI", "ATN", "SAB", "ATV"];
    const MRDEF_COLUMNS: &[&str] = &["CUI", "AUI", "SAB", "DEF"];
    const MRSAB_COLUMNS: &[&str] = &["VSAB", "RSAB", "SON", "SVER", "CURVER", "SABIN"];

    const MRCONSO_DATA: &str = "\
C1|A1|ICD9CM|PT|100.1|Foo|S1|
C2|A2|ICD9CM|HT|200|Bar|S2|
C3|A3|ICD9CM|AB|300|Baz abbreviation|S3|
C1|A4|MSH|MH|D000001|Foo|S1|
";
    const MRREL_DATA: &str = "\
C1|A1|PAR|C2|A2||ICD9CM|
C1|A1|PAR|C2|A2||ICD9CM|
C1|A1|RO|C9|A9||ICD9CM|
C3|A3|PAR|C2|A2||ICD9CM|
C1|A4|PAR|C8|A8||MSH|
";
    const MRSAT_DATA: &str = "\
C1|A1|ICA|ICD9CM|Includes cholera|
C2|A2|ICN|MSH|Not this source|
C9|A9|ICA|ICD9CM|Unknown atom|
";
    const MRDEF_DATA: &str = "\
C1|A1|ICD9CM|First definition|
C1|A1|ICD9CM|Second definition|
C3|A3|ICD9CM|Not kept|
";
    const MRSAB_DATA: &str = "ICD9CM_2013|ICD9CM|ICD-9-CM|2013|Y|Y|\n";

    fn rrf<'d>(data: &'d str, names: &[&str]) -> RrfReader<&'d [u8]> {
        let columns: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        RrfReader::from_reader(data.as_bytes(), "TEST.RRF", &columns, b'|')
    }

    fn make_layout() -> ColumnLayout {
        let mut layout = ColumnLayout::new();
        for (file, names) in [
            (MRCONSO, MRCONSO_COLUMNS),
            (MRREL, MRREL_COLUMNS),
            (MRSAT, MRSAT_COLUMNS),
            (MRDEF, MRDEF_COLUMNS),
            (MRSAB, MRSAB_COLUMNS),
        ] {
            layout.insert(file, names.iter().map(|s| s.to_string()).collect());
        }
        layout
    }

    fn write_extract(dir: &Path) {
        fs::write(dir.join(MRCONSO), MRCONSO_DATA).unwrap();
        fs::write(dir.join(MRREL), MRREL_DATA).unwrap();
        fs::write(dir.join(MRSAT), MRSAT_DATA).unwrap();
        fs::write(dir.join(MRDEF), MRDEF_DATA).unwrap();
        fs::write(dir.join(MRSAB), MRSAB_DATA).unwrap();
    }

    #[test]
    fn test_collect_entries_filters_sab_and_tty() {
        let config = ExtractConfig::default();
        let mut stats = ExtractStats::default();
        let concepts =
            collect_entries(rrf(MRCONSO_DATA, MRCONSO_COLUMNS), &config, &mut stats).unwrap();

        assert_eq!(concepts.auis().collect::<Vec<_>>(), vec!["A1", "A2"]);
        assert_eq!(stats.total_entries, 4);
        assert_eq!(stats.kept_entries, 2);
        assert_eq!(concepts.get("A1").unwrap().code(), Some("100.1"));
    }

    #[test]
    fn test_duplicate_aui_counted_once() {
        let data = "\
C1|A1|ICD9CM|PT|100.1|Foo|S1|
C1|A1|ICD9CM|PT|100.1|Foo revised|S1|
C2|A2|ICD9CM|HT|200|Bar|S2|
";
        let config = ExtractConfig::default();
        let mut stats = ExtractStats::default();
        let concepts = collect_entries(rrf(data, MRCONSO_COLUMNS), &config, &mut stats).unwrap();

        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.kept_entries, 2);
        assert_eq!(stats.kept_entries, concepts.len());
        assert_eq!(concepts.get("A1").unwrap().preferred_string(), Some("Foo revised"));
    }

    #[test]
    fn test_merged_sources() {
        let sabs: SabSet = ["ICD9CM", "MSH"].into_iter().collect();
        let config = ExtractConfig::new(sabs, vec![]);
        let mut stats = ExtractStats::default();
        let concepts =
            collect_entries(rrf(MRCONSO_DATA, MRCONSO_COLUMNS), &config, &mut stats).unwrap();
        assert_eq!(concepts.len(), 4);
    }

    #[test]
    fn test_relationships_keep_order_and_duplicates() {
        let config = ExtractConfig::default();
        let mut stats = ExtractStats::default();
        let mut concepts =
            collect_entries(rrf(MRCONSO_DATA, MRCONSO_COLUMNS), &config, &mut stats).unwrap();
        attach_relationships(
            &mut concepts,
            rrf(MRREL_DATA, MRREL_COLUMNS),
            &config.sabs,
            &mut stats,
        )
        .unwrap();

        let rels = &concepts.get("A1").unwrap().relationships;
        assert_eq!(rels.len(), 3);
        assert_eq!(rels[0].get("AUI2"), Some("A2"));
        assert_eq!(rels[0], rels[1]);
        assert_eq!(rels[2].get("REL"), Some("RO"));

        assert_eq!(stats.total_relationships, 5);
        assert_eq!(stats.kept_relationships, 3);
        // A3 was filtered out by term type; the MSH row is another source.
        assert_eq!(stats.dropped_relationships, 1);
    }

    #[test]
    fn test_attributes_and_definitions() {
        let config = ExtractConfig::default();
        let mut stats = ExtractStats::default();
        let mut concepts =
            collect_entries(rrf(MRCONSO_DATA, MRCONSO_COLUMNS), &config, &mut stats).unwrap();
        attach_attributes(
            &mut concepts,
            rrf(MRSAT_DATA, MRSAT_COLUMNS),
            &config.sabs,
            &mut stats,
        )
        .unwrap();
        attach_definitions(
            &mut concepts,
            rrf(MRDEF_DATA, MRDEF_COLUMNS),
            &config.sabs,
            &mut stats,
        )
        .unwrap();

        let a1 = concepts.get("A1").unwrap();
        assert_eq!(a1.attributes.len(), 1);
        assert_eq!(a1.attributes[0].get("ATV"), Some("Includes cholera"));
        assert_eq!(a1.definition.as_deref(), Some("Second definition"));
        assert!(concepts.get("A2").unwrap().is_bare());

        assert_eq!(stats.kept_attributes, 1);
        assert_eq!(stats.dropped_attributes, 1);
        assert_eq!(stats.kept_definitions, 2);
        assert_eq!(stats.replaced_definitions, 1);
        assert_eq!(stats.dropped_definitions, 1);
    }

    #[test]
    fn test_extract_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_extract(dir.path());
        let layout = make_layout();

        let extraction = ConceptExtractor::new(dir.path(), &layout, ExtractConfig::default())
            .extract()
            .unwrap();

        assert!(!extraction.from_cache);
        assert_eq!(extraction.concepts.len(), 2);
        assert_eq!(extraction.concepts.relationship_count(), 3);
        assert_eq!(extraction.concepts.attribute_count(), 1);
        assert_eq!(extraction.concepts.definition_count(), 1);
        assert!((extraction.stats.entry_rate() - 50.0).abs() < 0.01);
        assert_eq!(
            extraction.registry.get("ICD9CM").and_then(|m| m.version()),
            Some("2013")
        );
        assert!(!concept_cache_path(dir.path(), "ICD9CM").exists());
    }

    #[test]
    fn test_cache_roundtrip_matches_fresh_extraction() {
        let dir = tempfile::tempdir().unwrap();
        write_extract(dir.path());
        let layout = make_layout();

        let extractor = ConceptExtractor::new(dir.path(), &layout, ExtractConfig::default());
        let fresh = extractor.extract_or_load().unwrap();
        assert!(!fresh.from_cache);
        assert!(extractor.cache_path().exists());

        let cached = extractor.extract_or_load().unwrap();
        assert!(cached.from_cache);
        assert_eq!(cached.concepts, fresh.concepts);
        assert_eq!(cached.registry, fresh.registry);
    }

    #[test]
    fn test_refresh_ignores_cache() {
        let dir = tempfile::tempdir().unwrap();
        write_extract(dir.path());
        let layout = make_layout();

        let extractor = ConceptExtractor::new(dir.path(), &layout, ExtractConfig::default());
        extractor.extract_or_load().unwrap();

        fs::write(dir.path().join(MRDEF), "C2|A2|ICD9CM|Bar definition|\n").unwrap();

        let refreshing = ConceptExtractor::new(
            dir.path(),
            &layout,
            ExtractConfig::default().with_refresh(true),
        );
        let refreshed = refreshing.extract_or_load().unwrap();
        assert!(!refreshed.from_cache);
        assert_eq!(refreshed.concepts.get("A1").unwrap().definition, None);
        assert_eq!(
            refreshed.concepts.get("A2").unwrap().definition.as_deref(),
            Some("Bar definition")
        );
    }

    #[test]
    fn test_missing_required_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MRCONSO), MRCONSO_DATA).unwrap();
        let layout = make_layout();

        let result = ConceptExtractor::new(dir.path(), &layout, ExtractConfig::default()).extract();
        assert!(matches!(
            result,
            Err(crate::types::UmlsError::RequiredFileMissing { .. })
        ));
    }
}
