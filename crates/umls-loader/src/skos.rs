//! SKOS export of an extracted vocabulary.
//!
//! Every atom becomes a `skos:Concept` whose URI is derived from its source
//! code. Hierarchy edges come from the relationship rows selected by the
//! scheme's [`HierarchyRelation`]; the row's `AUI1` is narrower than its
//! `AUI2`. Top concepts are the concepts pointed to as broader that have no
//! broader concept themselves. Atoms sharing a code share one concept, so
//! both sides of that test are decided per concept URI.
//!
//! Output order depends only on the concept set: atoms are visited in AUI
//! order, relationships in file order and top concepts in URI order.

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};
use umls_types::{ConceptEntry, HierarchyRelation, SabSet};

use crate::extractor::ConceptSet;
use crate::index::VocabularyIndex;
use crate::ntriples::{vocab, NTriplesWriter, Object};
use crate::registry::VocabularyRegistry;
use crate::types::UmlsResult;

/// Default base URI for exported concepts.
pub const DEFAULT_BASE_URI: &str = "http://purl.obolibrary.org/obo/arg/skos/";

/// Default prefix of external atom URIs.
pub const DEFAULT_EXTERNAL_AUI_PREFIX: &str = "http://linkedlifedata.com/resource/umls/id/";

/// Replaces `.` and runs of whitespace with `_`.
///
/// ```
/// use umls_loader::url_safe_code;
///
/// assert_eq!(url_safe_code("100.1"), "100_1");
/// assert_eq!(url_safe_code("V01 - V09"), "V01_-_V09");
/// ```
pub fn url_safe_code(code: &str) -> String {
    let dotless = code.split('.').collect::<Vec<_>>().join("_");
    dotless.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Export settings for one vocabulary.
///
/// Built once per vocabulary and shared read-only by the exporter and the
/// cross-vocabulary linker.
#[derive(Debug, Clone)]
pub struct SchemeConfig {
    /// Prefix of every minted URI.
    pub base_uri: String,
    /// Vocabulary abbreviation used in URIs.
    pub abbreviation: String,
    /// Version string of the scheme.
    pub version: String,
    /// Prefix of external atom URIs linked with `rdfs:seeAlso`.
    pub external_aui_prefix: String,
    /// Relationship rows that denote a broader edge.
    pub hierarchy: HierarchyRelation,
    /// Also declare atoms with no hierarchy edge at all as top concepts.
    pub include_isolated_top_concepts: bool,
    /// Named graph for quad output.
    pub graph_uri: Option<String>,
    /// Language tag of labels and definitions.
    pub language: String,
    /// Turns a source code into a URI segment.
    pub code_transform: fn(&str) -> String,
}

impl SchemeConfig {
    /// Creates a config with default URIs and `REL=PAR` hierarchy.
    pub fn new(abbreviation: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            abbreviation: abbreviation.into(),
            version: version.into(),
            external_aui_prefix: DEFAULT_EXTERNAL_AUI_PREFIX.to_string(),
            hierarchy: HierarchyRelation::parent(),
            include_isolated_top_concepts: false,
            graph_uri: None,
            language: "en".to_string(),
            code_transform: url_safe_code,
        }
    }

    /// Creates a config whose version is looked up in the registry.
    ///
    /// For merged vocabularies the member versions are joined.
    pub fn from_registry(
        sabs: &SabSet,
        registry: &VocabularyRegistry,
        hierarchy: HierarchyRelation,
    ) -> UmlsResult<Self> {
        let version = registry.version_for(sabs)?;
        Ok(Self::new(sabs.to_string(), version).with_hierarchy(hierarchy))
    }

    /// Sets the base URI.
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Sets the hierarchy selector.
    pub fn with_hierarchy(mut self, hierarchy: HierarchyRelation) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    /// Sets the named graph.
    pub fn with_graph_uri(mut self, graph_uri: Option<String>) -> Self {
        self.graph_uri = graph_uri;
        self
    }

    /// URI of the concept scheme.
    pub fn scheme_uri(&self) -> String {
        format!("{}cs_{}", self.base_uri, self.abbreviation)
    }

    /// URI of the concept for a source code.
    pub fn concept_uri(&self, code: &str) -> String {
        format!("{}c_{}_{}", self.base_uri, self.abbreviation, (self.code_transform)(code))
    }

    /// Datatype of this vocabulary's code notations.
    pub fn code_datatype(&self) -> String {
        format!("{}dt_{}", self.base_uri, self.abbreviation)
    }

    /// Datatype of CUI notations.
    pub fn cui_datatype(&self) -> String {
        format!("{}dt_UMLS_CUI", self.base_uri)
    }

    /// Datatype of AUI notations.
    pub fn aui_datatype(&self) -> String {
        format!("{}dt_UMLS_AUI", self.base_uri)
    }

    /// URI of the SKOS-XL label node for a string identifier.
    pub fn label_uri(&self, sui: &str) -> String {
        format!("{}l_{}", self.base_uri, sui)
    }

    /// External URI of an atom.
    pub fn external_aui_uri(&self, aui: &str) -> String {
        format!("{}{}", self.external_aui_prefix, aui)
    }

    /// Concept URI of an entry, if it has a code.
    pub fn entry_uri(&self, entry: &ConceptEntry) -> Option<String> {
        entry.code().map(|code| self.concept_uri(code))
    }
}

/// Summary of one export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Concepts written.
    pub concepts: usize,
    /// Atoms skipped because they have no code.
    pub skipped_entries: usize,
    /// Distinct label nodes written.
    pub labels: usize,
    /// Definitions written.
    pub definitions: usize,
    /// Broader edges written (each with its narrower inverse).
    pub broader_edges: usize,
    /// Hierarchy rows whose target atom is not in the set.
    pub unresolved_targets: usize,
    /// Distinct top concepts declared.
    pub top_concepts: usize,
    /// Statements written.
    pub statements: usize,
}

/// Writes a concept set as a SKOS concept scheme.
pub struct HierarchyExporter<'a> {
    config: &'a SchemeConfig,
    concepts: &'a ConceptSet,
    index: VocabularyIndex,
}

impl<'a> HierarchyExporter<'a> {
    /// Creates an exporter and builds its CUI/code indexes.
    pub fn new(config: &'a SchemeConfig, concepts: &'a ConceptSet) -> Self {
        Self {
            config,
            concepts,
            index: VocabularyIndex::build(concepts),
        }
    }

    /// The export settings.
    pub fn config(&self) -> &SchemeConfig {
        self.config
    }

    /// The exported atoms.
    pub fn concepts(&self) -> &ConceptSet {
        self.concepts
    }

    /// CUI and code indexes over the exported atoms.
    pub fn index(&self) -> &VocabularyIndex {
        &self.index
    }

    /// Writes the export to a file, replacing it.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> UmlsResult<ExportStats> {
        let file = File::create(path.as_ref())?;
        let stats = self.write(BufWriter::new(file))?;
        info!(
            "Wrote {} statements for {} concepts to {}",
            stats.statements,
            stats.concepts,
            path.as_ref().display()
        );
        Ok(stats)
    }

    /// Writes the export.
    pub fn write<W: Write>(&self, writer: W) -> UmlsResult<ExportStats> {
        let config = self.config;
        let mut out = NTriplesWriter::with_graph(writer, config.graph_uri.clone());
        let mut stats = ExportStats::default();

        let scheme = config.scheme_uri();
        let code_datatype = config.code_datatype();
        let cui_datatype = config.cui_datatype();
        let aui_datatype = config.aui_datatype();
        let lang = config.language.as_str();

        out.iri(&scheme, vocab::RDF_TYPE, vocab::SKOS_CONCEPT_SCHEME)?;
        out.statement(&scheme, vocab::RDFS_LABEL, Object::Plain(&config.abbreviation))?;
        out.statement(&scheme, vocab::OWL_VERSION_INFO, Object::Plain(&config.version))?;

        let mut seen_suis: HashSet<&str> = HashSet::new();
        // Keyed by concept URI, since atoms sharing a code share one concept.
        let mut has_broader: BTreeSet<String> = BTreeSet::new();
        let mut broader_targets: BTreeSet<String> = BTreeSet::new();

        for (aui, entry) in self.concepts.iter() {
            let Some(concept) = config.entry_uri(entry) else {
                stats.skipped_entries += 1;
                continue;
            };
            stats.concepts += 1;

            out.iri(&concept, vocab::RDF_TYPE, vocab::SKOS_CONCEPT)?;
            out.iri(&concept, vocab::SKOS_IN_SCHEME, &scheme)?;
            if let Some(code) = entry.code() {
                out.typed(&concept, vocab::SKOS_NOTATION, code, &code_datatype)?;
            }
            if let Some(label) = entry.preferred_string() {
                out.lang(&concept, vocab::SKOS_PREF_LABEL, label, lang)?;
            }
            if let Some(cui) = entry.cui() {
                out.typed(&concept, vocab::SKOS_NOTATION, cui, &cui_datatype)?;
            }
            out.typed(&concept, vocab::SKOS_NOTATION, aui, &aui_datatype)?;
            out.iri(&concept, vocab::RDFS_SEE_ALSO, &config.external_aui_uri(aui))?;

            if let Some(sui) = entry.sui() {
                let label_node = config.label_uri(sui);
                out.iri(&concept, vocab::SKOSXL_PREF_LABEL, &label_node)?;
                if seen_suis.insert(sui) {
                    out.iri(&label_node, vocab::RDF_TYPE, vocab::SKOSXL_LABEL)?;
                    if let Some(label) = entry.preferred_string() {
                        out.lang(&label_node, vocab::SKOSXL_LITERAL_FORM, label, lang)?;
                    }
                    stats.labels += 1;
                }
            }

            if let Some(ref definition) = entry.definition {
                out.lang(&concept, vocab::SKOS_DEFINITION, definition, lang)?;
                stats.definitions += 1;
            }

            for target in entry.hierarchy_targets(&config.hierarchy) {
                let Some(broader) = self
                    .concepts
                    .get(target)
                    .and_then(|t| config.entry_uri(t))
                else {
                    stats.unresolved_targets += 1;
                    continue;
                };
                out.iri(&concept, vocab::SKOS_BROADER, &broader)?;
                out.iri(&broader, vocab::SKOS_NARROWER, &concept)?;
                has_broader.insert(concept.clone());
                broader_targets.insert(broader);
                stats.broader_edges += 1;
            }
        }

        let mut top_concepts: BTreeSet<String> =
            broader_targets.difference(&has_broader).cloned().collect();
        if config.include_isolated_top_concepts {
            top_concepts.extend(
                self.concepts
                    .iter()
                    .filter_map(|(_, entry)| config.entry_uri(entry))
                    .filter(|uri| !has_broader.contains(uri) && !broader_targets.contains(uri)),
            );
        }

        for top in top_concepts {
            out.iri(&scheme, vocab::SKOS_HAS_TOP_CONCEPT, &top)?;
            out.iri(&top, vocab::SKOS_TOP_CONCEPT_OF, &scheme)?;
            stats.top_concepts += 1;
        }

        if stats.skipped_entries > 0 {
            warn!("Skipped {} atoms without a source code", stats.skipped_entries);
        }
        if stats.unresolved_targets > 0 {
            info!(
                "{} hierarchy rows point at atoms outside the exported set",
                stats.unresolved_targets
            );
        }

        out.flush()?;
        stats.statements = out.statements();
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umls_types::RrfRow;

    fn make_entry(aui: &str, code: &str, cui: &str, label: &str, sui: &str) -> ConceptEntry {
        let fields: RrfRow = [
            ("AUI", Some(aui.to_string())),
            ("CODE", Some(code.to_string())),
            ("CUI", Some(cui.to_string())),
            ("STR", Some(label.to_string())),
            ("SUI", Some(sui.to_string())),
        ]
        .into_iter()
        .collect();
        ConceptEntry::new(fields)
    }

    fn make_relationship(rel: &str, aui2: &str) -> RrfRow {
        [
            ("REL", Some(rel.to_string())),
            ("RELA", None),
            ("AUI2", Some(aui2.to_string())),
        ]
        .into_iter()
        .collect()
    }

    fn scenario() -> ConceptSet {
        let mut a1 = make_entry("A1", "100.1", "C1", "Foo", "S1");
        a1.relationships.push(make_relationship("PAR", "A2"));
        let a2 = make_entry("A2", "200", "C2", "Bar", "S2");
        [a1, a2].into_iter().collect()
    }

    fn export(config: &SchemeConfig, concepts: &ConceptSet) -> (String, ExportStats) {
        let mut buf = Vec::new();
        let stats = HierarchyExporter::new(config, concepts).write(&mut buf).unwrap();
        (String::from_utf8(buf).unwrap(), stats)
    }

    fn triple(s: &str, p: &str, o: &str) -> String {
        format!("<{}> <{}> <{}> .", s, p, o)
    }

    #[test]
    fn test_url_safe_code() {
        assert_eq!(url_safe_code("100.1"), "100_1");
        assert_eq!(url_safe_code("  A.B  C\tD "), "A_B_C_D");
        assert_eq!(url_safe_code("E800-E807.9"), "E800-E807_9");
    }

    #[test]
    fn test_scheme_uris() {
        let config = SchemeConfig::new("ICD9CM", "2013");
        assert_eq!(config.scheme_uri(), "http://purl.obolibrary.org/obo/arg/skos/cs_ICD9CM");
        assert_eq!(
            config.concept_uri("100.1"),
            "http://purl.obolibrary.org/obo/arg/skos/c_ICD9CM_100_1"
        );
        assert_eq!(config.code_datatype(), "http://purl.obolibrary.org/obo/arg/skos/dt_ICD9CM");
    }

    #[test]
    fn test_broader_narrower_and_top_concept() {
        let config = SchemeConfig::new("ICD9CM", "2013");
        let concepts = scenario();
        let (out, stats) = export(&config, &concepts);

        let a1 = config.concept_uri("100.1");
        let a2 = config.concept_uri("200");
        assert!(a1.ends_with("c_ICD9CM_100_1"));

        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.contains(&triple(&a1, vocab::SKOS_BROADER, &a2).as_str()));
        assert!(lines.contains(&triple(&a2, vocab::SKOS_NARROWER, &a1).as_str()));
        assert!(!lines.contains(&triple(&a2, vocab::SKOS_BROADER, &a1).as_str()));

        let scheme = config.scheme_uri();
        assert!(lines.contains(&triple(&scheme, vocab::SKOS_HAS_TOP_CONCEPT, &a2).as_str()));
        assert!(lines.contains(&triple(&a2, vocab::SKOS_TOP_CONCEPT_OF, &scheme).as_str()));
        assert!(!lines.contains(&triple(&scheme, vocab::SKOS_HAS_TOP_CONCEPT, &a1).as_str()));

        assert_eq!(stats.concepts, 2);
        assert_eq!(stats.broader_edges, 1);
        assert_eq!(stats.top_concepts, 1);
        assert_eq!(stats.statements, lines.len());
    }

    #[test]
    fn test_entry_statements() {
        let config = SchemeConfig::new("ICD9CM", "2013");
        let concepts = scenario();
        let (out, _) = export(&config, &concepts);
        let a1 = config.concept_uri("100.1");

        assert!(out.contains(&format!(
            "<{}> <{}> \"100.1\"^^<{}> .",
            a1,
            vocab::SKOS_NOTATION,
            config.code_datatype()
        )));
        assert!(out.contains(&format!("<{}> <{}> \"Foo\"@en .", a1, vocab::SKOS_PREF_LABEL)));
        assert!(out.contains(&format!(
            "<{}> <{}> \"C1\"^^<{}> .",
            a1,
            vocab::SKOS_NOTATION,
            config.cui_datatype()
        )));
        assert!(out.contains(&format!(
            "<{}> <{}> \"A1\"^^<{}> .",
            a1,
            vocab::SKOS_NOTATION,
            config.aui_datatype()
        )));
        assert!(out.contains(&triple(
            &a1,
            vocab::RDFS_SEE_ALSO,
            &config.external_aui_uri("A1")
        )));
        assert!(out.starts_with(&triple(
            &config.scheme_uri(),
            vocab::RDF_TYPE,
            vocab::SKOS_CONCEPT_SCHEME
        )));
        assert!(out.contains("\"2013\" ."));
    }

    #[test]
    fn test_shared_sui_declared_once() {
        let config = SchemeConfig::new("ICD9CM", "2013");
        let concepts: ConceptSet = [
            make_entry("A1", "001", "C1", "Cholera", "S1"),
            make_entry("A2", "001.0", "C2", "Cholera", "S1"),
        ]
        .into_iter()
        .collect();
        let (out, stats) = export(&config, &concepts);

        let literal_forms = out
            .lines()
            .filter(|l| l.contains(vocab::SKOSXL_LITERAL_FORM))
            .count();
        let label_links = out
            .lines()
            .filter(|l| l.contains(vocab::SKOSXL_PREF_LABEL))
            .count();
        assert_eq!(literal_forms, 1);
        assert_eq!(label_links, 2);
        assert_eq!(stats.labels, 1);
    }

    #[test]
    fn test_definitions_and_unresolved_targets() {
        let config = SchemeConfig::new("ICD9CM", "2013");
        let mut a1 = make_entry("A1", "001", "C1", "Cholera", "S1");
        a1.definition = Some("An \"acute\" illness".to_string());
        a1.relationships.push(make_relationship("PAR", "A404"));
        let concepts: ConceptSet = [a1].into_iter().collect();

        let (out, stats) = export(&config, &concepts);
        assert!(out.contains("\"An \\\"acute\\\" illness\"@en ."));
        assert_eq!(stats.definitions, 1);
        assert_eq!(stats.unresolved_targets, 1);
        assert_eq!(stats.broader_edges, 0);
        assert_eq!(stats.top_concepts, 0);
    }

    #[test]
    fn test_isolated_top_concepts_option() {
        let mut config = SchemeConfig::new("ICD9CM", "2013");
        let mut concepts = scenario();
        concepts.insert(make_entry("A3", "300", "C3", "Lonely", "S3"));

        let (_, stats) = export(&config, &concepts);
        assert_eq!(stats.top_concepts, 1);

        config.include_isolated_top_concepts = true;
        let (out, stats) = export(&config, &concepts);
        assert_eq!(stats.top_concepts, 2);
        assert!(out.contains(&triple(
            &config.scheme_uri(),
            vocab::SKOS_HAS_TOP_CONCEPT,
            &config.concept_uri("300")
        )));
    }

    #[test]
    fn test_top_concepts_have_no_broader_edge() {
        // A1 -> A2 -> A3, A4 -> A3; only A3 is a root.
        let config = SchemeConfig::new("X", "1");
        let mut a1 = make_entry("A1", "1", "C1", "One", "S1");
        a1.relationships.push(make_relationship("PAR", "A2"));
        let mut a2 = make_entry("A2", "2", "C2", "Two", "S2");
        a2.relationships.push(make_relationship("PAR", "A3"));
        a2.relationships.push(make_relationship("CHD", "A1"));
        let a3 = make_entry("A3", "3", "C3", "Three", "S3");
        let mut a4 = make_entry("A4", "4", "C4", "Four", "S4");
        a4.relationships.push(make_relationship("PAR", "A3"));
        let concepts: ConceptSet = [a1, a2, a3, a4].into_iter().collect();

        let (out, stats) = export(&config, &concepts);
        assert_eq!(stats.top_concepts, 1);
        assert_eq!(stats.broader_edges, 3);

        let tops: Vec<&str> = out
            .lines()
            .filter(|l| l.contains(vocab::SKOS_TOP_CONCEPT_OF))
            .collect();
        assert_eq!(tops.len(), 1);
        assert!(tops[0].starts_with(&format!("<{}>", config.concept_uri("3"))));
    }

    #[test]
    fn test_shared_code_with_broader_is_not_top() {
        // A2 and A3 both carry code 2: A1 -> A2, A3 -> A4.
        let config = SchemeConfig::new("X", "1");
        let mut a1 = make_entry("A1", "1", "C1", "One", "S1");
        a1.relationships.push(make_relationship("PAR", "A2"));
        let a2 = make_entry("A2", "2", "C2", "Two", "S2");
        let mut a3 = make_entry("A3", "2", "C2", "Two", "S2");
        a3.relationships.push(make_relationship("PAR", "A4"));
        let a4 = make_entry("A4", "4", "C4", "Four", "S4");
        let concepts: ConceptSet = [a1, a2, a3, a4].into_iter().collect();

        let (out, stats) = export(&config, &concepts);
        let scheme = config.scheme_uri();
        let two = config.concept_uri("2");
        let four = config.concept_uri("4");
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines.contains(&triple(&two, vocab::SKOS_BROADER, &four).as_str()));
        assert!(!lines.contains(&triple(&scheme, vocab::SKOS_HAS_TOP_CONCEPT, &two).as_str()));
        assert!(lines.contains(&triple(&scheme, vocab::SKOS_HAS_TOP_CONCEPT, &four).as_str()));
        assert_eq!(stats.top_concepts, 1);

        let has_broader: Vec<&str> = lines
            .iter()
            .filter(|l| l.contains(vocab::SKOS_BROADER))
            .filter_map(|l| l.split(' ').next())
            .collect();
        for line in lines.iter().filter(|l| l.contains(vocab::SKOS_TOP_CONCEPT_OF)) {
            let top = line.split(' ').next().unwrap();
            assert!(!has_broader.contains(&top), "{top} has a broader concept");
        }
    }

    #[test]
    fn test_isolated_shared_code_declared_once() {
        let mut config = SchemeConfig::new("X", "1");
        config.include_isolated_top_concepts = true;
        let concepts: ConceptSet = [
            make_entry("A1", "7", "C1", "Seven", "S1"),
            make_entry("A2", "7", "C1", "Seven", "S1"),
        ]
        .into_iter()
        .collect();

        let (out, stats) = export(&config, &concepts);
        assert_eq!(stats.top_concepts, 1);
        assert_eq!(
            out.lines()
                .filter(|l| l.contains(vocab::SKOS_HAS_TOP_CONCEPT))
                .count(),
            1
        );
    }

    #[test]
    fn test_inverse_isa_hierarchy() {
        let config =
            SchemeConfig::new("SNOMEDCT_US", "2013").with_hierarchy(HierarchyRelation::inverse_isa());
        let mut child = make_entry("A1", "22298006", "C1", "Myocardial infarction", "S1");
        let rel: RrfRow = [
            ("REL", Some("PAR".to_string())),
            ("RELA", Some("inverse_isa".to_string())),
            ("AUI2", Some("A2".to_string())),
        ]
        .into_iter()
        .collect();
        child.relationships.push(rel);
        child.relationships.push(make_relationship("PAR", "A2"));
        let parent = make_entry("A2", "414545008", "C2", "Ischemic heart disease", "S2");
        let concepts: ConceptSet = [child, parent].into_iter().collect();

        let (_, stats) = export(&config, &concepts);
        assert_eq!(stats.broader_edges, 1);
    }

    #[test]
    fn test_export_is_deterministic() {
        let config = SchemeConfig::new("ICD9CM", "2013");
        let concepts = scenario();
        let (first, _) = export(&config, &concepts);
        let (second, _) = export(&config, &concepts);
        assert_eq!(first, second);
    }

    #[test]
    fn test_quad_output() {
        let config = SchemeConfig::new("ICD9CM", "2013")
            .with_graph_uri(Some("http://example.org/graph/icd9".to_string()));
        let (out, _) = export(&config, &scenario());
        assert!(out
            .lines()
            .all(|l| l.ends_with("<http://example.org/graph/icd9> .")));
    }

    #[test]
    fn test_from_registry_joins_versions() {
        use umls_types::VocabularyMeta;

        let mut registry = VocabularyRegistry::new();
        for (sab, version) in [("ICD10CM", "2012"), ("ICD10PCS", "2012_01")] {
            let row: RrfRow = [
                ("RSAB", Some(sab.to_string())),
                ("SVER", Some(version.to_string())),
                ("CURVER", Some("Y".to_string())),
            ]
            .into_iter()
            .collect();
            registry.insert(VocabularyMeta::new(row));
        }

        let sabs: SabSet = ["ICD10CM", "ICD10PCS"].into_iter().collect();
        let config =
            SchemeConfig::from_registry(&sabs, &registry, HierarchyRelation::parent()).unwrap();
        assert_eq!(config.abbreviation, "ICD10CM_ICD10PCS");
        assert_eq!(config.version, "2012_2012_01");
    }
}
