//! Links two exported vocabularies through shared CUIs and a mapping table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::mapping::MappingRow;
use crate::ntriples::{vocab, NTriplesWriter};
use crate::skos::HierarchyExporter;
use crate::types::UmlsResult;

/// Counts from one linking run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// CUIs present in both vocabularies.
    pub shared_cuis: usize,
    /// Annotations written into the "from" stream.
    pub from_annotations: usize,
    /// Annotations written into the "to" stream.
    pub to_annotations: usize,
    /// `skos:exactMatch` statements.
    pub exact_matches: usize,
    /// `skos:broadMatch` statements.
    pub broad_matches: usize,
    /// Mapping rows naming a code that no atom of its vocabulary carries.
    pub unknown_codes: usize,
}

/// Output files of [`CrossVocabularyLinker::write_to_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutputs {
    /// `<FROM>_to_<TO>_annotations.nt`.
    pub from_annotations: PathBuf,
    /// `<TO>_to_<FROM>_annotations.nt`.
    pub to_annotations: PathBuf,
    /// `<FROM>_<TO>_isf_mapping.nt`, when mapping rows were given.
    pub mapping: Option<PathBuf>,
}

/// Cross-vocabulary linker over two exporters.
pub struct CrossVocabularyLinker<'a> {
    from: &'a HierarchyExporter<'a>,
    to: &'a HierarchyExporter<'a>,
}

impl<'a> CrossVocabularyLinker<'a> {
    /// Creates a linker from the "from" vocabulary to the "to" vocabulary.
    pub fn new(from: &'a HierarchyExporter<'a>, to: &'a HierarchyExporter<'a>) -> Self {
        Self { from, to }
    }

    /// File name of the annotations on the "from" side.
    pub fn from_annotations_name(&self) -> String {
        annotation_file_name(&self.from.config().abbreviation, &self.to.config().abbreviation)
    }

    /// File name of the annotations on the "to" side.
    pub fn to_annotations_name(&self) -> String {
        annotation_file_name(&self.to.config().abbreviation, &self.from.config().abbreviation)
    }

    /// File name of the mapping statements.
    pub fn mapping_name(&self) -> String {
        format!(
            "{}_{}_isf_mapping.nt",
            self.from.config().abbreviation,
            self.to.config().abbreviation
        )
    }

    /// Writes annotations for every CUI both vocabularies share.
    ///
    /// Each concept on one side gets a `skos:notation` with the code of every
    /// atom on the other side carrying the same CUI, typed to the other
    /// side's code datatype.
    pub fn write_out_annotation_files<F: Write, T: Write>(
        &self,
        from_writer: F,
        to_writer: T,
    ) -> UmlsResult<LinkStats> {
        let mut from_out = NTriplesWriter::with_graph(from_writer, self.from.config().graph_uri.clone());
        let mut to_out = NTriplesWriter::with_graph(to_writer, self.to.config().graph_uri.clone());
        let mut stats = LinkStats::default();

        let shared: Vec<&str> = self.from.index().shared_cuis(self.to.index()).collect();
        stats.shared_cuis = shared.len();

        for cui in shared {
            stats.from_annotations += annotate(&mut from_out, self.from, self.to, cui)?;
            stats.to_annotations += annotate(&mut to_out, self.to, self.from, cui)?;
        }

        from_out.flush()?;
        to_out.flush()?;
        info!(
            "Linked {} shared CUIs ({} + {} annotations)",
            stats.shared_cuis, stats.from_annotations, stats.to_annotations
        );
        Ok(stats)
    }

    /// Writes one match statement per mapping row.
    ///
    /// Rows whose CUIs agree become `skos:exactMatch`, all others
    /// `skos:broadMatch`. Repeated rows produce repeated statements.
    ///
    /// Rows whose source or destination code is unknown to the loaded
    /// vocabulary are still written, and counted in
    /// [`LinkStats::unknown_codes`].
    pub fn write_out_isf_mapping_file<W: Write>(&self, rows: &[MappingRow], writer: W) -> UmlsResult<LinkStats> {
        let mut out = NTriplesWriter::with_graph(writer, self.from.config().graph_uri.clone());
        let mut stats = LinkStats::default();

        for row in rows {
            if !self.from.index().has_code(&row.source_code)
                || !self.to.index().has_code(&row.destination_code)
            {
                stats.unknown_codes += 1;
            }
            let subject = self.from.config().concept_uri(&row.source_code);
            let object = self.to.config().concept_uri(&row.destination_code);
            if row.is_exact() {
                out.iri(&subject, vocab::SKOS_EXACT_MATCH, &object)?;
                stats.exact_matches += 1;
            } else {
                out.iri(&subject, vocab::SKOS_BROAD_MATCH, &object)?;
                stats.broad_matches += 1;
            }
        }

        out.flush()?;
        info!(
            "Wrote {} exact and {} broad matches",
            stats.exact_matches, stats.broad_matches
        );
        if stats.unknown_codes > 0 {
            warn!(
                "{} mapping rows name codes outside the {} {} and {} {} codes",
                stats.unknown_codes,
                self.from.index().code_count(),
                self.from.config().abbreviation,
                self.to.index().code_count(),
                self.to.config().abbreviation
            );
        }
        Ok(stats)
    }

    /// Writes all link files into `directory`, replacing existing ones.
    pub fn write_to_dir<P: AsRef<Path>>(&self, directory: P, rows: Option<&[MappingRow]>) -> UmlsResult<(LinkOutputs, LinkStats)> {
        let directory = directory.as_ref();
        let outputs = LinkOutputs {
            from_annotations: directory.join(self.from_annotations_name()),
            to_annotations: directory.join(self.to_annotations_name()),
            mapping: rows.map(|_| directory.join(self.mapping_name())),
        };

        let mut stats = self.write_out_annotation_files(
            BufWriter::new(File::create(&outputs.from_annotations)?),
            BufWriter::new(File::create(&outputs.to_annotations)?),
        )?;

        if let (Some(rows), Some(path)) = (rows, &outputs.mapping) {
            let mapping = self.write_out_isf_mapping_file(rows, BufWriter::new(File::create(path)?))?;
            stats.exact_matches = mapping.exact_matches;
            stats.broad_matches = mapping.broad_matches;
            stats.unknown_codes = mapping.unknown_codes;
        }

        Ok((outputs, stats))
    }
}

fn annotation_file_name(subject_abbr: &str, object_abbr: &str) -> String {
    format!("{}_to_{}_annotations.nt", subject_abbr, object_abbr)
}

fn annotate<W: Write>(
    out: &mut NTriplesWriter<W>,
    subject_side: &HierarchyExporter<'_>,
    object_side: &HierarchyExporter<'_>,
    cui: &str,
) -> UmlsResult<usize> {
    let datatype = object_side.config().code_datatype();
    let mut written = 0;

    for aui in subject_side.index().auis_for_cui(cui) {
        let Some(subject) = subject_side
            .concepts()
            .get(aui)
            .and_then(|entry| subject_side.config().entry_uri(entry))
        else {
            continue;
        };
        for other in object_side.index().auis_for_cui(cui) {
            let Some(code) = object_side.concepts().get(other).and_then(|e| e.code()) else {
                continue;
            };
            out.typed(&subject, vocab::SKOS_NOTATION, code, &datatype)?;
            written += 1;
        }
    }

    Ok(written)
}
