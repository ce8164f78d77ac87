//! Line-oriented N-Triples / N-Quads writer.

use std::borrow::Cow;
use std::io::Write;

use crate::types::UmlsResult;

/// Namespaces and terms used by the SKOS export.
pub mod vocab {
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// SKOS namespace.
    pub const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
    /// SKOS-XL namespace.
    pub const SKOSXL: &str = "http://www.w3.org/2008/05/skos-xl#";

    /// rdf:type
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// rdfs:label
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    /// rdfs:seeAlso
    pub const RDFS_SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
    /// owl:versionInfo
    pub const OWL_VERSION_INFO: &str = "http://www.w3.org/2002/07/owl#versionInfo";

    /// skos:Concept
    pub const SKOS_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";
    /// skos:ConceptScheme
    pub const SKOS_CONCEPT_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#ConceptScheme";
    /// skos:inScheme
    pub const SKOS_IN_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#inScheme";
    /// skos:notation
    pub const SKOS_NOTATION: &str = "http://www.w3.org/2004/02/skos/core#notation";
    /// skos:prefLabel
    pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
    /// skos:definition
    pub const SKOS_DEFINITION: &str = "http://www.w3.org/2004/02/skos/core#definition";
    /// skos:broader
    pub const SKOS_BROADER: &str = "http://www.w3.org/2004/02/skos/core#broader";
    /// skos:narrower
    pub const SKOS_NARROWER: &str = "http://www.w3.org/2004/02/skos/core#narrower";
    /// skos:hasTopConcept
    pub const SKOS_HAS_TOP_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#hasTopConcept";
    /// skos:topConceptOf
    pub const SKOS_TOP_CONCEPT_OF: &str = "http://www.w3.org/2004/02/skos/core#topConceptOf";
    /// skos:exactMatch
    pub const SKOS_EXACT_MATCH: &str = "http://www.w3.org/2004/02/skos/core#exactMatch";
    /// skos:broadMatch
    pub const SKOS_BROAD_MATCH: &str = "http://www.w3.org/2004/02/skos/core#broadMatch";

    /// skosxl:Label
    pub const SKOSXL_LABEL: &str = "http://www.w3.org/2008/05/skos-xl#Label";
    /// skosxl:prefLabel
    pub const SKOSXL_PREF_LABEL: &str = "http://www.w3.org/2008/05/skos-xl#prefLabel";
    /// skosxl:literalForm
    pub const SKOSXL_LITERAL_FORM: &str = "http://www.w3.org/2008/05/skos-xl#literalForm";
}

/// Object position of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Object<'a> {
    /// `<iri>`
    Iri(&'a str),
    /// `"literal"`
    Plain(&'a str),
    /// `"literal"^^<datatype>`
    Typed(&'a str, &'a str),
    /// `"literal"@lang`
    Lang(&'a str, &'a str),
}

/// Writes one statement per line, optionally inside a named graph.
pub struct NTriplesWriter<W: Write> {
    writer: W,
    graph: Option<String>,
    statements: usize,
}

impl<W: Write> NTriplesWriter<W> {
    /// Creates a writer producing triples.
    pub fn new(writer: W) -> Self {
        Self::with_graph(writer, None)
    }

    /// Creates a writer producing quads when `graph` is set.
    pub fn with_graph(writer: W, graph: Option<String>) -> Self {
        Self {
            writer,
            graph,
            statements: 0,
        }
    }

    /// Writes `<subject> <predicate> object .`
    pub fn statement(&mut self, subject: &str, predicate: &str, object: Object<'_>) -> UmlsResult<()> {
        write!(self.writer, "<{}> <{}> ", subject, predicate)?;
        match object {
            Object::Iri(iri) => write!(self.writer, "<{}>", iri)?,
            Object::Plain(literal) => write!(self.writer, "\"{}\"", escape_literal(literal))?,
            Object::Typed(literal, datatype) => {
                write!(self.writer, "\"{}\"^^<{}>", escape_literal(literal), datatype)?
            }
            Object::Lang(literal, lang) => {
                write!(self.writer, "\"{}\"@{}", escape_literal(literal), lang)?
            }
        }
        if let Some(ref graph) = self.graph {
            write!(self.writer, " <{}>", graph)?;
        }
        self.writer.write_all(b" .\n")?;
        self.statements += 1;
        Ok(())
    }

    /// Shorthand for an IRI object.
    pub fn iri(&mut self, subject: &str, predicate: &str, object: &str) -> UmlsResult<()> {
        self.statement(subject, predicate, Object::Iri(object))
    }

    /// Shorthand for a typed literal object.
    pub fn typed(&mut self, subject: &str, predicate: &str, literal: &str, datatype: &str) -> UmlsResult<()> {
        self.statement(subject, predicate, Object::Typed(literal, datatype))
    }

    /// Shorthand for a language-tagged literal object.
    pub fn lang(&mut self, subject: &str, predicate: &str, literal: &str, lang: &str) -> UmlsResult<()> {
        self.statement(subject, predicate, Object::Lang(literal, lang))
    }

    /// Number of statements written so far.
    pub fn statements(&self) -> usize {
        self.statements
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> UmlsResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Escapes a literal for the N-Triples string form.
pub fn escape_literal(literal: &str) -> Cow<'_, str> {
    if !literal.contains(['\\', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(literal);
    }

    let mut escaped = String::with_capacity(literal.len() + 8);
    for c in literal.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
