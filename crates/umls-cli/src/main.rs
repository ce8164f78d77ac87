//! `umls-skos`: extract UMLS source vocabularies and publish them as SKOS.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use umls_bridge::{BridgeConfig, TaxonomyBridge, Traversal};
use umls_loader::{
    extract_config_for, hierarchy_for, read_mapping_file, ColumnLayout, ConceptExtractor, CrossVocabularyLinker,
    Extraction, HierarchyExporter, MappingColumns, SchemeConfig, DEFAULT_BASE_URI,
};
use umls_types::{HierarchyRelation, SabSet};

const DATA_PATH_VAR: &str = "UMLS_DATA_PATH";
const LAYOUT_FILE: &str = "umls_file_layout.json";
const SCHEMA_FILE: &str = "mysql_tables.sql";

#[derive(Parser)]
#[command(name = "umls-skos", version, about = "Publish UMLS source vocabularies as SKOS")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the MySQL load script into a column layout file.
    Layout {
        /// Schema dump (defaults to `<data-dir>/mysql_tables.sql`).
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Layout file to write (defaults to `<data-dir>/umls_file_layout.json`).
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        data: DataArgs,
    },

    /// Extract one vocabulary into its JSON cache.
    Extract {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Extract (or load) a vocabulary and write `<ABBR>_isf_skos.nt`.
    Publish {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        scheme: SchemeArgs,
        /// Directory for the N-Triples file.
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },

    /// Write annotation and mapping files between two vocabularies.
    Link {
        /// Source abbreviations of the "from" vocabulary.
        #[arg(long = "from", required = true, value_delimiter = ',')]
        from_sabs: Vec<String>,
        /// Source abbreviations of the "to" vocabulary.
        #[arg(long = "to", required = true, value_delimiter = ',')]
        to_sabs: Vec<String>,
        /// Mapping table (CSV with a header row).
        #[arg(long)]
        mapping: Option<PathBuf>,
        /// Re-extract even if caches exist.
        #[arg(long)]
        refresh: bool,
        #[command(flatten)]
        data: DataArgs,
        #[command(flatten)]
        scheme: SchemeArgs,
        /// Directory for the N-Triples files.
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },

    /// Combine two GraphML taxonomies and write transition paths as CSV.
    Bridge {
        /// Taxonomy whose root the paths lead to.
        #[arg(long)]
        first: PathBuf,
        /// Taxonomy the paths start from.
        #[arg(long)]
        second: PathBuf,
        /// CSV file to write.
        #[arg(long)]
        output: PathBuf,
        /// Node id prefix of the first taxonomy.
        #[arg(long, default_value = "g1-")]
        first_prefix: String,
        /// Node id prefix of the second taxonomy.
        #[arg(long, default_value = "g2-")]
        second_prefix: String,
        /// `undirected` or `reverse-edges`.
        #[arg(long, default_value = "undirected")]
        traversal: Traversal,
        /// Skip candidate paths with more intermediate nodes than this.
        #[arg(long)]
        max_intermediate_nodes: Option<usize>,
    },
}

#[derive(Args)]
struct DataArgs {
    /// Directory holding the RRF files (defaults to $UMLS_DATA_PATH, then `.`).
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl DataArgs {
    fn resolve(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            std::env::var(DATA_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        })
    }
}

#[derive(Args)]
struct SourceArgs {
    /// Source abbreviations; several make a merged vocabulary.
    #[arg(long = "sab", required = true, value_delimiter = ',')]
    sabs: Vec<String>,
    /// Term types to keep (defaults to the vocabulary's preset).
    #[arg(long = "tty", value_delimiter = ',')]
    term_types: Vec<String>,
    /// Re-extract even if a cache exists.
    #[arg(long)]
    refresh: bool,
    #[command(flatten)]
    data: DataArgs,
}

#[derive(Args)]
struct SchemeArgs {
    /// Base URI of minted concepts.
    #[arg(long, default_value = DEFAULT_BASE_URI)]
    base_uri: String,
    /// Hierarchy selector such as `REL=PAR` or `RELA=inverse_isa`.
    #[arg(long)]
    hierarchy: Option<HierarchyRelation>,
    /// Also declare atoms without hierarchy edges as top concepts.
    #[arg(long)]
    include_isolated: bool,
    /// Write quads into this named graph.
    #[arg(long)]
    graph_uri: Option<String>,
}

impl SchemeArgs {
    fn scheme_config(&self, sabs: &SabSet, extraction: &Extraction) -> Result<SchemeConfig, Box<dyn std::error::Error>> {
        let hierarchy = self.hierarchy.clone().unwrap_or_else(|| hierarchy_for(sabs));
        let mut config = SchemeConfig::from_registry(sabs, &extraction.registry, hierarchy)?
            .with_base_uri(self.base_uri.clone())
            .with_graph_uri(self.graph_uri.clone());
        config.include_isolated_top_concepts = self.include_isolated;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layout { schema, output, data } => {
            let data_dir = data.resolve();
            let schema = schema.unwrap_or_else(|| data_dir.join(SCHEMA_FILE));
            let output = output.unwrap_or_else(|| data_dir.join(LAYOUT_FILE));
            let layout = ColumnLayout::from_schema_path(&schema)?;
            layout.save(&output)?;
            tracing::info!("Wrote layout of {} files to {}", layout.len(), output.display());
        }

        Commands::Extract { source } => {
            let data_dir = source.data.resolve();
            let layout = load_layout(&data_dir)?;
            let sabs: SabSet = source.sabs.iter().map(String::as_str).collect();
            let extraction = extract(&data_dir, &layout, &sabs, &source.term_types, source.refresh)?;
            if extraction.from_cache {
                tracing::info!("{} atoms of {} already cached", extraction.concepts.len(), sabs);
            } else {
                let stats = &extraction.stats;
                tracing::info!(
                    "Extracted {} atoms of {} ({} relationships, {} attributes, {} definitions)",
                    extraction.concepts.len(),
                    sabs,
                    stats.kept_relationships,
                    stats.kept_attributes,
                    stats.kept_definitions
                );
            }
        }

        Commands::Publish {
            source,
            scheme,
            output_dir,
        } => {
            let data_dir = source.data.resolve();
            let layout = load_layout(&data_dir)?;
            let sabs: SabSet = source.sabs.iter().map(String::as_str).collect();
            let extraction = extract(&data_dir, &layout, &sabs, &source.term_types, source.refresh)?;
            let config = scheme.scheme_config(&sabs, &extraction)?;

            std::fs::create_dir_all(&output_dir)?;
            let path = output_dir.join(format!("{}_isf_skos.nt", config.abbreviation));
            let stats = HierarchyExporter::new(&config, &extraction.concepts).write_to_path(&path)?;
            tracing::info!(
                "{} concepts, {} broader edges, {} top concepts",
                stats.concepts,
                stats.broader_edges,
                stats.top_concepts
            );
        }

        Commands::Link {
            from_sabs,
            to_sabs,
            mapping,
            refresh,
            data,
            scheme,
            output_dir,
        } => {
            let data_dir = data.resolve();
            let layout = load_layout(&data_dir)?;
            let from_sabs: SabSet = from_sabs.iter().map(String::as_str).collect();
            let to_sabs: SabSet = to_sabs.iter().map(String::as_str).collect();

            let from_extraction = extract(&data_dir, &layout, &from_sabs, &[], refresh)?;
            let to_extraction = extract(&data_dir, &layout, &to_sabs, &[], refresh)?;
            let from_config = scheme.scheme_config(&from_sabs, &from_extraction)?;
            let to_config = scheme.scheme_config(&to_sabs, &to_extraction)?;

            let from = HierarchyExporter::new(&from_config, &from_extraction.concepts);
            let to = HierarchyExporter::new(&to_config, &to_extraction.concepts);
            let rows = mapping
                .map(|path| read_mapping_file(path, &MappingColumns::default()))
                .transpose()?;

            std::fs::create_dir_all(&output_dir)?;
            let linker = CrossVocabularyLinker::new(&from, &to);
            let (outputs, stats) = linker.write_to_dir(&output_dir, rows.as_deref())?;
            tracing::info!(
                "Wrote {} and {} ({} shared CUIs)",
                outputs.from_annotations.display(),
                outputs.to_annotations.display(),
                stats.shared_cuis
            );
            if let Some(path) = outputs.mapping {
                tracing::info!(
                    "Wrote {} ({} exact, {} broad)",
                    path.display(),
                    stats.exact_matches,
                    stats.broad_matches
                );
            }
        }

        Commands::Bridge {
            first,
            second,
            output,
            first_prefix,
            second_prefix,
            traversal,
            max_intermediate_nodes,
        } => {
            let config = BridgeConfig::new(first_prefix, second_prefix)
                .with_traversal(traversal)
                .with_max_intermediate_nodes(max_intermediate_nodes);
            let stats = TaxonomyBridge::new(config)?.run_files(&first, &second, &output)?;
            tracing::info!(
                "{} bridge edges, {} rows for {} connected nodes",
                stats.bridge_edges,
                stats.rows,
                stats.connected_starts
            );
        }
    }

    Ok(())
}

/// Loads the saved layout, falling back to parsing the schema dump.
fn load_layout(data_dir: &Path) -> Result<ColumnLayout, Box<dyn std::error::Error>> {
    let saved = data_dir.join(LAYOUT_FILE);
    if saved.exists() {
        return Ok(ColumnLayout::load(&saved)?);
    }
    tracing::info!("No {} in {}, parsing {}", LAYOUT_FILE, data_dir.display(), SCHEMA_FILE);
    Ok(ColumnLayout::from_schema_path(data_dir.join(SCHEMA_FILE))?)
}

fn extract(
    data_dir: &Path,
    layout: &ColumnLayout,
    sabs: &SabSet,
    term_types: &[String],
    refresh: bool,
) -> Result<Extraction, Box<dyn std::error::Error>> {
    let config = extract_config_for(sabs, term_types).with_refresh(refresh);
    tracing::info!("Loading {} from {}", sabs, data_dir.display());
    Ok(ConceptExtractor::new(data_dir, layout, config).extract_or_load()?)
}
