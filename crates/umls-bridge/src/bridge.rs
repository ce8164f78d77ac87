//! End-to-end bridging of two taxonomy files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::depth::label_from_root;
use crate::export::TransitionWriter;
use crate::graph::TaxonomyGraph;
use crate::graphml::read_graphml_file;
use crate::path::TransitionSearch;
use crate::types::{BridgeConfig, BridgeResult, BridgeStats};

/// Bridges a first (target) taxonomy and a second (starting) taxonomy.
pub struct TaxonomyBridge {
    config: BridgeConfig,
}

impl TaxonomyBridge {
    /// Creates a bridge after checking the prefixes.
    pub fn new(config: BridgeConfig) -> BridgeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The bridge settings.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Labels, combines and searches two graphs, writing the transition table.
    pub fn run<W: Write>(&self, first: &TaxonomyGraph, second: &TaxonomyGraph, output: W) -> BridgeResult<BridgeStats> {
        let config = &self.config;
        let mut stats = BridgeStats::default();

        let mut first = first.prefixed(&config.first_prefix);
        let mut second = second.prefixed(&config.second_prefix);

        let (first_root, first_labeled) = label_from_root(&mut first, "first", config.traversal)?;
        let (second_root, second_labeled) = label_from_root(&mut second, "second", config.traversal)?;
        info!("Root of first taxonomy: {}", first.node(first_root).id);
        info!("Root of second taxonomy: {}", second.node(second_root).id);
        info!(
            "Labeled {} + {} nodes ({} total)",
            first_labeled,
            second_labeled,
            first_labeled + second_labeled
        );
        stats.first_labeled = first_labeled;
        stats.second_labeled = second_labeled;

        // Nodes of the first graph keep their indices in the union.
        let mut combined = TaxonomyGraph::union(&first, &second)?;
        stats.bridge_edges = combined.add_cui_bridges(&config.first_prefix, &config.second_prefix);
        info!("Added {} bridge edges", stats.bridge_edges);

        let search = TransitionSearch::new(&combined, first_root, config);
        let starts = search.starts();
        stats.connected_starts = starts.len();

        let mut writer = TransitionWriter::new(output)?;
        for start in starts {
            writer.write_all(search.rows_for(start))?;
        }
        stats.rows = writer.rows();
        writer.finish()?;

        info!(
            "{} of {} second-graph nodes reach the first root; {} rows written",
            stats.connected_starts,
            second.node_count(),
            stats.rows
        );
        Ok(stats)
    }

    /// Reads both GraphML files and writes the transition table to `output`.
    pub fn run_files<P, Q, O>(&self, first: P, second: Q, output: O) -> BridgeResult<BridgeStats>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        O: AsRef<Path>,
    {
        let first = read_graphml_file(first)?;
        let second = read_graphml_file(second)?;
        let file = File::create(output.as_ref())?;
        let stats = self.run(&first, &second, BufWriter::new(file))?;
        info!("{} generated", output.as_ref().display());
        Ok(stats)
    }
}
