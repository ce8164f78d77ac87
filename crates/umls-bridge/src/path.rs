//! Transition path search across two bridged taxonomies.
//!
//! Starting from every second-graph node that can reach the first graph's
//! root, the search picks the simple path that crosses the fewest
//! second-graph nodes and reports each hop from a second-graph node onto a
//! first-graph node.

use petgraph::algo::all_simple_paths;
use petgraph::graph::NodeIndex;
use petgraph::visit::Bfs;

use crate::graph::{AttributedNode, TaxonomyGraph};
use crate::types::BridgeConfig;

/// Label, code, CUI and depth of one node as written to the path table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSummary {
    /// Display label.
    pub label: Option<String>,
    /// Source code.
    pub code: Option<String>,
    /// UMLS CUI.
    pub cui: Option<String>,
    /// Depth within its own taxonomy.
    pub depth: Option<u32>,
}

impl From<&AttributedNode> for NodeSummary {
    fn from(node: &AttributedNode) -> Self {
        Self {
            label: node.label().map(str::to_string),
            code: node.code().map(str::to_string),
            cui: node.cui().map(str::to_string),
            depth: node.depth,
        }
    }
}

/// One hop from the second taxonomy into the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRow {
    /// The second-graph node the path started from.
    pub start: NodeSummary,
    /// Last second-graph node before the hop.
    pub pre_transition: NodeSummary,
    /// First first-graph node after the hop.
    pub post_transition: NodeSummary,
}

/// Path search from second-graph nodes to the first graph's root.
pub struct TransitionSearch<'a> {
    graph: &'a TaxonomyGraph,
    root: NodeIndex,
    config: &'a BridgeConfig,
}

impl<'a> TransitionSearch<'a> {
    /// Creates a search over a combined graph.
    pub fn new(graph: &'a TaxonomyGraph, root: NodeIndex, config: &'a BridgeConfig) -> Self {
        Self { graph, root, config }
    }

    fn in_first(&self, idx: NodeIndex) -> bool {
        self.graph.node(idx).id.starts_with(&self.config.first_prefix)
    }

    fn in_second(&self, idx: NodeIndex) -> bool {
        self.graph.node(idx).id.starts_with(&self.config.second_prefix)
    }

    /// Second-graph nodes connected to the root, in node order.
    pub fn starts(&self) -> Vec<NodeIndex> {
        let mut reachable = vec![false; self.graph.node_count()];
        let mut bfs = Bfs::new(self.graph.inner(), self.root);
        while let Some(idx) = bfs.next(self.graph.inner()) {
            reachable[idx.index()] = true;
        }

        self.graph
            .nodes()
            .map(|(idx, _)| idx)
            .filter(|idx| reachable[idx.index()] && self.in_second(*idx))
            .collect()
    }

    /// The simple path from `start` to the root with the fewest second-graph
    /// nodes; ties go to the shorter path, then to the first one found.
    pub fn best_path(&self, start: NodeIndex) -> Option<Vec<NodeIndex>> {
        let paths = all_simple_paths::<Vec<NodeIndex>, _>(
            self.graph.inner(),
            start,
            self.root,
            0,
            self.config.max_intermediate_nodes,
        );

        let mut best: Option<((usize, usize), Vec<NodeIndex>)> = None;
        for path in paths {
            let second_nodes = path.iter().filter(|&&idx| self.in_second(idx)).count();
            let key = (second_nodes, path.len());
            if best.as_ref().map_or(true, |(best_key, _)| key < *best_key) {
                best = Some((key, path));
            }
        }
        best.map(|(_, path)| path)
    }

    /// Hops along `path` from a second-graph node onto a first-graph node.
    pub fn transitions(&self, path: &[NodeIndex]) -> Vec<(NodeIndex, NodeIndex)> {
        path.windows(2)
            .filter(|pair| self.in_second(pair[0]) && self.in_first(pair[1]))
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    /// Rows for one start node; nothing if it has no path to the root.
    pub fn rows_for(&self, start: NodeIndex) -> Vec<TransitionRow> {
        let Some(path) = self.best_path(start) else {
            return Vec::new();
        };
        let start_summary = NodeSummary::from(self.graph.node(start));

        self.transitions(&path)
            .into_iter()
            .map(|(pre, post)| TransitionRow {
                start: start_summary.clone(),
                pre_transition: self.graph.node(pre).into(),
                post_transition: self.graph.node(post).into(),
            })
            .collect()
    }

    /// Rows for every start node.
    pub fn rows(&self) -> impl Iterator<Item = TransitionRow> + '_ {
        self.starts().into_iter().flat_map(move |start| self.rows_for(start))
    }
}
