//! Attributed taxonomy graphs.

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::info;

use crate::types::{BridgeError, BridgeResult};

/// Node attribute holding the display label.
pub const LABEL_KEY: &str = "Label";
/// Node attribute holding the source code.
pub const CODE_KEY: &str = "code";
/// Node attribute holding the UMLS CUI.
pub const CUI_KEY: &str = "CUI";

/// Progress is logged every this many processed nodes or rows.
pub const PROGRESS_INTERVAL: usize = 500;

/// One taxonomy node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributedNode {
    /// Node id, unique within its graph.
    pub id: String,
    /// Attributes read from the graph file.
    pub attributes: BTreeMap<String, String>,
    /// Distance from the graph root, once labeled.
    pub depth: Option<u32>,
}

impl AttributedNode {
    /// Creates a node without attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Sets an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Looks up an attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Display label.
    pub fn label(&self) -> Option<&str> {
        self.attribute(LABEL_KEY)
    }

    /// Source code.
    pub fn code(&self) -> Option<&str> {
        self.attribute(CODE_KEY)
    }

    /// UMLS CUI.
    pub fn cui(&self) -> Option<&str> {
        self.attribute(CUI_KEY)
    }
}

/// An undirected taxonomy graph with node lookup by id.
///
/// Edges keep the `source`/`target` orientation they were added with, which
/// [`Traversal::ReverseEdges`](crate::Traversal::ReverseEdges) relies on.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyGraph {
    graph: UnGraph<AttributedNode, ()>,
    ids: HashMap<String, NodeIndex>,
}

impl TaxonomyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node; a node with an existing id replaces its attributes.
    pub fn add_node(&mut self, node: AttributedNode) -> NodeIndex {
        if let Some(&idx) = self.ids.get(&node.id) {
            self.graph[idx] = node;
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.ids.insert(id, idx);
        idx
    }

    /// Adds an edge between two existing node ids.
    pub fn add_edge(&mut self, source: &str, target: &str) -> BridgeResult<()> {
        let source_idx = self.require(source)?;
        let target_idx = self.require(target)?;
        self.graph.add_edge(source_idx, target_idx, ());
        Ok(())
    }

    fn require(&self, id: &str) -> BridgeResult<NodeIndex> {
        self.index_of(id)
            .ok_or_else(|| BridgeError::InvalidGraphMl(format!("edge refers to unknown node {}", id)))
    }

    /// Index of a node id.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.ids.get(id).copied()
    }

    /// Node at an index.
    pub fn node(&self, idx: NodeIndex) -> &AttributedNode {
        &self.graph[idx]
    }

    /// Node with an id.
    pub fn node_by_id(&self, id: &str) -> Option<&AttributedNode> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    /// Iterates over nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &AttributedNode)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Iterates over edges as `(source, target)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(move |e| self.graph.edge_endpoints(e))
    }

    /// The underlying graph.
    pub fn inner(&self) -> &UnGraph<AttributedNode, ()> {
        &self.graph
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Sets the depth of a node.
    pub fn set_depth(&mut self, idx: NodeIndex, depth: Option<u32>) {
        self.graph[idx].depth = depth;
    }

    /// Returns a copy with every node id prefixed.
    pub fn prefixed(&self, prefix: &str) -> Self {
        let mut out = Self::new();
        for (_, node) in self.nodes() {
            let mut node = node.clone();
            node.id = format!("{}{}", prefix, node.id);
            out.add_node(node);
        }
        for (source, target) in self.edges() {
            // Indices are preserved because nodes were copied in order.
            out.graph.add_edge(source, target, ());
        }
        out
    }

    /// Combines two graphs whose node ids must be disjoint.
    ///
    /// Nodes of `first` come before nodes of `second`.
    pub fn union(first: &Self, second: &Self) -> BridgeResult<Self> {
        let mut out = first.clone();
        let mut mapping = HashMap::with_capacity(second.node_count());

        for (idx, node) in second.nodes() {
            if out.ids.contains_key(&node.id) {
                return Err(BridgeError::PrefixCollision(format!(
                    "node {} exists in both graphs",
                    node.id
                )));
            }
            mapping.insert(idx, out.add_node(node.clone()));
        }
        for (source, target) in second.edges() {
            if let (Some(&s), Some(&t)) = (mapping.get(&source), mapping.get(&target)) {
                out.graph.add_edge(s, t, ());
            }
        }
        Ok(out)
    }

    /// Adds an edge between every first-prefixed and second-prefixed node
    /// pair with the same CUI. Nodes without a CUI are never bridged.
    ///
    /// Returns the number of edges added.
    pub fn add_cui_bridges(&mut self, first_prefix: &str, second_prefix: &str) -> usize {
        let mut first_by_cui: BTreeMap<&str, Vec<NodeIndex>> = BTreeMap::new();
        let mut second_nodes = Vec::new();

        for (idx, node) in self.nodes() {
            let Some(cui) = node.cui() else { continue };
            if node.id.starts_with(first_prefix) {
                first_by_cui.entry(cui).or_default().push(idx);
            } else if node.id.starts_with(second_prefix) {
                second_nodes.push((idx, cui));
            }
        }

        let total = second_nodes.len();
        let mut bridges = Vec::new();
        for (processed, (idx, cui)) in second_nodes.into_iter().enumerate() {
            if let Some(targets) = first_by_cui.get(cui) {
                bridges.extend(targets.iter().map(|&target| (idx, target)));
            }
            if (processed + 1) % PROGRESS_INTERVAL == 0 {
                info!("{} nodes processed out of {}", processed + 1, total);
            }
        }

        for &(second, first) in &bridges {
            self.graph.add_edge(second, first, ());
        }
        bridges.len()
    }
}
