//! Error and configuration types for the taxonomy bridge.

use thiserror::Error;

/// Errors that can occur while loading or bridging taxonomies.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// I/O error reading or writing a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Well-formed XML that is not a usable GraphML document.
    #[error("Invalid GraphML: {0}")]
    InvalidGraphMl(String),

    /// A graph without nodes has no root.
    #[error("Graph {name} has no nodes")]
    EmptyGraph {
        /// Name of the graph.
        name: String,
    },

    /// Two graphs cannot be told apart after prefixing.
    #[error("Node id collision: {0}")]
    PrefixCollision(String),
}

impl From<quick_xml::events::attributes::AttrError> for BridgeError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        BridgeError::Xml(err.into())
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// How depth labeling walks the edges of a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Traversal {
    /// Follow every edge in both directions.
    #[default]
    Undirected,
    /// Follow each edge only from its `target` to its `source`.
    ReverseEdges,
}

impl std::str::FromStr for Traversal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "undirected" => Ok(Traversal::Undirected),
            "reverse-edges" | "reverse_edges" | "reverse" => Ok(Traversal::ReverseEdges),
            other => Err(format!("unknown traversal mode: {}", other)),
        }
    }
}

/// Settings for bridging two taxonomies.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Prefix added to node ids of the first (target) taxonomy.
    pub first_prefix: String,
    /// Prefix added to node ids of the second (starting) taxonomy.
    pub second_prefix: String,
    /// Edge walking mode for depth labeling.
    pub traversal: Traversal,
    /// Upper bound on intermediate nodes of a candidate path (`None` = unbounded).
    pub max_intermediate_nodes: Option<usize>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            first_prefix: "g1-".to_string(),
            second_prefix: "g2-".to_string(),
            traversal: Traversal::Undirected,
            max_intermediate_nodes: None,
        }
    }
}

impl BridgeConfig {
    /// Creates a config with the given prefixes.
    pub fn new(first_prefix: impl Into<String>, second_prefix: impl Into<String>) -> Self {
        Self {
            first_prefix: first_prefix.into(),
            second_prefix: second_prefix.into(),
            ..Default::default()
        }
    }

    /// Sets the traversal mode.
    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// Bounds the length of candidate paths.
    pub fn with_max_intermediate_nodes(mut self, max: Option<usize>) -> Self {
        self.max_intermediate_nodes = max;
        self
    }

    /// Checks that node ids of the two graphs stay distinguishable.
    pub fn validate(&self) -> BridgeResult<()> {
        let (first, second) = (&self.first_prefix, &self.second_prefix);
        if first.is_empty() || second.is_empty() {
            return Err(BridgeError::PrefixCollision("prefixes must not be empty".to_string()));
        }
        if first.starts_with(second.as_str()) || second.starts_with(first.as_str()) {
            return Err(BridgeError::PrefixCollision(format!(
                "prefix {:?} overlaps {:?}",
                first, second
            )));
        }
        Ok(())
    }
}

/// Summary of one bridge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeStats {
    /// Nodes depth-labeled in the first graph.
    pub first_labeled: usize,
    /// Nodes depth-labeled in the second graph.
    pub second_labeled: usize,
    /// Cross-graph edges added for shared CUIs.
    pub bridge_edges: usize,
    /// Second-graph nodes connected to the first root.
    pub connected_starts: usize,
    /// Transition rows written.
    pub rows: usize,
}
