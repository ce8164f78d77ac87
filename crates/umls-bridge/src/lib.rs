//! # umls-bridge
//!
//! Combines two UMLS-derived taxonomies exported as GraphML and reports how
//! paths from the second taxonomy cross into the first.
//!
//! Each graph gets a root (an endpoint of its longest shortest path) and
//! breadth-first depths from that root. The graphs are prefixed, unioned and
//! joined by an edge for every node pair sharing a CUI. For every
//! second-graph node connected to the first root, the simple path crossing
//! the fewest second-graph nodes is chosen, and each hop from a
//! second-graph node onto a first-graph node becomes one CSV row.
//!
//! ```no_run
//! use umls_bridge::{BridgeConfig, TaxonomyBridge};
//!
//! let bridge = TaxonomyBridge::new(BridgeConfig::new("icd-", "sno-"))?;
//! let stats = bridge.run_files("icd9.graphml", "snomed.graphml", "paths.csv")?;
//! println!("{} rows", stats.rows);
//! # Ok::<(), umls_bridge::BridgeError>(())
//! ```

#![warn(missing_docs)]

mod bridge;
pub mod depth;
pub mod export;
mod graph;
pub mod graphml;
pub mod path;
mod types;

pub use bridge::TaxonomyBridge;
pub use depth::{find_root, label_depths, label_from_root};
pub use export::{TransitionWriter, HEADER};
pub use graph::{AttributedNode, TaxonomyGraph, CODE_KEY, CUI_KEY, LABEL_KEY, PROGRESS_INTERVAL};
pub use graphml::{read_graphml, read_graphml_file};
pub use path::{NodeSummary, TransitionRow, TransitionSearch};
pub use types::{BridgeConfig, BridgeError, BridgeResult, BridgeStats, Traversal};

pub use petgraph::graph::NodeIndex;
