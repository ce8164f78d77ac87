//! Root detection and depth labeling.

use std::collections::VecDeque;

use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::graph::TaxonomyGraph;
use crate::types::{BridgeError, BridgeResult, Traversal};

/// Finds the root of a taxonomy.
///
/// The root is an endpoint of a longest shortest path: among all nodes at
/// the largest distance from some other node, the one with the greatest id.
/// Distances ignore edge direction.
pub fn find_root(graph: &TaxonomyGraph, name: &str) -> BridgeResult<NodeIndex> {
    let mut best: Option<(u32, &str, NodeIndex)> = None;

    for (start, _) in graph.nodes() {
        let distances = dijkstra(graph.inner(), start, None, |_| 1u32);
        for (&idx, &distance) in &distances {
            let id = graph.node(idx).id.as_str();
            let better = match best {
                None => true,
                Some((best_distance, best_id, _)) => {
                    distance > best_distance || (distance == best_distance && id > best_id)
                }
            };
            if better {
                best = Some((distance, id, idx));
            }
        }
    }

    let (distance, id, root) = best.ok_or_else(|| BridgeError::EmptyGraph {
        name: name.to_string(),
    })?;
    debug!("Root of {} is {} at distance {}", name, id, distance);
    Ok(root)
}

/// Labels every node reachable from `root` with its breadth-first depth.
///
/// The root gets depth 0 and each first-discovered neighbor its parent's
/// depth plus one; unreachable nodes are cleared to `None`. Returns the
/// number of labeled nodes, root included.
pub fn label_depths(graph: &mut TaxonomyGraph, root: NodeIndex, traversal: Traversal) -> usize {
    let adjacency = adjacency(graph, traversal);
    let mut depths: Vec<Option<u32>> = vec![None; graph.node_count()];

    depths[root.index()] = Some(0);
    let mut queue = VecDeque::from([root]);
    let mut labeled = 1;

    while let Some(active) = queue.pop_front() {
        let next = depths[active.index()].map(|d| d + 1);
        for &neighbor in &adjacency[active.index()] {
            if depths[neighbor.index()].is_none() {
                depths[neighbor.index()] = next;
                queue.push_back(neighbor);
                labeled += 1;
            }
        }
    }

    for (i, depth) in depths.into_iter().enumerate() {
        graph.set_depth(NodeIndex::new(i), depth);
    }
    labeled
}

/// Finds the root and labels depths in one step.
pub fn label_from_root(
    graph: &mut TaxonomyGraph,
    name: &str,
    traversal: Traversal,
) -> BridgeResult<(NodeIndex, usize)> {
    let root = find_root(graph, name)?;
    let labeled = label_depths(graph, root, traversal);
    Ok((root, labeled))
}

fn adjacency(graph: &TaxonomyGraph, traversal: Traversal) -> Vec<Vec<NodeIndex>> {
    let mut adjacency = vec![Vec::new(); graph.node_count()];
    for (source, target) in graph.edges() {
        adjacency[target.index()].push(source);
        if traversal == Traversal::Undirected {
            adjacency[source.index()].push(target);
        }
    }
    adjacency
}
