//! GraphML reading.
//!
//! Only what taxonomy exports use is supported: `<key>` declarations for
//! node attributes (with optional `<default>`), `<node>` elements with
//! `<data>` children and `<edge>` elements. Nested graphs, hyperedges and
//! ports are rejected or ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::info;

use crate::graph::{AttributedNode, TaxonomyGraph};
use crate::types::{BridgeError, BridgeResult};

#[derive(Debug)]
struct NodeKey {
    name: String,
    default: Option<String>,
}

enum Open {
    Key(String),
    Node(AttributedNode),
    Data { key: String, value: String },
    Other,
}

/// Reads a GraphML file.
pub fn read_graphml_file<P: AsRef<Path>>(path: P) -> BridgeResult<TaxonomyGraph> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(BridgeError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let graph = read_graphml(BufReader::new(File::open(path)?))?;
    info!(
        "Read {} nodes and {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}

/// Reads GraphML from any buffered reader.
///
/// Edges are resolved after the whole document has been read, so they may
/// appear before the nodes they connect.
pub fn read_graphml<R: BufRead>(input: R) -> BridgeResult<TaxonomyGraph> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut keys: HashMap<String, NodeKey> = HashMap::new();
    let mut graph = TaxonomyGraph::new();
    let mut edges: Vec<(String, String)> = Vec::new();
    let mut stack: Vec<Open> = Vec::new();
    let mut graph_depth = 0usize;
    let mut saw_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let open = match e.name().as_ref() {
                    b"graphml" => {
                        saw_root = true;
                        Open::Other
                    }
                    b"graph" => {
                        graph_depth += 1;
                        if graph_depth > 1 {
                            return Err(BridgeError::InvalidGraphMl("nested graphs are not supported".to_string()));
                        }
                        Open::Other
                    }
                    b"key" => match declare_key(e, &mut keys)? {
                        Some(id) => Open::Key(id),
                        None => Open::Other,
                    },
                    b"default" => Open::Data {
                        key: String::new(),
                        value: String::new(),
                    },
                    b"node" => Open::Node(AttributedNode::new(required(e, b"id", "node")?)),
                    b"edge" => {
                        edges.push(edge_endpoints(e)?);
                        Open::Other
                    }
                    b"data" => Open::Data {
                        key: required(e, b"key", "data")?,
                        value: String::new(),
                    },
                    b"hyperedge" => {
                        return Err(BridgeError::InvalidGraphMl("hyperedges are not supported".to_string()));
                    }
                    _ => Open::Other,
                };
                stack.push(open);
            }
            Event::Empty(ref e) => match e.name().as_ref() {
                b"key" => {
                    declare_key(e, &mut keys)?;
                }
                b"node" => {
                    let node = AttributedNode::new(required(e, b"id", "node")?);
                    graph.add_node(apply_defaults(node, &keys));
                }
                b"edge" => edges.push(edge_endpoints(e)?),
                b"graphml" => saw_root = true,
                _ => {}
            },
            Event::Text(e) => {
                if let Some(Open::Data { value, .. }) = stack.last_mut() {
                    value.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(Open::Data { value, .. }) = stack.last_mut() {
                    value.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(ref e) => {
                let closed = stack.pop();
                match (e.name().as_ref(), closed) {
                    (b"graph", _) => graph_depth = graph_depth.saturating_sub(1),
                    (b"node", Some(Open::Node(node))) => {
                        graph.add_node(apply_defaults(node, &keys));
                    }
                    (b"default", Some(Open::Data { value, .. })) => {
                        if let Some(Open::Key(id)) = stack.last() {
                            if let Some(key) = keys.get_mut(id) {
                                key.default = Some(value);
                            }
                        }
                    }
                    (b"data", Some(Open::Data { key, value })) => {
                        if let Some(Open::Node(node)) = stack.last_mut() {
                            let name = keys.get(&key).map(|k| k.name.clone()).unwrap_or(key);
                            node.attributes.insert(name, value);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(BridgeError::InvalidGraphMl("missing <graphml> root element".to_string()));
    }

    for (source, target) in &edges {
        graph.add_edge(source, target)?;
    }
    Ok(graph)
}

fn attribute(e: &BytesStart<'_>, name: &[u8]) -> BridgeResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn required(e: &BytesStart<'_>, name: &[u8], element: &str) -> BridgeResult<String> {
    attribute(e, name)?.ok_or_else(|| {
        BridgeError::InvalidGraphMl(format!(
            "<{}> without {} attribute",
            element,
            String::from_utf8_lossy(name)
        ))
    })
}

fn edge_endpoints(e: &BytesStart<'_>) -> BridgeResult<(String, String)> {
    Ok((required(e, b"source", "edge")?, required(e, b"target", "edge")?))
}

/// Registers a node key and returns its id; keys for other domains are skipped.
fn declare_key(e: &BytesStart<'_>, keys: &mut HashMap<String, NodeKey>) -> BridgeResult<Option<String>> {
    let domain = attribute(e, b"for")?;
    if !matches!(domain.as_deref(), None | Some("node") | Some("all")) {
        return Ok(None);
    }
    let id = required(e, b"id", "key")?;
    let name = attribute(e, b"attr.name")?.unwrap_or_else(|| id.clone());
    keys.insert(
        id.clone(),
        NodeKey {
            name,
            default: None,
        },
    );
    Ok(Some(id))
}

fn apply_defaults(mut node: AttributedNode, keys: &HashMap<String, NodeKey>) -> AttributedNode {
    for key in keys.values() {
        if let Some(ref default) = key.default {
            node.attributes
                .entry(key.name.clone())
                .or_insert_with(|| default.clone());
        }
    }
    node
}
