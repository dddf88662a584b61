//! Snapshot renderers: JSON for downloads, Graphviz DOT for external layout
//! tools, plain text for terminals and logs.
//!
//! The core owns no image format; DOT and JSON are the text artifacts a
//! drawing facility or dashboard consumes.

use std::fmt::Write;

use crate::store::GraphSnapshot;

/// Compact JSON form of the snapshot (`{"nodes": [...], "edges": [...]}`).
pub fn to_json(snapshot: &GraphSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(snapshot)
}

/// Pretty-printed JSON form, for downloadable exports.
pub fn to_json_pretty(snapshot: &GraphSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

/// Escape a label for use inside a double-quoted DOT string.
fn dot_escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Generate a Graphviz DOT digraph with relation-labelled edges.
///
/// Nodes appear in first-appearance order and edges in creation order, so the
/// rendering is stable across identical stores.
pub fn to_dot(snapshot: &GraphSnapshot) -> String {
    let mut dot = String::from("digraph knowledge_graph {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=box];\n\n");

    for node in &snapshot.nodes {
        dot.push_str(&format!("  \"{}\";\n", dot_escape(node)));
    }

    if !snapshot.edges.is_empty() {
        dot.push('\n');
    }
    for edge in &snapshot.edges {
        dot.push_str(&format!(
            "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
            dot_escape(&edge.source),
            dot_escape(&edge.target),
            dot_escape(&edge.relation)
        ));
    }

    dot.push_str("}\n");
    dot
}

/// Generate a human-readable listing of the snapshot.
pub fn to_text(snapshot: &GraphSnapshot) -> String {
    let mut text = String::new();
    writeln!(
        text,
        "Knowledge graph: {} nodes, {} edges",
        snapshot.nodes.len(),
        snapshot.edges.len()
    )
    .unwrap();
    for edge in &snapshot.edges {
        writeln!(
            text,
            "  ({}) -[{}]-> ({})",
            edge.source, edge.relation, edge.target
        )
        .unwrap();
    }
    text
}
