//! Exported graph view: ordered node labels plus ordered labelled edges.
//!
//! The snapshot is the wire shape consumed by the presentation layer and the
//! exports: `{"nodes": [...], "edges": [{"source", "target", "relation"}]}`.

/// One directed, labelled edge of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    /// Source entity label.
    pub source: String,
    /// Target entity label.
    pub target: String,
    /// Current predicate for this (source, target) pair.
    pub relation: String,
}

/// Immutable point-in-time view of a [`KnowledgeBase`](super::KnowledgeBase).
///
/// `nodes` lists every distinct entity in first-appearance order; `edges`
/// lists one entry per ordered (source, target) pair in creation order. Every
/// edge's endpoints appear in `nodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// True when the snapshot holds no nodes (and therefore no edges).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
