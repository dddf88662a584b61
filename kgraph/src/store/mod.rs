//! Triplet store: facts in, directed-graph snapshots out.
//!
//! [`KnowledgeBase`] accumulates (subject, predicate, object) facts as a
//! directed graph. Nodes are opaque case-sensitive labels identified by exact
//! string equality; no normalization (casing, trimming, synonym merging) is
//! performed. Every operation is total: empty strings are valid labels here,
//! and callers that need validation do it at the tool boundary
//! (see [`crate::tools`]).
//!
//! **Interaction**: wrapped by [`SharedKnowledgeBase`] for cross-task use;
//! read by the tools in `crate::tools::graph` and rendered by `crate::export`.

mod shared;
mod snapshot;

pub use shared::SharedKnowledgeBase;
pub use snapshot::{Edge, GraphSnapshot};

use std::collections::HashMap;
use std::fmt;

/// Directed edge stored by node index; `relation` is the current predicate.
#[derive(Debug, Clone)]
struct EdgeSlot {
    source: usize,
    target: usize,
    relation: String,
}

/// In-memory knowledge graph accumulating subject-predicate-object facts.
///
/// Two logical states: empty (no nodes or edges) and populated. `add_triplet`
/// moves empty → populated and keeps populated; `reset` returns to empty from
/// either state; `snapshot` is a pure observer in both.
///
/// Invariants held by construction:
/// - The node set is exactly the union of all subjects and objects added
///   since the last reset, in first-appearance order.
/// - At most one edge exists per ordered (source, target) pair; a repeated
///   fact for the same pair overwrites the predicate in place and the edge
///   keeps its original position in the edge order.
/// - Self-loops are ordinary edges; (A, B) and (B, A) are independent.
///
/// # Examples
///
/// ```
/// use kgraph::KnowledgeBase;
///
/// let mut kb = KnowledgeBase::new();
/// kb.add_triplet("Harry", "is_friend_of", "Ron");
/// kb.add_triplet("Harry", "studies_at", "Hogwarts");
///
/// let snap = kb.snapshot();
/// assert_eq!(snap.nodes, vec!["Harry", "Ron", "Hogwarts"]);
/// assert_eq!(snap.edges.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    /// Node labels in first-appearance order.
    labels: Vec<String>,
    /// Label → index into `labels`.
    node_index: HashMap<String, usize>,
    /// Edges in creation order.
    edges: Vec<EdgeSlot>,
    /// (source index, target index) → index into `edges`.
    edge_index: HashMap<(usize, usize), usize>,
}

impl KnowledgeBase {
    /// Creates an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one fact: ensures both entities exist as nodes and creates or
    /// overwrites the directed edge subject → object with the given predicate.
    ///
    /// Never fails; empty strings are accepted as labels. Returns a
    /// [`Recorded`] confirmation carrying the fact as stored and, on an
    /// overwrite, the predicate it displaced.
    pub fn add_triplet(
        &mut self,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Recorded {
        let subject = subject.into();
        let predicate = predicate.into();
        let object = object.into();

        let s = self.intern(&subject);
        let o = self.intern(&object);

        let replaced = match self.edge_index.get(&(s, o)) {
            Some(&slot) => Some(std::mem::replace(
                &mut self.edges[slot].relation,
                predicate.clone(),
            )),
            None => {
                self.edges.push(EdgeSlot {
                    source: s,
                    target: o,
                    relation: predicate.clone(),
                });
                self.edge_index.insert((s, o), self.edges.len() - 1);
                None
            }
        };

        Recorded {
            subject,
            predicate,
            object,
            replaced,
        }
    }

    /// Returns the label's node index, inserting it in first-seen order.
    fn intern(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.node_index.get(label) {
            return idx;
        }
        let idx = self.labels.len();
        self.labels.push(label.to_string());
        self.node_index.insert(label.to_string(), idx);
        idx
    }

    /// Point-in-time view of the graph: node labels in first-appearance order
    /// and edges in creation order, one per ordered (source, target) pair.
    ///
    /// Every edge's source and target appear in the node sequence. Repeated
    /// calls with no intervening mutation return equal snapshots.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.labels.clone(),
            edges: self
                .edges
                .iter()
                .map(|e| Edge {
                    source: self.labels[e.source].clone(),
                    target: self.labels[e.target].clone(),
                    relation: e.relation.clone(),
                })
                .collect(),
        }
    }

    /// Discards all nodes and edges. Idempotent on an empty store.
    pub fn reset(&mut self) {
        self.labels.clear();
        self.node_index.clear();
        self.edges.clear();
        self.edge_index.clear();
    }

    /// Number of distinct entities seen since the last reset.
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of distinct ordered (source, target) pairs.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when no fact has been added since construction or the last reset.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Confirmation of one recorded fact.
///
/// Carries the fact exactly as stored; `replaced` names the predicate this
/// fact displaced when the ordered (subject, object) pair already had an
/// edge. The `Display` form is the confirmation line handed back to tool
/// callers: `Added: (subject) -[predicate]-> (object)`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Recorded {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    /// Previous predicate for this (subject, object) pair, when overwritten.
    pub replaced: Option<String>,
}

impl fmt::Display for Recorded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Added: ({}) -[{}]-> ({})",
            self.subject, self.predicate, self.object
        )
    }
}
