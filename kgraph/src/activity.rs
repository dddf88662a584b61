//! Tool-usage counters for the graph pipeline.
//!
//! Tracks how often facts are added, the state is checked, and the store is
//! reset, so operators can see graph growth without reading the store itself.
//! Counters are atomics; one instance is shared across the layer that calls
//! tools (e.g. the serve `AppState`).

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::store::SharedKnowledgeBase;
use crate::tools::{TOOL_ADD_TRIPLET, TOOL_GET_GRAPH_STATE, TOOL_RESET_GRAPH};

/// Process-wide counters for graph tool usage.
///
/// Call [`GraphActivity::note_tool_call`] after each successful tool call;
/// unrecognized tool names are ignored so the observer stays decoupled from
/// the registry's contents.
#[derive(Debug, Default)]
pub struct GraphActivity {
    triplets_added: AtomicU64,
    state_checks: AtomicU64,
    resets: AtomicU64,
}

impl GraphActivity {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one successful call of the named tool.
    pub fn note_tool_call(&self, name: &str) {
        match name {
            TOOL_ADD_TRIPLET => {
                let total = self.triplets_added.fetch_add(1, Ordering::Relaxed) + 1;
                info!(total_triplets = total, "new knowledge recorded");
            }
            TOOL_GET_GRAPH_STATE => {
                self.state_checks.fetch_add(1, Ordering::Relaxed);
            }
            TOOL_RESET_GRAPH => {
                let total = self.resets.fetch_add(1, Ordering::Relaxed) + 1;
                info!(total_resets = total, "graph reset requested");
            }
            _ => {}
        }
    }

    /// Counter snapshot plus the store's current size.
    pub fn stats(&self, kb: &SharedKnowledgeBase) -> ActivityStats {
        ActivityStats {
            triplets_added: self.triplets_added.load(Ordering::Relaxed),
            state_checks: self.state_checks.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
            graph_size: GraphSize {
                nodes: kb.node_count(),
                edges: kb.edge_count(),
            },
        }
    }
}

/// Current node/edge counts, embedded in [`ActivityStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GraphSize {
    pub nodes: usize,
    pub edges: usize,
}

/// Serializable view of the activity counters.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActivityStats {
    pub triplets_added: u64,
    pub state_checks: u64,
    pub resets: u64,
    pub graph_size: GraphSize,
}
