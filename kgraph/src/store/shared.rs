//! Shared handle for the knowledge base: one coarse mutex around every
//! operation.
//!
//! Call frequency is bounded by the surrounding pipeline (an LLM decides when
//! to add a fact), so a single `std::sync::Mutex` is enough; no operation
//! holds the lock across an await point. A fresh handle per session, or an
//! explicit `reset` between sessions, keeps topics from accumulating into one
//! another.

use std::sync::{Arc, Mutex, MutexGuard};

use super::{GraphSnapshot, KnowledgeBase, Recorded};

/// Cloneable, thread-safe handle to a [`KnowledgeBase`].
///
/// Construct one per process (or per session) and pass it to whichever layer
/// mutates the store; all clones observe the same graph.
///
/// **Interaction**: held by the graph tools in `crate::tools::graph` and by
/// the serve `AppState`; each method takes the mutex for the duration of one
/// store operation.
#[derive(Debug, Clone, Default)]
pub struct SharedKnowledgeBase {
    inner: Arc<Mutex<KnowledgeBase>>,
}

impl SharedKnowledgeBase {
    /// Creates a handle to a fresh, empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the store. A poisoned mutex is recovered by taking the inner
    /// value: no store operation can leave the graph half-updated.
    fn lock(&self) -> MutexGuard<'_, KnowledgeBase> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records one fact. See [`KnowledgeBase::add_triplet`].
    pub fn add_triplet(
        &self,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Recorded {
        self.lock().add_triplet(subject, predicate, object)
    }

    /// Point-in-time snapshot. See [`KnowledgeBase::snapshot`].
    pub fn snapshot(&self) -> GraphSnapshot {
        self.lock().snapshot()
    }

    /// Clears the store. See [`KnowledgeBase::reset`].
    pub fn reset(&self) {
        self.lock().reset()
    }

    /// Current number of nodes.
    pub fn node_count(&self) -> usize {
        self.lock().node_count()
    }

    /// Current number of edges.
    pub fn edge_count(&self) -> usize {
        self.lock().edge_count()
    }

    /// True when the store holds no facts.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
