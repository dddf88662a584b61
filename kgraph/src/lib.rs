//! kgraph: in-memory knowledge-graph triplet store with an LLM tool boundary.
//!
//! An external extraction pipeline feeds (subject, predicate, object) facts
//! into a [`KnowledgeBase`]; the store accumulates them as a directed graph
//! and answers point-in-time [`GraphSnapshot`] queries. The `tools` module
//! wraps the store in callable tools (`add_triplet`, `get_graph_state`,
//! `reset_graph`) so an agent or HTTP layer can drive it with JSON arguments;
//! `export` renders snapshots as JSON/DOT/text; `activity` counts tool usage.
//!
//! The store itself is total over its inputs and never fails; validation of
//! untrusted text happens at the tool boundary, not in the store.

pub mod activity;
pub mod export;
pub mod store;
pub mod tools;

pub use activity::{ActivityStats, GraphActivity, GraphSize};
pub use store::{Edge, GraphSnapshot, KnowledgeBase, Recorded, SharedKnowledgeBase};
pub use tools::{
    register_graph_tools, AddTripletTool, GetGraphStateTool, ResetGraphTool, Tool,
    ToolCallContent, ToolError, ToolRegistry, ToolSpec, DEFAULT_MAX_LABEL_LEN, TOOL_ADD_TRIPLET,
    TOOL_GET_GRAPH_STATE, TOOL_RESET_GRAPH,
};
