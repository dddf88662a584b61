//! Graph tools: the store's operations behind the tool boundary.
//!
//! `add_triplet` validates the untrusted text an extraction pipeline sends
//! (non-empty after trimming, bounded length) before touching the store;
//! `get_graph_state` serializes the snapshot; `reset_graph` starts a fresh
//! session. Tool names match what the extraction prompts reference.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::store::SharedKnowledgeBase;

use super::{Tool, ToolCallContent, ToolError, ToolRegistry, ToolSpec};

/// Tool name for recording one fact.
pub const TOOL_ADD_TRIPLET: &str = "add_triplet";
/// Tool name for reading the graph snapshot.
pub const TOOL_GET_GRAPH_STATE: &str = "get_graph_state";
/// Tool name for clearing the store between sessions.
pub const TOOL_RESET_GRAPH: &str = "reset_graph";

/// Default cap on the length of subject/predicate/object values, in
/// characters. The store below accepts any string; this guards the boundary
/// against runaway model output.
pub const DEFAULT_MAX_LABEL_LEN: usize = 512;

/// Extracts a required string field and applies the boundary rules:
/// present, a string, non-empty after trimming, at most `max_len` characters.
fn require_label(args: &Value, field: &str, max_len: usize) -> Result<String, ToolError> {
    let raw = args
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::InvalidInput(format!("missing {field}")))?;
    if raw.trim().is_empty() {
        return Err(ToolError::InvalidInput(format!("{field} must not be empty")));
    }
    if raw.chars().count() > max_len {
        return Err(ToolError::InvalidInput(format!(
            "{field} exceeds {max_len} characters"
        )));
    }
    Ok(raw.to_string())
}

/// Registers the three graph tools over one shared store.
///
/// `max_label_len` bounds each `add_triplet` field; pass
/// [`DEFAULT_MAX_LABEL_LEN`] unless configured otherwise.
pub fn register_graph_tools(
    registry: &mut ToolRegistry,
    kb: SharedKnowledgeBase,
    max_label_len: usize,
) {
    registry.register(Box::new(
        AddTripletTool::new(kb.clone()).with_max_label_len(max_label_len),
    ));
    registry.register(Box::new(GetGraphStateTool::new(kb.clone())));
    registry.register(Box::new(ResetGraphTool::new(kb)));
}

/// Tool recording one (subject, predicate, object) fact.
///
/// Wraps [`SharedKnowledgeBase::add_triplet`] and validates each field before
/// the store sees it. The result text is the confirmation line
/// `Added: (subject) -[predicate]-> (object)`.
///
/// # Examples
///
/// ```
/// use kgraph::{AddTripletTool, SharedKnowledgeBase, Tool};
/// use serde_json::json;
///
/// # #[tokio::main]
/// # async fn main() {
/// let kb = SharedKnowledgeBase::new();
/// let tool = AddTripletTool::new(kb.clone());
///
/// let args = json!({
///     "subject": "Harry",
///     "predicate": "is_friend_of",
///     "object": "Ron"
/// });
/// let result = tool.call(args).await.unwrap();
/// assert_eq!(result.text, "Added: (Harry) -[is_friend_of]-> (Ron)");
/// assert_eq!(kb.edge_count(), 1);
/// # }
/// ```
pub struct AddTripletTool {
    kb: SharedKnowledgeBase,
    max_label_len: usize,
}

impl AddTripletTool {
    /// Creates the tool over the given store with the default length cap.
    pub fn new(kb: SharedKnowledgeBase) -> Self {
        Self {
            kb,
            max_label_len: DEFAULT_MAX_LABEL_LEN,
        }
    }

    /// Sets the per-field length cap applied before the store is touched.
    pub fn with_max_label_len(mut self, max_label_len: usize) -> Self {
        self.max_label_len = max_label_len;
        self
    }
}

#[async_trait]
impl Tool for AddTripletTool {
    fn name(&self) -> &str {
        TOOL_ADD_TRIPLET
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_ADD_TRIPLET.to_string(),
            description: Some(
                "Add a fact (triplet) to the knowledge graph. Subject and object are entity \
                 labels; predicate is a short relationship such as \"is_a\" or \"located_in\". \
                 A repeated (subject, object) pair overwrites the stored predicate."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "subject": { "type": "string", "description": "Source entity (e.g. \"Harry Potter\")" },
                    "predicate": { "type": "string", "description": "Relationship (e.g. \"is_friend_of\")" },
                    "object": { "type": "string", "description": "Target entity (e.g. \"Ron Weasley\")" }
                },
                "required": ["subject", "predicate", "object"]
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolError> {
        let subject = require_label(&args, "subject", self.max_label_len)?;
        let predicate = require_label(&args, "predicate", self.max_label_len)?;
        let object = require_label(&args, "object", self.max_label_len)?;

        let recorded = self.kb.add_triplet(subject, predicate, object);
        if let Some(ref previous) = recorded.replaced {
            debug!(
                subject = %recorded.subject,
                object = %recorded.object,
                previous = %previous,
                predicate = %recorded.predicate,
                "edge predicate overwritten"
            );
        }
        Ok(ToolCallContent {
            text: recorded.to_string(),
        })
    }
}

/// Tool returning the current snapshot as JSON.
///
/// The text payload is `{"nodes": [...], "edges": [{"source", "target",
/// "relation"}, ...]}`, the same shape the presentation layer consumes.
pub struct GetGraphStateTool {
    kb: SharedKnowledgeBase,
}

impl GetGraphStateTool {
    /// Creates the tool over the given store.
    pub fn new(kb: SharedKnowledgeBase) -> Self {
        Self { kb }
    }
}

#[async_trait]
impl Tool for GetGraphStateTool {
    fn name(&self) -> &str {
        TOOL_GET_GRAPH_STATE
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_GET_GRAPH_STATE.to_string(),
            description: Some(
                "Retrieve the current state of the knowledge graph (nodes and edges) as JSON."
                    .to_string(),
            ),
            input_schema: json!({ "type": "object", "properties": {} }),
        }
    }

    async fn call(&self, _args: Value) -> Result<ToolCallContent, ToolError> {
        let snapshot = self.kb.snapshot();
        debug!(
            nodes = snapshot.nodes.len(),
            edges = snapshot.edges.len(),
            "graph state checked"
        );
        let text = serde_json::to_string(&snapshot)
            .map_err(|e| ToolError::Serialization(e.to_string()))?;
        Ok(ToolCallContent { text })
    }
}

/// Tool clearing the store so a new session starts from an empty graph.
///
/// Without an explicit reset, consecutive topics accumulate into one graph;
/// callers are expected to invoke this between topics when a store is reused.
pub struct ResetGraphTool {
    kb: SharedKnowledgeBase,
}

impl ResetGraphTool {
    /// Creates the tool over the given store.
    pub fn new(kb: SharedKnowledgeBase) -> Self {
        Self { kb }
    }
}

#[async_trait]
impl Tool for ResetGraphTool {
    fn name(&self) -> &str {
        TOOL_RESET_GRAPH
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_RESET_GRAPH.to_string(),
            description: Some(
                "Clear the knowledge graph. Call before starting a new topic so facts from \
                 different sessions do not accumulate into one graph."
                    .to_string(),
            ),
            input_schema: json!({ "type": "object", "properties": {} }),
        }
    }

    async fn call(&self, _args: Value) -> Result<ToolCallContent, ToolError> {
        self.kb.reset();
        debug!("graph reset");
        Ok(ToolCallContent {
            text: "Graph cleared.".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: a missing field is rejected with InvalidInput naming it.
    #[tokio::test]
    async fn add_triplet_missing_field_rejected() {
        let tool = AddTripletTool::new(SharedKnowledgeBase::new());
        let err = tool
            .call(json!({"subject": "A", "object": "B"}))
            .await
            .expect_err("should fail");
        assert!(matches!(err, ToolError::InvalidInput(msg) if msg.contains("predicate")));
    }

    /// **Scenario**: whitespace-only labels are rejected; the store is never
    /// touched.
    #[tokio::test]
    async fn add_triplet_blank_label_rejected() {
        let kb = SharedKnowledgeBase::new();
        let tool = AddTripletTool::new(kb.clone());
        let err = tool
            .call(json!({"subject": "  ", "predicate": "p", "object": "B"}))
            .await
            .expect_err("should fail");
        assert!(matches!(err, ToolError::InvalidInput(_)));
        assert!(kb.is_empty());
    }

    /// **Scenario**: a field longer than the cap is rejected.
    #[tokio::test]
    async fn add_triplet_over_length_rejected() {
        let tool = AddTripletTool::new(SharedKnowledgeBase::new()).with_max_label_len(8);
        let err = tool
            .call(json!({"subject": "123456789", "predicate": "p", "object": "B"}))
            .await
            .expect_err("should fail");
        assert!(matches!(err, ToolError::InvalidInput(msg) if msg.contains("subject")));
    }

    /// **Scenario**: non-string arguments are rejected, not coerced.
    #[tokio::test]
    async fn add_triplet_non_string_rejected() {
        let tool = AddTripletTool::new(SharedKnowledgeBase::new());
        let err = tool
            .call(json!({"subject": 7, "predicate": "p", "object": "B"}))
            .await
            .expect_err("should fail");
        assert!(matches!(err, ToolError::InvalidInput(msg) if msg.contains("subject")));
    }

    /// **Scenario**: get_graph_state returns the wire-shape JSON.
    #[tokio::test]
    async fn get_graph_state_returns_snapshot_json() {
        let kb = SharedKnowledgeBase::new();
        kb.add_triplet("Harry", "studies_at", "Hogwarts");
        let tool = GetGraphStateTool::new(kb);
        let out = tool.call(json!({})).await.expect("call");
        let parsed: serde_json::Value = serde_json::from_str(&out.text).expect("json");
        assert_eq!(parsed["nodes"], json!(["Harry", "Hogwarts"]));
        assert_eq!(parsed["edges"][0]["relation"], json!("studies_at"));
    }

    /// **Scenario**: reset_graph empties the store and is idempotent.
    #[tokio::test]
    async fn reset_graph_clears_store() {
        let kb = SharedKnowledgeBase::new();
        kb.add_triplet("A", "p", "B");
        let tool = ResetGraphTool::new(kb.clone());
        tool.call(json!({})).await.expect("first reset");
        assert!(kb.is_empty());
        tool.call(json!({})).await.expect("reset on empty");
        assert!(kb.is_empty());
    }
}
