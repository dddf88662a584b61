//! Tool boundary: list tools and call a tool with JSON arguments.
//!
//! External callers (an agent pipeline, the REST layer) drive the store
//! through named tools instead of the Rust API, so argument validation for
//! untrusted text lives here and not in the store. Implementations:
//! [`AddTripletTool`], [`GetGraphStateTool`], [`ResetGraphTool`] (module
//! `graph`), held by a name-keyed [`ToolRegistry`].

mod graph;
mod registry;

pub use graph::{
    register_graph_tools, AddTripletTool, GetGraphStateTool, ResetGraphTool,
    DEFAULT_MAX_LABEL_LEN, TOOL_ADD_TRIPLET, TOOL_GET_GRAPH_STATE, TOOL_RESET_GRAPH,
};
pub use registry::ToolRegistry;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool specification: name, description for the caller, JSON Schema for
/// arguments.
///
/// **Interaction**: returned by [`Tool::spec`] and [`ToolRegistry::list`];
/// serialized as-is by the serve layer's tool listing.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    /// Tool name used to address the tool in a call.
    pub name: String,
    /// Human-readable description for the calling agent.
    pub description: Option<String>,
    /// JSON Schema for the call arguments.
    pub input_schema: Value,
}

/// Result of a single tool call.
#[derive(Debug, Clone)]
pub struct ToolCallContent {
    /// Result text (confirmation line or serialized payload).
    pub text: String,
}

/// Errors from calling a tool.
///
/// The store below the boundary is total and never fails; these cover the
/// boundary itself (unknown tool, rejected arguments) and payload
/// serialization.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("serialization: {0}")]
    Serialization(String),
}

/// A callable tool with a JSON-arguments interface.
///
/// **Interaction**: registered in a [`ToolRegistry`]; `spec()` feeds tool
/// listings, `call()` executes with caller-provided JSON.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name; must match the name in [`Tool::spec`].
    fn name(&self) -> &str;

    /// Specification advertised to callers.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool with the given JSON arguments.
    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display of each ToolError variant contains its keyword.
    #[test]
    fn tool_error_display_all_variants() {
        let s = ToolError::NotFound("x".into()).to_string();
        assert!(s.contains("not found"), "{}", s);
        let s = ToolError::InvalidInput("bad".into()).to_string();
        assert!(s.contains("invalid"), "{}", s);
        let s = ToolError::Serialization("oops".into()).to_string();
        assert!(s.contains("serialization"), "{}", s);
    }

    /// **Scenario**: ToolSpec round-trips through serde (it is served as-is
    /// by the tool listing).
    #[test]
    fn tool_spec_roundtrip() {
        let spec = ToolSpec {
            name: "add_triplet".into(),
            description: Some("Add a fact".into()),
            input_schema: serde_json::json!({"type": "object"}),
        };
        let json = serde_json::to_string(&spec).expect("serialize");
        let back: ToolSpec = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.name, spec.name);
        assert_eq!(back.description, spec.description);
        assert_eq!(back.input_schema, spec.input_schema);
    }
}
