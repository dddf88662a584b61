//! Name-keyed collection of tools: register, list, call.

use std::collections::HashMap;

use serde_json::Value;

use super::{Tool, ToolCallContent, ToolError, ToolSpec};

/// Registry holding tools by name.
///
/// Registering a tool under an already-taken name replaces the previous one.
/// Listing returns specs in ascending name order so callers see a stable
/// catalogue.
///
/// **Interaction**: built once at startup (see
/// [`register_graph_tools`](super::register_graph_tools)); the serve layer
/// delegates `GET /tools` to [`ToolRegistry::list`] and `POST /tools/{name}`
/// to [`ToolRegistry::call`].
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Lists all registered tool specs, sorted by name.
    pub fn list(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self.tools.values().map(|t| t.spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Calls the named tool with the given JSON arguments.
    ///
    /// Unknown names yield [`ToolError::NotFound`].
    pub async fn call(&self, name: &str, args: Value) -> Result<ToolCallContent, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.call(args).await
    }
}
