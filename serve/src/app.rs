//! Axum app: state, router, and the REST handlers.
//!
//! Shared state carries one [`SharedKnowledgeBase`], the tool registry built
//! over it, and the activity counters; handlers are thin maps from HTTP to
//! the kgraph API with errors surfaced through [`ApiError`].

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::info;

use kgraph::{
    export, register_graph_tools, ActivityStats, GraphActivity, GraphSnapshot,
    SharedKnowledgeBase, ToolRegistry, ToolSpec, DEFAULT_MAX_LABEL_LEN,
};

use super::error::ApiError;

/// Server configuration read from the environment, falling back to defaults
/// for unset or invalid values.
///
/// - `KGRAPH_MAX_LABEL_LEN` (default 512): per-field cap at the tool boundary.
pub(crate) struct ServeConfig {
    pub(crate) max_label_len: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            max_label_len: DEFAULT_MAX_LABEL_LEN,
        }
    }
}

impl ServeConfig {
    pub(crate) fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_label_len: std::env::var("KGRAPH_MAX_LABEL_LEN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.max_label_len),
        }
    }
}

/// Shared state for the REST server.
///
/// One store per process; every handler reaches it through this state, so no
/// global singleton exists and tests can run servers side by side.
pub(crate) struct AppState {
    pub(crate) kb: SharedKnowledgeBase,
    pub(crate) registry: ToolRegistry,
    pub(crate) activity: GraphActivity,
}

impl AppState {
    pub(crate) fn new(config: &ServeConfig) -> Arc<Self> {
        let kb = SharedKnowledgeBase::new();
        let mut registry = ToolRegistry::new();
        register_graph_tools(&mut registry, kb.clone(), config.max_label_len);
        Arc::new(Self {
            kb,
            registry,
            activity: GraphActivity::new(),
        })
    }
}

/// Builds the router over the shared state.
pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/graph", get(get_graph))
        .route("/graph/export", get(export_graph))
        .route("/stats", get(get_stats))
        .route("/tools", get(list_tools))
        .route("/tools/:name", post(call_tool))
        .route("/reset", post(reset))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn get_graph(State(state): State<Arc<AppState>>) -> Json<GraphSnapshot> {
    Json(state.kb.snapshot())
}

#[derive(serde::Deserialize, Default)]
pub(crate) struct ExportQuery {
    format: Option<String>,
}

/// `GET /graph/export?format=json|dot|text` — downloadable text artifact for
/// the presentation layer; default json.
async fn export_graph(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let snapshot = state.kb.snapshot();
    let format = query.format.as_deref().unwrap_or("json");
    let (content_type, body) = match format {
        "json" => (
            "application/json",
            export::to_json_pretty(&snapshot).map_err(|e| ApiError::Internal(e.to_string()))?,
        ),
        "dot" => ("text/vnd.graphviz", export::to_dot(&snapshot)),
        "text" => ("text/plain; charset=utf-8", export::to_text(&snapshot)),
        other => {
            return Err(ApiError::InvalidArguments(format!(
                "unknown export format: {other} (expected json, dot, or text)"
            )))
        }
    };
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ActivityStats> {
    Json(state.activity.stats(&state.kb))
}

async fn list_tools(State(state): State<Arc<AppState>>) -> Json<Vec<ToolSpec>> {
    Json(state.registry.list())
}

/// Result body for `POST /tools/{name}`.
#[derive(serde::Serialize)]
pub(crate) struct ToolCallResponse {
    tool: String,
    result: String,
}

/// `POST /tools/{name}` — calls a registered tool with the JSON body as
/// arguments. A missing body counts as `{}` so no-argument tools can be
/// called bare; a body that fails to parse is a malformed-request error, not
/// an invalid-arguments error.
async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ToolCallResponse>, ApiError> {
    let args = match body {
        Ok(Json(value)) => value,
        Err(JsonRejection::MissingJsonContentType(_)) => json!({}),
        Err(rejection) => return Err(ApiError::MalformedBody(rejection.to_string())),
    };

    let content = state.registry.call(&name, args).await?;
    state.activity.note_tool_call(&name);
    Ok(Json(ToolCallResponse {
        tool: name,
        result: content.text,
    }))
}

/// `POST /reset` — dashboard affordance for starting a new topic.
async fn reset(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.kb.reset();
    state.activity.note_tool_call(kgraph::TOOL_RESET_GRAPH);
    info!("graph cleared via REST");
    Json(json!({"status": "ok"}))
}
