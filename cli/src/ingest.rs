//! JSONL triplet ingest: one `{"subject", "predicate", "object"}` record per
//! line, fed through the validated tool boundary into a store.
//!
//! Blank lines are skipped. Any malformed or rejected line aborts the ingest
//! with its line number so the file can be fixed; the store passed in may be
//! partially populated at that point, so callers use a fresh store per run.

use std::path::{Path, PathBuf};

use serde_json::json;
use thiserror::Error;
use tracing::debug;

use kgraph::{AddTripletTool, SharedKnowledgeBase, Tool, ToolError};

/// One line of a triplet file.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct TripletRecord {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

/// Errors from reading or applying a triplet file. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: {reason}")]
    InvalidTriplet { line: usize, reason: String },
}

/// Reads a JSONL file and records every triplet into `kb` through the
/// validated boundary. Returns the number of facts recorded.
pub async fn ingest_file(
    path: &Path,
    kb: &SharedKnowledgeBase,
    max_label_len: usize,
) -> Result<usize, IngestError> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let tool = AddTripletTool::new(kb.clone()).with_max_label_len(max_label_len);
    let mut recorded = 0;
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let record: TripletRecord = serde_json::from_str(line).map_err(|source| {
            IngestError::Parse {
                line: line_no,
                source,
            }
        })?;
        let args = json!({
            "subject": record.subject,
            "predicate": record.predicate,
            "object": record.object,
        });
        let confirmation = tool.call(args).await.map_err(|e| match e {
            ToolError::InvalidInput(reason) => IngestError::InvalidTriplet {
                line: line_no,
                reason,
            },
            other => IngestError::InvalidTriplet {
                line: line_no,
                reason: other.to_string(),
            },
        })?;
        debug!(line = line_no, "{}", confirmation.text);
        recorded += 1;
    }
    Ok(recorded)
}
