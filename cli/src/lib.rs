//! Library side of the kgraph CLI: JSONL triplet ingest.
//!
//! The binary (`src/main.rs`) parses arguments and dispatches; the ingest
//! logic lives here so tests can drive it directly.

pub mod ingest;

pub use ingest::{ingest_file, IngestError, TripletRecord};
