//! kgraph CLI binary: ingest triplet files and export, or run the REST
//! server.
//!
//! Subcommands: `build` (JSONL file → graph export), `serve` (REST server).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use cli::ingest_file;
use kgraph::{export, SharedKnowledgeBase, DEFAULT_MAX_LABEL_LEN};

#[derive(Parser, Debug)]
#[command(name = "kgraph")]
#[command(about = "kgraph — build and serve knowledge graphs from triplet facts")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Verbose: log each recorded fact and server activity
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest a JSONL triplet file and write a graph export
    Build {
        /// Input file: one {"subject","predicate","object"} per line
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Write the export here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Max characters per subject/predicate/object field
        #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_LABEL_LEN)]
        max_label_len: usize,
    },
    /// Run the REST server
    Serve {
        /// Listen address (default KGRAPH_SERVE_ADDR or 127.0.0.1:8080)
        #[arg(long, value_name = "ADDR")]
        addr: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Dot,
    Text,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match args.cmd {
        Command::Build {
            input,
            format,
            output,
            max_label_len,
        } => {
            // Fresh store per invocation: no leakage between runs.
            let kb = SharedKnowledgeBase::new();
            let recorded = ingest_file(&input, &kb, max_label_len).await?;
            let snapshot = kb.snapshot();
            info!(
                recorded,
                nodes = snapshot.nodes.len(),
                edges = snapshot.edges.len(),
                "graph built"
            );

            let rendered = match format {
                ExportFormat::Json => export::to_json_pretty(&snapshot)?,
                ExportFormat::Dot => export::to_dot(&snapshot),
                ExportFormat::Text => export::to_text(&snapshot),
            };
            match output {
                Some(path) => std::fs::write(&path, rendered)?,
                None => print!("{rendered}"),
            }
            Ok(())
        }
        Command::Serve { addr } => serve::run_serve(addr.as_deref()).await,
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenv::dotenv();
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
