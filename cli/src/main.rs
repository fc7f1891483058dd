use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use search_core::{
    log_duration, process_queries, DocId, DocumentStatus, ExecutionPolicy, RequestQueue, WithStatus,
};
use search_cli::{load_server, write_results};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Index documents in memory and run TF-IDF queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IndexArgs {
    /// Input path (JSON/JSONL file or a directory of them)
    #[arg(long)]
    input: PathBuf,
    /// Space-separated stop words
    #[arg(long, default_value = "and with")]
    stop_words: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<StatusArg> for DocumentStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Actual => DocumentStatus::Actual,
            StatusArg::Irrelevant => DocumentStatus::Irrelevant,
            StatusArg::Banned => DocumentStatus::Banned,
            StatusArg::Removed => DocumentStatus::Removed,
        }
    }
}

fn policy(parallel: bool) -> ExecutionPolicy {
    if parallel {
        ExecutionPolicy::Parallel
    } else {
        ExecutionPolicy::Sequential
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rank documents for one or more queries
    Search {
        #[command(flatten)]
        index: IndexArgs,
        /// Only return documents with this status
        #[arg(long, value_enum, default_value_t = StatusArg::Actual)]
        status: StatusArg,
        /// Rank on all cores
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Results per printed page
        #[arg(long, default_value_t = 2)]
        page_size: usize,
        /// Print results as JSON lines
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Queries; prefix a word with '-' to exclude documents containing it
        #[arg(required = true)]
        queries: Vec<String>,
    },
    /// Run every query of a file (one per line) in parallel
    Batch {
        #[command(flatten)]
        index: IndexArgs,
        /// File with one query per line
        #[arg(long)]
        queries: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show which query words a document contains
    Match {
        #[command(flatten)]
        index: IndexArgs,
        #[arg(long)]
        id: DocId,
        #[arg(long, default_value_t = false)]
        parallel: bool,
        query: String,
    },
    /// Remove documents with the same set of words as a lower id
    Dedup {
        #[command(flatten)]
        index: IndexArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Search { index, status, parallel, page_size, json, queries } => {
            let server = load_server(&index.input, &index.stop_words)?;
            let mut requests = RequestQueue::new(&server);
            for query in &queries {
                log_duration!(format!("search {query:?}"));
                let hits = requests.add_find_request_with(policy(parallel), query, WithStatus(status.into()))?;
                write_results(&mut out, query, &hits, page_size, json)?;
            }
            tracing::info!(requests = requests.len(), no_results = requests.no_result_requests(), "queries finished");
        }
        Commands::Batch { index, queries, json } => {
            let server = load_server(&index.input, &index.stop_words)?;
            let file = std::fs::File::open(&queries).with_context(|| format!("opening {}", queries.display()))?;
            let lines: Vec<String> = BufReader::new(file)
                .lines()
                .collect::<io::Result<_>>()?;
            let lines: Vec<String> = lines.into_iter().filter(|l| !l.trim().is_empty()).collect();
            let results = {
                log_duration!("batch");
                process_queries(&server, &lines)?
            };
            for (query, hits) in lines.iter().zip(&results) {
                write_results(&mut out, query, hits, hits.len().max(1), json)?;
            }
        }
        Commands::Match { index, id, parallel, query } => {
            let server = load_server(&index.input, &index.stop_words)?;
            let Some((words, status)) = server.match_document_with(policy(parallel), &query, id)? else {
                bail!("document {id} is not indexed");
            };
            writeln!(out, "{{ document_id = {id}, status = {status:?}, words = [{}] }}", words.join(", "))?;
        }
        Commands::Dedup { index } => {
            let mut server = load_server(&index.input, &index.stop_words)?;
            let removed = {
                log_duration!("remove duplicates");
                server.remove_duplicates()
            };
            for id in &removed {
                writeln!(out, "Found duplicate document id {id}")?;
            }
            writeln!(out, "{} documents left", server.document_count())?;
        }
    }
    Ok(())
}
