//! CLI module for stancegraph.
//!
//! Subcommands:
//! - `enrich`: Filter and classify a corpus into enriched NDJSON
//! - `load`: Enrich a corpus and merge it into Neo4j
//! - `query`: Run the media-influence query
//! - `visualize`: Render influence query results in 3D
//! - `stats`: Node and relationship counts

mod enrich;
mod load;
mod query;
mod stats;
mod visualize;

use clap::{Args, Parser, Subcommand};

pub use enrich::EnrichCommand;
pub use load::LoadCommand;
pub use query::QueryCommand;
pub use visualize::VisualizeCommand;

use crate::config::Config;
use crate::error::AppError;
use crate::graph::backends::neo4j::Neo4jClient;
use crate::models::{InfluenceQuery, PublicBehavior, Topic};
use crate::pipeline::{Pipeline, PipelineStats};

/// stancegraph - statement stance graph
#[derive(Parser)]
#[command(name = "stancegraph")]
#[command(about = "Classify policy statements by stance and topic, and explore them as a graph")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Input lines per chunk handed to a filter worker
    #[arg(long, global = true)]
    pub chunk_size: Option<usize>,

    /// Filter worker count (defaults to the number of processors)
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter and classify a corpus, writing enriched NDJSON
    Enrich(EnrichCommand),

    /// Enrich a corpus and merge it into the graph store
    Load(LoadCommand),

    /// Rank statements by media coverage
    Query(QueryCommand),

    /// Render media-influence results in 3D
    Visualize(VisualizeCommand),

    /// Show node and relationship counts
    Stats,
}

/// Parameters shared by `query` and `visualize`.
#[derive(Args, Clone, Debug)]
pub struct InfluenceArgs {
    /// Topic the statements belong to
    #[arg(long, default_value = "lockdown")]
    pub topic: Topic,

    /// Behavior the statements triggered
    #[arg(long, default_value = "Public Defiance")]
    pub behavior: PublicBehavior,

    /// Maximum number of records
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(1..))]
    pub limit: i64,
}

impl InfluenceArgs {
    pub fn to_query(&self) -> InfluenceQuery {
        InfluenceQuery {
            topic: self.topic,
            behavior: self.behavior,
            limit: self.limit,
        }
    }
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        let config = self.load_config()?;
        match self.command {
            Command::Enrich(cmd) => cmd.run(&config),
            Command::Load(cmd) => cmd.run(&config).await,
            Command::Query(cmd) => cmd.run(&config).await,
            Command::Visualize(cmd) => cmd.run(&config).await,
            Command::Stats => stats::run(&config).await,
        }
    }

    /// Layered configuration with command-line overrides on top.
    fn load_config(&self) -> Result<Config, AppError> {
        let mut config = Config::load()?;
        if let Some(chunk_size) = self.chunk_size {
            config.pipeline.chunk_size = chunk_size;
        }
        if let Some(workers) = self.workers {
            config.pipeline.workers = workers;
        }
        Ok(config)
    }
}

/// Connect to the configured Neo4j instance.
async fn connect(config: &Config) -> Result<Neo4jClient, AppError> {
    let neo4j = config.neo4j()?;
    tracing::info!(uri = %neo4j.uri, "Connecting to Neo4j");
    Neo4jClient::connect(neo4j).await
}

/// Run the CPU-bound pipeline off the async runtime.
async fn run_pipeline(
    config: &Config,
    input: std::path::PathBuf,
) -> color_eyre::Result<crate::pipeline::PipelineOutput> {
    let pipeline = Pipeline::from_config(config)?;
    let output = tokio::task::spawn_blocking(move || pipeline.run_path(&input)).await??;
    Ok(output)
}

/// Human-readable run summary, written to stderr.
fn print_summary(stats: &PipelineStats) {
    eprintln!(
        "Read {} lines ({} records, {} malformed, {} blank) in {} chunks",
        stats.read.lines, stats.read.records, stats.read.malformed, stats.read.blank, stats.chunks
    );
    eprintln!("Kept {} statements", stats.kept);

    let mut types: Vec<_> = stats.by_type.iter().collect();
    types.sort_by(|a, b| b.1.cmp(a.1).then(a.0.as_str().cmp(b.0.as_str())));
    for (ty, count) in types {
        eprintln!("  {:<12} {}", ty.as_str(), count);
    }

    let mut topics: Vec<_> = stats.by_topic.iter().collect();
    topics.sort_by(|a, b| b.1.cmp(a.1).then(a.0.as_str().cmp(b.0.as_str())));
    for (topic, count) in topics {
        eprintln!("  {:<18} {}", topic.as_str(), count);
    }
}
