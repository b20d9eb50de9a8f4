//! Load subcommand - enrich a corpus and merge it into Neo4j.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::repositories::{SchemaRepository, StatementRepository};

/// Enrich a corpus and merge it into the graph store.
#[derive(Parser)]
pub struct LoadCommand {
    /// NDJSON corpus, one statement per line.
    pub input: PathBuf,

    /// Treat the input as already-enriched NDJSON from `enrich --output`.
    #[arg(long)]
    pub enriched: bool,
}

impl LoadCommand {
    pub async fn run(self, config: &Config) -> color_eyre::Result<()> {
        let statements = if self.enriched {
            super::enrich::read_ndjson(&self.input)?
        } else {
            let output = super::run_pipeline(config, self.input.clone()).await?;
            super::print_summary(&output.stats);
            output.statements
        };

        let client = super::connect(config).await?;
        let repo = StatementRepository::new(&client, config.pipeline.statement_identity);
        repo.ensure_constraints().await?;
        let report = repo.load_all(&statements).await?;
        let stats = SchemaRepository::new(&client).stats().await?;
        drop(client);

        println!(
            "Loaded {} statements ({} without media source, {} without date)",
            report.statements, report.without_media_source, report.without_date
        );
        println!(
            "Graph now holds {} nodes and {} relationships",
            stats.total_nodes(),
            stats.total_relationships()
        );
        Ok(())
    }
}
