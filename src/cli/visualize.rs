//! Visualize subcommand - render influence results in 3D.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::Config;
use crate::error::AppError;
use crate::models::{InfluenceGraph, InfluenceQuery, InfluenceRecord};
use crate::repositories::InfluenceRepository;
use crate::visualization::run_visualizer;

use super::InfluenceArgs;

/// Render media-influence results as a force-directed graph.
#[derive(Parser)]
pub struct VisualizeCommand {
    /// JSON records saved from `query --json`; queries Neo4j when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub influence: InfluenceArgs,
}

impl VisualizeCommand {
    pub async fn run(self, config: &Config) -> color_eyre::Result<()> {
        let mut query = self.influence.to_query();
        let records = match &self.input {
            Some(path) => {
                let records = read_records(path)?;
                query = saved_query(&records, query);
                records
            }
            None => {
                let client = super::connect(config).await?;
                let records = InfluenceRepository::new(&client).find(&query).await?;
                drop(client);
                records
            }
        };

        let graph = InfluenceGraph::from_records(&records);
        run_visualizer(&graph, &query.title());
        Ok(())
    }
}

/// Topic and behavior of saved records, so the title describes what was
/// actually queried. Unset or unrecognized values keep `fallback`'s.
fn saved_query(records: &[InfluenceRecord], fallback: InfluenceQuery) -> InfluenceQuery {
    let Some(first) = records.first() else {
        return fallback;
    };
    InfluenceQuery {
        topic: first
            .topic
            .as_deref()
            .and_then(|t| t.parse().ok())
            .unwrap_or(fallback.topic),
        behavior: first
            .public_behavior
            .as_deref()
            .and_then(|b| b.parse().ok())
            .unwrap_or(fallback.behavior),
        ..fallback
    }
}

fn read_records(path: &Path) -> Result<Vec<InfluenceRecord>, AppError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
