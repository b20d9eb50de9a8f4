//! Schema repository: node and relationship counts.

use std::collections::BTreeMap;

use crate::error::AppError;
use crate::graph::{CypherExecutor, QueryExt};

pub const NODE_LABELS: [&str; 5] = ["Statement", "Topic", "MediaSource", "PublicBehavior", "Date"];

pub const RELATIONSHIP_TYPES: [&str; 4] = ["BELONGS_TO", "AMPLIFIED", "TRIGGERED", "PUBLISHED_ON"];

/// Graph size by node label and relationship type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: BTreeMap<String, i64>,
    pub relationships: BTreeMap<String, i64>,
}

impl GraphStats {
    pub fn node_count(&self, label: &str) -> i64 {
        self.nodes.get(label).copied().unwrap_or(0)
    }

    pub fn relationship_count(&self, rel_type: &str) -> i64 {
        self.relationships.get(rel_type).copied().unwrap_or(0)
    }

    pub fn total_nodes(&self) -> i64 {
        self.nodes.values().sum()
    }

    pub fn total_relationships(&self) -> i64 {
        self.relationships.values().sum()
    }
}

pub struct SchemaRepository<'a, E: CypherExecutor> {
    graph: &'a E,
}

impl<'a, E: CypherExecutor> SchemaRepository<'a, E> {
    pub fn new(graph: &'a E) -> Self {
        Self { graph }
    }

    /// Count nodes per label and relationships per type.
    ///
    /// One query per label keeps each count a simple index scan.
    pub async fn stats(&self) -> Result<GraphStats, AppError> {
        let mut stats = GraphStats::default();
        for label in NODE_LABELS {
            let query = format!("MATCH (n:{}) RETURN count(n) AS cnt", label);
            stats.nodes.insert(label.to_string(), self.count(&query).await?);
        }
        for rel_type in RELATIONSHIP_TYPES {
            let query = format!("MATCH ()-[r:{}]->() RETURN count(r) AS cnt", rel_type);
            stats
                .relationships
                .insert(rel_type.to_string(), self.count(&query).await?);
        }
        Ok(stats)
    }

    async fn count(&self, query: &str) -> Result<i64, AppError> {
        let row = self.graph.query(query).fetch_one().await?;
        match row {
            Some(row) => Ok(row.get_opt::<i64>("cnt")?.unwrap_or(0)),
            None => Ok(0),
        }
    }
}
