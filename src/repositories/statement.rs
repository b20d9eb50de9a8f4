//! Statement repository: idempotent load of enriched statements.

use serde_json::json;

use crate::error::AppError;
use crate::graph::{CypherExecutor, GraphClient, Params, QueryExt, Transaction};
use crate::models::{EnrichedStatement, StatementIdentity};

/// Indexes and constraints backing the merge keys.
const SCHEMA_STATEMENTS: [&str; 5] = [
    "CREATE INDEX statement_key IF NOT EXISTS FOR (s:Statement) ON (s.text, s.statement_type)",
    "CREATE CONSTRAINT topic_name IF NOT EXISTS FOR (t:Topic) REQUIRE t.name IS UNIQUE",
    "CREATE CONSTRAINT media_source_name IF NOT EXISTS FOR (m:MediaSource) REQUIRE m.name IS UNIQUE",
    "CREATE CONSTRAINT public_behavior_type IF NOT EXISTS FOR (b:PublicBehavior) REQUIRE b.type IS UNIQUE",
    "CREATE CONSTRAINT date_value IF NOT EXISTS FOR (d:Date) REQUIRE d.date IS UNIQUE",
];

/// Outcome of [`StatementRepository::load_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub statements: usize,
    /// Statements loaded without a `MediaSource` node.
    pub without_media_source: usize,
    /// Statements loaded without a `Date` node.
    pub without_date: usize,
}

/// Writes enriched statements as `Statement`, `Topic`, `MediaSource`,
/// `PublicBehavior` and `Date` nodes joined by `BELONGS_TO`, `AMPLIFIED`,
/// `TRIGGERED` and `PUBLISHED_ON`.
///
/// Every write is a `MERGE`, so loading the same statements again leaves
/// node and edge counts unchanged.
pub struct StatementRepository<'a, C: GraphClient> {
    client: &'a C,
    identity: StatementIdentity,
}

impl<'a, C: GraphClient> StatementRepository<'a, C> {
    pub fn new(client: &'a C, identity: StatementIdentity) -> Self {
        Self { client, identity }
    }

    /// Create the indexes and uniqueness constraints the merges rely on.
    pub async fn ensure_constraints(&self) -> Result<(), AppError> {
        for statement in SCHEMA_STATEMENTS {
            self.client.query(statement).run().await?;
        }
        tracing::debug!(count = SCHEMA_STATEMENTS.len(), "Schema constraints ensured");
        Ok(())
    }

    /// Merge one statement and its neighbors in a single transaction.
    pub async fn upsert(&self, statement: &EnrichedStatement) -> Result<(), AppError> {
        let cypher = merge_cypher(statement, self.identity);
        let params = merge_params(statement);

        let txn = self.client.begin().await?;
        match txn.run_cypher(&cypher, params).await {
            Ok(()) => txn.commit().await,
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Upsert statements in order, stopping at the first failure.
    pub async fn load_all(&self, statements: &[EnrichedStatement]) -> Result<LoadReport, AppError> {
        let mut report = LoadReport::default();

        for (i, statement) in statements.iter().enumerate() {
            self.upsert(statement).await?;
            report.statements += 1;
            if statement.media_source.is_none() {
                report.without_media_source += 1;
            }
            if statement.raw.date.is_none() {
                report.without_date += 1;
            }
            if (i + 1) % 1000 == 0 {
                tracing::debug!(loaded = i + 1, total = statements.len(), "Loading statements");
            }
        }

        tracing::info!(
            statements = report.statements,
            without_media_source = report.without_media_source,
            without_date = report.without_date,
            "Statements loaded"
        );
        Ok(report)
    }
}

/// Cypher merging one statement.
///
/// Null properties cannot be merged on, so the `MediaSource` and `Date`
/// nodes, and the edges touching them, appear only when the statement
/// carries those values.
pub fn merge_cypher(statement: &EnrichedStatement, identity: StatementIdentity) -> String {
    let has_source = statement.media_source.is_some();
    let has_date = statement.raw.date.is_some();

    let mut key = vec!["text: $text", "statement_type: $statement_type"];
    if identity == StatementIdentity::Occurrence {
        if has_date {
            key.push("date: $date");
        }
        if has_source {
            key.push("media_source: $media_source");
        }
    }

    let mut clauses = vec![
        format!("MERGE (s:Statement {{{}}})", key.join(", ")),
        "MERGE (t:Topic {name: $topic})".to_string(),
        "MERGE (b:PublicBehavior {type: $public_behavior})".to_string(),
    ];
    if has_source {
        clauses.push("MERGE (m:MediaSource {name: $media_source})".to_string());
    }
    if has_date {
        clauses.push("MERGE (d:Date {date: $date})".to_string());
    }
    clauses.push("MERGE (s)-[:BELONGS_TO]->(t)".to_string());
    clauses.push("MERGE (s)-[:TRIGGERED]->(b)".to_string());
    if has_source {
        clauses.push("MERGE (m)-[:AMPLIFIED]->(s)".to_string());
        if has_date {
            clauses.push("MERGE (m)-[:PUBLISHED_ON]->(d)".to_string());
        }
    }

    clauses.join("\n")
}

fn merge_params(statement: &EnrichedStatement) -> Params {
    let mut params = Params::new();
    params.insert("text".into(), json!(statement.full_text));
    params.insert("statement_type".into(), json!(statement.statement_type.as_str()));
    params.insert("topic".into(), json!(statement.topic.as_str()));
    params.insert("public_behavior".into(), json!(statement.public_behavior.as_str()));
    if let Some(source) = &statement.media_source {
        params.insert("media_source".into(), json!(source));
    }
    if let Some(date) = &statement.raw.date {
        params.insert("date".into(), json!(date));
    }
    params
}
