//! Media-influence query.

use crate::cypher;
use crate::error::AppError;
use crate::graph::{CypherExecutor, QueryExt, Row};
use crate::models::{InfluenceQuery, InfluenceRecord};

const INFLUENCE_CYPHER: &str = "\
MATCH (s:Statement)-[:BELONGS_TO]->(t:Topic {name: $topic})
MATCH (m:MediaSource)-[:AMPLIFIED]->(s)
MATCH (s)-[:TRIGGERED]->(b:PublicBehavior {type: $behavior})
MATCH (m)-[:PUBLISHED_ON]->(d:Date)
WITH t, m, s, b, d, COUNT(s) AS mediaCoverage
RETURN t.name AS Topic,
       m.name AS MediaSource,
       s.text AS Statement,
       b.type AS PublicBehavior,
       d.date AS Date,
       mediaCoverage
ORDER BY mediaCoverage DESC
LIMIT $limit";

/// Read side of the graph: statements on a topic that triggered a
/// behavior, joined to the amplifying source and its publish date.
pub struct InfluenceRepository<'a, E: CypherExecutor> {
    graph: &'a E,
}

impl<'a, E: CypherExecutor> InfluenceRepository<'a, E> {
    pub fn new(graph: &'a E) -> Self {
        Self { graph }
    }

    /// Records ranked by `mediaCoverage`, highest first.
    pub async fn find(&self, query: &InfluenceQuery) -> Result<Vec<InfluenceRecord>, AppError> {
        let rows = cypher!(
            self.graph,
            INFLUENCE_CYPHER,
            topic = query.topic.as_str(),
            behavior = query.behavior.as_str(),
            limit = query.limit,
        )
        .fetch_all()
        .await?;

        let records = rows
            .iter()
            .map(Self::row_to_record)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(
            topic = %query.topic,
            behavior = %query.behavior,
            records = records.len(),
            "Influence query complete"
        );
        Ok(records)
    }

    fn row_to_record(row: &Row) -> Result<InfluenceRecord, AppError> {
        Ok(InfluenceRecord {
            topic: row.get_opt("Topic")?,
            media_source: row.get_opt("MediaSource")?,
            statement: row.get_opt("Statement")?,
            public_behavior: row.get_opt("PublicBehavior")?,
            date: row.get_opt("Date")?,
            media_coverage: row.get_opt("mediaCoverage")?.unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PublicBehavior, Topic};
    use crate::repositories::testing::RecordingClient;
    use serde_json::{json, Value as JsonValue};
    use std::collections::HashMap;

    fn row(pairs: &[(&str, JsonValue)]) -> Row {
        Row::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[tokio::test]
    async fn test_default_query_parameters() {
        let client = RecordingClient::new();
        InfluenceRepository::new(&client)
            .find(&InfluenceQuery::default())
            .await
            .unwrap();

        let (cypher, params) = &client.queries()[0];
        assert!(cypher.contains("ORDER BY mediaCoverage DESC"));
        assert!(cypher.contains("COUNT(s) AS mediaCoverage"));
        assert_eq!(params["topic"], json!("lockdown"));
        assert_eq!(params["behavior"], json!("Public Defiance"));
        assert_eq!(params["limit"], json!(20));
    }

    #[tokio::test]
    async fn test_rows_become_records() {
        let client = RecordingClient::new();
        client.push_rows(vec![
            row(&[
                ("Topic", json!("lockdown")),
                ("MediaSource", json!("example")),
                ("Statement", json!("crowds defied the lockdown")),
                ("PublicBehavior", json!("Public Defiance")),
                ("Date", json!("2020-03-01")),
                ("mediaCoverage", json!(2)),
            ]),
            row(&[("Topic", json!("lockdown")), ("Date", JsonValue::Null)]),
        ]);

        let query = InfluenceQuery {
            topic: Topic::Lockdown,
            behavior: PublicBehavior::Defiance,
            limit: 5,
        };
        let records = InfluenceRepository::new(&client).find(&query).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].media_source.as_deref(), Some("example"));
        assert_eq!(records[0].media_coverage, 2);
        assert_eq!(records[1].date, None);
        assert_eq!(records[1].media_coverage, 0);
    }

    #[tokio::test]
    async fn test_empty_result() {
        let client = RecordingClient::new();
        let records = InfluenceRepository::new(&client)
            .find(&InfluenceQuery::default())
            .await
            .unwrap();
        assert!(records.is_empty());
    }
}
