//! Neo4j backend over the Bolt protocol.
//!
//! ```ignore
//! use stancegraph::graph::backends::neo4j::Neo4jClient;
//! use stancegraph::graph::QueryExt;
//!
//! let client = Neo4jClient::connect(&config).await?;
//! let rows = client.query("MATCH (t:Topic) RETURN t.name AS name")
//!     .fetch_all()
//!     .await?;
//! ```

use std::collections::HashMap;

use async_stream::try_stream;
use async_trait::async_trait;
use neo4rs::{
    BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNull, BoltString, BoltType,
    ConfigBuilder, Txn,
};
use serde_json::Value as JsonValue;
use tokio::sync::Mutex;

use crate::config::Neo4jConfig;
use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::{CypherExecutor, GraphClient, Transaction};

const FETCH_SIZE: usize = 500;
const MAX_CONNECTIONS: usize = 10;

/// Neo4j graph client.
///
/// Cheap to clone; `neo4rs::Graph` shares its connection pool.
#[derive(Clone)]
pub struct Neo4jClient {
    graph: neo4rs::Graph,
}

impl Neo4jClient {
    /// Connects using the configured URI and credentials.
    pub async fn connect(config: &Neo4jConfig) -> Result<Self, AppError> {
        let neo_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_deref().unwrap_or_default())
            .fetch_size(FETCH_SIZE)
            .max_connections(MAX_CONNECTIONS)
            .build()?;
        let graph = neo4rs::Graph::connect(neo_config).await?;
        tracing::info!(uri = %config.uri, user = %config.user, "Connected to Neo4j");
        Ok(Self { graph })
    }
}

#[async_trait]
impl CypherExecutor for Neo4jClient {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        let graph = self.graph.clone();
        let q = build_query(cypher, &params);
        let cypher = cypher.to_string();

        Ok(Box::pin(try_stream! {
            let mut rows = graph
                .execute(q)
                .await
                .map_err(|e| query_error(e, &cypher))?;
            while let Some(row) = rows.next().await.map_err(AppError::from)? {
                yield convert_row(&row)?;
            }
        }))
    }

    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), AppError> {
        self.graph
            .run(build_query(cypher, &params))
            .await
            .map_err(|e| query_error(e, cypher))
    }
}

#[async_trait]
impl GraphClient for Neo4jClient {
    type Tx<'a> = Neo4jTransaction;

    async fn begin(&self) -> Result<Self::Tx<'_>, AppError> {
        let txn = self.graph.start_txn().await?;
        Ok(Neo4jTransaction {
            txn: Mutex::new(txn),
        })
    }
}

/// An explicit Neo4j transaction.
///
/// Rows from [`execute_cypher`](CypherExecutor::execute_cypher) are pulled
/// eagerly while the transaction is locked. Dropping the transaction
/// without committing leaves the server to roll it back.
pub struct Neo4jTransaction {
    txn: Mutex<Txn>,
}

#[async_trait]
impl CypherExecutor for Neo4jTransaction {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        let mut txn = self.txn.lock().await;
        let mut stream = txn
            .execute(build_query(cypher, &params))
            .await
            .map_err(|e| query_error(e, cypher))?;

        let mut rows = Vec::new();
        while let Some(row) = stream.next(txn.handle()).await? {
            rows.push(convert_row(&row));
        }
        Ok(Box::pin(futures::stream::iter(rows)))
    }

    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), AppError> {
        self.txn
            .lock()
            .await
            .run(build_query(cypher, &params))
            .await
            .map_err(|e| query_error(e, cypher))
    }
}

#[async_trait]
impl Transaction for Neo4jTransaction {
    async fn commit(self) -> Result<(), AppError> {
        self.txn.into_inner().commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), AppError> {
        self.txn.into_inner().rollback().await?;
        Ok(())
    }
}

fn build_query(cypher: &str, params: &Params) -> neo4rs::Query {
    params
        .iter()
        .fold(neo4rs::query(cypher), |q, (name, value)| {
            q.param(name, json_to_bolt(value))
        })
}

fn query_error(e: neo4rs::Error, cypher: &str) -> AppError {
    AppError::Query {
        message: format!("Cypher query failed: {}", e),
        query: cypher.to_string(),
    }
}

fn convert_row(row: &neo4rs::Row) -> Result<Row, AppError> {
    row.to::<HashMap<String, JsonValue>>()
        .map(Row::new)
        .map_err(|e| AppError::Internal(format!("Failed to decode row: {}", e)))
}

/// Converts a JSON parameter into its Bolt equivalent.
///
/// Integers that fit in `i64` stay integers; other numbers become floats.
pub fn json_to_bolt(value: &JsonValue) -> BoltType {
    match value {
        JsonValue::Null => BoltType::Null(BoltNull),
        JsonValue::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => BoltType::Integer(BoltInteger::new(i)),
            None => BoltType::Float(BoltFloat::new(n.as_f64().unwrap_or(f64::NAN))),
        },
        JsonValue::String(s) => BoltType::String(BoltString::from(s.as_str())),
        JsonValue::Array(items) => BoltType::List(BoltList {
            value: items.iter().map(json_to_bolt).collect(),
        }),
        JsonValue::Object(map) => BoltType::Map(BoltMap::from_iter(
            map.iter()
                .map(|(k, v)| (BoltString::from(k.as_str()), json_to_bolt(v))),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert!(matches!(json_to_bolt(&json!(null)), BoltType::Null(_)));
        assert_eq!(
            json_to_bolt(&json!(true)),
            BoltType::Boolean(BoltBoolean::new(true))
        );
        assert_eq!(json_to_bolt(&json!(20)), BoltType::Integer(BoltInteger::new(20)));
        assert_eq!(json_to_bolt(&json!(0.5)), BoltType::Float(BoltFloat::new(0.5)));
        assert_eq!(
            json_to_bolt(&json!("lockdown")),
            BoltType::String(BoltString::from("lockdown"))
        );
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        assert!(matches!(json_to_bolt(&json!(u64::MAX)), BoltType::Float(_)));
    }

    #[test]
    fn test_nested_values() {
        let bolt = json_to_bolt(&json!({"urls": ["https://a.example.com"], "n": 1}));
        let BoltType::Map(map) = bolt else {
            panic!("expected map");
        };
        assert_eq!(map.value.len(), 2);
        match map.value.get(&BoltString::from("urls")) {
            Some(BoltType::List(list)) => assert_eq!(list.value.len(), 1),
            other => panic!("expected list, got {:?}", other),
        }
    }
}
