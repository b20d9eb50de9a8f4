//! Recording graph client for repository unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::AppError;
use crate::graph::{CypherExecutor, GraphClient, Params, Row, RowStream, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Cypher(String, Params),
    Begin,
    Commit,
    Rollback,
}

/// Records every call and replays canned result sets in order.
#[derive(Clone, Default)]
pub struct RecordingClient {
    log: Arc<Mutex<Vec<Recorded>>>,
    results: Arc<Mutex<VecDeque<Vec<Row>>>>,
    fail_on: Option<String>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails any query whose text contains `needle`.
    pub fn failing_on(needle: &str) -> Self {
        Self {
            fail_on: Some(needle.to_string()),
            ..Self::default()
        }
    }

    pub fn push_rows(&self, rows: Vec<Row>) {
        self.results.lock().unwrap().push_back(rows);
    }

    pub fn log(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<(String, Params)> {
        self.log()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Cypher(c, p) => Some((c, p)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, cypher: &str, params: Params) -> Result<(), AppError> {
        self.log
            .lock()
            .unwrap()
            .push(Recorded::Cypher(cypher.to_string(), params));
        match &self.fail_on {
            Some(needle) if cypher.contains(needle.as_str()) => Err(AppError::Query {
                message: "injected failure".into(),
                query: cypher.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CypherExecutor for RecordingClient {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        self.record(cypher, params)?;
        let rows = self.results.lock().unwrap().pop_front().unwrap_or_default();
        Ok(Box::pin(futures::stream::iter(rows.into_iter().map(Ok))))
    }

    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), AppError> {
        self.record(cypher, params)
    }
}

#[async_trait]
impl GraphClient for RecordingClient {
    type Tx<'a> = RecordingTx;

    async fn begin(&self) -> Result<Self::Tx<'_>, AppError> {
        self.log.lock().unwrap().push(Recorded::Begin);
        Ok(RecordingTx {
            client: self.clone(),
        })
    }
}

pub struct RecordingTx {
    client: RecordingClient,
}

#[async_trait]
impl CypherExecutor for RecordingTx {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        self.client.execute_cypher(cypher, params).await
    }

    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), AppError> {
        self.client.run_cypher(cypher, params).await
    }
}

#[async_trait]
impl Transaction for RecordingTx {
    async fn commit(self) -> Result<(), AppError> {
        self.client.log.lock().unwrap().push(Recorded::Commit);
        Ok(())
    }

    async fn rollback(self) -> Result<(), AppError> {
        self.client.log.lock().unwrap().push(Recorded::Rollback);
        Ok(())
    }
}
