//! Seams between the repositories and the graph store.
//!
//! The influence and schema repositories only read, so they take any
//! [`CypherExecutor`]. The statement loader writes one transaction per
//! statement and needs a [`GraphClient`].

use async_trait::async_trait;

use crate::error::AppError;
use crate::graph::row::{Params, RowStream};

/// Sends Cypher text with named parameters.
#[async_trait]
pub trait CypherExecutor: Send + Sync {
    /// Rows are decoded into JSON-valued [`Row`](crate::graph::Row)s.
    async fn execute_cypher(&self, cypher: &str, params: Params)
        -> Result<RowStream<'_>, AppError>;

    /// For MERGE and schema statements whose result is discarded.
    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), AppError>;
}

/// End of an explicit transaction. Both consume it.
#[async_trait]
pub trait Transaction: Send + Sync {
    async fn commit(self) -> Result<(), AppError>;

    async fn rollback(self) -> Result<(), AppError>;
}

/// An executor that can also open explicit transactions.
///
/// Queries sent directly on the client auto-commit.
#[async_trait]
pub trait GraphClient: CypherExecutor {
    type Tx<'a>: Transaction + CypherExecutor
    where
        Self: 'a;

    /// ```ignore
    /// let txn = client.begin().await?;
    /// if let Err(e) = txn.run_cypher(&merge, params).await {
    ///     txn.rollback().await?;
    ///     return Err(e);
    /// }
    /// txn.commit().await?;
    /// ```
    async fn begin(&self) -> Result<Self::Tx<'_>, AppError>;
}
