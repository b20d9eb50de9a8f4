//! Graph abstraction layer over the Neo4j store.
//!
//! - [`CypherExecutor`] - Execute Cypher queries
//! - [`Transaction`] - Transaction lifecycle (commit/rollback)
//! - [`GraphClient`] - Connection management and transaction creation
//!
//! Read repositories depend only on [`CypherExecutor`]; the statement
//! loader needs a [`GraphClient`] for its per-statement transactions.
//! [`backends::neo4j`] provides the live implementation.
//!
//! ```ignore
//! use stancegraph::graph::{backends::neo4j::Neo4jClient, QueryExt};
//!
//! let client = Neo4jClient::connect(&config).await?;
//!
//! client.query("MERGE (t:Topic {name: $name})")
//!     .param("name", "lockdown")
//!     .run()
//!     .await?;
//! ```

mod macros;
mod query;
mod row;
mod traits;

pub mod backends;

pub use query::{Query, QueryExt};
pub use row::{Params, Row, RowStream};
pub use traits::{CypherExecutor, GraphClient, Transaction};

#[doc(inline)]
pub use crate::cypher;
