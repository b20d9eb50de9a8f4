//! Backend implementations of the traits in [`crate::graph`].
//!
//! | Backend | Module |
//! |---------|--------|
//! | Neo4j (Bolt, via `neo4rs`) | [`neo4j`] |
//!
//! A backend provides a client struct implementing
//! [`CypherExecutor`](crate::graph::CypherExecutor) and
//! [`GraphClient`](crate::graph::GraphClient), plus a transaction struct
//! implementing `CypherExecutor` and [`Transaction`](crate::graph::Transaction).

pub mod neo4j;
