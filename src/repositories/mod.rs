//! Data access layer for graph operations.
//!
//! Repositories borrow a scoped graph handle and hold no state of their
//! own beyond it.

mod influence;
mod schema;
mod statement;

#[cfg(test)]
pub(crate) mod testing;

pub use influence::InfluenceRepository;
pub use schema::{GraphStats, SchemaRepository, NODE_LABELS, RELATIONSHIP_TYPES};
pub use statement::{merge_cypher, LoadReport, StatementRepository};
