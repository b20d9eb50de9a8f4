//! Domain models for the statement pipeline and the influence graph.

mod classification;
mod influence;
mod statement;

pub use classification::{PublicBehavior, StatementType, Topic};
pub use influence::{
    InfluenceEdge, InfluenceGraph, InfluenceNode, InfluenceNodeKind, InfluenceQuery,
    InfluenceRecord,
};
pub use statement::{EnrichedStatement, RawStatement, StatementIdentity, UrlRef};
