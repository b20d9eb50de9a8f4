//! Application error types.

use thiserror::Error;

/// Application-level errors for stancegraph.
#[derive(Error, Debug)]
pub enum AppError {
    // Neo4j errors
    #[error("Neo4j connection error: {0}")]
    Connection(#[from] neo4rs::Error),

    #[error("Neo4j query error: {message}")]
    Query { message: String, query: String },

    #[error("Neo4j is not configured. Set [neo4j] in config or STANCEGRAPH_NEO4J__URI")]
    MissingNeo4jConfig,

    // Input errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Pipeline errors
    #[error("Invalid keyword pattern: {0}")]
    InvalidKeywords(#[from] regex::Error),

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}
