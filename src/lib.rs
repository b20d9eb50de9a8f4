//! stancegraph - statement stance graph
//!
//! Filters a newline-delimited JSON corpus of extracted statements by
//! policy keywords, classifies each statement's stance and topic, merges
//! the result into Neo4j, and renders media-influence queries in 3D.

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod pipeline;
pub mod repositories;
pub mod visualization;
