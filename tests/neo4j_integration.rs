//! Integration tests for the Neo4j loader and queries.
//!
//! These tests require a running Neo4j instance and WIPE its database.
//! Run with: `cargo test --features integration --test neo4j_integration`
//! Connection defaults to bolt://localhost:7687 (neo4j/password); override
//! with STANCEGRAPH_TEST_URI, STANCEGRAPH_TEST_USER and STANCEGRAPH_TEST_PASSWORD.

#![cfg(feature = "integration")]

use stancegraph::config::{KeywordConfig, Neo4jConfig};
use stancegraph::graph::backends::neo4j::Neo4jClient;
use stancegraph::graph::{CypherExecutor, Params, QueryExt};
use stancegraph::models::{
    EnrichedStatement, InfluenceQuery, PublicBehavior, RawStatement, StatementIdentity, Topic,
    UrlRef,
};
use stancegraph::pipeline::Classifier;
use stancegraph::repositories::{InfluenceRepository, SchemaRepository, StatementRepository};
use serial_test::serial;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

async fn create_client() -> Neo4jClient {
    let config = Neo4jConfig {
        uri: env_or("STANCEGRAPH_TEST_URI", "bolt://localhost:7687"),
        user: env_or("STANCEGRAPH_TEST_USER", "neo4j"),
        password: Some(env_or("STANCEGRAPH_TEST_PASSWORD", "password")),
    };
    Neo4jClient::connect(&config)
        .await
        .expect("Failed to connect to test database")
}

async fn cleanup(client: &Neo4jClient) {
    client
        .run_cypher("MATCH (n) DETACH DELETE n", Params::new())
        .await
        .expect("Failed to clear database");
}

fn corpus() -> Vec<EnrichedStatement> {
    let classifier = Classifier::new(&KeywordConfig::default()).unwrap();
    let raw = |pre: &str, verb: &str, post: &str, url: Option<&str>, date: Option<&str>| RawStatement {
        pre: pre.into(),
        verb: verb.into(),
        post: post.into(),
        date: date.map(Into::into),
        urls: url.map(|u| vec![UrlRef { url: u.into() }]),
    };

    [
        raw("protesters", "defied", "the lockdown order", Some("https://www.news.example/a"), Some("2020-04-01")),
        raw("protesters", "defied", "the lockdown order", Some("https://www.wire.example/b"), Some("2020-04-01")),
        raw("shops", "ignored", "the lockdown", Some("https://daily.example/x"), None),
        raw("residents", "followed", "the lockdown rules", None, Some("2020-04-03")),
        raw("clinics", "expanded", "vaccination hours", None, None),
    ]
    .into_iter()
    .map(|r| classifier.enrich(r))
    .collect()
}

#[tokio::test]
#[serial]
async fn test_load_is_idempotent() {
    let client = create_client().await;
    cleanup(&client).await;

    let statements = corpus();
    let repo = StatementRepository::new(&client, StatementIdentity::Text);
    repo.ensure_constraints().await.expect("constraints");
    repo.ensure_constraints().await.expect("constraints are re-runnable");

    let first_report = repo.load_all(&statements).await.expect("first load");
    let first = SchemaRepository::new(&client).stats().await.expect("stats");

    let second_report = repo.load_all(&statements).await.expect("second load");
    let second = SchemaRepository::new(&client).stats().await.expect("stats");

    assert_eq!(first_report, second_report);
    assert_eq!(first, second);
    // Duplicate wording collapses into one Statement node
    assert_eq!(first.node_count("Statement"), 4);
    assert!(first.node_count("MediaSource") >= 2);
}

#[tokio::test]
#[serial]
async fn test_missing_source_and_date_create_no_nodes() {
    let client = create_client().await;
    cleanup(&client).await;

    let statements: Vec<_> = corpus()
        .into_iter()
        .filter(|s| s.media_source.is_none() && s.raw.date.is_none())
        .collect();
    assert_eq!(statements.len(), 1);

    let repo = StatementRepository::new(&client, StatementIdentity::Text);
    repo.load_all(&statements).await.expect("load");

    let stats = SchemaRepository::new(&client).stats().await.expect("stats");
    assert_eq!(stats.node_count("Statement"), 1);
    assert_eq!(stats.node_count("MediaSource"), 0);
    assert_eq!(stats.node_count("Date"), 0);
    assert_eq!(stats.relationship_count("AMPLIFIED"), 0);
}

#[tokio::test]
#[serial]
async fn test_occurrence_identity_keeps_sources_apart() {
    let client = create_client().await;
    cleanup(&client).await;

    let repo = StatementRepository::new(&client, StatementIdentity::Occurrence);
    repo.load_all(&corpus()).await.expect("load");

    let stats = SchemaRepository::new(&client).stats().await.expect("stats");
    assert_eq!(stats.node_count("Statement"), 5);
}

#[tokio::test]
#[serial]
async fn test_influence_query_ranks_defiance() {
    let client = create_client().await;
    cleanup(&client).await;

    StatementRepository::new(&client, StatementIdentity::Text)
        .load_all(&corpus())
        .await
        .expect("load");

    let records = InfluenceRepository::new(&client)
        .find(&InfluenceQuery::default())
        .await
        .expect("query");

    assert!(!records.is_empty());
    for record in &records {
        assert_eq!(record.topic.as_deref(), Some(Topic::Lockdown.as_str()));
        assert_eq!(
            record.public_behavior.as_deref(),
            Some(PublicBehavior::Defiance.as_str())
        );
    }
    assert!(records
        .windows(2)
        .all(|pair| pair[0].media_coverage >= pair[1].media_coverage));
}

#[tokio::test]
#[serial]
async fn test_query_builder_round_trip() {
    let client = create_client().await;
    cleanup(&client).await;

    client
        .query("CREATE (t:Topic {name: $name})")
        .param("name", "lockdown")
        .run()
        .await
        .expect("create");

    let row = client
        .query("MATCH (t:Topic {name: $name}) RETURN t.name AS name")
        .param("name", "lockdown")
        .fetch_one()
        .await
        .expect("query")
        .expect("one row");
    let name: String = row.get("name").expect("name column");
    assert_eq!(name, "lockdown");
}
