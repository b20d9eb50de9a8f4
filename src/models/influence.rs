//! Media-influence query results and the directed graph built from them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{PublicBehavior, Topic};

/// Parameters of the media-influence query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfluenceQuery {
    pub topic: Topic,
    pub behavior: PublicBehavior,
    pub limit: i64,
}

impl Default for InfluenceQuery {
    fn default() -> Self {
        Self {
            topic: Topic::Lockdown,
            behavior: PublicBehavior::Defiance,
            limit: 20,
        }
    }
}

impl InfluenceQuery {
    /// Human-readable title, e.g. "Media Influence on Lockdown Policies
    /// leading to Defiance Public Behavior".
    pub fn title(&self) -> String {
        let topic = self
            .topic
            .as_str()
            .split('_')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");
        let behavior = match self.behavior {
            PublicBehavior::Compliance => "Compliance",
            PublicBehavior::Defiance => "Defiance",
            PublicBehavior::Neutral => "Neutral",
        };
        format!(
            "Media Influence on {} Policies leading to {} Public Behavior",
            topic, behavior
        )
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One row of the media-influence query.
///
/// Field names match the query's `RETURN` aliases so rows deserialize
/// directly and saved JSON can be fed back to the visualizer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InfluenceRecord {
    #[serde(rename = "Topic", default)]
    pub topic: Option<String>,
    #[serde(rename = "MediaSource", default)]
    pub media_source: Option<String>,
    #[serde(rename = "Statement", default)]
    pub statement: Option<String>,
    #[serde(rename = "PublicBehavior", default)]
    pub public_behavior: Option<String>,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "mediaCoverage", default)]
    pub media_coverage: i64,
}

/// Kind of a node in the influence graph; drives its color when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfluenceNodeKind {
    MediaSource,
    Statement,
    PublicBehavior,
    Topic,
}

impl InfluenceNodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfluenceNodeKind::MediaSource => "MediaSource",
            InfluenceNodeKind::Statement => "Statement",
            InfluenceNodeKind::PublicBehavior => "PublicBehavior",
            InfluenceNodeKind::Topic => "Topic",
        }
    }
}

/// A node keyed by its display value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceNode {
    pub id: String,
    pub kind: InfluenceNodeKind,
    /// Publish date, set on statement nodes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A directed, labeled edge between two node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceEdge {
    pub from_id: String,
    pub to_id: String,
    pub relationship: String,
}

/// Directed graph mirroring a set of influence records.
///
/// Nodes and edges are deduplicated: re-adding a node updates its
/// attributes in place, re-adding an edge updates its label.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InfluenceGraph {
    pub nodes: Vec<InfluenceNode>,
    pub edges: Vec<InfluenceEdge>,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
    #[serde(skip)]
    edge_index: HashMap<(String, String), usize>,
}

impl InfluenceGraph {
    /// Build the graph from query rows. Missing fields fall back to
    /// placeholder labels so every row contributes a full path.
    pub fn from_records(records: &[InfluenceRecord]) -> Self {
        let mut graph = Self::default();

        for record in records {
            let topic = record.topic.as_deref().unwrap_or("Unknown Topic");
            let media_source = record.media_source.as_deref().unwrap_or("Unknown Source");
            let statement = record.statement.as_deref().unwrap_or("No Statement");
            let behavior = record
                .public_behavior
                .as_deref()
                .unwrap_or("Unknown Behavior");
            let date = record.date.as_deref().unwrap_or("No Date");

            graph.add_node(media_source, InfluenceNodeKind::MediaSource, None);
            graph.add_node(statement, InfluenceNodeKind::Statement, Some(date));
            graph.add_node(behavior, InfluenceNodeKind::PublicBehavior, None);
            graph.add_node(topic, InfluenceNodeKind::Topic, None);

            graph.add_edge(media_source, statement, "AMPLIFIED");
            graph.add_edge(statement, behavior, "TRIGGERED");
            graph.add_edge(statement, topic, "BELONGS_TO");
        }

        graph
    }

    pub fn add_node(&mut self, id: &str, kind: InfluenceNodeKind, date: Option<&str>) {
        let node = InfluenceNode {
            id: id.to_string(),
            kind,
            date: date.map(str::to_string),
        };
        match self.node_index.get(id) {
            Some(&idx) => self.nodes[idx] = node,
            None => {
                self.node_index.insert(id.to_string(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Adds a directed edge. Both endpoints must already be nodes.
    pub fn add_edge(&mut self, from_id: &str, to_id: &str, relationship: &str) {
        let key = (from_id.to_string(), to_id.to_string());
        let edge = InfluenceEdge {
            from_id: from_id.to_string(),
            to_id: to_id.to_string(),
            relationship: relationship.to_string(),
        };
        match self.edge_index.get(&key) {
            Some(&idx) => self.edges[idx] = edge,
            None => {
                self.edge_index.insert(key, self.edges.len());
                self.edges.push(edge);
            }
        }
    }

    pub fn node(&self, id: &str) -> Option<&InfluenceNode> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
