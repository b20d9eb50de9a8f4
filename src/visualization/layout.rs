//! Force-directed layout of an influence graph.

use std::collections::HashMap;

use bevy::math::Vec3;

use crate::models::{InfluenceGraph, InfluenceNodeKind};

const REPULSION_STRENGTH: f32 = 200.0;
const DAMPING: f32 = 0.6;
const MIN_DISTANCE: f32 = 0.5;
const MAX_VELOCITY: f32 = 200.0;
const MIN_MASS: f32 = 1.0;
const MASS_PER_CONNECTION: f32 = 1.5;

// (stiffness, rest_length) per relationship. Equilibrium sits where
// stiffness * ln(d / rest) = REPULSION / d².
const SPRING_AMPLIFIED: (f32, f32) = (20.0, 7.0);
const SPRING_TRIGGERED: (f32, f32) = (30.0, 6.0);
const SPRING_BELONGS_TO: (f32, f32) = (30.0, 6.0);
const SPRING_DEFAULT: (f32, f32) = (15.0, 8.0);

/// Longest label drawn before truncation.
pub const MAX_LABEL_CHARS: usize = 48;

#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub id: String,
    pub label: String,
    pub kind: InfluenceNodeKind,
    /// Publish date, statement nodes only.
    pub date: Option<String>,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Grows with degree; heavier nodes are larger and move less.
    pub mass: f32,
}

#[derive(Debug, Clone)]
pub struct LayoutEdge {
    pub from_idx: usize,
    pub to_idx: usize,
    /// Relationship type.
    pub label: String,
    pub stiffness: f32,
    pub rest_length: f32,
}

#[derive(Debug, Clone, Default)]
pub struct GraphLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl GraphLayout {
    /// Place every node of the graph on a Fibonacci sphere and attach a
    /// log spring to every edge.
    pub fn from_influence_graph(graph: &InfluenceGraph) -> Self {
        let total = graph.nodes.len();
        let mut id_to_idx = HashMap::with_capacity(total);

        let mut nodes: Vec<LayoutNode> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                id_to_idx.insert(node.id.as_str(), i);
                LayoutNode {
                    id: node.id.clone(),
                    label: truncate_label(&node.id, MAX_LABEL_CHARS),
                    kind: node.kind,
                    date: node.date.clone(),
                    position: initial_position(i, total),
                    velocity: Vec3::ZERO,
                    mass: MIN_MASS,
                }
            })
            .collect();

        let edges: Vec<LayoutEdge> = graph
            .edges
            .iter()
            .filter_map(|e| {
                let from_idx = *id_to_idx.get(e.from_id.as_str())?;
                let to_idx = *id_to_idx.get(e.to_id.as_str())?;
                let (stiffness, rest_length) = spring_params(&e.relationship);
                Some(LayoutEdge {
                    from_idx,
                    to_idx,
                    label: e.relationship.clone(),
                    stiffness,
                    rest_length,
                })
            })
            .collect();

        distribute_mass(&mut nodes, &edges);
        Self { nodes, edges }
    }

    /// One integration step.
    ///
    /// Inverse-square repulsion between all pairs, logarithmic springs
    /// along edges, then the centroid is translated back to the origin.
    pub fn update_physics(&mut self, dt: f32) {
        let n = self.nodes.len();
        if n == 0 {
            return;
        }

        let masses: Vec<f32> = self.nodes.iter().map(|n| n.mass).collect();

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = self.nodes[i].position - self.nodes[j].position;
                let dist = delta.length().max(MIN_DISTANCE);
                let force = REPULSION_STRENGTH / (dist * dist);
                let dir = delta.normalize_or_zero();

                self.nodes[i].velocity += dir * force * dt / masses[i];
                self.nodes[j].velocity -= dir * force * dt / masses[j];
            }
        }

        for edge in &self.edges {
            let delta = self.nodes[edge.to_idx].position - self.nodes[edge.from_idx].position;
            let dist = delta.length().max(MIN_DISTANCE);
            let force = edge.stiffness * (dist / edge.rest_length).ln();
            let dir = delta.normalize_or_zero();

            self.nodes[edge.from_idx].velocity += dir * force * dt / masses[edge.from_idx];
            self.nodes[edge.to_idx].velocity -= dir * force * dt / masses[edge.to_idx];
        }

        let centroid: Vec3 = self.nodes.iter().map(|n| n.position).sum::<Vec3>() / n as f32;
        for node in &mut self.nodes {
            node.position -= centroid;
        }

        for node in &mut self.nodes {
            node.velocity *= DAMPING;
            let speed = node.velocity.length();
            if speed > MAX_VELOCITY {
                node.velocity = node.velocity.normalize() * MAX_VELOCITY;
            } else if speed < 0.001 {
                node.velocity = Vec3::ZERO;
            }
            node.position += node.velocity * dt;
        }
    }

    /// Run `iterations` fixed 60 Hz steps.
    pub fn stabilize(&mut self, iterations: usize) {
        let dt = 0.016;
        for _ in 0..iterations {
            self.update_physics(dt);
        }
    }

    /// Centroid and padded radius enclosing every node.
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        if self.nodes.is_empty() {
            return (Vec3::ZERO, 1.0);
        }

        let center: Vec3 =
            self.nodes.iter().map(|n| n.position).sum::<Vec3>() / self.nodes.len() as f32;
        let max_dist = self
            .nodes
            .iter()
            .map(|n| (n.position - center).length())
            .fold(0.0_f32, f32::max);

        (center, max_dist + 2.0)
    }
}

/// Shorten `text` to at most `max` characters, ending in an ellipsis.
pub fn truncate_label(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

fn distribute_mass(nodes: &mut [LayoutNode], edges: &[LayoutEdge]) {
    let mut degree = vec![0usize; nodes.len()];
    for edge in edges {
        degree[edge.from_idx] += 1;
        degree[edge.to_idx] += 1;
    }
    for (node, d) in nodes.iter_mut().zip(degree) {
        node.mass = MIN_MASS + d as f32 * MASS_PER_CONNECTION;
    }
}

fn spring_params(relationship: &str) -> (f32, f32) {
    match relationship {
        "AMPLIFIED" => SPRING_AMPLIFIED,
        "TRIGGERED" => SPRING_TRIGGERED,
        "BELONGS_TO" => SPRING_BELONGS_TO,
        _ => SPRING_DEFAULT,
    }
}

/// Fibonacci-sphere placement, radius growing with node count.
fn initial_position(i: usize, total_nodes: usize) -> Vec3 {
    let golden_ratio = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let idx = i as f32 + 0.5;
    let n = total_nodes.max(1) as f32;

    let theta = 2.0 * std::f32::consts::PI * idx / golden_ratio;
    let phi = (1.0 - 2.0 * idx / n).clamp(-1.0, 1.0).acos();

    let base_radius = 3.0 + (n / 10.0).sqrt() * 2.0;
    let radius = base_radius + (i as f32 * 1.618).sin() * 2.0;

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InfluenceRecord;

    fn graph() -> InfluenceGraph {
        let record = |source: &str, statement: &str| InfluenceRecord {
            topic: Some("lockdown".into()),
            media_source: Some(source.into()),
            statement: Some(statement.into()),
            public_behavior: Some("Public Defiance".into()),
            date: Some("2020-04-01".into()),
            media_coverage: 1,
        };
        InfluenceGraph::from_records(&[
            record("example", "crowds defy curfew"),
            record("news", "bars ignore lockdown"),
        ])
    }

    #[test]
    fn test_layout_mirrors_graph() {
        let layout = GraphLayout::from_influence_graph(&graph());
        assert_eq!(layout.nodes.len(), 6);
        assert_eq!(layout.edges.len(), 6);

        let statement = layout
            .nodes
            .iter()
            .find(|n| n.id == "crowds defy curfew")
            .unwrap();
        assert_eq!(statement.kind, InfluenceNodeKind::Statement);
        assert_eq!(statement.date.as_deref(), Some("2020-04-01"));
    }

    #[test]
    fn test_mass_tracks_degree() {
        let layout = GraphLayout::from_influence_graph(&graph());
        let mass = |id: &str| layout.nodes.iter().find(|n| n.id == id).unwrap().mass;
        // topic has two BELONGS_TO edges, a source has one AMPLIFIED edge
        assert!(mass("lockdown") > mass("example"));
        assert_eq!(mass("example"), MIN_MASS + MASS_PER_CONNECTION);
    }

    #[test]
    fn test_spring_params_by_relationship() {
        let layout = GraphLayout::from_influence_graph(&graph());
        let amplified = layout.edges.iter().find(|e| e.label == "AMPLIFIED").unwrap();
        assert_eq!((amplified.stiffness, amplified.rest_length), SPRING_AMPLIFIED);
        assert_eq!(spring_params("UNKNOWN"), SPRING_DEFAULT);
    }

    #[test]
    fn test_stabilize_stays_finite_and_centered() {
        let mut layout = GraphLayout::from_influence_graph(&graph());
        layout.stabilize(300);

        assert!(layout.nodes.iter().all(|n| n.position.is_finite()));
        let (center, radius) = layout.bounding_sphere();
        assert!(center.length() < 1.0);
        assert!(radius > 2.0);
    }

    #[test]
    fn test_initial_positions_are_distinct() {
        let a = initial_position(0, 4);
        let b = initial_position(1, 4);
        assert!((a - b).length() > 0.1);
    }

    #[test]
    fn test_empty_layout() {
        let mut layout = GraphLayout::from_influence_graph(&InfluenceGraph::default());
        layout.stabilize(10);
        assert_eq!(layout.bounding_sphere(), (Vec3::ZERO, 1.0));
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("officials announced lockdown", 12), "officials a…");
        assert_eq!(truncate_label("", 5), "");
    }
}
