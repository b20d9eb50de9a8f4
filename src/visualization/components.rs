//! ECS components for graph visualization.

use bevy::prelude::*;

/// A node sphere, tied to its layout node by index.
#[derive(Component)]
pub struct GraphNode {
    pub node_idx: usize,
}

/// An edge cylinder between two layout nodes.
#[derive(Component)]
pub struct GraphEdge {
    pub from_idx: usize,
    pub to_idx: usize,
}

/// Arrowhead cone near the target end of an edge.
#[derive(Component)]
pub struct EdgeArrow {
    pub from_idx: usize,
    pub to_idx: usize,
}

/// Screen-space text following a node.
#[derive(Component)]
pub struct NodeLabel {
    pub node_idx: usize,
}

/// Screen-space relationship label at an edge midpoint.
#[derive(Component)]
pub struct EdgeLabel {
    pub from_idx: usize,
    pub to_idx: usize,
}
