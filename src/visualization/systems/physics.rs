//! Graph layout physics system.

use bevy::prelude::*;

use crate::visualization::components::{EdgeArrow, GraphEdge, GraphNode};
use crate::visualization::constants::node_radius;
use crate::visualization::resources::GraphLayoutRes;

const STEPS_PER_FRAME: usize = 20;

type NodeFilter = (Without<GraphEdge>, Without<EdgeArrow>);
type EdgeFilter = (Without<GraphNode>, Without<EdgeArrow>);
type ArrowFilter = (Without<GraphNode>, Without<GraphEdge>);

/// Step the layout and move node, edge, and arrow meshes to match.
pub fn update_layout_system(
    mut layout: ResMut<GraphLayoutRes>,
    mut node_query: Query<(&mut Transform, &GraphNode), NodeFilter>,
    mut edge_query: Query<(&mut Transform, &GraphEdge), EdgeFilter>,
    mut arrow_query: Query<(&mut Transform, &EdgeArrow), ArrowFilter>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for _ in 0..STEPS_PER_FRAME {
        layout.0.update_physics(dt);
    }
    let nodes = &layout.0.nodes;

    for (mut transform, graph_node) in node_query.iter_mut() {
        if let Some(node) = nodes.get(graph_node.node_idx) {
            transform.translation = node.position;
        }
    }

    for (mut transform, edge) in edge_query.iter_mut() {
        let from_pos = nodes[edge.from_idx].position;
        let to_pos = nodes[edge.to_idx].position;
        let direction = to_pos - from_pos;
        let length = direction.length();

        if length > 0.01 {
            transform.translation = (from_pos + to_pos) / 2.0;
            transform.rotation = Quat::from_rotation_arc(Vec3::Y, direction.normalize());
            transform.scale = Vec3::new(1.0, length, 1.0);
        }
    }

    for (mut transform, arrow) in arrow_query.iter_mut() {
        let from_pos = nodes[arrow.from_idx].position;
        let target = &nodes[arrow.to_idx];
        let direction = target.position - from_pos;

        if direction.length() > 0.01 {
            let dir_norm = direction.normalize();
            transform.translation = target.position - dir_norm * (node_radius(target.mass) + 0.2);
            transform.rotation = Quat::from_rotation_arc(Vec3::Y, dir_norm);
        }
    }
}
