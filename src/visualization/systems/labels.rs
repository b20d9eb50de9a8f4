//! Screen-space placement of node and edge labels.

use bevy::prelude::*;
use bevy::ui::Node as UiNode;

use crate::visualization::components::{EdgeLabel, NodeLabel};
use crate::visualization::constants::node_radius;
use crate::visualization::resources::GraphLayoutRes;

type NodeLabelQuery<'w, 's> =
    Query<'w, 's, (&'static mut UiNode, &'static mut Visibility, &'static NodeLabel), Without<EdgeLabel>>;
type EdgeLabelQuery<'w, 's> =
    Query<'w, 's, (&'static mut UiNode, &'static mut Visibility, &'static EdgeLabel), Without<NodeLabel>>;

/// Project a world point to the viewport, `None` when off screen or
/// behind the camera.
fn project(camera: &Camera, camera_transform: &GlobalTransform, world_pos: Vec3) -> Option<Vec2> {
    let to_point = world_pos - camera_transform.translation();
    if to_point.dot(*camera_transform.forward()) <= 0.0 {
        return None;
    }
    camera.world_to_viewport(camera_transform, world_pos).ok()
}

fn place(node_ui: &mut UiNode, visibility: &mut Visibility, pos: Option<Vec2>, offset: Vec2) {
    match pos {
        Some(p) => {
            *visibility = Visibility::Visible;
            node_ui.left = Val::Px(p.x + offset.x);
            node_ui.top = Val::Px(p.y + offset.y);
        }
        None => *visibility = Visibility::Hidden,
    }
}

/// Keep every label pinned just above its node.
pub fn update_node_labels_system(
    layout: Res<GraphLayoutRes>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut label_query: NodeLabelQuery,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    for (mut node_ui, mut visibility, label) in label_query.iter_mut() {
        let Some(node) = layout.0.nodes.get(label.node_idx) else {
            continue;
        };
        let world_pos = node.position + Vec3::Y * (node_radius(node.mass) * 1.2 + 0.3);
        let pos = project(camera, camera_transform, world_pos);
        place(&mut node_ui, &mut visibility, pos, Vec2::new(-40.0, -10.0));
    }
}

/// Keep relationship labels at edge midpoints.
pub fn update_edge_labels_system(
    layout: Res<GraphLayoutRes>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut label_query: EdgeLabelQuery,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    for (mut node_ui, mut visibility, label) in label_query.iter_mut() {
        let from_pos = layout.0.nodes[label.from_idx].position;
        let to_pos = layout.0.nodes[label.to_idx].position;
        let pos = project(camera, camera_transform, (from_pos + to_pos) / 2.0);
        place(&mut node_ui, &mut visibility, pos, Vec2::new(-25.0, -6.0));
    }
}
