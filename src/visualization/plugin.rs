//! Visualization plugin for Bevy.

use bevy::prelude::*;

use super::layout::GraphLayout;
use super::resources::{CameraOrbit, GraphLayoutRes, GraphTitle};
use super::setup::setup_scene;
use super::systems;

/// Renders a pre-computed [`GraphLayout`] and keeps it settling.
pub struct VisualizationPlugin {
    pub layout: GraphLayout,
    pub title: String,
}

impl VisualizationPlugin {
    pub fn new(layout: GraphLayout, title: impl Into<String>) -> Self {
        Self {
            layout,
            title: title.into(),
        }
    }
}

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        // Keep a CameraOrbit inserted by the caller
        app.init_resource::<CameraOrbit>()
            .insert_resource(GraphLayoutRes(self.layout.clone()))
            .insert_resource(GraphTitle(self.title.clone()))
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (
                    systems::camera_orbit_system,
                    systems::update_layout_system,
                    systems::update_node_labels_system,
                    systems::update_edge_labels_system,
                )
                    .chain(),
            );
    }
}
