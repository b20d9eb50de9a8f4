//! 3D rendering of media-influence query results.
//!
//! ## Module Structure
//!
//! - `layout` - Force-directed layout algorithm
//! - `components` - ECS components for nodes, edges, arrows, labels
//! - `resources` - Camera orbit, live layout, title
//! - `systems` - Camera, physics, and label systems
//! - `setup` - Scene initialization
//! - `plugin` - Bevy plugin definition
//! - `constants` - Colors and sizes

mod components;
mod constants;
mod layout;
mod plugin;
mod resources;
mod setup;
mod systems;

pub use constants::node_color;
pub use layout::{truncate_label, GraphLayout, LayoutEdge, LayoutNode};
pub use plugin::VisualizationPlugin;

use bevy::prelude::*;

use crate::models::InfluenceGraph;
use constants::COLOR_BACKGROUND;
use resources::CameraOrbit;

pub const EMPTY_GRAPH_MESSAGE: &str = "Graph is empty. No visualization to show.";

/// Steps run before the first frame so the window opens on a settled graph.
const PRESETTLE_ITERATIONS: usize = 500;

/// Result of [`run_visualizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Nothing to draw; no window was opened.
    Empty,
    /// The window was shown and has been closed.
    Closed,
}

/// Open a window rendering `graph` and block until it closes.
///
/// An empty graph prints [`EMPTY_GRAPH_MESSAGE`] and returns immediately.
pub fn run_visualizer(graph: &InfluenceGraph, title: &str) -> RenderOutcome {
    if graph.is_empty() {
        println!("{}", EMPTY_GRAPH_MESSAGE);
        return RenderOutcome::Empty;
    }

    let mut layout = GraphLayout::from_influence_graph(graph);
    layout.stabilize(PRESETTLE_ITERATIONS);
    let (center, radius) = layout.bounding_sphere();
    tracing::info!(
        nodes = layout.nodes.len(),
        edges = layout.edges.len(),
        "Opening visualization window"
    );

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: title.to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(COLOR_BACKGROUND))
        .insert_resource(CameraOrbit::framing(center, radius))
        .add_plugins(VisualizationPlugin::new(layout, title))
        .run();

    RenderOutcome::Closed
}
