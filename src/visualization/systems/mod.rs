//! ECS systems for graph visualization.

pub mod camera;
pub mod labels;
pub mod physics;

pub use camera::camera_orbit_system;
pub use labels::{update_edge_labels_system, update_node_labels_system};
pub use physics::update_layout_system;
