//! ECS resources for graph visualization state.

use bevy::prelude::*;

use super::layout::GraphLayout;

pub const DEFAULT_PITCH: f32 = 0.3;
pub const DEFAULT_DISTANCE: f32 = 25.0;

/// Camera orbit state for 3D navigation.
#[derive(Resource, Clone, Copy, Debug)]
pub struct CameraOrbit {
    /// Horizontal rotation angle (radians).
    pub yaw: f32,
    /// Vertical rotation angle (radians).
    pub pitch: f32,
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Restored by the reset key.
    pub home_distance: f32,
    pub home_target: Vec3,
}

impl CameraOrbit {
    /// Orbit framing a sphere of `radius` around `target`.
    pub fn framing(target: Vec3, radius: f32) -> Self {
        let distance = (radius * 2.5).max(10.0);
        Self {
            distance,
            target,
            home_distance: distance,
            home_target: target,
            ..default()
        }
    }

    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = DEFAULT_PITCH;
        self.distance = self.home_distance;
        self.target = self.home_target;
    }
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: DEFAULT_PITCH,
            distance: DEFAULT_DISTANCE,
            target: Vec3::ZERO,
            home_distance: DEFAULT_DISTANCE,
            home_target: Vec3::ZERO,
        }
    }
}

/// Live layout, stepped every frame.
#[derive(Resource)]
pub struct GraphLayoutRes(pub GraphLayout);

/// Heading shown above the graph.
#[derive(Resource, Clone)]
pub struct GraphTitle(pub String);
