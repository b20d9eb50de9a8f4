//! Camera orbit, pan, and zoom systems.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::visualization::resources::CameraOrbit;

/// Calculate camera position from orbit parameters.
pub fn calculate_camera_position(orbit: &CameraOrbit) -> Vec3 {
    let x = orbit.distance * orbit.pitch.cos() * orbit.yaw.sin();
    let y = orbit.distance * orbit.pitch.sin();
    let z = orbit.distance * orbit.pitch.cos() * orbit.yaw.cos();
    orbit.target + Vec3::new(x, y, z)
}

/// Camera orbit control system.
///
/// Controls:
/// - Left- or right-click drag: Orbit around target
/// - Middle-click drag (or Alt+drag): Pan
/// - Scroll wheel: Zoom
/// - WASD: Pan horizontally
/// - Q/E: Pan vertically
/// - R: Reset to the initial framing
pub fn camera_orbit_system(
    mut orbit: ResMut<CameraOrbit>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll: EventReader<MouseWheel>,
) {
    let alt_held = keyboard.pressed(KeyCode::AltLeft) || keyboard.pressed(KeyCode::AltRight);
    let orbit_drag =
        mouse_button.pressed(MouseButton::Left) || mouse_button.pressed(MouseButton::Right);
    if orbit_drag && !alt_held {
        for ev in mouse_motion.read() {
            orbit.yaw -= ev.delta.x * 0.01;
            orbit.pitch += ev.delta.y * 0.01;
            orbit.pitch = orbit.pitch.clamp(-1.5, 1.5);
        }
    }

    let is_panning = mouse_button.pressed(MouseButton::Middle) || (orbit_drag && alt_held);

    if is_panning {
        for ev in mouse_motion.read() {
            let right = Vec3::new(orbit.yaw.cos(), 0.0, -orbit.yaw.sin());
            let up = Vec3::Y;
            orbit.target += right * ev.delta.x * 0.02;
            orbit.target -= up * ev.delta.y * 0.02;
        }
    }

    let max_distance = (orbit.home_distance * 4.0).max(100.0);
    for ev in scroll.read() {
        orbit.distance = (orbit.distance - ev.y).clamp(2.0, max_distance);
    }

    let pan_speed = 0.2;
    let forward = Vec3::new(orbit.yaw.sin(), 0.0, orbit.yaw.cos());
    let right = Vec3::new(orbit.yaw.cos(), 0.0, -orbit.yaw.sin());

    if keyboard.pressed(KeyCode::KeyW) {
        orbit.target += forward * pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        orbit.target -= forward * pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        orbit.target -= right * pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        orbit.target += right * pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyQ) {
        orbit.target.y -= pan_speed;
    }
    if keyboard.pressed(KeyCode::KeyE) {
        orbit.target.y += pan_speed;
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        orbit.reset();
    }

    if let Ok(mut transform) = camera_query.get_single_mut() {
        let pos = calculate_camera_position(&orbit);
        *transform = Transform::from_translation(pos).looking_at(orbit.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_position_at_default_orbit() {
        let orbit = CameraOrbit {
            pitch: 0.0,
            distance: 10.0,
            ..Default::default()
        };
        let pos = calculate_camera_position(&orbit);
        assert!((pos - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn test_camera_position_is_offset_by_target() {
        let orbit = CameraOrbit::framing(Vec3::new(1.0, 2.0, 3.0), 4.0);
        let pos = calculate_camera_position(&orbit);
        assert!(((pos - orbit.target).length() - orbit.distance).abs() < 1e-4);
    }
}
