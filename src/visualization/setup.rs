//! Scene setup for the influence graph.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::ui::PositionType;

use crate::visualization::components::{EdgeArrow, EdgeLabel, GraphEdge, GraphNode, NodeLabel};
use crate::visualization::constants::{
    node_color, node_radius, COLOR_EDGE, COLOR_EDGE_LABEL, COLOR_NODE_LABEL, EDGE_LABEL_FONT_SIZE,
    EDGE_RADIUS, NODE_KINDS, NODE_LABEL_FONT_SIZE,
};
use crate::visualization::resources::{CameraOrbit, GraphLayoutRes, GraphTitle};
use crate::visualization::systems::camera::calculate_camera_position;

/// Spawn camera, lights, node and edge meshes, labels, title, and legend.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    layout: Res<GraphLayoutRes>,
    orbit: Res<CameraOrbit>,
    title: Res<GraphTitle>,
) {
    let camera_pos = calculate_camera_position(&orbit);
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(camera_pos).looking_at(orbit.target, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 15000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 6000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-8.0, 10.0, -8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });

    let node_materials: HashMap<_, _> = NODE_KINDS
        .iter()
        .map(|&kind| {
            let handle = materials.add(StandardMaterial {
                base_color: node_color(kind),
                metallic: 0.2,
                perceptual_roughness: 0.6,
                ..default()
            });
            (kind, handle)
        })
        .collect();
    let edge_material = materials.add(StandardMaterial {
        base_color: COLOR_EDGE,
        perceptual_roughness: 0.8,
        ..default()
    });

    let node_font = TextFont {
        font_size: NODE_LABEL_FONT_SIZE,
        ..default()
    };
    for (idx, node) in layout.0.nodes.iter().enumerate() {
        let mesh = meshes.add(Sphere::new(node_radius(node.mass)).mesh().uv(32, 18));
        let material = node_materials
            .get(&node.kind)
            .cloned()
            .unwrap_or_else(|| edge_material.clone());

        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(node.position),
            GraphNode { node_idx: idx },
        ));

        let text = match &node.date {
            Some(date) => format!("{}\n{}", node.label, date),
            None => node.label.clone(),
        };
        commands.spawn((
            Text::new(text),
            node_font.clone(),
            TextColor(COLOR_NODE_LABEL),
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            NodeLabel { node_idx: idx },
        ));
    }

    let edge_mesh = meshes.add(Cylinder::new(EDGE_RADIUS, 1.0));
    let arrow_mesh = meshes.add(Cone::new(0.12, 0.3));
    let edge_font = TextFont {
        font_size: EDGE_LABEL_FONT_SIZE,
        ..default()
    };

    for edge in &layout.0.edges {
        let from_pos = layout.0.nodes[edge.from_idx].position;
        let to_pos = layout.0.nodes[edge.to_idx].position;
        let direction = to_pos - from_pos;
        let length = direction.length();
        if length <= 0.01 {
            continue;
        }

        let dir_norm = direction.normalize();
        let rotation = Quat::from_rotation_arc(Vec3::Y, dir_norm);

        commands.spawn((
            Mesh3d(edge_mesh.clone()),
            MeshMaterial3d(edge_material.clone()),
            Transform::from_translation((from_pos + to_pos) / 2.0)
                .with_rotation(rotation)
                .with_scale(Vec3::new(1.0, length, 1.0)),
            GraphEdge {
                from_idx: edge.from_idx,
                to_idx: edge.to_idx,
            },
        ));

        let target_radius = node_radius(layout.0.nodes[edge.to_idx].mass);
        commands.spawn((
            Mesh3d(arrow_mesh.clone()),
            MeshMaterial3d(edge_material.clone()),
            Transform::from_translation(to_pos - dir_norm * (target_radius + 0.2))
                .with_rotation(rotation),
            EdgeArrow {
                from_idx: edge.from_idx,
                to_idx: edge.to_idx,
            },
        ));

        commands.spawn((
            Text::new(edge.label.clone()),
            edge_font.clone(),
            TextColor(COLOR_EDGE_LABEL),
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            EdgeLabel {
                from_idx: edge.from_idx,
                to_idx: edge.to_idx,
            },
        ));
    }

    commands.spawn((
        Text::new(title.0.clone()),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.95, 0.95)),
        bevy::ui::Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));

    spawn_legend(&mut commands);
}

fn spawn_legend(commands: &mut Commands) {
    commands
        .spawn((
            bevy::ui::Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(20.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.15, 0.85)),
            BorderRadius::all(Val::Px(6.0)),
        ))
        .with_children(|parent| {
            for kind in NODE_KINDS {
                parent
                    .spawn(bevy::ui::Node {
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(6.0),
                        ..default()
                    })
                    .with_children(|item| {
                        item.spawn((
                            bevy::ui::Node {
                                width: Val::Px(12.0),
                                height: Val::Px(12.0),
                                ..default()
                            },
                            BackgroundColor(node_color(kind)),
                            BorderRadius::all(Val::Px(6.0)),
                        ));
                        item.spawn((
                            Text::new(kind.as_str()),
                            TextFont {
                                font_size: 12.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.8, 0.8, 0.8)),
                        ));
                    });
            }
        });
}
