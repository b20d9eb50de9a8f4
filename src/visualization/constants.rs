//! Visual constants for the influence graph.

use bevy::prelude::*;

use crate::models::InfluenceNodeKind;

// =============================================================================
// Node Colors
// =============================================================================

/// MediaSource node color (sky blue).
pub const COLOR_MEDIA_SOURCE: Color = Color::srgb(0.53, 0.81, 0.92); // #87CEEB
/// Statement node color (light green).
pub const COLOR_STATEMENT: Color = Color::srgb(0.56, 0.93, 0.56); // #90EE90
/// PublicBehavior node color (red).
pub const COLOR_PUBLIC_BEHAVIOR: Color = Color::srgb(1.0, 0.0, 0.0); // #FF0000
/// Topic node color (gold).
pub const COLOR_TOPIC: Color = Color::srgb(1.0, 0.84, 0.0); // #FFD700

// =============================================================================
// Edges and Labels
// =============================================================================

/// Edge color for every relationship (gray).
pub const COLOR_EDGE: Color = Color::srgb(0.5, 0.5, 0.5);
pub const COLOR_NODE_LABEL: Color = Color::srgba(0.9, 0.9, 0.9, 0.85);
pub const COLOR_EDGE_LABEL: Color = Color::srgba(0.7, 0.7, 0.7, 0.8);
pub const COLOR_BACKGROUND: Color = Color::srgb(0.1, 0.1, 0.12);

pub const NODE_LABEL_FONT_SIZE: f32 = 10.0;
pub const EDGE_LABEL_FONT_SIZE: f32 = 8.0;

// =============================================================================
// Sizing
// =============================================================================

/// Base node radius, scaled by the square root of mass.
pub const BASE_NODE_RADIUS: f32 = 0.2;
pub const MIN_NODE_RADIUS: f32 = 0.15;
pub const MAX_NODE_RADIUS: f32 = 0.8;
pub const EDGE_RADIUS: f32 = 0.04;

/// Legend order.
pub const NODE_KINDS: [InfluenceNodeKind; 4] = [
    InfluenceNodeKind::MediaSource,
    InfluenceNodeKind::Statement,
    InfluenceNodeKind::PublicBehavior,
    InfluenceNodeKind::Topic,
];

pub fn node_color(kind: InfluenceNodeKind) -> Color {
    match kind {
        InfluenceNodeKind::MediaSource => COLOR_MEDIA_SOURCE,
        InfluenceNodeKind::Statement => COLOR_STATEMENT,
        InfluenceNodeKind::PublicBehavior => COLOR_PUBLIC_BEHAVIOR,
        InfluenceNodeKind::Topic => COLOR_TOPIC,
    }
}

/// Rendered radius for a node of the given mass.
pub fn node_radius(mass: f32) -> f32 {
    (BASE_NODE_RADIUS * mass.sqrt()).clamp(MIN_NODE_RADIUS, MAX_NODE_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_distinct_color() {
        let colors: Vec<Color> = NODE_KINDS.iter().map(|&k| node_color(k)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_node_radius_is_clamped() {
        assert_eq!(node_radius(0.0), MIN_NODE_RADIUS);
        assert_eq!(node_radius(1000.0), MAX_NODE_RADIUS);
        assert!((node_radius(4.0) - 0.4).abs() < 1e-6);
    }
}
