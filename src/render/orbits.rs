//! Orbit path rendering using Bevy Gizmos.
//!
//! Every orbit is a circle about the sun in the XZ plane, so the paths never
//! need refitting as planets move.

use bevy::prelude::*;

use crate::orrery::Orrery;
use crate::render::circle_points;

/// Settings for orbit path rendering.
#[derive(Resource)]
pub struct OrbitPathSettings {
    pub visible: bool,
    /// Segments per circle (higher = smoother).
    pub segments: u32,
    pub color: Color,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            visible: true,
            segments: 128,
            color: Color::srgba_u8(0x44, 0x44, 0x44, 77),
        }
    }
}

/// Draw one circle per planet at its orbital distance.
pub fn draw_orbit_paths(mut gizmos: Gizmos, settings: Res<OrbitPathSettings>, orrery: Res<Orrery>) {
    if !settings.visible {
        return;
    }

    for instance in orrery.bodies() {
        gizmos.linestrip(
            circle_points(Vec3::ZERO, instance.body.orbit_distance, settings.segments),
            settings.color,
        );
    }
}
