//! Hover and drag highlighting.
//!
//! A ring marks the body under the pointer. While a body is out of orbit, a
//! faint line joins it to the slot it will return to.

use bevy::math::Isometry3d;
use bevy::prelude::*;

use crate::camera::FreeCamera;
use crate::interaction::InteractionState;
use crate::orrery::Orrery;
use crate::scene::{SceneGraph, SceneTree};

const HOVER_COLOR: Color = Color::srgba(0.0, 1.0, 1.0, 0.8);
const TETHER_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.25);

/// Draw the highlight ring and return tethers.
pub fn draw_highlight(
    mut gizmos: Gizmos,
    interaction: Res<InteractionState>,
    orrery: Res<Orrery>,
    scene: Res<SceneTree>,
    camera: Res<FreeCamera>,
) {
    for instance in orrery.bodies().iter().filter(|b| b.motion.is_detached()) {
        let (Ok(position), Ok(slot)) = (
            scene.world_position(instance.mesh),
            scene.local_to_world(instance.pivot, instance.orbit_slot()),
        ) else {
            continue;
        };
        gizmos.line(position, slot, TETHER_COLOR);
    }

    let Some(hovered) = interaction.hovered() else {
        return;
    };
    let Ok(instance) = orrery.body(hovered) else {
        return;
    };
    let Ok(center) = scene.world_position(instance.mesh) else {
        return;
    };

    // Face the ring towards the camera so it reads as an outline.
    let facing = Dir3::new(camera.position - center).unwrap_or(Dir3::Y);
    let rotation = Quat::from_rotation_arc(Vec3::Z, *facing);
    let isometry = Isometry3d::new(center, rotation);
    gizmos.circle(isometry, instance.body.radius * 1.5, HOVER_COLOR);
}
