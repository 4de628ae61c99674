//! Rendering for the orrery.
//!
//! The scene tree is the source of truth for where everything is; this module
//! spawns one Bevy entity per visual node and mirrors world transforms onto
//! them after each tick.

mod background;
pub mod bodies;
mod highlight;
mod orbits;
mod sync;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::bodies::CelestialBodyPlugin;
use self::highlight::draw_highlight;
use self::orbits::{draw_orbit_paths, OrbitPathSettings};
use self::sync::sync_scene_transforms;
use crate::types::FrameSet;

pub use self::bodies::SceneNodeLink;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CelestialBodyPlugin, BackgroundPlugin))
            .init_resource::<OrbitPathSettings>()
            // Transforms first, then overlays drawn at the synced positions.
            .add_systems(
                Update,
                (sync_scene_transforms, (draw_orbit_paths, draw_highlight))
                    .chain()
                    .in_set(FrameSet::Sync),
            );
    }
}

/// Points on a circle of `radius` about `center` in the XZ plane.
pub(crate) fn circle_points(center: Vec3, radius: f32, segments: u32) -> impl Iterator<Item = Vec3> {
    let segments = segments.max(3);
    (0..=segments).map(move |i| {
        let t = i as f32 / segments as f32 * std::f32::consts::TAU;
        center + Vec3::new(radius * t.cos(), 0.0, radius * t.sin())
    })
}
