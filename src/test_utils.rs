//! Test utilities for orrery interaction tests.
//!
//! Provides a ready-built solar system, screen-space helpers for aiming the
//! pointer at a body, and assertions on where bodies sit in the scene.

use bevy::prelude::*;

use crate::camera::FreeCamera;

/// Fixtures for building test scenes.
pub mod fixtures {
    use crate::orrery::Orrery;
    use crate::scene::SceneTree;

    /// The full catalog, built into a fresh scene at frame zero.
    pub fn solar_system() -> (SceneTree, Orrery) {
        let mut scene = SceneTree::new();
        let orrery = Orrery::build(&mut scene).expect("catalog should build");
        (scene, orrery)
    }
}

/// Screen position (origin top-left, y down) at which `world` appears.
///
/// Points outside the view frustum map outside the viewport rather than
/// being clamped. Points behind the camera panic.
pub fn screen_position_of(camera: &FreeCamera, world: Vec3) -> Vec2 {
    let ndc = camera
        .world_to_ndc(world)
        .expect("point should be in front of the camera");
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * camera.viewport.width,
        (1.0 - ndc.y) * 0.5 * camera.viewport.height,
    )
}

/// Assertions on body placement.
pub mod assertions {
    use bevy::prelude::*;

    use crate::orrery::Orrery;
    use crate::scene::SceneGraph;
    use crate::types::{BodyIndex, MotionState};

    /// Assert two points agree to within `tolerance` on every axis.
    ///
    /// # Panics
    /// Panics with both values if they differ.
    pub fn assert_vec_near(actual: Vec3, expected: Vec3, tolerance: f32) {
        assert!(
            actual.abs_diff_eq(expected, tolerance),
            "expected {expected:?}, got {actual:?} (tolerance {tolerance})"
        );
    }

    /// Assert a body is orbiting, parented to its pivot and sitting exactly
    /// in its slot.
    pub fn assert_in_slot<S: SceneGraph>(orrery: &Orrery, scene: &S, body: BodyIndex) {
        let instance = orrery.body(body).expect("body should exist");
        assert_eq!(instance.motion, MotionState::Orbiting, "{} is not orbiting", instance.name());
        assert_eq!(
            scene.parent(instance.mesh).expect("mesh should exist"),
            Some(instance.pivot),
            "{} is not parented to its pivot",
            instance.name()
        );
        assert_eq!(
            scene
                .local_transform(instance.mesh)
                .expect("mesh should exist")
                .translation,
            instance.orbit_slot(),
            "{} is out of its slot",
            instance.name()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneGraph;

    #[test]
    fn test_screen_position_of_origin_is_centered() {
        let camera = FreeCamera::default();
        let screen = screen_position_of(&camera, Vec3::ZERO);
        assert!(screen.abs_diff_eq(
            Vec2::new(camera.viewport.width * 0.5, camera.viewport.height * 0.5),
            1e-3
        ));
    }

    #[test]
    fn test_screen_position_round_trips_through_viewport() {
        let camera = FreeCamera::default();
        let world = Vec3::new(20.0, 0.0, 0.0);
        let ndc = camera.viewport.to_ndc(screen_position_of(&camera, world));
        assert!(ndc.abs_diff_eq(camera.world_to_ndc(world).unwrap(), 1e-5));
    }

    #[test]
    fn test_fixture_bodies_start_in_slot() {
        let (scene, orrery) = fixtures::solar_system();
        for (index, instance) in orrery.bodies().iter().enumerate() {
            assertions::assert_in_slot(&orrery, &scene, crate::types::BodyIndex(index));
            assertions::assert_vec_near(
                scene.world_position(instance.mesh).unwrap(),
                instance.orbit_slot(),
                1e-5,
            );
        }
    }
}
