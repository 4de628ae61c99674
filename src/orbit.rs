//! Orbital motion: advances pivots and self-rotation once per frame.

use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::catalog::SUN;
use crate::orrery::Orrery;
use crate::scene::{SceneError, SceneGraph};

/// Advance every body by one frame.
///
/// Orbit pivots always advance, so a detached body's slot keeps moving and a
/// returning body chases it. A body's own spin advances only while it is
/// orbiting; dragged and returning bodies hold their orientation.
pub fn advance_orbits<S: SceneGraph>(orrery: &mut Orrery, scene: &mut S) -> Result<(), SceneError> {
    orrery.sun_spin = wrap_angle(orrery.sun_spin + SUN.rotation_speed);
    scene.set_local_transform(
        orrery.sun,
        Transform::from_rotation(Quat::from_rotation_y(orrery.sun_spin)),
    )?;

    for instance in orrery.bodies_mut() {
        instance.orbit_angle = wrap_angle(instance.orbit_angle + instance.body.orbit_speed);
        scene.set_local_transform(
            instance.pivot,
            Transform::from_rotation(Quat::from_rotation_y(instance.orbit_angle)),
        )?;

        if instance.motion.is_detached() {
            continue;
        }

        instance.spin_angle = wrap_angle(instance.spin_angle + instance.body.rotation_speed);
        scene.set_local_transform(instance.mesh, instance.orbit_transform())?;
    }

    Ok(())
}

/// Wrap an angle into [0, 2π).
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}
