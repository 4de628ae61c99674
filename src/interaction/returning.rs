//! Return-to-orbit animation for released bodies.

use bevy::prelude::*;

use crate::orrery::{Orrery, OrreryError};
use crate::scene::{NodeId, SceneGraph};
use crate::types::{BodyIndex, MotionState};

/// Ease-out cubic: fast start, slow finish. `t` is clamped to [0, 1].
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Flight of a released body back into its orbital slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReturnAnimation {
    pub body: BodyIndex,
    /// World position at release.
    pub start_world_position: Vec3,
    /// Slot under the orbit pivot, `(orbitDistance, 0, 0)`.
    pub target_local_position: Vec3,
    /// Seconds, on the frame clock.
    pub start_time: f64,
    pub duration: f64,
}

impl ReturnAnimation {
    /// Linear progress in [0, 1]. A non-positive duration completes at once.
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn eased(&self, now: f64) -> f32 {
        ease_out_cubic(self.progress(now))
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Advance every return animation, reattaching bodies whose flight is over.
///
/// The target is the slot's *current* world position: the pivot keeps
/// turning during the flight, so the body chases a moving point.
pub fn advance_return_animations<S: SceneGraph>(
    animations: &mut Vec<ReturnAnimation>,
    now: f64,
    orrery: &mut Orrery,
    scene: &mut S,
) -> Result<(), OrreryError> {
    let mut finished = Vec::new();

    for (i, animation) in animations.iter().enumerate() {
        let instance = orrery.body(animation.body)?;
        if instance.motion != MotionState::Returning {
            return Err(OrreryError::UnexpectedState {
                body: instance.name(),
                state: instance.motion,
                expected: MotionState::Returning,
            });
        }
        let parent = scene.parent(instance.mesh)?;
        if parent != Some(NodeId::ROOT) {
            return Err(OrreryError::AttachmentMismatch {
                body: instance.name(),
                state: instance.motion,
                parent,
            });
        }

        if animation.is_finished(now) {
            finished.push(i);
            continue;
        }

        let target = scene.local_to_world(instance.pivot, animation.target_local_position)?;
        let position = animation
            .start_world_position
            .lerp(target, animation.eased(now));
        scene.set_world_position(instance.mesh, position)?;
    }

    for i in finished.into_iter().rev() {
        let animation = animations.remove(i);
        let instance = orrery.body_mut(animation.body)?;

        scene.attach(instance.mesh, instance.pivot)?;
        let mut local = instance.orbit_transform();
        local.translation = animation.target_local_position;
        scene.set_local_transform(instance.mesh, local)?;
        instance.motion = MotionState::Orbiting;

        info!("{} is back in orbit", instance.name());
    }

    Ok(())
}
