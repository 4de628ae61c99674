//! Picking, dragging and returning bodies to orbit.
//!
//! [`InteractionState`] owns the only mutable interaction records: the input
//! state, at most one [`DragSession`] and any in-flight [`ReturnAnimation`]s.
//! Each body's [`MotionState`] is kept in step with them so that a body is
//! attached to its pivot exactly while it is orbiting.

mod drag;
mod returning;

#[cfg(test)]
mod proptest_interaction;

use bevy::prelude::*;

use crate::camera::FreeCamera;
use crate::config::ControlSettings;
use crate::input::{InputState, PointerButton};
use crate::orrery::{Orrery, OrreryError};
use crate::scene::SceneGraph;
use crate::types::{BodyIndex, MotionState};

pub use drag::DragSession;
pub use returning::{advance_return_animations, ease_out_cubic, ReturnAnimation};

/// A body under a pick ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub body: BodyIndex,
    /// World-space point where the ray meets the body.
    pub point: Vec3,
    pub distance: f32,
}

/// Cast a ray through `ndc` and return the nearest planet it hits.
///
/// The sun is tested too and blocks anything behind it, but is never
/// returned itself.
pub fn pick<S: SceneGraph>(
    camera: &FreeCamera,
    ndc: Vec2,
    orrery: &Orrery,
    scene: &S,
) -> Option<PickHit> {
    let ray = camera.ray_from_ndc(ndc);
    let nearest = scene.raycast(ray, &orrery.pick_candidates()).into_iter().next()?;

    orrery.by_mesh(nearest.node).map(|body| PickHit {
        body,
        point: nearest.point,
        distance: nearest.distance,
    })
}

/// Input, drag and return-animation state shared between pointer handlers
/// and the frame tick.
#[derive(Resource, Debug, Default)]
pub struct InteractionState {
    pub input: InputState,
    drag: Option<DragSession>,
    returns: Vec<ReturnAnimation>,
    hovered: Option<BodyIndex>,
}

impl InteractionState {
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn returns(&self) -> &[ReturnAnimation] {
        &self.returns
    }

    pub fn return_for(&self, body: BodyIndex) -> Option<&ReturnAnimation> {
        self.returns.iter().find(|a| a.body == body)
    }

    /// Body under the pointer, or the one being dragged.
    pub fn hovered(&self) -> Option<BodyIndex> {
        self.drag.map(|session| session.body).or(self.hovered)
    }

    /// Pointer pressed at `screen`.
    ///
    /// Secondary starts a camera drag. Primary on a planet detaches it into
    /// world space without a visual jump and opens a drag session; a planet
    /// already flying home is caught mid-flight. Returns the grabbed body.
    pub fn pointer_down<S: SceneGraph>(
        &mut self,
        button: PointerButton,
        screen: Vec2,
        camera: &FreeCamera,
        orrery: &mut Orrery,
        scene: &mut S,
        settings: &ControlSettings,
    ) -> Result<Option<BodyIndex>, OrreryError> {
        match button {
            PointerButton::Secondary => {
                self.input.begin_camera_drag();
                return Ok(None);
            }
            PointerButton::Other => return Ok(None),
            PointerButton::Primary => {}
        }

        if self.drag.is_some() {
            return Ok(None);
        }

        let Some(hit) = pick(camera, camera.viewport.to_ndc(screen), &*orrery, &*scene) else {
            return Ok(None);
        };

        let instance = orrery.body_mut(hit.body)?;
        match instance.motion {
            MotionState::Orbiting => scene.detach_preserving_world(instance.mesh)?,
            MotionState::Returning => self.returns.retain(|a| a.body != hit.body),
            MotionState::Dragging => {
                return Err(OrreryError::UnexpectedState {
                    body: instance.name(),
                    state: instance.motion,
                    expected: MotionState::Orbiting,
                });
            }
        }

        let center = scene.world_position(instance.mesh)?;
        let depth = center
            .distance(camera.position)
            .max(settings.min_drag_depth);

        instance.motion = MotionState::Dragging;
        self.drag = Some(DragSession::new(hit.body, depth, screen.y));

        info!("Picked up {} at depth {:.1}", instance.name(), depth);
        Ok(Some(hit.body))
    }

    /// Pointer moved by `delta` pixels, now at `screen` (if over the window).
    ///
    /// Deltas feed camera rotation while a camera drag is active; an open drag
    /// session moves its body onto the new pointer ray.
    pub fn pointer_move<S: SceneGraph>(
        &mut self,
        screen: Option<Vec2>,
        delta: Vec2,
        camera: &FreeCamera,
        orrery: &Orrery,
        scene: &mut S,
        settings: &ControlSettings,
    ) -> Result<(), OrreryError> {
        self.input.accumulate_look(delta);

        let (Some(session), Some(screen)) = (self.drag, screen) else {
            return Ok(());
        };

        let target = session.target_position(camera, screen, settings);
        let mesh = orrery.body(session.body)?.mesh;
        scene.set_world_position(mesh, target)?;

        debug!("Drag depth {:.2}", session.depth_at(screen.y, settings));
        Ok(())
    }

    /// Pointer released. Closing a drag starts the body's flight home from
    /// wherever it was let go. A release with no open drag does nothing.
    pub fn pointer_up<S: SceneGraph>(
        &mut self,
        button: PointerButton,
        now: f64,
        orrery: &mut Orrery,
        scene: &mut S,
        settings: &ControlSettings,
    ) -> Result<(), OrreryError> {
        match button {
            PointerButton::Secondary => {
                self.input.end_camera_drag();
                return Ok(());
            }
            PointerButton::Other => return Ok(()),
            PointerButton::Primary => {}
        }

        let Some(session) = self.drag.take() else {
            return Ok(());
        };

        let instance = orrery.body_mut(session.body)?;
        let start_world_position = scene.world_position(instance.mesh)?;
        instance.motion = MotionState::Returning;

        self.returns.push(ReturnAnimation {
            body: session.body,
            start_world_position,
            target_local_position: instance.orbit_slot(),
            start_time: now,
            duration: settings.return_duration,
        });

        info!("Released {}, returning to orbit", instance.name());
        Ok(())
    }

    /// Advance in-flight return animations to `now`.
    pub fn advance_returns<S: SceneGraph>(
        &mut self,
        now: f64,
        orrery: &mut Orrery,
        scene: &mut S,
    ) -> Result<(), OrreryError> {
        advance_return_animations(&mut self.returns, now, orrery, scene)
    }

    /// Track the body under the pointer for highlighting.
    pub fn update_hover<S: SceneGraph>(
        &mut self,
        screen: Option<Vec2>,
        camera: &FreeCamera,
        orrery: &Orrery,
        scene: &S,
    ) {
        self.hovered = match (screen, self.drag) {
            (Some(screen), None) => {
                pick(camera, camera.viewport.to_ndc(screen), orrery, scene).map(|hit| hit.body)
            }
            _ => None,
        };
    }
}
