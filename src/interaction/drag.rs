//! Drag sessions: a picked body following the pointer ray.

use bevy::prelude::*;

use crate::camera::FreeCamera;
use crate::config::ControlSettings;
use crate::types::BodyIndex;

/// An active pointer drag. Exists from pointer-down on a body to pointer-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub body: BodyIndex,
    /// Camera-to-body distance when the drag began.
    pub initial_depth: f32,
    /// Pointer y (screen pixels, down positive) when the drag began.
    pub initial_pointer_y: f32,
}

impl DragSession {
    pub fn new(body: BodyIndex, initial_depth: f32, initial_pointer_y: f32) -> Self {
        Self {
            body,
            initial_depth,
            initial_pointer_y,
        }
    }

    /// Distance from the camera for a pointer at `pointer_y`.
    ///
    /// Moving the pointer up pushes the body away, moving it down pulls the
    /// body in. This is a control scheme, not physics.
    pub fn depth_at(&self, pointer_y: f32, settings: &ControlSettings) -> f32 {
        let depth =
            self.initial_depth - (pointer_y - self.initial_pointer_y) * settings.depth_sensitivity;
        depth.max(settings.min_drag_depth)
    }

    /// World position for the dragged body with the pointer at `screen`.
    pub fn target_position(
        &self,
        camera: &FreeCamera,
        screen: Vec2,
        settings: &ControlSettings,
    ) -> Vec3 {
        camera
            .ray_from_screen(screen)
            .get_point(self.depth_at(screen.y, settings))
    }
}
