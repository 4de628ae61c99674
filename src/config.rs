//! Tunable interaction and navigation settings.

use bevy::prelude::*;

/// Camera translation per frame per held direction, in scene units.
pub const DEFAULT_MOVE_SPEED: f32 = 0.5;

/// Radians of rotation per pixel of pointer movement, before damping.
pub const DEFAULT_TURN_SPEED: f32 = 0.01;

/// Extra damping applied to pointer-driven rotation.
pub const DEFAULT_DAMP_FACTOR: f32 = 0.1;

/// Scene units of depth change per pixel of vertical drag.
pub const DEFAULT_DEPTH_SENSITIVITY: f32 = 0.1;

/// Closest a dragged body may be pulled towards the camera.
pub const DEFAULT_MIN_DRAG_DEPTH: f32 = 1.0;

/// Seconds a released body takes to fly back into orbit.
pub const DEFAULT_RETURN_DURATION: f64 = 1.5;

/// Resource holding every tunable of the navigation and drag controllers.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct ControlSettings {
    pub move_speed: f32,
    pub turn_speed: f32,
    pub damp_factor: f32,
    /// Vertical drag moves the body along the pointer ray: dragging up pushes
    /// it away from the camera, dragging down pulls it closer.
    pub depth_sensitivity: f32,
    pub min_drag_depth: f32,
    pub return_duration: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
            damp_factor: DEFAULT_DAMP_FACTOR,
            depth_sensitivity: DEFAULT_DEPTH_SENSITIVITY,
            min_drag_depth: DEFAULT_MIN_DRAG_DEPTH,
            return_duration: DEFAULT_RETURN_DURATION,
        }
    }
}

impl ControlSettings {
    /// Radians of rotation per pixel of pointer movement.
    pub fn look_sensitivity(&self) -> f32 {
        self.turn_speed * self.damp_factor
    }
}
