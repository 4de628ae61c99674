//! Shared types for the orrery: body handles, motion states and frame ordering.

use bevy::prelude::*;

/// System sets ordering one frame of the visualization.
///
/// Input is read first, then the frame tick advances orbits, return
/// animations and the camera, and finally the scene is copied into
/// Bevy transforms for rendering.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Keyboard and pointer input translated into interaction calls.
    Input,
    /// Orbit pass, return-animation pass and camera navigation.
    Tick,
    /// Scene tree and camera pose copied into render transforms.
    Sync,
}

/// Index of a planet in the [`Orrery`](crate::orrery::Orrery).
///
/// Stable for the lifetime of the process; bodies are never added or removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyIndex(pub usize);

/// Which of the three mutually exclusive states a body is in.
///
/// A body is attached to its orbit pivot only while `Orbiting`; in the
/// other two states it hangs off the scene root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotionState {
    /// Carried along its circular path by the orbit pivot.
    #[default]
    Orbiting,
    /// Detached and following the pointer.
    Dragging,
    /// Detached and flying back to its orbital slot.
    Returning,
}

impl MotionState {
    /// Whether the body currently hangs off the scene root.
    pub fn is_detached(self) -> bool {
        !matches!(self, MotionState::Orbiting)
    }

    /// Human-readable label for the HUD.
    pub fn label(self) -> &'static str {
        match self {
            MotionState::Orbiting => "Orbiting",
            MotionState::Dragging => "Dragging",
            MotionState::Returning => "Returning",
        }
    }
}
