//! Keyboard and pointer input.
//!
//! Bevy input resources are translated into [`InputState`] and into calls on
//! [`InteractionState`]. Handlers only mutate state; the frame tick reads it.
//! The browser context menu is suppressed by the window's
//! `prevent_default_event_handling` flag, so right-drag camera rotation is
//! never interrupted.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::collections::HashSet;

use crate::camera::FreeCamera;
use crate::config::ControlSettings;
use crate::interaction::InteractionState;
use crate::orrery::{Orrery, OrreryError};
use crate::scene::SceneTree;
use crate::types::FrameSet;

/// Camera translation directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    /// Along the camera's look direction.
    Forward,
    Backward,
    /// Perpendicular to the look direction and world up.
    Left,
    Right,
    /// Along absolute world vertical.
    Up,
    Down,
}

impl MoveDirection {
    pub const ALL: [MoveDirection; 6] = [
        MoveDirection::Forward,
        MoveDirection::Backward,
        MoveDirection::Left,
        MoveDirection::Right,
        MoveDirection::Up,
        MoveDirection::Down,
    ];
}

/// Set of movement directions currently held.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovementKeys {
    held: HashSet<MoveDirection>,
}

impl MovementKeys {
    pub fn set(&mut self, direction: MoveDirection, held: bool) {
        if held {
            self.held.insert(direction);
        } else {
            self.held.remove(&direction);
        }
    }

    pub fn is_held(&self, direction: MoveDirection) -> bool {
        self.held.contains(&direction)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

/// Pointer buttons the controllers react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Picks and drags bodies.
    Primary,
    /// Rotates the camera while held.
    Secondary,
    Other,
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            _ => PointerButton::Other,
        }
    }
}

/// Input read once per frame by the camera controller.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    pub movement: MovementKeys,
    /// Secondary button held: pointer deltas rotate the camera.
    pub camera_drag_active: bool,
    /// Pointer movement collected since the last frame while rotating.
    pending_look: Vec2,
}

impl InputState {
    pub fn begin_camera_drag(&mut self) {
        self.camera_drag_active = true;
    }

    pub fn end_camera_drag(&mut self) {
        self.camera_drag_active = false;
        self.pending_look = Vec2::ZERO;
    }

    /// Collect a pointer delta; ignored unless a camera drag is active.
    pub fn accumulate_look(&mut self, delta: Vec2) {
        if self.camera_drag_active {
            self.pending_look += delta;
        }
    }

    /// Take the collected pointer delta, leaving zero behind.
    pub fn take_look(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending_look)
    }
}

/// Key bindings: two per horizontal direction (letter and arrow), one per
/// vertical direction.
#[derive(Resource, Clone, Debug)]
pub struct KeyBindings {
    pub bindings: Vec<(KeyCode, MoveDirection)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                (KeyCode::KeyW, MoveDirection::Forward),
                (KeyCode::ArrowUp, MoveDirection::Forward),
                (KeyCode::KeyS, MoveDirection::Backward),
                (KeyCode::ArrowDown, MoveDirection::Backward),
                (KeyCode::KeyA, MoveDirection::Left),
                (KeyCode::ArrowLeft, MoveDirection::Left),
                (KeyCode::KeyD, MoveDirection::Right),
                (KeyCode::ArrowRight, MoveDirection::Right),
                (KeyCode::KeyE, MoveDirection::Up),
                (KeyCode::KeyQ, MoveDirection::Down),
            ],
        }
    }
}

impl KeyBindings {
    /// Directions held given a key-pressed predicate. A direction is held
    /// while any of its keys is.
    pub fn held(&self, mut pressed: impl FnMut(KeyCode) -> bool) -> MovementKeys {
        let mut keys = MovementKeys::default();
        for &(code, direction) in &self.bindings {
            if pressed(code) {
                keys.set(direction, true);
            }
        }
        keys
    }
}

/// Whether the HUD currently owns the pointer. New picks and camera drags
/// do not start while it does.
#[derive(Resource, Default)]
pub struct PointerCapture(pub bool);

/// Plugin reading Bevy keyboard and mouse input.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .init_resource::<PointerCapture>()
            .add_systems(
                Update,
                (read_movement_keys, read_pointer).in_set(FrameSet::Input),
            );
    }
}

fn read_movement_keys(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut interaction: ResMut<InteractionState>,
) {
    interaction.input.movement = bindings.held(|code| keys.pressed(code));
}

/// Translate mouse buttons, cursor position and motion into pointer calls.
fn read_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    capture: Res<PointerCapture>,
    time: Res<Time>,
    settings: Res<ControlSettings>,
    camera: Res<FreeCamera>,
    mut interaction: ResMut<InteractionState>,
    mut orrery: ResMut<Orrery>,
    mut scene: ResMut<SceneTree>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };

    let pointer = PointerFrame {
        cursor: window.cursor_position(),
        delta: motion.delta,
        captured: capture.0,
        now: time.elapsed_secs_f64(),
    };

    if let Err(err) = apply_pointer(
        &pointer,
        &mouse,
        &camera,
        &settings,
        &mut interaction,
        &mut orrery,
        &mut scene,
    ) {
        crate::frame::invariant_violated(err);
    }
}

/// Pointer readings gathered for one frame.
struct PointerFrame {
    cursor: Option<Vec2>,
    delta: Vec2,
    captured: bool,
    now: f64,
}

fn apply_pointer(
    pointer: &PointerFrame,
    mouse: &ButtonInput<MouseButton>,
    camera: &FreeCamera,
    settings: &ControlSettings,
    interaction: &mut InteractionState,
    orrery: &mut Orrery,
    scene: &mut SceneTree,
) -> Result<(), OrreryError> {
    // Starts are gated by the HUD; releases never are.
    if !pointer.captured {
        if let Some(cursor) = pointer.cursor {
            for &button in mouse.get_just_pressed() {
                interaction.pointer_down(button.into(), cursor, camera, orrery, scene, settings)?;
            }
        }
    }

    if pointer.delta != Vec2::ZERO {
        interaction.pointer_move(pointer.cursor, pointer.delta, camera, orrery, scene, settings)?;
    }

    for &button in mouse.get_just_released() {
        interaction.pointer_up(button.into(), pointer.now, orrery, scene, settings)?;
    }

    // A release that happened off-canvas or while unfocused never arrives
    // as an event; close whatever the buttons no longer hold.
    if !mouse.pressed(MouseButton::Left) && interaction.is_dragging() {
        interaction.pointer_up(PointerButton::Primary, pointer.now, orrery, scene, settings)?;
    }
    if !mouse.pressed(MouseButton::Right) && interaction.input.camera_drag_active {
        interaction.input.end_camera_drag();
    }

    interaction.update_hover(pointer.cursor, camera, &*orrery, &*scene);
    Ok(())
}
