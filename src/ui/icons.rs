//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` once the egui context exists.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::types::MotionState;

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Browse all icons at https://phosphoricons.com/

pub const SUN: &str = egui_phosphor::regular::SUN;
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
/// Body following the pointer.
pub const DRAGGING: &str = egui_phosphor::regular::HAND_GRABBING;
/// Body flying back to its slot.
pub const RETURNING: &str = egui_phosphor::regular::ARROW_BEND_DOWN_LEFT;
pub const HELP: &str = egui_phosphor::regular::QUESTION;
pub const MOUSE: &str = egui_phosphor::regular::MOUSE;
pub const KEYBOARD: &str = egui_phosphor::regular::KEYBOARD;

/// Icon for a body in `state`.
pub fn motion_icon(state: MotionState) -> &'static str {
    match state {
        MotionState::Orbiting => PLANET,
        MotionState::Dragging => DRAGGING,
        MotionState::Returning => RETURNING,
    }
}
