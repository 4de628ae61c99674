//! UI module providing the egui HUD.
//!
//! Besides drawing, the UI decides whether the pointer belongs to egui this
//! frame. While it does, new picks and camera drags do not start.

mod hud;
pub mod icons;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass};

use crate::input::PointerCapture;

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<icons::FontsInitialized>()
            .init_resource::<PointerCapture>()
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                (hud::hud_system, update_pointer_capture)
                    .chain()
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}

/// Record whether egui wants the pointer, for next frame's input pass.
fn update_pointer_capture(mut contexts: EguiContexts, mut capture: ResMut<PointerCapture>) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let captured = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
    if capture.0 != captured {
        capture.0 = captured;
    }
}
