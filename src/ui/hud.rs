//! Heads-up display: planet list with motion state, and a controls card.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::icons;
use crate::catalog::SUN;
use crate::interaction::InteractionState;
use crate::orrery::Orrery;
use crate::types::{BodyIndex, MotionState};

/// Label color for a motion state.
fn motion_color(state: MotionState) -> egui::Color32 {
    match state {
        MotionState::Orbiting => egui::Color32::from_rgb(160, 160, 160),
        MotionState::Dragging => egui::Color32::from_rgb(0, 220, 255),
        MotionState::Returning => egui::Color32::from_rgb(255, 200, 80),
    }
}

fn body_color(color: u32) -> egui::Color32 {
    let [_, r, g, b] = color.to_be_bytes();
    egui::Color32::from_rgb(r, g, b)
}

/// Key and button reference shown in the controls card.
const CONTROLS: &[(&str, &str, &str)] = &[
    (icons::KEYBOARD, "W / ↑", "Move forward"),
    (icons::KEYBOARD, "S / ↓", "Move back"),
    (icons::KEYBOARD, "A / ←", "Move left"),
    (icons::KEYBOARD, "D / →", "Move right"),
    (icons::KEYBOARD, "E / Q", "Move up / down"),
    (icons::MOUSE, "Right drag", "Look around"),
    (icons::MOUSE, "Left drag", "Grab a planet"),
    (icons::MOUSE, "Drag up / down", "Push away / pull in"),
];

/// Draw the HUD window.
pub fn hud_system(
    mut contexts: EguiContexts,
    orrery: Res<Orrery>,
    interaction: Res<InteractionState>,
    time: Res<Time>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let now = time.elapsed_secs_f64();

    egui::Window::new(format!("{} Solar System", icons::SUN))
        .collapsible(true)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(icons::SUN).color(body_color(SUN.color)));
                ui.label(egui::RichText::new(SUN.name).strong());
            });
            ui.separator();

            for (index, instance) in orrery.bodies().iter().enumerate() {
                let hovered = interaction.hovered() == Some(BodyIndex(index));
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(icons::motion_icon(instance.motion))
                        .color(body_color(instance.body.color)));
                    let name = egui::RichText::new(instance.name());
                    ui.label(if hovered { name.strong() } else { name });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(egui::RichText::new(instance.motion.label())
                            .small()
                            .color(motion_color(instance.motion)));
                    });
                });

                if let Some(animation) = interaction.return_for(BodyIndex(index)) {
                    ui.add(egui::ProgressBar::new(animation.eased(now)).desired_height(4.0));
                }
            }

            ui.separator();
            egui::CollapsingHeader::new(format!("{} Controls", icons::HELP))
                .default_open(false)
                .show(ui, |ui| {
                    egui::Grid::new("controls_grid").num_columns(2).show(ui, |ui| {
                        for (icon, input, action) in CONTROLS {
                            ui.label(format!("{icon} {input}"));
                            ui.label(*action);
                            ui.end_row();
                        }
                    });
                });
        });
}
