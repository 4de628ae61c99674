//! Orrery - Interactive Solar System
//!
//! A desktop and browser application showing the planets orbiting the sun.
//! Fly around freely, grab a planet and let go to watch it find its orbit.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::camera::CameraPlugin;
use orrery::frame::FramePlugin;
use orrery::input::InputPlugin;
use orrery::render::RenderPlugin;
use orrery::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orrery".into(),
                canvas: Some("#orrery-canvas".into()),
                fit_canvas_to_parent: true,
                // Keeps right-drag from opening the browser context menu
                prevent_default_event_handling: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(EguiPlugin::default())
        // FramePlugin inserts the scene resources the others read at startup
        .add_plugins((FramePlugin, CameraPlugin, InputPlugin, RenderPlugin, UiPlugin))
        .run();
}
