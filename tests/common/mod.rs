//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use orrery::camera::FreeCamera;
use orrery::config::ControlSettings;
use orrery::frame::FramePlugin;
use orrery::interaction::InteractionState;
use orrery::orrery::Orrery;
use orrery::scene::SceneTree;

/// Duration of one frame at 60 Hz.
pub const FRAME: Duration = Duration::from_nanos(16_666_667);

/// Headless app running the frame tick with a fixed frame duration.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .add_plugins(FramePlugin);
    app
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Screen position (origin top-left, y down) at which `world` appears.
pub fn screen_position_of(camera: &FreeCamera, world: Vec3) -> Vec2 {
    let ndc = camera
        .world_to_ndc(world)
        .expect("point should be in front of the camera");
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * camera.viewport.width,
        (1.0 - ndc.y) * 0.5 * camera.viewport.height,
    )
}

/// The resources pointer handlers work on, taken out of the world.
pub struct Core {
    pub interaction: InteractionState,
    pub orrery: Orrery,
    pub scene: SceneTree,
    pub camera: FreeCamera,
    pub settings: ControlSettings,
    pub now: f64,
}

/// Run `f` against the app's interaction resources, as an input handler
/// would between frames.
pub fn with_core<R>(app: &mut App, f: impl FnOnce(&mut Core) -> R) -> R {
    let world = app.world_mut();
    let mut core = Core {
        interaction: world.remove_resource().expect("InteractionState"),
        orrery: world.remove_resource().expect("Orrery"),
        scene: world.remove_resource().expect("SceneTree"),
        camera: world.remove_resource().expect("FreeCamera"),
        settings: world.resource::<ControlSettings>().clone(),
        now: world.resource::<Time>().elapsed_secs_f64(),
    };

    let result = f(&mut core);

    world.insert_resource(core.interaction);
    world.insert_resource(core.orrery);
    world.insert_resource(core.scene);
    world.insert_resource(core.camera);
    result
}
