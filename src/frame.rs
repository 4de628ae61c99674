//! Per-frame driver for the orrery.
//!
//! Pointer events are applied as they arrive (in [`FrameSet::Input`]); the
//! tick then moves everything forward in a fixed order: orbits, return
//! flights, camera. Render sync runs last.

use bevy::prelude::*;

use crate::camera::{navigate, FreeCamera};
use crate::config::ControlSettings;
use crate::interaction::InteractionState;
use crate::orbit::advance_orbits;
use crate::orrery::{Orrery, OrreryError};
use crate::scene::{SceneGraph, SceneTree};
use crate::types::FrameSet;

/// Advance one frame at time `now` (seconds).
///
/// Orbits move first so return flights aim at this frame's slot positions.
/// Fails only when body bookkeeping and the scene disagree.
pub fn tick<S: SceneGraph>(
    interaction: &mut InteractionState,
    orrery: &mut Orrery,
    scene: &mut S,
    camera: &mut FreeCamera,
    settings: &ControlSettings,
    now: f64,
) -> Result<(), OrreryError> {
    advance_orbits(orrery, scene)?;
    interaction.advance_returns(now, orrery, scene)?;
    navigate(camera, &mut interaction.input, settings);

    orrery.check_attachments(scene)
}

/// Log and abort on a broken attachment invariant.
///
/// Every [`OrreryError`] is a programming error; carrying on would leave
/// bodies parented to the wrong node.
pub fn invariant_violated(err: OrreryError) -> ! {
    error!("Orrery invariant violated: {err}");
    panic!("orrery invariant violated: {err}");
}

/// Plugin building the scene and running the frame tick.
pub struct FramePlugin;

impl Plugin for FramePlugin {
    fn build(&self, app: &mut App) {
        let mut scene = SceneTree::new();
        let orrery = match Orrery::build(&mut scene) {
            Ok(orrery) => orrery,
            Err(err) => invariant_violated(err.into()),
        };
        info!(
            "Built orrery with {} planets ({} scene nodes)",
            orrery.bodies().len(),
            scene.len()
        );

        app.insert_resource(scene)
            .insert_resource(orrery)
            .init_resource::<InteractionState>()
            .init_resource::<ControlSettings>()
            .init_resource::<FreeCamera>()
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Tick, FrameSet::Sync).chain(),
            )
            .add_systems(Update, frame_tick.in_set(FrameSet::Tick));
    }
}

fn frame_tick(
    time: Res<Time>,
    settings: Res<ControlSettings>,
    mut interaction: ResMut<InteractionState>,
    mut orrery: ResMut<Orrery>,
    mut scene: ResMut<SceneTree>,
    mut camera: ResMut<FreeCamera>,
) {
    if let Err(err) = tick(
        &mut interaction,
        &mut orrery,
        &mut *scene,
        &mut camera,
        &settings,
        time.elapsed_secs_f64(),
    ) {
        invariant_violated(err);
    }
}
