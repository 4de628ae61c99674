//! Headless Bevy integration tests.
//!
//! These tests drive the frame tick through a real `App` without a GPU.

mod common;

use bevy::prelude::*;
use common::{headless_app, run_frames, screen_position_of, with_core};
use orrery::input::PointerButton;
use orrery::interaction::InteractionState;
use orrery::orrery::Orrery;
use orrery::scene::{SceneGraph, SceneTree};
use orrery::types::MotionState;

#[test]
fn test_frame_plugin_builds_the_solar_system() {
    let mut app = headless_app();
    app.update();

    let orrery = app.world().resource::<Orrery>();
    let scene = app.world().resource::<SceneTree>();
    assert_eq!(orrery.bodies().len(), 8);
    orrery.check_attachments(scene).unwrap();
}

#[test]
fn test_orbit_angle_counts_frames() {
    let mut app = headless_app();
    run_frames(&mut app, 100);

    let orrery = app.world().resource::<Orrery>();
    let earth = orrery.body(orrery.find("Earth").unwrap()).unwrap();
    let mercury = orrery.body(orrery.find("Mercury").unwrap()).unwrap();

    assert!((earth.orbit_angle - 1.0).abs() < 1e-4, "{}", earth.orbit_angle);
    assert!((mercury.orbit_angle - 4.0).abs() < 1e-3, "{}", mercury.orbit_angle);
}

#[test]
fn test_grab_release_and_return_through_app() {
    let mut app = headless_app();
    app.update();

    let earth = with_core(&mut app, |core| {
        let earth = core.orrery.find("Earth").unwrap();
        let mesh = core.orrery.body(earth).unwrap().mesh;
        let position = core.scene.world_position(mesh).unwrap();
        let screen = screen_position_of(&core.camera, position);

        let grabbed = core
            .interaction
            .pointer_down(
                PointerButton::Primary,
                screen,
                &core.camera,
                &mut core.orrery,
                &mut core.scene,
                &core.settings,
            )
            .unwrap();
        assert_eq!(grabbed, Some(earth));

        // Pull the planet upwards on screen.
        let moved = screen - Vec2::new(0.0, 80.0);
        core.interaction
            .pointer_move(
                Some(moved),
                Vec2::new(0.0, -80.0),
                &core.camera,
                &core.orrery,
                &mut core.scene,
                &core.settings,
            )
            .unwrap();
        earth
    });

    // Dragging survives frames; the pivot keeps turning underneath.
    run_frames(&mut app, 10);
    {
        let orrery = app.world().resource::<Orrery>();
        let instance = orrery.body(earth).unwrap();
        assert_eq!(instance.motion, MotionState::Dragging);
        assert!(app.world().resource::<InteractionState>().is_dragging());
    }

    with_core(&mut app, |core| {
        core.interaction
            .pointer_up(
                PointerButton::Primary,
                core.now,
                &mut core.orrery,
                &mut core.scene,
                &core.settings,
            )
            .unwrap();
        assert_eq!(core.orrery.body(earth).unwrap().motion, MotionState::Returning);
    });

    // 1.5 s at 60 Hz plus slack.
    run_frames(&mut app, 100);

    let orrery = app.world().resource::<Orrery>();
    let scene = app.world().resource::<SceneTree>();
    let instance = orrery.body(earth).unwrap();
    assert_eq!(instance.motion, MotionState::Orbiting);
    assert_eq!(scene.parent(instance.mesh).unwrap(), Some(instance.pivot));
    assert_eq!(
        scene.local_transform(instance.mesh).unwrap().translation,
        Vec3::new(20.0, 0.0, 0.0)
    );
    assert!(app.world().resource::<InteractionState>().returns().is_empty());
}

#[test]
#[should_panic(expected = "orrery invariant violated")]
fn test_broken_attachment_is_fatal() {
    let mut app = headless_app();
    app.update();

    {
        let mut orrery = app.world_mut().resource_mut::<Orrery>();
        let mars = orrery.find("Mars").unwrap();
        orrery.body_mut(mars).unwrap().motion = MotionState::Returning;
    }
    app.update();
}
