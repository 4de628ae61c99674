//! Property-based tests for the drag and return state machine.

use bevy::prelude::*;
use proptest::prelude::*;

use super::{ease_out_cubic, InteractionState};
use crate::camera::FreeCamera;
use crate::config::ControlSettings;
use crate::frame::tick;
use crate::input::PointerButton;
use crate::scene::SceneGraph;
use crate::test_utils::{fixtures, screen_position_of};
use crate::types::{BodyIndex, MotionState};

const FRAME: f64 = 1.0 / 60.0;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whatever path the pointer takes, a released body ends up exactly in
    /// its orbital slot once the return duration has elapsed.
    #[test]
    fn prop_release_always_lands_in_slot(
        planet in 0usize..8,
        path in prop::collection::vec((-60.0f32..60.0, -60.0f32..60.0), 0..40),
    ) {
        let (mut scene, mut orrery) = fixtures::solar_system();
        let settings = ControlSettings::default();
        let mut camera = FreeCamera::default();
        let mut state = InteractionState::default();
        let body = BodyIndex(planet);

        let start = scene.world_position(orrery.body(body).unwrap().mesh).unwrap();
        let mut screen = screen_position_of(&camera, start);
        let grabbed = state
            .pointer_down(PointerButton::Primary, screen, &camera, &mut orrery, &mut scene, &settings)
            .unwrap();
        prop_assert_eq!(grabbed, Some(body));

        let mut now = 0.0;
        for (dx, dy) in path {
            let delta = Vec2::new(dx, dy);
            screen += delta;
            state
                .pointer_move(Some(screen), delta, &camera, &orrery, &mut scene, &settings)
                .unwrap();
            now += FRAME;
            tick(&mut state, &mut orrery, &mut scene, &mut camera, &settings, now).unwrap();
            prop_assert_eq!(orrery.body(body).unwrap().motion, MotionState::Dragging);
        }

        state
            .pointer_up(PointerButton::Primary, now, &mut orrery, &mut scene, &settings)
            .unwrap();
        let release = now;
        while now < release + settings.return_duration + FRAME {
            now += FRAME;
            tick(&mut state, &mut orrery, &mut scene, &mut camera, &settings, now).unwrap();
        }

        let instance = orrery.body(body).unwrap();
        prop_assert_eq!(instance.motion, MotionState::Orbiting);
        prop_assert_eq!(scene.parent(instance.mesh).unwrap(), Some(instance.pivot));
        prop_assert_eq!(
            scene.local_transform(instance.mesh).unwrap().translation,
            instance.orbit_slot()
        );
        prop_assert!(state.returns().is_empty());
    }

    /// Random presses, moves, releases and frames never leave a body attached
    /// to the wrong parent, and at most one body is ever being dragged.
    #[test]
    fn prop_attachment_invariant_holds(
        events in prop::collection::vec((0u8..4, 0usize..8, -80.0f32..80.0, -80.0f32..80.0), 0..80),
    ) {
        let (mut scene, mut orrery) = fixtures::solar_system();
        let settings = ControlSettings::default();
        let mut camera = FreeCamera::default();
        let mut state = InteractionState::default();
        let mut screen = Vec2::ZERO;
        let mut now = 0.0;

        for (kind, planet, dx, dy) in events {
            match kind {
                0 => {
                    let mesh = orrery.bodies()[planet].mesh;
                    let world = scene.world_position(mesh).unwrap();
                    screen = screen_position_of(&camera, world) + Vec2::new(dx, dy) * 0.01;
                    state
                        .pointer_down(PointerButton::Primary, screen, &camera, &mut orrery, &mut scene, &settings)
                        .unwrap();
                }
                1 => {
                    screen += Vec2::new(dx, dy);
                    state
                        .pointer_move(Some(screen), Vec2::new(dx, dy), &camera, &orrery, &mut scene, &settings)
                        .unwrap();
                }
                2 => {
                    state
                        .pointer_up(PointerButton::Primary, now, &mut orrery, &mut scene, &settings)
                        .unwrap();
                }
                _ => {
                    now += FRAME * 10.0;
                    tick(&mut state, &mut orrery, &mut scene, &mut camera, &settings, now).unwrap();
                }
            }

            orrery.check_attachments(&scene).unwrap();

            let dragging = orrery
                .bodies()
                .iter()
                .filter(|b| b.motion == MotionState::Dragging)
                .count();
            prop_assert!(dragging <= 1);
            prop_assert_eq!(dragging == 1, state.is_dragging());

            let returning = orrery
                .bodies()
                .iter()
                .filter(|b| b.motion == MotionState::Returning)
                .count();
            prop_assert_eq!(returning, state.returns().len());
        }
    }

    /// Easing progress strictly increases with elapsed time.
    #[test]
    fn prop_ease_out_is_monotonic(a in 0.0f32..1.0, gap in 0.001f32..1.0) {
        let b = (a + gap).min(1.0);
        prop_assume!(b - a >= 0.001);
        prop_assert!(ease_out_cubic(a) < ease_out_cubic(b));
    }
}
