//! Body instances: each planet's mesh node, its orbit pivot and its motion state.

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::catalog::{CelestialBody, PLANETS, SUN};
use crate::scene::{NodeId, SceneError, SceneGraph};
use crate::types::{BodyIndex, MotionState};

/// Errors raised when the ORBITING/DETACHED bookkeeping disagrees with the scene.
///
/// Any of these means a programming error, not a user-facing condition.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OrreryError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("unknown body {0:?}")]
    UnknownBody(BodyIndex),

    #[error("{body} is {state:?} but its mesh hangs off {parent:?}")]
    AttachmentMismatch {
        body: &'static str,
        state: MotionState,
        parent: Option<NodeId>,
    },

    #[error("{body} is {state:?}, expected {expected:?}")]
    UnexpectedState {
        body: &'static str,
        state: MotionState,
        expected: MotionState,
    },
}

/// One planet in the running scene.
#[derive(Clone, Debug)]
pub struct BodyInstance {
    pub body: &'static CelestialBody,
    /// Node carrying the planet's visual.
    pub mesh: NodeId,
    /// Invisible node rotated each frame to carry the mesh around the sun.
    pub pivot: NodeId,
    /// Ring child of the mesh, if the body has one.
    pub ring: Option<NodeId>,
    pub motion: MotionState,
    /// Accumulated pivot angle in [0, 2π).
    pub orbit_angle: f32,
    /// Accumulated self-rotation in [0, 2π).
    pub spin_angle: f32,
}

impl BodyInstance {
    pub fn name(&self) -> &'static str {
        self.body.name
    }

    /// Local position of the mesh under its pivot while orbiting.
    pub fn orbit_slot(&self) -> Vec3 {
        self.body.orbit_slot()
    }

    /// Local transform the mesh takes when (re)attached to its pivot.
    pub fn orbit_transform(&self) -> Transform {
        Transform::from_translation(self.orbit_slot())
            .with_rotation(Quat::from_rotation_y(self.spin_angle))
    }

    fn expected_parent(&self) -> NodeId {
        if self.motion.is_detached() {
            NodeId::ROOT
        } else {
            self.pivot
        }
    }
}

/// The sun and every planet instance, built once at startup.
#[derive(Resource, Clone, Debug)]
pub struct Orrery {
    pub sun: NodeId,
    pub sun_spin: f32,
    bodies: Vec<BodyInstance>,
}

impl Orrery {
    /// Assemble the catalog's sun and planets onto `scene`.
    pub fn build<S: SceneGraph>(scene: &mut S) -> Result<Self, SceneError> {
        Self::from_catalog(scene, &SUN, &PLANETS)
    }

    /// Assemble an arbitrary set of bodies; every planet starts at angle zero
    /// on the +X axis.
    pub fn from_catalog<S: SceneGraph>(
        scene: &mut S,
        sun: &'static CelestialBody,
        planets: &'static [CelestialBody],
    ) -> Result<Self, SceneError> {
        let sun_node = scene.create_node(NodeId::ROOT, Transform::IDENTITY)?;
        scene.set_pick_radius(sun_node, sun.radius)?;

        let mut bodies = Vec::with_capacity(planets.len());
        for body in planets {
            let pivot = scene.create_node(NodeId::ROOT, Transform::IDENTITY)?;
            let mesh = scene.create_node(pivot, Transform::from_translation(body.orbit_slot()))?;
            scene.set_pick_radius(mesh, body.radius)?;

            let ring = match body.ring {
                Some(_) => Some(scene.create_node(
                    mesh,
                    Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                )?),
                None => None,
            };

            bodies.push(BodyInstance {
                body,
                mesh,
                pivot,
                ring,
                motion: MotionState::Orbiting,
                orbit_angle: 0.0,
                spin_angle: 0.0,
            });
        }

        Ok(Self {
            sun: sun_node,
            sun_spin: 0.0,
            bodies,
        })
    }

    pub fn bodies(&self) -> &[BodyInstance] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [BodyInstance] {
        &mut self.bodies
    }

    pub fn body(&self, index: BodyIndex) -> Result<&BodyInstance, OrreryError> {
        self.bodies.get(index.0).ok_or(OrreryError::UnknownBody(index))
    }

    pub fn body_mut(&mut self, index: BodyIndex) -> Result<&mut BodyInstance, OrreryError> {
        self.bodies.get_mut(index.0).ok_or(OrreryError::UnknownBody(index))
    }

    /// Find a planet by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<BodyIndex> {
        self.bodies
            .iter()
            .position(|b| b.name().eq_ignore_ascii_case(name))
            .map(BodyIndex)
    }

    /// Planet whose mesh is `node`.
    pub fn by_mesh(&self, node: NodeId) -> Option<BodyIndex> {
        self.bodies.iter().position(|b| b.mesh == node).map(BodyIndex)
    }

    /// Nodes a pick ray is tested against: the sun as an occluder, then
    /// every planet mesh.
    pub fn pick_candidates(&self) -> Vec<NodeId> {
        std::iter::once(self.sun)
            .chain(self.bodies.iter().map(|b| b.mesh))
            .collect()
    }

    /// Verify every mesh hangs off exactly the parent its state implies.
    pub fn check_attachments<S: SceneGraph>(&self, scene: &S) -> Result<(), OrreryError> {
        for instance in &self.bodies {
            let parent = scene.parent(instance.mesh)?;
            if parent != Some(instance.expected_parent()) {
                return Err(OrreryError::AttachmentMismatch {
                    body: instance.name(),
                    state: instance.motion,
                    parent,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneTree;

    #[test]
    fn test_build_places_planets_on_x_axis() {
        let mut scene = SceneTree::new();
        let orrery = Orrery::build(&mut scene).unwrap();

        assert_eq!(orrery.bodies().len(), 8);
        for instance in orrery.bodies() {
            let world = scene.world_position(instance.mesh).unwrap();
            assert!(world.abs_diff_eq(Vec3::new(instance.body.orbit_distance, 0.0, 0.0), 1e-5));
            assert_eq!(scene.parent(instance.mesh).unwrap(), Some(instance.pivot));
            assert_eq!(scene.parent(instance.pivot).unwrap(), Some(NodeId::ROOT));
            assert_eq!(instance.motion, MotionState::Orbiting);
        }
        orrery.check_attachments(&scene).unwrap();
    }

    #[test]
    fn test_saturn_ring_is_child_of_mesh() {
        let mut scene = SceneTree::new();
        let orrery = Orrery::build(&mut scene).unwrap();

        let saturn = orrery.body(orrery.find("Saturn").unwrap()).unwrap();
        let ring = saturn.ring.expect("Saturn has a ring");
        assert_eq!(scene.parent(ring).unwrap(), Some(saturn.mesh));

        let earth = orrery.body(orrery.find("Earth").unwrap()).unwrap();
        assert!(earth.ring.is_none());
    }

    #[test]
    fn test_lookup_helpers() {
        let mut scene = SceneTree::new();
        let orrery = Orrery::build(&mut scene).unwrap();

        let earth = orrery.find("EARTH").unwrap();
        let mesh = orrery.body(earth).unwrap().mesh;
        assert_eq!(orrery.by_mesh(mesh), Some(earth));
        assert_eq!(orrery.by_mesh(orrery.sun), None);

        let candidates = orrery.pick_candidates();
        assert_eq!(candidates.len(), 9);
        assert_eq!(candidates[0], orrery.sun);

        assert_eq!(
            orrery.body(BodyIndex(99)).unwrap_err(),
            OrreryError::UnknownBody(BodyIndex(99))
        );
    }

    #[test]
    fn test_check_attachments_flags_mismatch() {
        let mut scene = SceneTree::new();
        let mut orrery = Orrery::build(&mut scene).unwrap();
        let mars = orrery.find("Mars").unwrap();

        // Detached in the scene but still marked as orbiting.
        let mesh = orrery.body(mars).unwrap().mesh;
        scene.detach_preserving_world(mesh).unwrap();
        assert!(matches!(
            orrery.check_attachments(&scene),
            Err(OrreryError::AttachmentMismatch { body: "Mars", .. })
        ));

        orrery.body_mut(mars).unwrap().motion = MotionState::Dragging;
        orrery.check_attachments(&scene).unwrap();
    }
}
