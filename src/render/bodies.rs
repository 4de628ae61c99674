//! Sun, planet and ring meshes.

use bevy::prelude::*;

use crate::catalog::{hex_color, CelestialBody, SUN};
use crate::orrery::Orrery;
use crate::scene::{NodeId, SceneGraph, SceneTree};

/// Ties a rendered entity to the scene node whose world transform it shows.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneNodeLink(pub NodeId);

/// Plugin spawning the body meshes.
pub struct CelestialBodyPlugin;

impl Plugin for CelestialBodyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_solar_system);
    }
}

fn body_material(body: &CelestialBody) -> StandardMaterial {
    let color = body.color();
    StandardMaterial {
        base_color: color,
        emissive: if body.emissive {
            color.to_linear() * 2.0
        } else {
            LinearRgba::BLACK
        },
        perceptual_roughness: 0.8,
        ..default()
    }
}

fn initial_transform(scene: &SceneTree, node: NodeId) -> Transform {
    scene
        .world_transform(node)
        .map(|world| world.compute_transform())
        .unwrap_or_default()
}

/// Spawn the sun, every planet and Saturn's ring.
fn spawn_solar_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    orrery: Res<Orrery>,
    scene: Res<SceneTree>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SUN.radius).mesh().uv(32, 32))),
        MeshMaterial3d(materials.add(body_material(&SUN))),
        initial_transform(&scene, orrery.sun),
        SceneNodeLink(orrery.sun),
        Name::new(SUN.name),
    ));

    for instance in orrery.bodies() {
        let body = instance.body;
        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(body.radius).mesh().uv(32, 32))),
            MeshMaterial3d(materials.add(body_material(body))),
            initial_transform(&scene, instance.mesh),
            SceneNodeLink(instance.mesh),
            Name::new(body.name),
        ));

        if let (Some(ring), Some(node)) = (body.ring, instance.ring) {
            // Annulus lies in XY; the ring node's quarter turn about X lays
            // it flat in the orbital plane.
            let material = StandardMaterial {
                base_color: hex_color(ring.color),
                double_sided: true,
                cull_mode: None,
                ..default()
            };
            commands.spawn((
                Mesh3d(meshes.add(Annulus::new(ring.inner_radius, ring.outer_radius))),
                MeshMaterial3d(materials.add(material)),
                initial_transform(&scene, node),
                SceneNodeLink(node),
                Name::new(format!("{} ring", body.name)),
            ));
        }
    }

    info!("Spawned sun and {} planets", orrery.bodies().len());
}
