//! Background rendering for the orrery.
//!
//! Provides the starfield shell and lighting.

use bevy::prelude::*;
use rand::Rng;

/// Radius of the star shell; well beyond Neptune and inside the far plane.
pub const STAR_SHELL_RADIUS: f32 = 450.0;

const STAR_COUNT: usize = 1500;

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_starfield, spawn_lighting));
    }
}

/// Uniformly distributed point on a sphere of `radius`.
fn point_on_shell(rng: &mut impl Rng, radius: f32) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..1.0);
    let theta: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * theta.cos(), z, r * theta.sin()) * radius
}

/// Scatter small unlit spheres over the star shell.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_mesh = meshes.add(Sphere::new(0.6).mesh().uv(8, 6));
    let mut rng = rand::thread_rng();

    // A handful of shared materials gives stars varied brightness.
    let star_materials: Vec<_> = (1..=4)
        .map(|level| {
            let brightness = level as f32 / 4.0;
            materials.add(StandardMaterial {
                base_color: Color::srgb(brightness, brightness, brightness),
                unlit: true,
                ..default()
            })
        })
        .collect();

    for _ in 0..STAR_COUNT {
        let position = point_on_shell(&mut rng, STAR_SHELL_RADIUS);
        let scale = rng.gen_range(0.3..1.2);
        let material = star_materials[rng.gen_range(0..star_materials.len())].clone();

        commands.spawn((
            Mesh3d(star_mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(position).with_scale(Vec3::splat(scale)),
        ));
    }

    info!("Spawned {STAR_COUNT} background stars");
}

/// Point light at the sun. Ambient fill rides on the camera.
fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        PointLight {
            intensity: 50_000_000.0,
            range: 300.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
        Name::new("Sun light"),
    ));

    info!("Scene lighting initialized");
}
