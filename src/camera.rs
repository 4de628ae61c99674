//! Free-flying camera for the orrery.
//!
//! Held direction keys translate the camera; dragging with the secondary
//! button rotates it. Pose and projection parameters live in [`FreeCamera`],
//! which the pick and drag controller also uses to build pointer rays.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::f32::consts::FRAC_PI_2;

use crate::config::ControlSettings;
use crate::input::{InputState, MoveDirection, MovementKeys};
use crate::types::FrameSet;

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 75.0;

pub const NEAR_PLANE: f32 = 0.1;

pub const FAR_PLANE: f32 = 1000.0;

/// Where the camera starts, looking at the sun.
pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 20.0, 50.0);

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Size of the render surface in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl Viewport {
    /// A viewport of at least one pixel in each direction.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Screen position (origin top-left, y down) to normalized device
    /// coordinates in [-1, 1] with y up.
    pub fn to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            screen.x / self.width * 2.0 - 1.0,
            1.0 - screen.y / self.height * 2.0,
        )
    }
}

/// Camera pose and projection.
///
/// Orientation is yaw about world up followed by pitch about the camera's
/// own X axis, so pitch never tilts the horizon.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct FreeCamera {
    pub position: Vec3,
    pub yaw: f32,
    /// Clamped to [-π/2, π/2].
    pub pitch: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub viewport: Viewport,
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self::looking_at(INITIAL_POSITION, Vec3::ZERO, Viewport::default())
    }
}

impl FreeCamera {
    /// A camera at `position` facing `target`. Coincident points face -Z.
    pub fn looking_at(position: Vec3, target: Vec3, viewport: Viewport) -> Self {
        let dir = (target - position).try_normalize().unwrap_or(Vec3::NEG_Z);
        Self {
            position,
            yaw: (-dir.x).atan2(-dir.z),
            pitch: dir.y.clamp(-1.0, 1.0).asin(),
            fov_y: FOV_DEGREES.to_radians(),
            viewport,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Unit look direction.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Unit vector perpendicular to the look direction and world up.
    ///
    /// Looking straight up or down leaves the cross product degenerate; the
    /// yaw-only right vector is used instead.
    pub fn right(&self) -> Vec3 {
        self.forward()
            .cross(Vec3::Y)
            .try_normalize()
            .unwrap_or_else(|| Quat::from_rotation_y(self.yaw) * Vec3::X)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation())
    }

    /// Displacement for one frame of held movement keys.
    ///
    /// Contributions add up unnormalized, so diagonal movement is faster than
    /// movement along a single axis.
    pub fn movement_step(&self, keys: &MovementKeys, move_speed: f32) -> Vec3 {
        let forward = self.forward();
        let right = self.right();

        MoveDirection::ALL
            .iter()
            .filter(|&&direction| keys.is_held(direction))
            .map(|direction| match direction {
                MoveDirection::Forward => forward,
                MoveDirection::Backward => -forward,
                MoveDirection::Right => right,
                MoveDirection::Left => -right,
                MoveDirection::Up => Vec3::Y,
                MoveDirection::Down => Vec3::NEG_Y,
            })
            .sum::<Vec3>()
            * move_speed
    }

    /// Rotate by a pointer delta in pixels.
    pub fn rotate(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch - delta.y * sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Ray from the camera through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray3d {
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.viewport.aspect_ratio();
        let local = Vec3::new(ndc.x * half_width, ndc.y * half_height, -1.0);

        let direction = Dir3::new(self.rotation() * local)
            .or_else(|_| Dir3::new(self.forward()))
            .unwrap_or(Dir3::NEG_Z);
        Ray3d::new(self.position, direction)
    }

    /// Ray from the camera through a screen position.
    pub fn ray_from_screen(&self, screen: Vec2) -> Ray3d {
        self.ray_from_ndc(self.viewport.to_ndc(screen))
    }

    /// Project a world point to normalized device coordinates; `None` if it
    /// is behind the camera.
    pub fn world_to_ndc(&self, world: Vec3) -> Option<Vec2> {
        let local = self.rotation().inverse() * (world - self.position);
        if local.z >= -NEAR_PLANE {
            return None;
        }

        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.viewport.aspect_ratio();
        let depth = -local.z;
        Some(Vec2::new(
            local.x / (depth * half_width),
            local.y / (depth * half_height),
        ))
    }
}

/// Apply one frame of navigation: held keys translate, collected pointer
/// deltas rotate.
pub fn navigate(camera: &mut FreeCamera, input: &mut InputState, settings: &ControlSettings) {
    let look = input.take_look();
    if look != Vec2::ZERO {
        camera.rotate(look, settings.look_sensitivity());
    }

    if !input.movement.is_empty() {
        camera.position += camera.movement_step(&input.movement, settings.move_speed);
    }
}

/// Plugin spawning the render camera and keeping it in step with [`FreeCamera`].
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FreeCamera>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, track_viewport.in_set(FrameSet::Input))
            .add_systems(Update, sync_camera.in_set(FrameSet::Sync));
    }
}

fn setup_camera(mut commands: Commands, camera: Res<FreeCamera>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: camera.fov_y,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        camera.transform(),
        AmbientLight {
            color: Color::srgb_u8(0x40, 0x40, 0x40),
            brightness: 400.0,
            ..default()
        },
        MainCamera,
    ));
}

/// Keep the pick viewport in step with the window size.
fn track_viewport(
    window_query: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut camera: ResMut<FreeCamera>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };

    let viewport = Viewport::new(window.width(), window.height());
    if camera.viewport != viewport {
        debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        camera.viewport = viewport;
    }
}

fn sync_camera(camera: Res<FreeCamera>, mut query: Query<&mut Transform, With<MainCamera>>) {
    if !camera.is_changed() {
        return;
    }

    let Ok(mut transform) = query.single_mut() else {
        return;
    };
    *transform = camera.transform();
}
