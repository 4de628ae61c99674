//! Static catalog of the sun and the eight planets.
//!
//! Sizes and distances are in scene units, speeds in radians per frame.
//! The values are chosen for a readable view, not for physical accuracy.

use bevy::prelude::*;

use crate::types::BodyIndex;

/// A flat ring around a body (Saturn).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// 0xRRGGBB
    pub color: u32,
}

/// Immutable visual and orbital parameters of a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelestialBody {
    pub name: &'static str,
    pub radius: f32,
    /// 0xRRGGBB
    pub color: u32,
    /// Local offset along X from the orbit pivot.
    pub orbit_distance: f32,
    /// Orbit pivot rotation per frame.
    pub orbit_speed: f32,
    /// Self-rotation per frame.
    pub rotation_speed: f32,
    /// Whether the body glows (the sun).
    pub emissive: bool,
    pub ring: Option<Ring>,
}

impl CelestialBody {
    const fn planet(
        name: &'static str,
        radius: f32,
        color: u32,
        orbit_distance: f32,
        orbit_speed: f32,
        rotation_speed: f32,
    ) -> Self {
        Self {
            name,
            radius,
            color,
            orbit_distance,
            orbit_speed,
            rotation_speed,
            emissive: false,
            ring: None,
        }
    }

    const fn with_ring(mut self, ring: Ring) -> Self {
        self.ring = Some(ring);
        self
    }

    /// Body colour as an sRGB Bevy colour.
    pub fn color(&self) -> Color {
        hex_color(self.color)
    }

    /// Local position of the body relative to its orbit pivot.
    pub fn orbit_slot(&self) -> Vec3 {
        Vec3::new(self.orbit_distance, 0.0, 0.0)
    }
}

/// Convert a 0xRRGGBB value to an sRGB colour.
pub fn hex_color(rgb: u32) -> Color {
    Color::srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// The sun. Sits at the origin, spins slowly, never orbits.
pub const SUN: CelestialBody = CelestialBody {
    name: "Sun",
    radius: 5.0,
    color: 0xffff00,
    orbit_distance: 0.0,
    orbit_speed: 0.0,
    rotation_speed: 0.001,
    emissive: true,
    ring: None,
};

/// The eight planets, innermost first.
pub const PLANETS: [CelestialBody; 8] = [
    CelestialBody::planet("Mercury", 0.5, 0xa9a9a9, 10.0, 0.04, 0.04),
    CelestialBody::planet("Venus", 0.9, 0xe39e1c, 15.0, 0.015, 0.02),
    CelestialBody::planet("Earth", 1.0, 0x3498db, 20.0, 0.01, 0.02),
    CelestialBody::planet("Mars", 0.7, 0xe74c3c, 25.0, 0.008, 0.018),
    CelestialBody::planet("Jupiter", 2.5, 0xf39c12, 35.0, 0.002, 0.04),
    CelestialBody::planet("Saturn", 2.2, 0xf5cba7, 45.0, 0.0009, 0.038).with_ring(Ring {
        inner_radius: 2.5,
        outer_radius: 4.0,
        color: 0xc9c098,
    }),
    CelestialBody::planet("Uranus", 1.8, 0xaed6f1, 60.0, 0.0004, 0.03),
    CelestialBody::planet("Neptune", 1.7, 0x2980b9, 75.0, 0.0001, 0.032),
];

/// Look up a planet by name (case-insensitive).
pub fn find_planet(name: &str) -> Option<(BodyIndex, &'static CelestialBody)> {
    PLANETS
        .iter()
        .enumerate()
        .find(|(_, body)| body.name.eq_ignore_ascii_case(name))
        .map(|(i, body)| (BodyIndex(i), body))
}
