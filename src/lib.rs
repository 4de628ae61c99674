//! Orrery - Interactive Solar System
//!
//! A library crate providing the orbital motion, free camera, pick-and-drag
//! and return-to-orbit components, usable headless for testing.

pub mod camera;
pub mod catalog;
pub mod config;
pub mod frame;
pub mod input;
pub mod interaction;
pub mod orbit;
pub mod orrery;
pub mod render;
pub mod scene;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
