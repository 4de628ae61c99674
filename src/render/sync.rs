//! Transform synchronization from the scene tree to rendered entities.

use bevy::prelude::*;

use crate::render::SceneNodeLink;
use crate::scene::{SceneGraph, SceneTree};

/// Copy world transforms from the scene tree onto linked entities.
///
/// Linked entities are top-level, so their `Transform` is the node's world
/// transform.
pub fn sync_scene_transforms(
    scene: Res<SceneTree>,
    mut query: Query<(&SceneNodeLink, &mut Transform)>,
) {
    if !scene.is_changed() {
        return;
    }

    for (link, mut transform) in query.iter_mut() {
        match scene.world_transform(link.0) {
            Ok(world) => *transform = world.compute_transform(),
            Err(err) => warn!("Rendered entity links a missing node: {err}"),
        }
    }
}
