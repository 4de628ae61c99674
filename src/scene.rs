//! Scene graph of transformable nodes.
//!
//! The interaction core never touches meshes or materials. It moves nodes
//! around a parent/child hierarchy through the [`SceneGraph`] trait and asks
//! it for ray hits. [`SceneTree`] is the in-process implementation; the
//! render module mirrors its world transforms into Bevy entities.

use bevy::math::bounding::{BoundingSphere, RayCast3d};
use bevy::prelude::*;

/// Handle to a node in a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The scene root. Always present, never reparented.
    pub const ROOT: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Errors from hierarchy manipulation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("unknown scene node {0:?}")]
    UnknownNode(NodeId),

    #[error("cannot attach {child:?} beneath its own descendant {parent:?}")]
    Cycle { child: NodeId, parent: NodeId },

    #[error("the scene root cannot be reparented")]
    RootImmovable,
}

/// A ray intersection with a pickable node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub node: NodeId,
    /// Distance along the ray to the first intersection.
    pub distance: f32,
    /// World-space point of the intersection.
    pub point: Vec3,
}

/// Operations the interaction core needs from a scene hierarchy.
pub trait SceneGraph {
    /// Create a node under `parent` with the given local transform.
    fn create_node(&mut self, parent: NodeId, local: Transform) -> Result<NodeId, SceneError>;

    /// Move `child` under `parent`, keeping its local transform.
    fn attach(&mut self, child: NodeId, parent: NodeId) -> Result<(), SceneError>;

    /// Move `node` under the root, keeping its world transform.
    fn detach_preserving_world(&mut self, node: NodeId) -> Result<(), SceneError>;

    /// Current parent; `None` only for the root.
    fn parent(&self, node: NodeId) -> Result<Option<NodeId>, SceneError>;

    fn local_transform(&self, node: NodeId) -> Result<Transform, SceneError>;

    fn set_local_transform(&mut self, node: NodeId, local: Transform) -> Result<(), SceneError>;

    /// Composed transform from the root down to `node`.
    fn world_transform(&self, node: NodeId) -> Result<GlobalTransform, SceneError>;

    /// Give `node` a sphere of `radius` for ray queries.
    fn set_pick_radius(&mut self, node: NodeId, radius: f32) -> Result<(), SceneError>;

    /// Intersect `ray` with the pick spheres of `candidates`, nearest first.
    ///
    /// Candidates without a pick radius, or unknown to the graph, are skipped.
    fn raycast(&self, ray: Ray3d, candidates: &[NodeId]) -> Vec<RayHit>;

    fn world_position(&self, node: NodeId) -> Result<Vec3, SceneError> {
        Ok(self.world_transform(node)?.translation())
    }

    /// Convert a point in `node`'s local space to world space.
    fn local_to_world(&self, node: NodeId, local: Vec3) -> Result<Vec3, SceneError> {
        Ok(self.world_transform(node)?.transform_point(local))
    }

    /// Place `node` at a world position, leaving its rotation and scale alone.
    fn set_world_position(&mut self, node: NodeId, world: Vec3) -> Result<(), SceneError> {
        let parent_world = match self.parent(node)? {
            Some(parent) => self.world_transform(parent)?,
            None => GlobalTransform::IDENTITY,
        };
        let mut local = self.local_transform(node)?;
        local.translation = parent_world.affine().inverse().transform_point3(world);
        self.set_local_transform(node, local)
    }
}

#[derive(Clone, Debug)]
struct SceneNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: Transform,
    pick_radius: Option<f32>,
}

impl SceneNode {
    fn new(parent: Option<NodeId>, local: Transform) -> Self {
        Self {
            parent,
            children: Vec::new(),
            local,
            pick_radius: None,
        }
    }
}

/// Arena-backed scene hierarchy.
#[derive(Resource, Clone, Debug)]
pub struct SceneTree {
    nodes: Vec<SceneNode>,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self {
            nodes: vec![SceneNode::new(None, Transform::IDENTITY)],
        }
    }
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is never removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, node: NodeId) -> Result<&[NodeId], SceneError> {
        Ok(&self.node(node)?.children)
    }

    fn node(&self, id: NodeId) -> Result<&SceneNode, SceneError> {
        self.nodes.get(id.index()).ok_or(SceneError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, SceneError> {
        self.nodes.get_mut(id.index()).ok_or(SceneError::UnknownNode(id))
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut node: NodeId) -> Result<bool, SceneError> {
        loop {
            if node == ancestor {
                return Ok(true);
            }
            match self.node(node)?.parent {
                Some(parent) => node = parent,
                None => return Ok(false),
            }
        }
    }

    fn reparent(&mut self, child: NodeId, parent: NodeId) -> Result<(), SceneError> {
        if child == NodeId::ROOT {
            return Err(SceneError::RootImmovable);
        }
        self.node(parent)?;
        if self.is_ancestor_or_self(child, parent)? {
            return Err(SceneError::Cycle { child, parent });
        }

        if let Some(old) = self.node(child)?.parent {
            self.node_mut(old)?.children.retain(|&c| c != child);
        }
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }
}

impl SceneGraph for SceneTree {
    fn create_node(&mut self, parent: NodeId, local: Transform) -> Result<NodeId, SceneError> {
        self.node(parent)?;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SceneNode::new(Some(parent), local));
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn attach(&mut self, child: NodeId, parent: NodeId) -> Result<(), SceneError> {
        self.reparent(child, parent)
    }

    fn detach_preserving_world(&mut self, node: NodeId) -> Result<(), SceneError> {
        let world = self.world_transform(node)?;
        self.reparent(node, NodeId::ROOT)?;
        self.node_mut(node)?.local = world.compute_transform();
        Ok(())
    }

    fn parent(&self, node: NodeId) -> Result<Option<NodeId>, SceneError> {
        Ok(self.node(node)?.parent)
    }

    fn local_transform(&self, node: NodeId) -> Result<Transform, SceneError> {
        Ok(self.node(node)?.local)
    }

    fn set_local_transform(&mut self, node: NodeId, local: Transform) -> Result<(), SceneError> {
        self.node_mut(node)?.local = local;
        Ok(())
    }

    fn world_transform(&self, node: NodeId) -> Result<GlobalTransform, SceneError> {
        let mut chain = Vec::new();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            let current = self.node(id)?;
            chain.push(current.local);
            cursor = current.parent;
        }

        Ok(chain
            .into_iter()
            .rev()
            .fold(GlobalTransform::IDENTITY, |world, local| world.mul_transform(local)))
    }

    fn set_pick_radius(&mut self, node: NodeId, radius: f32) -> Result<(), SceneError> {
        self.node_mut(node)?.pick_radius = Some(radius.max(0.0));
        Ok(())
    }

    fn raycast(&self, ray: Ray3d, candidates: &[NodeId]) -> Vec<RayHit> {
        let cast = RayCast3d::from_ray(ray, f32::MAX);

        let mut hits: Vec<RayHit> = candidates
            .iter()
            .filter_map(|&node| {
                let radius = self.node(node).ok()?.pick_radius?;
                let center = self.world_position(node).ok()?;
                let distance = cast.sphere_intersection_at(&BoundingSphere::new(center, radius))?;
                Some(RayHit {
                    node,
                    distance,
                    point: ray.get_point(distance),
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
