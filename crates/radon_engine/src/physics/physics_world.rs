//! Collider registry partitioned into named physics scenes
//!
//! Each collider lives in exactly one scene bucket. Buckets are flat,
//! insertion-ordered lists: queries scan linearly and never cross buckets.
//! There is no broad phase.

use std::collections::HashMap;

use super::collision::{ColliderShape, WorldShape};
use super::PhysicsError;
use crate::foundation::collections::{ColliderHandle, NodeId, SlotMap};
use crate::foundation::math::Vec3;
use crate::scene::SceneGraphHost;

/// Scene name used when a collider does not ask for one
pub const DEFAULT_SCENE: &str = "default";

/// A registered collider
#[derive(Debug, Clone)]
pub struct Collider {
    node: NodeId,
    shape: ColliderShape,
    world: WorldShape,
    invert: bool,
    scene: String,
}

impl Collider {
    /// Owning node
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Local geometry
    #[must_use]
    pub const fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// Cached world-space geometry as of the last refresh
    #[must_use]
    pub const fn world_shape(&self) -> &WorldShape {
        &self.world
    }

    /// Polarity flag
    #[must_use]
    pub const fn invert(&self) -> bool {
        self.invert
    }

    /// Physics scene this collider belongs to
    #[must_use]
    pub fn scene(&self) -> &str {
        &self.scene
    }
}

/// Registry of every collider, grouped by physics scene
#[derive(Debug)]
pub struct PhysicsWorld {
    colliders: SlotMap<ColliderHandle, Collider>,
    scenes: HashMap<String, Vec<ColliderHandle>>,
    default_scene: String,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create an empty registry whose default scene is `"default"`
    #[must_use]
    pub fn new() -> Self {
        Self::with_default_scene(DEFAULT_SCENE)
    }

    /// Create an empty registry with a custom default scene name
    pub fn with_default_scene(name: impl Into<String>) -> Self {
        Self {
            colliders: SlotMap::with_key(),
            scenes: HashMap::new(),
            default_scene: name.into(),
        }
    }

    /// Scene name used when registration does not specify one
    #[must_use]
    pub fn default_scene(&self) -> &str {
        &self.default_scene
    }

    /// Register a collider for `node` at the end of its scene bucket
    ///
    /// World geometry is sampled immediately from the node's world position.
    pub fn register(
        &mut self,
        node: NodeId,
        shape: ColliderShape,
        invert: bool,
        scene: Option<&str>,
        host: &dyn SceneGraphHost,
    ) -> ColliderHandle {
        let scene = scene.unwrap_or(self.default_scene.as_str()).to_string();
        let position = host.world_position(node).unwrap_or_else(|| {
            log::warn!("Registering collider for unknown node {node:?}; placing it at the origin");
            Vec3::zeros()
        });

        let handle = self.colliders.insert(Collider {
            node,
            shape,
            world: shape.to_world(position),
            invert,
            scene: scene.clone(),
        });
        log::debug!("Registered {shape:?} for {node:?} in physics scene '{scene}'");
        self.scenes.entry(scene).or_default().push(handle);
        handle
    }

    /// Remove a collider; its handle becomes stale
    pub fn unregister(&mut self, handle: ColliderHandle) -> Option<Collider> {
        let collider = self.colliders.remove(handle)?;
        if let Some(bucket) = self.scenes.get_mut(&collider.scene) {
            bucket.retain(|&h| h != handle);
        }
        Some(collider)
    }

    /// Look up a collider
    #[must_use]
    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    /// Handles registered in `scene`, in insertion order
    #[must_use]
    pub fn scene(&self, scene: &str) -> &[ColliderHandle] {
        self.scenes.get(scene).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of live colliders across all scenes
    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// True when nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Re-sample the collider's world geometry from its node's current world position
    pub fn update_collider(
        &mut self,
        handle: ColliderHandle,
        host: &dyn SceneGraphHost,
    ) -> Result<(), PhysicsError> {
        let collider = self
            .colliders
            .get_mut(handle)
            .ok_or(PhysicsError::StaleCollider(handle))?;
        let position = host
            .world_position(collider.node)
            .ok_or(PhysicsError::NodeNotFound(collider.node))?;
        collider.world = collider.shape.to_world(position);
        Ok(())
    }

    /// First other collider in the same scene that the caller "collides" with
    ///
    /// The caller's own geometry is refreshed first; `offset`, if given, is
    /// applied to a copy only. Candidates are NOT refreshed. Colliders owned by
    /// the caller's node are skipped. A candidate matches when
    /// `raw_intersects ^ candidate.invert ^ self.invert` holds.
    pub fn find_collision(
        &mut self,
        handle: ColliderHandle,
        host: &dyn SceneGraphHost,
        offset: Option<Vec3>,
    ) -> Result<Option<ColliderHandle>, PhysicsError> {
        self.update_collider(handle, host)?;
        let me = &self.colliders[handle];
        let probe = offset.map_or(me.world, |offset| me.world.translated(offset));

        for &candidate in self.scene(&me.scene) {
            let Some(other) = self.colliders.get(candidate) else {
                continue;
            };
            if other.node == me.node {
                continue;
            }
            if probe.intersects(&other.world) ^ other.invert ^ me.invert {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use crate::scene::SimpleSceneGraph;

    fn node_at(graph: &mut SimpleSceneGraph, x: f32) -> NodeId {
        let root = graph.root();
        graph.spawn(root, "n", Transform::from_position(Vec3::new(x, 0.0, 0.0)))
    }

    fn unit_box() -> ColliderShape {
        ColliderShape::Box {
            half_extents: Vec3::new(0.5, 0.5, 0.5),
        }
    }

    #[test]
    fn default_scene_is_used_when_unspecified() {
        let mut graph = SimpleSceneGraph::new();
        let node = node_at(&mut graph, 0.0);
        let mut physics = PhysicsWorld::new();

        let h = physics.register(node, unit_box(), false, None, &graph);
        assert_eq!(physics.scene(DEFAULT_SCENE), &[h]);
        assert_eq!(physics.collider(h).unwrap().scene(), "default");
    }

    #[test]
    fn scenes_are_isolated() {
        let mut graph = SimpleSceneGraph::new();
        let a = node_at(&mut graph, 0.0);
        let b = node_at(&mut graph, 0.0);
        let mut physics = PhysicsWorld::new();

        let ha = physics.register(a, unit_box(), false, Some("walls"), &graph);
        physics.register(b, unit_box(), false, Some("pickups"), &graph);

        assert_eq!(physics.find_collision(ha, &graph, None).unwrap(), None);
    }

    #[test]
    fn first_match_in_insertion_order_wins() {
        let mut graph = SimpleSceneGraph::new();
        let me = node_at(&mut graph, 0.0);
        let first = node_at(&mut graph, 0.2);
        let second = node_at(&mut graph, -0.2);
        let mut physics = PhysicsWorld::new();

        let h = physics.register(me, unit_box(), false, None, &graph);
        let h1 = physics.register(first, unit_box(), false, None, &graph);
        physics.register(second, unit_box(), false, None, &graph);

        assert_eq!(physics.find_collision(h, &graph, None).unwrap(), Some(h1));
    }

    #[test]
    fn offset_probe_does_not_move_stored_geometry() {
        let mut graph = SimpleSceneGraph::new();
        let me = node_at(&mut graph, 0.0);
        let wall = node_at(&mut graph, 3.0);
        let mut physics = PhysicsWorld::new();

        let h = physics.register(me, unit_box(), false, None, &graph);
        let hw = physics.register(wall, unit_box(), false, None, &graph);

        assert_eq!(physics.find_collision(h, &graph, None).unwrap(), None);
        let ahead = Some(Vec3::new(2.5, 0.0, 0.0));
        assert_eq!(physics.find_collision(h, &graph, ahead).unwrap(), Some(hw));
        assert_eq!(physics.collider(h).unwrap().world_shape().center(), Vec3::zeros());
    }

    #[test]
    fn candidates_use_cached_geometry_until_refreshed() {
        let mut graph = SimpleSceneGraph::new();
        let me = node_at(&mut graph, 0.0);
        let mover = node_at(&mut graph, 5.0);
        let mut physics = PhysicsWorld::new();

        let h = physics.register(me, unit_box(), false, None, &graph);
        let hm = physics.register(mover, unit_box(), false, None, &graph);

        graph.local_transform_mut(mover).unwrap().position = Vec3::zeros();
        assert_eq!(physics.find_collision(h, &graph, None).unwrap(), None);

        physics.update_collider(hm, &graph).unwrap();
        assert_eq!(physics.find_collision(h, &graph, None).unwrap(), Some(hm));
    }

    #[test]
    fn unregistered_handles_are_stale() {
        let mut graph = SimpleSceneGraph::new();
        let me = node_at(&mut graph, 0.0);
        let mut physics = PhysicsWorld::new();

        let h = physics.register(me, unit_box(), false, None, &graph);
        assert!(physics.unregister(h).is_some());
        assert!(physics.scene(DEFAULT_SCENE).is_empty());
        assert_eq!(
            physics.find_collision(h, &graph, None),
            Err(PhysicsError::StaleCollider(h))
        );
    }

    #[test]
    fn refresh_fails_once_node_is_gone() {
        let mut graph = SimpleSceneGraph::new();
        let me = node_at(&mut graph, 0.0);
        let mut physics = PhysicsWorld::new();

        let h = physics.register(me, unit_box(), false, None, &graph);
        graph.remove_node(me);
        assert_eq!(physics.update_collider(h, &graph), Err(PhysicsError::NodeNotFound(me)));
    }
}
