//! Component trait and lifecycle context
//!
//! A component is a behavior object bound to exactly one scene node. Its
//! lifecycle is:
//!
//! 1. [`ComponentInit::init`] runs synchronously inside [`World::attach`](super::World::attach)
//!    with the caller-supplied props.
//! 2. [`Component::on_scene_attached`] fires once, the first frame the node is
//!    found reachable from the active root.
//! 3. [`Component::on_tick`] fires every rendered frame while the node stays reachable.
//! 4. [`Component::on_destroy`] fires when the node is explicitly despawned.

use std::any::Any;

use crate::foundation::collections::{Key, NodeId};
use crate::foundation::math::{Transform, Vec3};
use crate::input::InputManager;
use crate::physics::PhysicsWorld;
use crate::scene::SceneGraphHost;

/// Object-safe access to `Any` for downcasting stored components
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`
    fn as_any(&self) -> &dyn Any;
    /// Borrow as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Per-frame behavior attached to a scene node
pub trait Component: AsAny {
    /// Called exactly once, the first frame the owning node is reachable
    fn on_scene_attached(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// Called once per rendered frame with the elapsed seconds
    fn on_tick(&mut self, _ctx: &mut ComponentContext<'_>, _delta: f32) {}

    /// Called when the owning node is despawned
    fn on_destroy(&mut self, _ctx: &mut ComponentContext<'_>) {}
}

/// Construction of a component from its configuration
pub trait ComponentInit: Component + Sized {
    /// Constructor-supplied configuration
    type Props;

    /// Build the component; `ctx.node()` is the node being attached to
    fn init(props: Self::Props, ctx: &mut ComponentContext<'_>) -> Self;
}

/// Engine services handed to component callbacks
///
/// The world sets [`ComponentContext::node`] to the owning node before every
/// callback, so components rarely need to store their node id.
pub struct ComponentContext<'a> {
    node: NodeId,
    /// Scene graph host owning transforms
    pub scene: &'a mut dyn SceneGraphHost,
    /// Collider registry
    pub physics: &'a mut PhysicsWorld,
    /// Input state and virtual axes
    pub input: &'a InputManager,
}

impl<'a> ComponentContext<'a> {
    /// Bundle engine services; the node is assigned by the world per callback
    pub fn new(
        scene: &'a mut dyn SceneGraphHost,
        physics: &'a mut PhysicsWorld,
        input: &'a InputManager,
    ) -> Self {
        Self {
            node: NodeId::null(),
            scene,
            physics,
            input,
        }
    }

    /// Node owning the component currently being called
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    pub(crate) fn set_node(&mut self, node: NodeId) {
        self.node = node;
    }

    /// Local transform of the current node
    #[must_use]
    pub fn transform(&self) -> Option<&Transform> {
        self.scene.local_transform(self.node)
    }

    /// Mutable local transform of the current node
    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        self.scene.local_transform_mut(self.node)
    }

    /// World position of the current node
    #[must_use]
    pub fn world_position(&self) -> Option<Vec3> {
        self.scene.world_position(self.node)
    }
}
