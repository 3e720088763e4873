//! Collider components
//!
//! Box and sphere colliders register themselves into a physics scene when
//! attached and unregister when their node is despawned. Their world geometry
//! is NOT refreshed automatically: call `update_collider` (or `find_collision`,
//! which refreshes the caller) before relying on it.

use super::collision::ColliderShape;
use super::{PhysicsError, PhysicsWorld};
use crate::ecs::{Component, ComponentContext, ComponentInit};
use crate::foundation::collections::ColliderHandle;
use crate::foundation::math::Vec3;
use crate::scene::SceneGraphHost;

/// Shared behavior of components backed by a registered collider
pub trait ColliderComponent {
    /// Handle of the registered collider
    fn handle(&self) -> ColliderHandle;

    /// Re-sample world geometry from the node's current world position
    fn update_collider(
        &self,
        physics: &mut PhysicsWorld,
        host: &dyn SceneGraphHost,
    ) -> Result<(), PhysicsError> {
        physics.update_collider(self.handle(), host)
    }

    /// First collider in the same physics scene this one collides with
    ///
    /// See [`PhysicsWorld::find_collision`] for the polarity rules.
    fn find_collision(
        &self,
        physics: &mut PhysicsWorld,
        host: &dyn SceneGraphHost,
        offset: Option<Vec3>,
    ) -> Result<Option<ColliderHandle>, PhysicsError> {
        physics.find_collision(self.handle(), host, offset)
    }
}

/// Props for [`BoxCollider`]
#[derive(Debug, Clone)]
pub struct BoxColliderProps {
    /// Multiplier applied to the node's scale to get the box size
    pub scale: f32,
    /// Physics scene; `None` uses the registry default
    pub scene: Option<String>,
    /// Polarity flag
    pub invert: bool,
}

impl Default for BoxColliderProps {
    fn default() -> Self {
        Self {
            scale: 1.0,
            scene: None,
            invert: false,
        }
    }
}

/// Axis-aligned box sized from the node's scale
///
/// The box measures `node.scale * props.scale` along each axis, so its
/// half-extents are half of that.
#[derive(Debug)]
pub struct BoxCollider {
    handle: ColliderHandle,
}

impl ComponentInit for BoxCollider {
    type Props = BoxColliderProps;

    fn init(props: BoxColliderProps, ctx: &mut ComponentContext<'_>) -> Self {
        let node = ctx.node();
        let half_extents = ctx.scene.scale(node) * props.scale * 0.5;
        let handle = ctx.physics.register(
            node,
            ColliderShape::Box { half_extents },
            props.invert,
            props.scene.as_deref(),
            &*ctx.scene,
        );
        Self { handle }
    }
}

impl Component for BoxCollider {
    fn on_destroy(&mut self, ctx: &mut ComponentContext<'_>) {
        ctx.physics.unregister(self.handle);
    }
}

impl ColliderComponent for BoxCollider {
    fn handle(&self) -> ColliderHandle {
        self.handle
    }
}

/// Props for [`SphereCollider`]
#[derive(Debug, Clone)]
pub struct SphereColliderProps {
    /// Multiplier applied to the length of the node's scale vector
    pub scale: f32,
    /// Physics scene; `None` uses the registry default
    pub scene: Option<String>,
    /// Polarity flag
    pub invert: bool,
}

impl SphereColliderProps {
    /// Props with the given radius factor, default scene, normal polarity
    #[must_use]
    pub const fn new(scale: f32) -> Self {
        Self {
            scale,
            scene: None,
            invert: false,
        }
    }
}

/// Sphere whose radius is `|node.scale| * props.scale`
#[derive(Debug)]
pub struct SphereCollider {
    handle: ColliderHandle,
}

impl ComponentInit for SphereCollider {
    type Props = SphereColliderProps;

    fn init(props: SphereColliderProps, ctx: &mut ComponentContext<'_>) -> Self {
        let node = ctx.node();
        let radius = ctx.scene.scale(node).magnitude() * props.scale;
        let handle = ctx.physics.register(
            node,
            ColliderShape::Sphere { radius },
            props.invert,
            props.scene.as_deref(),
            &*ctx.scene,
        );
        Self { handle }
    }
}

impl Component for SphereCollider {
    fn on_destroy(&mut self, ctx: &mut ComponentContext<'_>) {
        ctx.physics.unregister(self.handle);
    }
}

impl ColliderComponent for SphereCollider {
    fn handle(&self) -> ColliderHandle {
        self.handle
    }
}
