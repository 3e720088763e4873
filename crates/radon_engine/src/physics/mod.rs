//! Collider registry and overlap queries
//!
//! Colliders are grouped into named physics scenes held by an explicit
//! [`PhysicsWorld`]. Queries scan one scene linearly and stop at the first
//! match; there is no broad phase and no collision response.
//!
//! Reported overlap composes the raw geometric test with both colliders'
//! polarity flags by exclusive-or. One inverted participant flips the result
//! and two inverted participants flip it back.

pub mod collider;
pub mod collision;
pub mod heightfield;
pub mod physics_world;

pub use collider::{
    BoxCollider, BoxColliderProps, ColliderComponent, SphereCollider, SphereColliderProps,
};
pub use collision::{Aabb, BoundingSphere, ColliderShape, WorldShape};
pub use heightfield::{HeightfieldCollider, HeightfieldColliderProps};
pub use physics_world::{Collider, PhysicsWorld, DEFAULT_SCENE};

use crate::assets::HeightfieldError;
use crate::foundation::collections::{ColliderHandle, NodeId};
use thiserror::Error;

/// Physics query errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Handle refers to a collider that was unregistered
    #[error("Collider {0:?} is no longer registered")]
    StaleCollider(ColliderHandle),

    /// The collider's node no longer exists in the scene graph
    #[error("Scene node {0:?} not found")]
    NodeNotFound(NodeId),

    /// Heightfield world-to-grid scale is zero, negative or not finite
    #[error("Invalid heightfield scale {0}")]
    InvalidScale(f32),

    /// Heightfield lookup failed
    #[error(transparent)]
    Heightfield(#[from] HeightfieldError),
}
