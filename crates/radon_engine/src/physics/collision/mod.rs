//! Collision geometry
//!
//! # Module Organization
//!
//! - [`primitives`] - World-space bounding volumes and overlap tests
//! - [`shape`] - Collider shapes stored in the registry
//!
//! Shapes are stored in local terms and placed in world space only when a
//! collider is refreshed, so the cached world geometry can lag the node.

pub mod primitives;
pub mod shape;

pub use primitives::{Aabb, BoundingSphere};
pub use shape::{ColliderShape, WorldShape};
