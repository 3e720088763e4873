//! Collider shapes
//!
//! A [`ColliderShape`] is the local description fixed at registration; a
//! [`WorldShape`] is the cached world-space geometry, refreshed on demand from
//! the owning node's world position.

use super::primitives::{Aabb, BoundingSphere};
use crate::foundation::math::Vec3;

/// Local collider geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Axis-aligned box with the given half-extents
    Box {
        /// Half size along each axis
        half_extents: Vec3,
    },
    /// Sphere with the given radius
    Sphere {
        /// Radius
        radius: f32,
    },
}

impl ColliderShape {
    /// Place this shape at a world position
    #[must_use]
    pub fn to_world(&self, position: Vec3) -> WorldShape {
        match *self {
            Self::Box { half_extents } => {
                WorldShape::Box(Aabb::from_center_half_extents(position, half_extents))
            }
            Self::Sphere { radius } => WorldShape::Sphere(BoundingSphere::new(position, radius)),
        }
    }
}

/// World-space collider geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldShape {
    /// World-space box
    Box(Aabb),
    /// World-space sphere
    Sphere(BoundingSphere),
}

impl WorldShape {
    /// Center position
    #[must_use]
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Box(aabb) => aabb.center(),
            Self::Sphere(sphere) => sphere.center,
        }
    }

    /// Copy moved by `offset`
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        match self {
            Self::Box(aabb) => Self::Box(aabb.translated(offset)),
            Self::Sphere(sphere) => Self::Sphere(sphere.translated(offset)),
        }
    }

    /// Raw geometric overlap test, ignoring polarity
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Box(a), Self::Box(b)) => a.intersects(b),
            (Self::Box(aabb), Self::Sphere(sphere)) | (Self::Sphere(sphere), Self::Box(aabb)) => {
                aabb.intersects_sphere(sphere)
            }
            (Self::Sphere(a), Self::Sphere(b)) => a.intersects(b),
        }
    }
}
