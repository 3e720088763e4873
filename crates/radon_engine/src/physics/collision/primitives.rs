//! Primitive bounding volumes and their overlap tests
//!
//! All tests are inclusive: shapes that merely touch are reported as
//! intersecting.

use crate::foundation::math::Vec3;

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its corners
    #[must_use]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a box centered at `center` with the given half-extents
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Center point
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Copy moved by `offset`
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Closest point inside the box to `point`
    #[must_use]
    pub fn clamp_point(&self, point: Vec3) -> Vec3 {
        point.sup(&self.min).inf(&self.max)
    }

    /// Check if this box overlaps another box
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Check if this box overlaps a sphere
    #[must_use]
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        let closest = self.clamp_point(sphere.center);
        (closest - sphere.center).magnitude_squared() <= sphere.radius * sphere.radius
    }
}

/// A bounding sphere in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center position
    pub center: Vec3,
    /// Radius
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    #[must_use]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Copy moved by `offset`
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            center: self.center + offset,
            radius: self.radius,
        }
    }

    /// Check if this sphere intersects with another
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check if this sphere overlaps a box
    #[must_use]
    pub fn intersects_box(&self, aabb: &Aabb) -> bool {
        aabb.intersects_sphere(self)
    }
}
