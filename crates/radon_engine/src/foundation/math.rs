//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of scalar helpers gameplay
//! components lean on (interpolation, clamping, angle wrapping).

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Radians to degrees conversion factor
pub const RAD2DEG: f32 = 180.0 / std::f32::consts::PI;

/// Degrees to radians conversion factor
pub const DEG2RAD: f32 = std::f32::consts::PI / 180.0;

/// Default forward direction (right-handed, looking down -Z)
pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Local transform of a scene node: position, rotation and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position relative to the parent node
    pub position: Vec3,

    /// Rotation relative to the parent node
    pub rotation: Quat,

    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a transform with only position
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder-style scale override
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert to a TRS matrix
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Compose `child` (expressed in this transform's space) onto this transform
    #[must_use]
    pub fn combine(&self, child: &Self) -> Self {
        Self {
            position: self.position + self.rotation * self.scale.component_mul(&child.position),
            rotation: self.rotation * child.rotation,
            scale: self.scale.component_mul(&child.scale),
        }
    }
}

/// Clamp a value between min and max
#[must_use]
pub fn clamp(x: f32, min: f32, max: f32) -> f32 {
    x.max(min).min(max)
}

/// Linear interpolation with `k` clamped to `[0, 1]`
#[must_use]
pub fn lerp(a: f32, b: f32, k: f32) -> f32 {
    a + (b - a) * clamp(k, 0.0, 1.0)
}

fn repeat(t: f32, length: f32) -> f32 {
    clamp(t - (t / length).floor() * length, 0.0, length)
}

/// Interpolate between two angles in degrees along the shortest arc
#[must_use]
pub fn lerp_angle(a: f32, b: f32, k: f32) -> f32 {
    let mut delta = repeat(b - a, 360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    a + delta * clamp(k, 0.0, 1.0)
}
