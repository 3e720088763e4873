//! Heightfield collider
//!
//! Answers elevation queries against a shared [`Heightfield`]. It never joins
//! a physics scene and never takes part in overlap queries.
//!
//! The grid spans `[-scale, scale]` around the node's local X/Z position.
//! World `(x, y)` maps to grid cell
//! `floor(((x - node.x) / scale + 1) / 2 * size)` on each axis, with the
//! second query coordinate measured along Z.

use super::PhysicsError;
use crate::assets::{HeightfieldError, SharedHeightfield};
use crate::ecs::{Component, ComponentContext, ComponentInit};
use crate::foundation::collections::NodeId;
use crate::scene::SceneGraphHost;

/// Props for [`HeightfieldCollider`]
#[derive(Debug, Clone)]
pub struct HeightfieldColliderProps {
    /// Elevation grid, usually loaded from a BHM asset
    pub heightmap: SharedHeightfield,
    /// World units per half grid width; also scales returned elevations
    pub scale: f32,
}

/// Elevation lookup over a heightfield centered on the owning node
#[derive(Debug)]
pub struct HeightfieldCollider {
    node: NodeId,
    heightmap: SharedHeightfield,
    scale: f32,
}

impl ComponentInit for HeightfieldCollider {
    type Props = HeightfieldColliderProps;

    fn init(props: HeightfieldColliderProps, ctx: &mut ComponentContext<'_>) -> Self {
        let size = props.heightmap.size();
        log::debug!(
            "Heightfield collider on {:?}: {size}x{size} grid, scale {}",
            ctx.node(),
            props.scale
        );
        Self {
            node: ctx.node(),
            heightmap: props.heightmap,
            scale: props.scale,
        }
    }
}

impl Component for HeightfieldCollider {}

impl HeightfieldCollider {
    /// Shared elevation grid
    #[must_use]
    pub const fn heightmap(&self) -> &SharedHeightfield {
        &self.heightmap
    }

    /// World-to-grid scale
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Grid cell under world position `(x, y)`
    ///
    /// The result may lie outside the grid; [`Self::height_at_pix`] rejects it.
    /// A scale that is not a positive finite number is an error.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn pos_to_pix(
        &self,
        host: &dyn SceneGraphHost,
        x: f32,
        y: f32,
    ) -> Result<(i64, i64), PhysicsError> {
        if self.scale <= 0.0 || !self.scale.is_finite() {
            return Err(PhysicsError::InvalidScale(self.scale));
        }
        let origin = host
            .local_transform(self.node)
            .ok_or(PhysicsError::NodeNotFound(self.node))?
            .position;
        let size = self.heightmap.size() as f32;
        let cx = (origin.x - x) / self.scale;
        let cy = (origin.z - y) / self.scale;
        let px = ((-cx + 1.0) / 2.0 * size).floor();
        let py = ((-cy + 1.0) / 2.0 * size).floor();
        Ok((px as i64, py as i64))
    }

    /// Elevation of grid cell `(px, py)` multiplied by the collider scale
    pub fn height_at_pix(&self, px: i64, py: i64) -> Result<f32, HeightfieldError> {
        Ok(self.heightmap.elevation(px, py)? * self.scale)
    }

    /// Elevation under world position `(x, y)`
    pub fn height_at_pos(
        &self,
        host: &dyn SceneGraphHost,
        x: f32,
        y: f32,
    ) -> Result<f32, PhysicsError> {
        let (px, py) = self.pos_to_pix(host, x, y)?;
        Ok(self.height_at_pix(px, py)?)
    }
}
