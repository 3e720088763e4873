//! Square elevation grid
//!
//! Samples are stored as raw bytes exactly as they appear in a BHM file. The
//! elevation of logical cell `(x, y)` is `byte[y * size + x] / 255 * max_y`.

use std::sync::Arc;

use crate::foundation::math::Vec3;
use thiserror::Error;

/// Heightfield construction and query errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeightfieldError {
    /// Query fell outside the grid
    #[error("Cell ({x}, {y}) is outside the {size}x{size} heightfield")]
    OutOfRange {
        /// Requested column
        x: i64,
        /// Requested row
        y: i64,
        /// Grid edge length
        size: usize,
    },

    /// Sample buffer does not hold `size * size` bytes
    #[error("Expected {expected} samples, got {actual}")]
    SampleCount {
        /// `size * size`
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
}

/// Immutable elevation grid shared by heightfield colliders
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    size: usize,
    max_y: f32,
    samples: Vec<u8>,
}

/// Shared, read-only heightfield
pub type SharedHeightfield = Arc<Heightfield>;

impl Heightfield {
    /// Build a heightfield from raw samples in BHM byte order
    pub fn from_samples(size: usize, max_y: f32, samples: Vec<u8>) -> Result<Self, HeightfieldError> {
        let expected = size * size;
        if samples.len() != expected {
            return Err(HeightfieldError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self { size, max_y, samples })
    }

    /// Rasterize model-space points spanning `[-1, 1]` on X and Z into a grid
    ///
    /// `max_y` becomes the highest point's Y. Every point above zero writes its
    /// quantized height into the cell it falls in; later points overwrite
    /// earlier ones. Points outside the unit square are clamped to the border.
    #[must_use]
    pub fn rasterize(points: &[Vec3], size: usize) -> Self {
        let max_y = points.iter().map(|p| p.y).fold(0.0_f32, f32::max);
        let mut samples = vec![0_u8; size * size];
        if size == 0 || max_y <= 0.0 {
            return Self { size, max_y, samples };
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let to_cell = |v: f32| (((v + 1.0) / 2.0 * size as f32) as usize).min(size - 1);

        for point in points.iter().filter(|p| p.y > 0.0) {
            let px = to_cell(point.x);
            let py = to_cell(point.z);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = (point.y / max_y * 255.0) as u8;
            samples[py * size + px] = value;
        }
        Self { size, max_y, samples }
    }

    /// Grid edge length
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Elevation represented by a sample byte of 255
    #[must_use]
    pub const fn max_y(&self) -> f32 {
        self.max_y
    }

    /// Raw sample bytes in file order
    #[must_use]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Elevation of cell `(x, y)`, in `[0, max_y]`
    pub fn elevation(&self, x: i64, y: i64) -> Result<f32, HeightfieldError> {
        let out_of_range = HeightfieldError::OutOfRange { x, y, size: self.size };
        let (Ok(ux), Ok(uy)) = (usize::try_from(x), usize::try_from(y)) else {
            return Err(out_of_range);
        };
        if ux >= self.size || uy >= self.size {
            return Err(out_of_range);
        }
        let raw = self.samples[uy * self.size + ux];
        Ok(f32::from(raw) / 255.0 * self.max_y)
    }
}
