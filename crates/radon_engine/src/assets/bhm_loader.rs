//! BHM heightmap format
//!
//! Layout (all multi-byte fields big-endian):
//!
//! | offset | size        | field                         |
//! |--------|-------------|-------------------------------|
//! | 0      | 3           | magic `B` `H` `M`             |
//! | 3      | 2           | grid edge length (`i16`)      |
//! | 5      | 4           | maximum elevation (`f32`)     |
//! | 9      | size * size | unsigned elevation samples    |
//!
//! Cell `(x, y)` is read from byte `9 + y * size + x`. Existing assets depend
//! on this addressing, so it is kept as-is.

use super::heightfield::Heightfield;
use super::{AssetError, AssetHost};
use thiserror::Error;

/// File signature
pub const BHM_MAGIC: &[u8; 3] = b"BHM";

/// Bytes before the first sample
pub const BHM_HEADER_LEN: usize = 9;

/// BHM parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BhmError {
    /// The data is not a BHM file at all
    #[error("BHM format signature not found")]
    SignatureNotFound,

    /// The data ends before the header or sample block does
    #[error("BHM data truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes required
        expected: usize,
        /// Bytes available
        actual: usize,
    },

    /// Negative grid edge length
    #[error("BHM grid size {0} is negative")]
    InvalidSize(i16),

    /// Grid edge length does not fit the 16-bit size field
    #[error("Heightfield size {0} cannot be stored in a BHM header")]
    TooLarge(usize),
}

/// Parse a BHM byte stream
pub fn parse_bhm(bytes: &[u8]) -> Result<Heightfield, BhmError> {
    let signature_len = bytes.len().min(BHM_MAGIC.len());
    if bytes[..signature_len] != BHM_MAGIC[..signature_len] {
        return Err(BhmError::SignatureNotFound);
    }
    if bytes.len() < BHM_HEADER_LEN {
        return Err(BhmError::Truncated {
            expected: BHM_HEADER_LEN,
            actual: bytes.len(),
        });
    }

    let raw_size = i16::from_be_bytes([bytes[3], bytes[4]]);
    let max_y = f32::from_be_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);
    let size = usize::try_from(raw_size).map_err(|_| BhmError::InvalidSize(raw_size))?;

    let expected = BHM_HEADER_LEN + size * size;
    if bytes.len() < expected {
        return Err(BhmError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }

    let samples = bytes[BHM_HEADER_LEN..expected].to_vec();
    Heightfield::from_samples(size, max_y, samples).map_err(|_| BhmError::Truncated {
        expected,
        actual: bytes.len(),
    })
}

/// Serialize a heightfield to BHM bytes
pub fn encode_bhm(field: &Heightfield) -> Result<Vec<u8>, BhmError> {
    let size = i16::try_from(field.size()).map_err(|_| BhmError::TooLarge(field.size()))?;
    let mut out = Vec::with_capacity(BHM_HEADER_LEN + field.samples().len());
    out.extend_from_slice(BHM_MAGIC);
    out.extend_from_slice(&size.to_be_bytes());
    out.extend_from_slice(&field.max_y().to_be_bytes());
    out.extend_from_slice(field.samples());
    Ok(out)
}

/// Fetch `path` through the asset host and parse it as BHM
pub fn load_bhm(host: &dyn AssetHost, path: &str) -> Result<Heightfield, AssetError> {
    let bytes = host.read_bytes(path)?;
    let field = parse_bhm(&bytes).map_err(|source| AssetError::Bhm {
        path: path.to_string(),
        source,
    })?;
    log::info!(
        "Loaded heightfield '{path}': {0}x{0}, max elevation {1}",
        field.size(),
        field.max_y()
    );
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bhm(size: i16, max_y: f32, samples: &[u8]) -> Vec<u8> {
        let mut bytes = BHM_MAGIC.to_vec();
        bytes.extend_from_slice(&size.to_be_bytes());
        bytes.extend_from_slice(&max_y.to_be_bytes());
        bytes.extend_from_slice(samples);
        bytes
    }

    #[test]
    fn parses_header_and_samples() {
        let field = parse_bhm(&bhm(2, 100.0, &[10, 20, 30, 40])).unwrap();
        assert_eq!(field.size(), 2);
        assert_relative_eq!(field.max_y(), 100.0);
        assert_relative_eq!(field.elevation(0, 0).unwrap(), 10.0 / 255.0 * 100.0);
    }

    #[test]
    fn cell_addressing_reads_y_major_offsets() {
        let field = parse_bhm(&bhm(2, 255.0, &[10, 20, 30, 40])).unwrap();
        // (x=1, y=0) -> offset 9 + (0 * 2 + 1)
        assert_relative_eq!(field.elevation(1, 0).unwrap(), 20.0);
        // (x=0, y=1) -> offset 9 + (1 * 2 + 0)
        assert_relative_eq!(field.elevation(0, 1).unwrap(), 30.0);
    }

    #[test]
    fn any_signature_byte_mismatch_is_a_format_error() {
        for i in 0..3 {
            let mut bytes = bhm(1, 1.0, &[0]);
            bytes[i] ^= 0xFF;
            assert_eq!(parse_bhm(&bytes), Err(BhmError::SignatureNotFound));
        }
        assert_eq!(parse_bhm(b"PNG\x00\x01"), Err(BhmError::SignatureNotFound));
    }

    #[test]
    fn short_input_is_truncated_not_wrong_format() {
        assert_eq!(
            parse_bhm(b"BH"),
            Err(BhmError::Truncated { expected: 9, actual: 2 })
        );
        let mut bytes = bhm(3, 1.0, &[0; 8]);
        assert_eq!(
            parse_bhm(&bytes),
            Err(BhmError::Truncated { expected: 18, actual: 17 })
        );
        bytes.push(0);
        assert!(parse_bhm(&bytes).is_ok());
    }

    #[test]
    fn negative_size_is_rejected() {
        assert_eq!(parse_bhm(&bhm(-2, 1.0, &[])), Err(BhmError::InvalidSize(-2)));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let field = parse_bhm(&bhm(1, 1.0, &[255, 9, 9])).unwrap();
        assert_eq!(field.samples(), &[255]);
    }

    #[test]
    fn encode_writes_the_documented_layout() {
        let field = Heightfield::from_samples(2, 100.0, vec![10, 20, 30, 40]).unwrap();
        assert_eq!(encode_bhm(&field).unwrap(), bhm(2, 100.0, &[10, 20, 30, 40]));
    }
}
