//! Asset loading
//!
//! Raw bytes are fetched through an [`AssetHost`], the seam between the
//! engine and whatever storage the application uses. Decoders live in their
//! own submodules and only ever see byte slices.

pub mod bhm_loader;
pub mod heightfield;

pub use bhm_loader::{encode_bhm, load_bhm, parse_bhm, BhmError};
pub use heightfield::{Heightfield, HeightfieldError, SharedHeightfield};

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Source of raw asset bytes
pub trait AssetHost {
    /// Read the full contents of the asset at `path`
    fn read_bytes(&self, path: &str) -> Result<Vec<u8>, AssetError>;
}

/// Asset host backed by the local file system
///
/// Relative paths are tried against each search path in order, then as-is.
#[derive(Debug, Clone, Default)]
pub struct FileAssetHost {
    search_paths: Vec<PathBuf>,
}

impl FileAssetHost {
    /// Create a host with the given search paths
    pub fn new<P: Into<PathBuf>>(search_paths: impl IntoIterator<Item = P>) -> Self {
        Self {
            search_paths: search_paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Configured search paths
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        self.search_paths
            .iter()
            .map(|root| root.join(path))
            .chain(std::iter::once(PathBuf::from(path)))
            .find(|candidate| candidate.is_file())
    }
}

impl AssetHost for FileAssetHost {
    fn read_bytes(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        let file_path = self
            .resolve(path)
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;
        log::debug!("Reading asset {}", file_path.display());
        Ok(fs::read(&file_path)?)
    }
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Bytes were read but are not a valid heightmap
    #[error("Invalid heightmap '{path}': {source}")]
    Bhm {
        /// Requested asset path
        path: String,
        /// Parse failure
        #[source]
        source: BhmError,
    },
}
