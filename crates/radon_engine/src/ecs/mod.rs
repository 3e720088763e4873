//! Component attachment and lifecycle
//!
//! Scene nodes belong to the host; behavior belongs here. Components are
//! stored in a generational arena keyed per node and driven once per frame.

pub mod component;
pub mod components;
pub mod scheduler;
pub mod world;

#[cfg(test)]
mod tests;

pub use component::{AsAny, Component, ComponentContext, ComponentInit};
pub use scheduler::{FrameOutcome, FramePhase};
pub use world::World;

use crate::foundation::collections::{ComponentKey, NodeId};
use thiserror::Error;

/// Component attachment and lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// The handle's component was despawned, or it names a different type
    #[error("Component handle {0:?} no longer refers to a live component")]
    StaleHandle(ComponentKey),

    /// Attach target is unknown to the scene graph host
    #[error("Node {0:?} is not known to the scene graph host")]
    NodeNotFound(NodeId),
}
