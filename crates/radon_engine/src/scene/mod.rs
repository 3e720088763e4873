//! Scene graph abstraction
//!
//! The node hierarchy itself belongs to an external host. This module defines
//! the seam ([`SceneGraphHost`]) and a minimal in-memory host for headless use.

pub mod scene_graph;

pub use scene_graph::{SceneGraphHost, SimpleSceneGraph};
