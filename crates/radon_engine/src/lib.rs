//! # Radon Engine
//!
//! A small game-runtime core: behavior components on scene-graph nodes, a
//! collider registry with polarity-aware overlap queries, BHM heightfields and
//! an input system that fuses keyboard and gamepad state into virtual axes.
//!
//! Rendering and the scene graph itself belong to the host application,
//! which plugs in through [`scene::SceneGraphHost`].
//!
//! ## Features
//!
//! - **Components**: Typed attach/lookup with a once-only scene-attached hook
//! - **Physics Scenes**: Named collider buckets with first-hit queries
//! - **Heightfields**: BHM parsing and elevation lookup
//! - **Input Mapping**: Virtual axes recomputed on every event and every frame
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use radon_engine::prelude::*;
//!
//! let mut graph = SimpleSceneGraph::new();
//! let root = graph.root();
//! let player = graph.spawn(root, "player", Transform::default());
//!
//! let mut engine = Engine::new(graph);
//! engine.attach::<BoxCollider>(player, BoxColliderProps::default())?;
//! engine.handle_input(InputEvent::KeyDown("d".into()));
//! engine.run_frame();
//! # Ok::<(), EngineError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod scene;
pub mod ecs;
pub mod assets;
pub mod physics;
pub mod input;

mod engine;

pub use engine::{Engine, EngineError, UpdateHandler};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineError,
        assets::{load_bhm, AssetHost, FileAssetHost, Heightfield, SharedHeightfield},
        core::{Config, EngineConfig},
        ecs::{
            components::{Animator, AnimatorProps, FollowCamera, FollowCameraProps},
            Component, ComponentContext, ComponentInit, FrameOutcome, World,
        },
        foundation::{
            collections::{ColliderHandle, NodeId, TypedHandle},
            math::{Quat, Transform, Vec3},
        },
        input::{AxisDef, InputEvent, InputManager, InputMappingDef, MappingHandle},
        physics::{
            BoxCollider, BoxColliderProps, ColliderComponent, HeightfieldCollider,
            HeightfieldColliderProps, PhysicsWorld, SphereCollider, SphereColliderProps,
        },
        scene::{SceneGraphHost, SimpleSceneGraph},
    };
}
