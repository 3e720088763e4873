//! Core engine implementation
//!
//! The engine owns every subsystem and drives one frame per call. The host
//! application supplies the scene graph and calls [`Engine::run_frame`] once
//! per animation frame, feeding raw input through [`Engine::handle_input`]
//! in between.

use crate::{
    assets::AssetError,
    config::ConfigError,
    core::EngineConfig,
    ecs::{Component, ComponentContext, ComponentError, ComponentInit, FrameOutcome, FramePhase, World},
    foundation::{
        collections::{ColliderHandle, NodeId, TypedHandle},
        math::Vec3,
        time::FrameClock,
    },
    input::{InputEvent, InputManager, MappingHandle},
    physics::{PhysicsError, PhysicsWorld},
    scene::SceneGraphHost,
};
use thiserror::Error;

/// Plain per-frame callback receiving the frame delta in seconds
pub type UpdateHandler = Box<dyn FnMut(f32)>;

/// Main engine struct
///
/// The engine coordinates all subsystems and runs them in the fixed
/// [`FramePhase::ORDER`] every frame.
pub struct Engine<H: SceneGraphHost> {
    host: H,
    world: World,
    physics: PhysicsWorld,
    input: InputManager,
    clock: FrameClock,
    update_handlers: Vec<UpdateHandler>,
    mappings: Vec<MappingHandle>,
}

impl<H: SceneGraphHost> Engine<H> {
    /// Create an engine with default configuration
    pub fn new(host: H) -> Self {
        Self::with_config(host, &EngineConfig::default())
    }

    /// Create an engine and apply `config`
    ///
    /// Mappings listed in the config are created in order; their handles are
    /// available from [`Engine::configured_mappings`].
    pub fn with_config(host: H, config: &EngineConfig) -> Self {
        log::info!("Initializing engine...");
        let mut input = InputManager::new();
        input.set_active_gamepad(config.input.active_gamepad);
        let mappings = config
            .input
            .mappings
            .iter()
            .cloned()
            .map(|def| input.create_mapping(def))
            .collect();

        Self {
            host,
            world: World::new(),
            physics: PhysicsWorld::with_default_scene(config.physics.default_scene.clone()),
            input,
            clock: FrameClock::new(),
            update_handlers: Vec::new(),
            mappings,
        }
    }

    /// Construct a `C` from `props` and attach it to `node`
    pub fn attach<C: ComponentInit>(
        &mut self,
        node: NodeId,
        props: C::Props,
    ) -> Result<TypedHandle<C>, EngineError> {
        let mut ctx = ComponentContext::new(&mut self.host, &mut self.physics, &self.input);
        Ok(self.world.attach::<C>(node, props, &mut ctx)?)
    }

    /// Destroy every component on `node`; returns how many were removed
    ///
    /// The node itself stays in the host.
    pub fn despawn(&mut self, node: NodeId) -> usize {
        let mut ctx = ComponentContext::new(&mut self.host, &mut self.physics, &self.input);
        self.world.despawn(node, &mut ctx)
    }

    /// Register a callback run after component ticks every frame
    pub fn add_update_handler(&mut self, handler: impl FnMut(f32) + 'static) {
        self.update_handlers.push(Box::new(handler));
    }

    /// Forward a raw input event to the input system
    pub fn handle_input(&mut self, event: InputEvent) {
        self.input.handle_event(event);
    }

    /// Run one frame using wall-clock time since the previous call
    ///
    /// The clock advances even when the frame is skipped, so time spent
    /// hidden never shows up as one huge delta.
    pub fn run_frame(&mut self) -> FrameOutcome {
        let delta = self.clock.tick();
        self.run_frame_with_delta(delta)
    }

    /// Run one frame with an explicit delta
    pub fn run_frame_with_delta(&mut self, delta: f32) -> FrameOutcome {
        if self.host.is_hidden() {
            log::trace!("Host hidden; skipping frame");
            return FrameOutcome::Skipped;
        }

        for phase in FramePhase::ORDER {
            match phase {
                FramePhase::Components => {
                    let mut ctx =
                        ComponentContext::new(&mut self.host, &mut self.physics, &self.input);
                    self.world.tick(&mut ctx, delta);
                }
                FramePhase::UpdateHandlers => {
                    for handler in &mut self.update_handlers {
                        handler(delta);
                    }
                }
                FramePhase::Input => self.input.end_frame(),
                FramePhase::Render => self.host.render(),
            }
        }
        FrameOutcome::Ran { delta }
    }

    /// Refresh a collider and return the first collider it collides with
    pub fn find_collision(
        &mut self,
        collider: ColliderHandle,
        offset: Option<Vec3>,
    ) -> Result<Option<ColliderHandle>, PhysicsError> {
        self.physics.find_collision(collider, &self.host, offset)
    }

    /// Re-sample a collider's world geometry from its node
    pub fn update_collider(&mut self, collider: ColliderHandle) -> Result<(), PhysicsError> {
        self.physics.update_collider(collider, &self.host)
    }

    /// Get a component by handle
    pub fn component<C: Component>(&self, handle: TypedHandle<C>) -> Result<&C, ComponentError> {
        self.world.get(handle)
    }

    /// Get mutable access to a component by handle
    pub fn component_mut<C: Component>(
        &mut self,
        handle: TypedHandle<C>,
    ) -> Result<&mut C, ComponentError> {
        self.world.get_mut(handle)
    }

    /// Handles of the mappings created from configuration, in order
    #[must_use]
    pub fn configured_mappings(&self) -> &[MappingHandle] {
        &self.mappings
    }

    /// Get the scene graph host
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Get mutable access to the scene graph host
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Get the component world
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Get the collider registry
    pub const fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Get the input manager
    pub const fn input(&self) -> &InputManager {
        &self.input
    }

    /// Get mutable access to the input manager
    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    /// Frame timing
    pub const fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Component attach or lookup failed
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    /// Collider query failed
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),

    /// Asset loading failed
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
