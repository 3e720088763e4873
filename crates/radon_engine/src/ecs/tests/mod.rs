//! Engine-level tests spanning components, physics and input

mod collider_queries;
mod lifecycle;

use std::cell::Cell;
use std::rc::Rc;

use crate::ecs::{Component, ComponentContext, ComponentInit};
use crate::foundation::collections::NodeId;
use crate::foundation::math::{Transform, Vec3};
use crate::scene::{SceneGraphHost, SimpleSceneGraph};
use crate::Engine;

/// Shared call counters observed from outside the engine
#[derive(Debug, Clone, Default)]
pub(super) struct Calls {
    pub attached: Rc<Cell<u32>>,
    pub ticks: Rc<Cell<u32>>,
    pub destroyed: Rc<Cell<u32>>,
    pub last_delta: Rc<Cell<f32>>,
}

/// Component that only records its lifecycle callbacks
pub(super) struct Probe {
    calls: Calls,
}

impl ComponentInit for Probe {
    type Props = Calls;

    fn init(calls: Calls, _ctx: &mut ComponentContext<'_>) -> Self {
        Self { calls }
    }
}

impl Component for Probe {
    fn on_scene_attached(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.calls.attached.set(self.calls.attached.get() + 1);
    }

    fn on_tick(&mut self, _ctx: &mut ComponentContext<'_>, delta: f32) {
        self.calls.ticks.set(self.calls.ticks.get() + 1);
        self.calls.last_delta.set(delta);
    }

    fn on_destroy(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.calls.destroyed.set(self.calls.destroyed.get() + 1);
    }
}

pub(super) fn engine() -> Engine<SimpleSceneGraph> {
    Engine::new(SimpleSceneGraph::new())
}

/// Spawn a child of the root at `position`
pub(super) fn spawn_at(engine: &mut Engine<SimpleSceneGraph>, position: Vec3) -> NodeId {
    let host = engine.host_mut();
    let root = host.root();
    host.spawn(root, "node", Transform::from_position(position))
}
