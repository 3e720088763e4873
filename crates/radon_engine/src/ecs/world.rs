//! Component world: the arena of attached components
//!
//! Components live in a generational slotmap. Each node that has ever received
//! a component gets a record holding the ordered component
//! list and a per-type lookup (last attachment of a type wins). The record is
//! created on first attachment and only dropped by [`World::despawn`].

use std::any::TypeId;
use std::collections::HashMap;

use super::component::{Component, ComponentContext, ComponentInit};
use super::ComponentError;
use crate::foundation::collections::{ComponentKey, NodeId, SlotMap, TypedHandle};

struct ComponentSlot {
    node: NodeId,
    type_name: &'static str,
    scene_attached: bool,
    behavior: Box<dyn Component>,
}

impl ComponentSlot {
    fn downcast_ref<C: Component>(&self) -> Option<&C> {
        let behavior: &dyn Component = &*self.behavior;
        behavior.as_any().downcast_ref::<C>()
    }

    fn downcast_mut<C: Component>(&mut self) -> Option<&mut C> {
        let behavior: &mut dyn Component = &mut *self.behavior;
        behavior.as_any_mut().downcast_mut::<C>()
    }
}

#[derive(Default)]
struct NodeComponents {
    list: Vec<ComponentKey>,
    lookup: HashMap<TypeId, ComponentKey>,
}

/// Arena of every attached component, grouped per node
#[derive(Default)]
pub struct World {
    components: SlotMap<ComponentKey, ComponentSlot>,
    nodes: HashMap<NodeId, NodeComponents>,
}

impl World {
    /// Create an empty world
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a `C` from `props` and attach it to `node`
    ///
    /// `C::init` runs before this returns. Peers attached earlier are already
    /// visible; peers attached later are not.
    pub fn attach<C: ComponentInit>(
        &mut self,
        node: NodeId,
        props: C::Props,
        ctx: &mut ComponentContext<'_>,
    ) -> Result<TypedHandle<C>, ComponentError> {
        if !ctx.scene.contains(node) {
            return Err(ComponentError::NodeNotFound(node));
        }

        ctx.set_node(node);
        let component = C::init(props, ctx);
        let type_name = std::any::type_name::<C>();

        let key = self.components.insert(ComponentSlot {
            node,
            type_name,
            scene_attached: false,
            behavior: Box::new(component),
        });
        let entry = self.nodes.entry(node).or_default();
        entry.list.push(key);
        entry.lookup.insert(TypeId::of::<C>(), key);

        log::debug!("Attached {type_name} to {node:?}");
        Ok(TypedHandle::new(key))
    }

    /// Borrow a component through its typed handle
    pub fn get<C: Component>(&self, handle: TypedHandle<C>) -> Result<&C, ComponentError> {
        self.components
            .get(handle.key())
            .and_then(ComponentSlot::downcast_ref)
            .ok_or(ComponentError::StaleHandle(handle.key()))
    }

    /// Mutably borrow a component through its typed handle
    pub fn get_mut<C: Component>(&mut self, handle: TypedHandle<C>) -> Result<&mut C, ComponentError> {
        self.components
            .get_mut(handle.key())
            .and_then(ComponentSlot::downcast_mut)
            .ok_or(ComponentError::StaleHandle(handle.key()))
    }

    /// Handle of the most recently attached `C` on `node`
    #[must_use]
    pub fn find<C: Component>(&self, node: NodeId) -> Option<TypedHandle<C>> {
        self.nodes
            .get(&node)?
            .lookup
            .get(&TypeId::of::<C>())
            .map(|&key| TypedHandle::new(key))
    }

    /// Borrow the most recently attached `C` on `node`
    #[must_use]
    pub fn find_component<C: Component>(&self, node: NodeId) -> Option<&C> {
        self.find::<C>(node).and_then(|h| self.get(h).ok())
    }

    /// All component keys on `node`, in attachment order
    #[must_use]
    pub fn components_of(&self, node: NodeId) -> &[ComponentKey] {
        self.nodes
            .get(&node)
            .map(|entry| entry.list.as_slice())
            .unwrap_or_default()
    }

    /// Owning node of a component
    #[must_use]
    pub fn node_of(&self, key: ComponentKey) -> Option<NodeId> {
        self.components.get(key).map(|slot| slot.node)
    }

    /// Whether `on_scene_attached` has already fired for this component
    #[must_use]
    pub fn is_scene_attached(&self, key: ComponentKey) -> bool {
        self.components.get(key).is_some_and(|slot| slot.scene_attached)
    }

    /// Whether `key` still refers to a live component
    #[must_use]
    pub fn contains(&self, key: ComponentKey) -> bool {
        self.components.contains_key(key)
    }

    /// Number of live components
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when no components are attached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Tick every component reachable from the host's active root
    ///
    /// Nodes are visited depth-first, parents before children. Components that
    /// have never been seen live get `on_scene_attached` first.
    pub fn tick(&mut self, ctx: &mut ComponentContext<'_>, delta: f32) {
        let mut reachable = Vec::new();
        let root = ctx.scene.root();
        ctx.scene.traverse(root, &mut |node| reachable.push(node));

        for node in reachable {
            self.tick_node(node, ctx, delta);
        }
    }

    fn tick_node(&mut self, node: NodeId, ctx: &mut ComponentContext<'_>, delta: f32) {
        let Some(entry) = self.nodes.get(&node) else {
            return;
        };
        ctx.set_node(node);
        for &key in &entry.list {
            let Some(slot) = self.components.get_mut(key) else {
                continue;
            };
            if !slot.scene_attached {
                slot.scene_attached = true;
                log::trace!("{} on {node:?} attached to live scene", slot.type_name);
                slot.behavior.on_scene_attached(ctx);
            }
            slot.behavior.on_tick(ctx, delta);
        }
    }

    /// Destroy every component on `node`
    ///
    /// `on_destroy` runs in attachment order, then all handles to the node's
    /// components become stale. Returns the number of components removed.
    pub fn despawn(&mut self, node: NodeId, ctx: &mut ComponentContext<'_>) -> usize {
        let Some(entry) = self.nodes.remove(&node) else {
            return 0;
        };
        ctx.set_node(node);
        let mut removed = 0;
        for key in entry.list {
            if let Some(mut slot) = self.components.remove(key) {
                slot.behavior.on_destroy(ctx);
                removed += 1;
            }
        }
        log::debug!("Despawned {removed} component(s) from {node:?}");
        removed
    }
}
