//! Generational handle types
//!
//! All long-lived engine objects (scene nodes, attached components, registered
//! colliders) live in `slotmap` arenas. A key whose slot has been freed never
//! resolves again, even if the slot is reused.

use std::fmt;
use std::marker::PhantomData;

pub use slotmap::{Key, SlotMap};

slotmap::new_key_type! {
    /// Stable identity of a scene graph node
    pub struct NodeId;

    /// Untyped key of an attached component
    pub struct ComponentKey;

    /// Key of a collider registered in a physics world
    pub struct ColliderHandle;
}

/// Typed handle to an attached component of concrete type `T`
pub struct TypedHandle<T> {
    key: ComponentKey,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> TypedHandle<T> {
    /// Wrap an untyped component key
    #[must_use]
    pub const fn new(key: ComponentKey) -> Self {
        Self {
            key,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying key
    #[must_use]
    pub const fn key(&self) -> ComponentKey {
        self.key
    }
}

// Manual impls: deriving would put bounds on `T`.
impl<T> Clone for TypedHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedHandle<T> {}

impl<T> PartialEq for TypedHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for TypedHandle<T> {}

impl<T> std::hash::Hash for TypedHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<T> fmt::Debug for TypedHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedHandle").field(&self.key).finish()
    }
}
