//! Scene graph host trait and an in-memory implementation
//!
//! The engine does not own rendering or node transforms. Everything it needs
//! from the outside world goes through [`SceneGraphHost`]: transforms, world
//! positions, reachability, the "hidden" signal and the per-frame render call.

use crate::foundation::collections::{NodeId, SlotMap};
use crate::foundation::math::{Transform, Vec3};

/// Collaborator that owns the node hierarchy and renders it
///
/// Implementations are expected to be cheap to query; the engine calls these
/// methods many times per frame.
pub trait SceneGraphHost {
    /// Root of the active scene; traversal starts here
    fn root(&self) -> NodeId;

    /// Direct children of `node`, in structural order
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Whether `node` is still known to the host
    fn contains(&self, node: NodeId) -> bool;

    /// Local transform of `node`
    fn local_transform(&self, node: NodeId) -> Option<&Transform>;

    /// Mutable local transform of `node`
    fn local_transform_mut(&mut self, node: NodeId) -> Option<&mut Transform>;

    /// World-space position of `node`
    fn world_position(&self, node: NodeId) -> Option<Vec3>;

    /// Local scale vector of `node` (identity when unknown)
    fn scale(&self, node: NodeId) -> Vec3 {
        self.local_transform(node)
            .map_or_else(|| Vec3::new(1.0, 1.0, 1.0), |t| t.scale)
    }

    /// True while the host process is backgrounded and frames should be skipped
    fn is_hidden(&self) -> bool {
        false
    }

    /// Render the active scene once
    fn render(&mut self);

    /// Depth-first, parent-before-children walk of everything reachable from `root`
    fn traverse(&self, root: NodeId, visit: &mut dyn FnMut(NodeId)) {
        if !self.contains(root) {
            return;
        }
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            visit(node);
            // Reverse so the first child is popped first
            stack.extend(self.children(node).into_iter().rev());
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    transform: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Slotmap-backed node tree implementing [`SceneGraphHost`]
///
/// Used headless (tests, tools, the sandbox app). Rendering only counts calls.
#[derive(Debug)]
pub struct SimpleSceneGraph {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    hidden: bool,
    render_count: u64,
}

impl SimpleSceneGraph {
    /// Create a graph containing a single root node
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            name: "root".to_string(),
            transform: Transform::default(),
            parent: None,
            children: Vec::new(),
        });
        Self {
            nodes,
            root,
            hidden: false,
            render_count: 0,
        }
    }

    /// Create a detached node; it is not reachable until parented
    pub fn create_node(&mut self, name: impl Into<String>, transform: Transform) -> NodeId {
        self.nodes.insert(Node {
            name: name.into(),
            transform,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Create a node and append it under `parent`
    pub fn spawn(&mut self, parent: NodeId, name: impl Into<String>, transform: Transform) -> NodeId {
        let node = self.create_node(name, transform);
        self.add_child(parent, node);
        node
    }

    /// Re-parent `child` under `parent` (appended last)
    ///
    /// Returns `false` if either node is unknown or the move would create a cycle.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return false;
        }
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                log::warn!("Refusing to parent {child:?} under its own descendant");
                return false;
            }
            cursor = self.nodes[node].parent;
        }

        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        true
    }

    /// Unlink `node` from its parent; it stays alive but becomes unreachable
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        self.nodes[node].parent = None;
    }

    /// Make `node` the active root traversed each frame
    ///
    /// Returns `false` and keeps the current root if `node` is unknown.
    pub fn set_root(&mut self, node: NodeId) -> bool {
        if !self.nodes.contains_key(node) {
            return false;
        }
        log::debug!("Active root switched to {node:?}");
        self.root = node;
        true
    }

    /// Remove `node` and its whole subtree; returns the removed ids, parents first
    ///
    /// A subtree holding the active root is left in place.
    pub fn remove_node(&mut self, node: NodeId) -> Vec<NodeId> {
        let mut removed = Vec::new();
        self.traverse(node, &mut |n| removed.push(n));
        if removed.contains(&self.root) {
            log::warn!("The active scene root cannot be removed");
            return Vec::new();
        }
        self.detach(node);
        for id in &removed {
            self.nodes.remove(*id);
        }
        removed
    }

    /// Node name, if the node exists
    #[must_use]
    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.name.as_str())
    }

    /// Parent of `node`
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    /// Mark the host as backgrounded (frames are skipped while hidden)
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Number of completed render calls
    #[must_use]
    pub const fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Total number of nodes, reachable or not
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn world_transform(&self, node: NodeId) -> Option<Transform> {
        let mut chain = Vec::new();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            let n = self.nodes.get(id)?;
            chain.push(&n.transform);
            cursor = n.parent;
        }
        Some(
            chain
                .into_iter()
                .rev()
                .fold(Transform::default(), |acc, local| acc.combine(local)),
        )
    }
}

impl Default for SimpleSceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraphHost for SimpleSceneGraph {
    fn root(&self) -> NodeId {
        self.root
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    fn local_transform(&self, node: NodeId) -> Option<&Transform> {
        self.nodes.get(node).map(|n| &n.transform)
    }

    fn local_transform_mut(&mut self, node: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(node).map(|n| &mut n.transform)
    }

    fn world_position(&self, node: NodeId) -> Option<Vec3> {
        self.world_transform(node).map(|t| t.position)
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn render(&mut self) {
        self.render_count += 1;
    }
}
