//! # Depth-Addressed Tree
//!
//! An append-only arena where nodes are addressed by nesting depth rather
//! than by explicit parent pointers supplied by the caller.
//!
//! The tree keeps a *rightmost spine*: for every depth `d` the most recently
//! appended node at that depth that is still reachable from the current
//! rightmost root. Appending at depth `d`:
//!
//! - attaches the node as the last child of the spine node at `d - 1`
//!   (or as a new root when `d == 0`);
//! - replaces the spine entry at `d` and drops every deeper entry.
//!
//! Dropping deeper entries is what *retires* a subtree: its nodes stay in the
//! arena (and in the output) but can never receive another child, because
//! `last_at_depth` no longer reaches them.
//!
//! Both the block tree and the per-block inline trees use this structure.

/// Index of a node in a [`DepthTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in append order.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    data: T,
    depth: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Append-only tree addressed by depth level. Root level is `0`.
#[derive(Debug, Clone)]
pub struct DepthTree<T> {
    slots: Vec<Slot<T>>,
    roots: Vec<NodeId>,
    spine: Vec<NodeId>,
}

impl<T> DepthTree<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            roots: Vec::new(),
            spine: Vec::new(),
        }
    }

    /// The most recent node at `depth` that is still on the rightmost spine.
    pub fn last_at_depth(&self, depth: usize) -> Option<NodeId> {
        self.spine.get(depth).copied()
    }

    /// The innermost, most recently appended node.
    ///
    /// Because appending truncates the spine below the new node, the most
    /// recent node is always the deepest spine entry.
    pub fn last_leaf(&self) -> Option<NodeId> {
        self.spine.last().copied()
    }

    /// Number of levels on the rightmost spine.
    pub fn spine_depth(&self) -> usize {
        self.spine.len()
    }

    /// Appends `data` at `depth`, retiring any deeper subtree.
    ///
    /// # Panics
    /// Panics if `depth` skips a level (there is no spine node at
    /// `depth - 1`). That is a caller contract violation, not bad input.
    pub fn append(&mut self, data: T, depth: usize) -> NodeId {
        assert!(
            depth <= self.spine.len(),
            "cannot append at depth {depth}: spine only reaches depth {}",
            self.spine.len()
        );

        let id = NodeId(self.slots.len());
        let parent = depth.checked_sub(1).map(|d| self.spine[d]);
        self.slots.push(Slot {
            data,
            depth,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.slots[p.0].children.push(id),
            None => self.roots.push(id),
        }

        self.spine.truncate(depth);
        self.spine.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> &T {
        &self.slots[id.0].data
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.slots[id.0].data
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.slots[id.0].depth
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.slots[id.0].children
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All nodes in append order, which is document order (pre-order).
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (NodeId(i), &slot.data))
    }
}

impl<T> Default for DepthTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
