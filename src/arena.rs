//! Node storage for tries.
//!
//! Nodes are owned by a single `Vec` and address each other through 32-bit
//! [`NodeId`] handles. Parent back-references and child slots are plain
//! handles, so the graph has no reference cycles and the memoized terminal
//! lists are just handle ranges.

use std::ops::{Index, IndexMut};

use smallvec::SmallVec;

/// A 32-bit handle to a node in a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The root is always the first node allocated.
    pub const ROOT: NodeId = NodeId(0);

    /// Represents an empty child slot or the root's missing parent.
    pub(crate) const NULL: NodeId = NodeId(u32::MAX);

    #[inline]
    pub(crate) fn is_null(self) -> bool {
        self.0 == u32::MAX
    }

    /// # Panics
    /// Panics if the index is >= 2^32 - 1.
    #[inline]
    pub(crate) fn from_usize(index: usize) -> Self {
        assert!(index < u32::MAX as usize, "node arena is full");
        Self(index as u32)
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// A single trie node.
pub(crate) struct Node<V> {
    /// Distance from the root (root = 0).
    pub(crate) level: u32,
    /// Edge character leading to this node; meaningless at the root.
    pub(crate) label: char,
    /// Present exactly when the node terminates an inserted key.
    pub(crate) value: Option<V>,
    pub(crate) parent: NodeId,
    /// One slot per alphabet index, `NodeId::NULL` when empty.
    pub(crate) children: Box<[NodeId]>,
    /// Slot indices holding a child, in first-insertion order.
    pub(crate) occupied: SmallVec<[u8; 4]>,
    /// Memoized terminal descendants: a range into the trie's pre-order
    /// terminal list, filled once when the trie is sealed.
    pub(crate) terminals_start: u32,
    pub(crate) terminals_end: u32,
}

impl<V> Node<V> {
    fn new(fanout: usize, label: char, level: u32, parent: NodeId) -> Self {
        Self {
            level,
            label,
            value: None,
            parent,
            children: vec![NodeId::NULL; fanout].into_boxed_slice(),
            occupied: SmallVec::new(),
            terminals_start: 0,
            terminals_end: 0,
        }
    }

    #[inline]
    pub(crate) fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> Option<NodeId> {
        let id = self.children[index];
        (!id.is_null()).then_some(id)
    }

    /// Record that slot `index` now holds a child.
    ///
    /// Callers add each index at most once per node.
    #[inline]
    pub(crate) fn add_child_index(&mut self, index: usize) {
        debug_assert!(!self.occupied.contains(&(index as u8)));
        self.occupied.push(index as u8);
    }

    /// Children in first-insertion order.
    pub(crate) fn children_in_order(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.occupied
            .iter()
            .map(move |&index| self.children[index as usize])
    }
}

/// Append-only node storage. Index 0 is the root.
pub(crate) struct NodeArena<V> {
    nodes: Vec<Node<V>>,
    fanout: usize,
}

impl<V> NodeArena<V> {
    /// Create an arena holding only a root node with `fanout` child slots.
    pub(crate) fn new(fanout: usize) -> Self {
        debug_assert!(fanout > 0 && fanout <= 256);
        Self {
            nodes: vec![Node::new(fanout, '\0', 0, NodeId::NULL)],
            fanout,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Descend along `path` from the root, allocating missing children, and
    /// return the final node.
    ///
    /// Each step is an `(alphabet index, character)` pair.
    pub(crate) fn insert_path<I>(&mut self, path: I) -> NodeId
    where
        I: IntoIterator<Item = (usize, char)>,
    {
        let mut node = NodeId::ROOT;
        let mut level = 0u32;
        for (index, c) in path {
            level += 1;
            node = match self[node].child(index) {
                Some(child) => child,
                None => self.alloc_child(node, index, c, level),
            };
        }
        node
    }

    fn alloc_child(&mut self, parent: NodeId, index: usize, label: char, level: u32) -> NodeId {
        let parent_level = self[parent].level;
        assert_eq!(
            parent_level + 1,
            level,
            "child level must be parent level + 1 (parent level = {parent_level}, child level = {level})"
        );

        let child = NodeId::from_usize(self.nodes.len());
        self.nodes.push(Node::new(self.fanout, label, level, parent));

        let parent = &mut self[parent];
        parent.children[index] = child;
        parent.add_child_index(index);
        child
    }

    /// Compute every node's terminal-descendant range.
    ///
    /// Walks the tree in pre-order (a node before its children, children in
    /// first-insertion order), so each subtree's terminals are contiguous in
    /// the returned list. Must run exactly once, after the last insertion.
    pub(crate) fn index_terminals(&mut self) -> Vec<NodeId> {
        let mut order = Vec::new();
        // (node, children already pushed)
        let mut stack: Vec<(NodeId, bool)> = vec![(NodeId::ROOT, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                self[id].terminals_end = order.len() as u32;
                continue;
            }

            let node = &mut self[id];
            node.terminals_start = order.len() as u32;
            if node.is_terminal() {
                order.push(id);
            }

            stack.push((id, true));
            let node = &self[id];
            stack.extend(node.children_in_order().rev().map(|child| (child, false)));
        }

        order
    }

    /// Approximate heap bytes held by the arena.
    pub(crate) fn memory_usage(&self) -> usize {
        let spilled: usize = self
            .nodes
            .iter()
            .filter(|n| n.occupied.spilled())
            .map(|n| n.occupied.capacity())
            .sum();
        self.nodes.capacity() * std::mem::size_of::<Node<V>>()
            + self.nodes.len() * self.fanout * std::mem::size_of::<NodeId>()
            + spilled
    }
}

impl<V> Index<NodeId> for NodeArena<V> {
    type Output = Node<V>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<V> {
        &self.nodes[id.as_usize()]
    }
}

impl<V> IndexMut<NodeId> for NodeArena<V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<V> {
        &mut self.nodes[id.as_usize()]
    }
}
