//! Read-only views of trie nodes.

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

use crate::arena::{Node, NodeId};
use crate::error::Result;
use crate::select::{best_n_of, best_of};
use crate::trie::{Trie, TrieKind};

/// A borrowed handle to one node of a sealed [`Trie`].
///
/// Cheap to copy; all navigation goes through the owning trie's arena.
pub struct NodeRef<'a, V> {
    trie: &'a Trie<V>,
    id: NodeId,
}

impl<'a, V> NodeRef<'a, V> {
    #[inline]
    pub(crate) fn new(trie: &'a Trie<V>, id: NodeId) -> Self {
        Self { trie, id }
    }

    #[inline]
    fn node(&self) -> &'a Node<V> {
        &self.trie.arena[self.id]
    }

    #[inline]
    fn wrap(&self, id: NodeId) -> NodeRef<'a, V> {
        NodeRef::new(self.trie, id)
    }

    /// Arena handle of this node.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Depth below the root (root = 0); equals the number of characters on
    /// the path from the root.
    #[inline]
    pub fn level(&self) -> usize {
        self.node().level as usize
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.node().level == 0
    }

    /// Whether an inserted key ends at this node.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.node().is_terminal()
    }

    /// Character on the edge from the parent, `None` at the root.
    #[inline]
    pub fn label(&self) -> Option<char> {
        (!self.is_root()).then(|| self.node().label)
    }

    /// Value stored at this node; present exactly when the node is terminal.
    #[inline]
    pub fn value(&self) -> Option<&'a V> {
        self.node().value.as_ref()
    }

    /// The key spelled by the path from the root to this node.
    ///
    /// For suffix tries the path spells the key backwards, so the labels
    /// collected while walking up are already in key order.
    pub fn key(&self) -> String {
        let mut labels: SmallVec<[char; 32]> = SmallVec::with_capacity(self.level());
        let mut node = self.node();
        while node.level > 0 {
            labels.push(node.label);
            node = &self.trie.arena[node.parent];
        }
        match self.trie.kind() {
            TrieKind::Prefix => labels.iter().rev().collect(),
            TrieKind::Suffix => labels.iter().collect(),
        }
    }

    pub fn parent(&self) -> Option<NodeRef<'a, V>> {
        let parent = self.node().parent;
        (!parent.is_null()).then(|| self.wrap(parent))
    }

    /// Parent, grandparent, ... up to and including the root, in descending
    /// level order.
    pub fn ancestors(&self) -> Ancestors<'a, V> {
        Ancestors {
            trie: self.trie,
            next: self.node().parent,
        }
    }

    /// Children in the order they were first created (not alphabetical).
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a, V>> + 'a {
        let node = self.node();
        let trie = self.trie;
        node.occupied
            .iter()
            .map(move |&index| NodeRef::new(trie, node.children[index as usize]))
    }

    #[inline]
    pub fn num_children(&self) -> usize {
        self.node().occupied.len()
    }

    /// The earliest-created child.
    pub fn first_child(&self) -> Option<NodeRef<'a, V>> {
        self.children().next()
    }

    /// Child along the edge labelled `c`.
    pub fn child(&self, c: char) -> Option<NodeRef<'a, V>> {
        let index = self.trie.charset().char_to_index(c)?;
        self.node().child(index).map(|id| self.wrap(id))
    }

    /// Every terminal node of this subtree, including this node.
    ///
    /// Pre-order: a node precedes its descendants and children are visited
    /// in creation order. The list is computed once, when the trie is sealed.
    pub fn terminal_descendants(&self) -> impl ExactSizeIterator<Item = NodeRef<'a, V>> + 'a {
        let trie = self.trie;
        self.terminal_ids()
            .iter()
            .map(move |&id| NodeRef::new(trie, id))
    }

    /// Terminal descendants for which `predicate` holds. Not cached.
    pub fn terminal_descendants_matching<P>(&self, mut predicate: P) -> Vec<NodeRef<'a, V>>
    where
        P: FnMut(&NodeRef<'a, V>) -> bool,
    {
        self.terminal_descendants()
            .filter(|node| predicate(node))
            .collect()
    }

    /// Number of terminal nodes in this subtree.
    #[inline]
    pub fn terminal_count(&self) -> usize {
        self.terminal_ids().len()
    }

    /// The greatest terminal descendant under `cmp`.
    pub fn best_terminal_by<F>(&self, cmp: F) -> Option<NodeRef<'a, V>>
    where
        F: FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering,
    {
        best_of(self.terminal_descendants(), cmp)
    }

    /// Up to `n` greatest terminal descendants under `cmp`, best first.
    ///
    /// Fails with [`TrieError::ZeroCount`](crate::TrieError::ZeroCount) when
    /// `n` is zero; an empty subtree yields an empty list.
    pub fn best_terminals_by<F>(&self, n: usize, cmp: F) -> Result<Vec<NodeRef<'a, V>>>
    where
        F: FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering,
    {
        best_n_of(self.terminal_descendants(), n, cmp)
    }

    #[inline]
    fn terminal_ids(&self) -> &'a [NodeId] {
        let node = self.node();
        &self.trie.terminals[node.terminals_start as usize..node.terminals_end as usize]
    }
}

impl<'a, V: Ord> NodeRef<'a, V> {
    /// The terminal descendant with the greatest value.
    pub fn best_terminal(&self) -> Option<NodeRef<'a, V>> {
        self.best_terminal_by(by_value)
    }

    /// Up to `n` terminal descendants with the greatest values.
    pub fn best_terminals(&self, n: usize) -> Result<Vec<NodeRef<'a, V>>> {
        self.best_terminals_by(n, by_value)
    }
}

/// Orders nodes by their values.
///
/// Nodes without a value compare equal to everything, so only terminal nodes
/// are meaningfully ranked.
pub fn by_value<V: Ord>(a: &NodeRef<'_, V>, b: &NodeRef<'_, V>) -> Ordering {
    match (a.value(), b.value()) {
        (Some(a), Some(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

impl<V> Clone for NodeRef<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NodeRef<'_, V> {}

impl<V> PartialEq for NodeRef<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.trie, other.trie) && self.id == other.id
    }
}

impl<V> Eq for NodeRef<'_, V> {}

impl<V: fmt::Debug> fmt::Debug for NodeRef<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.key())
            .field("level", &self.level())
            .field("value", &self.value())
            .field("children", &self.num_children())
            .finish()
    }
}

/// Iterator over a node's ancestors, see [`NodeRef::ancestors`].
pub struct Ancestors<'a, V> {
    trie: &'a Trie<V>,
    next: NodeId,
}

impl<'a, V> Iterator for Ancestors<'a, V> {
    type Item = NodeRef<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_null() {
            return None;
        }
        let id = self.next;
        self.next = self.trie.arena[id].parent;
        Some(NodeRef::new(self.trie, id))
    }
}
