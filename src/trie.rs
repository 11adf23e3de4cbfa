//! Prefix and suffix tries: insertion, traversal and ranked retrieval.
//!
//! A [`Trie`] is filled by a [`TrieBuilder`](crate::TrieBuilder) and sealed
//! when the builder hands it out. Sealing computes every node's list of
//! terminal descendants once; from then on the trie is read-only and can be
//! shared between threads without synchronization.

use std::cmp::Ordering;

use tracing::debug;

use crate::arena::{NodeArena, NodeId};
use crate::charset::CharacterSet;
use crate::entry::{by_entry, entries, Entry};
use crate::error::{Result, TrieError};
use crate::node::{by_value, NodeRef};

// =============================================================================
// Configuration
// =============================================================================

/// Direction in which key characters are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrieKind {
    /// Root-to-node paths spell key prefixes; fragments match key starts.
    #[default]
    Prefix,
    /// Root-to-node paths spell key suffixes backwards; fragments match key
    /// ends.
    Suffix,
}

/// Configuration for a new trie.
#[derive(Debug, Clone, Default)]
pub struct TrieConfig {
    pub kind: TrieKind,
    /// Alphabet accepted by the trie; keys using any other character are
    /// rejected.
    pub charset: CharacterSet,
}

impl TrieConfig {
    pub fn new(kind: TrieKind) -> Self {
        Self {
            kind,
            charset: CharacterSet::default(),
        }
    }

    pub fn with_charset(mut self, charset: CharacterSet) -> Self {
        self.charset = charset;
        self
    }
}

// =============================================================================
// Trie
// =============================================================================

/// A character trie mapping keys to values, queried by prefix or suffix.
pub struct Trie<V> {
    kind: TrieKind,
    charset: CharacterSet,
    pub(crate) arena: NodeArena<V>,
    /// Terminal nodes in pre-order; each node's memoized terminal
    /// descendants are a contiguous range of this list.
    pub(crate) terminals: Vec<NodeId>,
    /// Number of distinct keys.
    size: usize,
}

impl<V> Trie<V> {
    pub(crate) fn new(config: TrieConfig) -> Self {
        Self {
            kind: config.kind,
            arena: NodeArena::new(config.charset.len()),
            charset: config.charset,
            terminals: Vec::new(),
            size: 0,
        }
    }

    #[inline]
    pub fn kind(&self) -> TrieKind {
        self.kind
    }

    #[inline]
    pub fn charset(&self) -> &CharacterSet {
        &self.charset
    }

    /// Number of distinct keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of nodes, including the root.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Approximate heap bytes used by nodes and the terminal index.
    pub fn memory_usage(&self) -> usize {
        self.arena.memory_usage() + self.terminals.capacity() * std::mem::size_of::<NodeId>()
    }

    #[inline]
    pub fn root(&self) -> NodeRef<'_, V> {
        NodeRef::new(self, NodeId::ROOT)
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Insert or overwrite `key`.
    ///
    /// Every character is resolved before the tree is touched: a key with an
    /// unsupported character returns `false` and leaves the trie unchanged.
    /// Only reachable while the owning builder is open.
    pub(crate) fn put(&mut self, key: &str, value: V) -> bool {
        let Some(path) = self.charset.resolve(key) else {
            return false;
        };
        let node = match self.kind {
            TrieKind::Prefix => self.arena.insert_path(path),
            TrieKind::Suffix => self.arena.insert_path(path.into_iter().rev()),
        };

        let slot = &mut self.arena[node].value;
        if slot.is_none() {
            self.size += 1;
        }
        *slot = Some(value);
        true
    }

    /// Freeze the trie and memoize every node's terminal descendants.
    ///
    /// Called once, by the builder that hands the trie out.
    pub(crate) fn seal(&mut self) {
        self.terminals = self.arena.index_terminals();
        debug_assert_eq!(self.terminals.len(), self.size);
        debug!(
            kind = ?self.kind,
            keys = self.size,
            nodes = self.arena.len(),
            "sealed trie"
        );
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Follow existing edges for `chars`, stopping at the first character
    /// that is unsupported or has no child.
    fn descend(&self, chars: impl Iterator<Item = char>) -> NodeId {
        let mut node = NodeId::ROOT;
        for c in chars {
            let next = self
                .charset
                .char_to_index(c)
                .and_then(|index| self.arena[node].child(index));
            match next {
                Some(child) => node = child,
                None => break,
            }
        }
        node
    }

    /// The deepest node matching up to `max_length` characters of `word`.
    ///
    /// Prefix tries consume `word` from its first character, suffix tries
    /// from its last. The returned node's level is the number of characters
    /// matched, which can be less than `max_length`. Lengths count
    /// characters, not bytes, and must lie in `0..=word.chars().count()`.
    pub fn longest_common_part(&self, word: &str, max_length: usize) -> Result<NodeRef<'_, V>> {
        let max = word.chars().count();
        if max_length > max {
            return Err(TrieError::LengthOutOfRange {
                length: max_length,
                max,
            });
        }
        let id = match self.kind {
            TrieKind::Prefix => self.descend(word.chars().take(max_length)),
            TrieKind::Suffix => self.descend(word.chars().rev().take(max_length)),
        };
        Ok(NodeRef::new(self, id))
    }

    /// The node spelling exactly `length` characters of `word`, if present.
    ///
    /// The node need not be terminal.
    pub fn node_len(&self, word: &str, length: usize) -> Result<Option<NodeRef<'_, V>>> {
        let node = self.longest_common_part(word, length)?;
        Ok((node.level() == length).then_some(node))
    }

    /// The node spelling all of `word`, if present.
    pub fn node(&self, word: &str) -> Option<NodeRef<'_, V>> {
        let node = self.longest_common_part_unchecked(word);
        (node.level() == word.chars().count()).then_some(node)
    }

    fn longest_common_part_unchecked(&self, word: &str) -> NodeRef<'_, V> {
        let id = match self.kind {
            TrieKind::Prefix => self.descend(word.chars()),
            TrieKind::Suffix => self.descend(word.chars().rev()),
        };
        NodeRef::new(self, id)
    }

    /// Value stored for exactly `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.node(key).and_then(|node| node.value())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All entries, in pre-order.
    pub fn entries(&self) -> Vec<Entry<'_, V>> {
        entries(self.root().terminal_descendants())
    }

    /// Entries whose keys start (prefix trie) or end (suffix trie) with
    /// `fragment`.
    pub fn with(&self, fragment: &str) -> Vec<Entry<'_, V>> {
        entries(self.nodes_with(fragment))
    }

    /// Entries matching the first (prefix trie) or last (suffix trie)
    /// `length` characters of `fragment`.
    pub fn with_len(&self, fragment: &str, length: usize) -> Result<Vec<Entry<'_, V>>> {
        Ok(entries(self.nodes_with_len(fragment, length)?))
    }

    /// Terminal nodes whose keys start or end with `fragment`.
    pub fn nodes_with(&self, fragment: &str) -> Vec<NodeRef<'_, V>> {
        self.node(fragment)
            .map(|node| node.terminal_descendants().collect())
            .unwrap_or_default()
    }

    pub fn nodes_with_len(&self, fragment: &str, length: usize) -> Result<Vec<NodeRef<'_, V>>> {
        Ok(self
            .node_len(fragment, length)?
            .map(|node| node.terminal_descendants().collect())
            .unwrap_or_default())
    }

    /// Terminal nodes whose keys start or end with `fragment` and for which
    /// `predicate` holds.
    pub fn nodes_with_matching<'a, P>(&'a self, fragment: &str, predicate: P) -> Vec<NodeRef<'a, V>>
    where
        P: FnMut(&NodeRef<'a, V>) -> bool,
    {
        self.node(fragment)
            .map(|node| node.terminal_descendants_matching(predicate))
            .unwrap_or_default()
    }

    /// Terminal nodes matching `length` characters of `fragment` for which
    /// `predicate` holds.
    pub fn nodes_with_len_matching<'a, P>(
        &'a self,
        fragment: &str,
        length: usize,
        predicate: P,
    ) -> Result<Vec<NodeRef<'a, V>>>
    where
        P: FnMut(&NodeRef<'a, V>) -> bool,
    {
        Ok(self
            .node_len(fragment, length)?
            .map(|node| node.terminal_descendants_matching(predicate))
            .unwrap_or_default())
    }

    // =========================================================================
    // Ranked retrieval over the whole trie
    // =========================================================================

    /// The terminal node ranked highest by `cmp`.
    pub fn best_node_by<'a, F>(&'a self, cmp: F) -> Option<NodeRef<'a, V>>
    where
        F: FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering,
    {
        self.root().best_terminal_by(cmp)
    }

    /// Up to `n` terminal nodes ranked highest by `cmp`, best first.
    pub fn best_nodes_by<'a, F>(&'a self, cmp: F, n: usize) -> Result<Vec<NodeRef<'a, V>>>
    where
        F: FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering,
    {
        self.root().best_terminals_by(n, cmp)
    }

    /// The entry ranked highest by an entry comparator.
    pub fn best_by<'a, F>(&'a self, cmp: F) -> Option<Entry<'a, V>>
    where
        F: FnMut(&Entry<'a, V>, &Entry<'a, V>) -> Ordering,
    {
        self.best_node_by(by_entry(cmp))
            .and_then(|node| Entry::try_from(node).ok())
    }

    /// Up to `n` entries ranked highest by an entry comparator.
    pub fn best_n_by<'a, F>(&'a self, cmp: F, n: usize) -> Result<Vec<Entry<'a, V>>>
    where
        F: FnMut(&Entry<'a, V>, &Entry<'a, V>) -> Ordering,
    {
        Ok(entries(self.best_nodes_by(by_entry(cmp), n)?))
    }

    // =========================================================================
    // Ranked retrieval below a fragment
    // =========================================================================

    /// The best terminal node below the node matching `length` characters of
    /// `fragment`. `None` when the fragment is not fully matched.
    pub fn best_node_with_len_by<'a, F>(
        &'a self,
        fragment: &str,
        length: usize,
        cmp: F,
    ) -> Result<Option<NodeRef<'a, V>>>
    where
        F: FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering,
    {
        Ok(self
            .node_len(fragment, length)?
            .and_then(|node| node.best_terminal_by(cmp)))
    }

    pub fn best_node_with_by<'a, F>(&'a self, fragment: &str, cmp: F) -> Option<NodeRef<'a, V>>
    where
        F: FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering,
    {
        self.node(fragment)
            .and_then(|node| node.best_terminal_by(cmp))
    }

    /// Up to `n` best terminal nodes below the node matching `length`
    /// characters of `fragment`; empty when the fragment is not fully
    /// matched.
    pub fn best_nodes_with_len_by<'a, F>(
        &'a self,
        fragment: &str,
        length: usize,
        cmp: F,
        n: usize,
    ) -> Result<Vec<NodeRef<'a, V>>>
    where
        F: FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering,
    {
        if n == 0 {
            return Err(TrieError::ZeroCount);
        }
        match self.node_len(fragment, length)? {
            Some(node) => node.best_terminals_by(n, cmp),
            None => Ok(Vec::new()),
        }
    }

    pub fn best_nodes_with_by<'a, F>(
        &'a self,
        fragment: &str,
        cmp: F,
        n: usize,
    ) -> Result<Vec<NodeRef<'a, V>>>
    where
        F: FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering,
    {
        self.best_nodes_with_len_by(fragment, fragment.chars().count(), cmp, n)
    }

    pub fn best_with_by<'a, F>(&'a self, fragment: &str, cmp: F) -> Option<Entry<'a, V>>
    where
        F: FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering,
    {
        self.best_node_with_by(fragment, cmp)
            .and_then(|node| Entry::try_from(node).ok())
    }

    /// The best entry below the node matching `length` characters of
    /// `fragment`. `None` when the fragment is not fully matched.
    pub fn best_with_len_by<'a, F>(
        &'a self,
        fragment: &str,
        length: usize,
        cmp: F,
    ) -> Result<Option<Entry<'a, V>>>
    where
        F: FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering,
    {
        Ok(self
            .best_node_with_len_by(fragment, length, cmp)?
            .and_then(|node| Entry::try_from(node).ok()))
    }

    pub fn best_n_with_by<'a, F>(
        &'a self,
        fragment: &str,
        cmp: F,
        n: usize,
    ) -> Result<Vec<Entry<'a, V>>>
    where
        F: FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering,
    {
        Ok(entries(self.best_nodes_with_by(fragment, cmp, n)?))
    }

    pub fn best_n_with_len_by<'a, F>(
        &'a self,
        fragment: &str,
        length: usize,
        cmp: F,
        n: usize,
    ) -> Result<Vec<Entry<'a, V>>>
    where
        F: FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering,
    {
        Ok(entries(self.best_nodes_with_len_by(fragment, length, cmp, n)?))
    }
}

/// Rankings by the values' natural order.
impl<V: Ord> Trie<V> {
    /// The entry with the greatest value.
    pub fn best(&self) -> Option<Entry<'_, V>> {
        self.best_node()
            .and_then(|node| Entry::try_from(node).ok())
    }

    pub fn best_node(&self) -> Option<NodeRef<'_, V>> {
        self.root().best_terminal()
    }

    /// The entry with the greatest value among keys starting or ending with
    /// `fragment`.
    pub fn best_with(&self, fragment: &str) -> Option<Entry<'_, V>> {
        self.best_with_by(fragment, by_value)
    }

    pub fn best_node_with(&self, fragment: &str) -> Option<NodeRef<'_, V>> {
        self.best_node_with_by(fragment, by_value)
    }

    pub fn best_node_with_len(&self, fragment: &str, length: usize) -> Result<Option<NodeRef<'_, V>>> {
        self.best_node_with_len_by(fragment, length, by_value)
    }

    pub fn best_with_len(&self, fragment: &str, length: usize) -> Result<Option<Entry<'_, V>>> {
        self.best_with_len_by(fragment, length, by_value)
    }

    /// Up to `n` terminal nodes with the greatest values among keys starting
    /// or ending with `fragment`.
    pub fn best_nodes_with(&self, fragment: &str, n: usize) -> Result<Vec<NodeRef<'_, V>>> {
        self.best_nodes_with_by(fragment, by_value, n)
    }

    pub fn best_n_with(&self, fragment: &str, n: usize) -> Result<Vec<Entry<'_, V>>> {
        self.best_n_with_by(fragment, by_value, n)
    }

    pub fn best_nodes_with_len(
        &self,
        fragment: &str,
        length: usize,
        n: usize,
    ) -> Result<Vec<NodeRef<'_, V>>> {
        self.best_nodes_with_len_by(fragment, length, by_value, n)
    }

    pub fn best_n_with_len(&self, fragment: &str, length: usize, n: usize) -> Result<Vec<Entry<'_, V>>> {
        self.best_n_with_len_by(fragment, length, by_value, n)
    }
}

impl<V> std::fmt::Debug for Trie<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trie")
            .field("kind", &self.kind)
            .field("charset", &self.charset)
            .field("len", &self.size)
            .field("nodes", &self.arena.len())
            .finish()
    }
}
