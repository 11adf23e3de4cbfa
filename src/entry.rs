//! Key/value projections of terminal nodes.

use std::cmp::Ordering;

use crate::error::TrieError;
use crate::node::NodeRef;

/// A `(key, value)` pair read from a terminal node.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Entry<'a, V> {
    key: String,
    value: &'a V,
}

impl<V> Clone for Entry<'_, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value,
        }
    }
}

impl<'a, V> Entry<'a, V> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &'a V {
        self.value
    }

    pub fn into_key(self) -> String {
        self.key
    }

    pub fn into_pair(self) -> (String, &'a V) {
        (self.key, self.value)
    }
}

impl<'a, V> TryFrom<NodeRef<'a, V>> for Entry<'a, V> {
    type Error = TrieError;

    /// Fails with [`TrieError::NotTerminal`] for nodes where no key ends.
    fn try_from(node: NodeRef<'a, V>) -> Result<Self, Self::Error> {
        match node.value() {
            Some(value) => Ok(Entry {
                key: node.key(),
                value,
            }),
            None => Err(TrieError::NotTerminal { key: node.key() }),
        }
    }
}

/// Project terminal nodes to entries. Non-terminal nodes are skipped.
pub(crate) fn entries<'a, V, I>(nodes: I) -> Vec<Entry<'a, V>>
where
    I: IntoIterator<Item = NodeRef<'a, V>>,
{
    nodes
        .into_iter()
        .filter_map(|node| Entry::try_from(node).ok())
        .collect()
}

/// Adapt a comparator over entries into a comparator over nodes.
///
/// Every comparison rebuilds both keys, so prefer a node comparator when the
/// ordering only needs values. Non-terminal nodes compare equal.
pub fn by_entry<'a, V, F>(mut cmp: F) -> impl FnMut(&NodeRef<'a, V>, &NodeRef<'a, V>) -> Ordering
where
    F: FnMut(&Entry<'a, V>, &Entry<'a, V>) -> Ordering,
{
    move |a: &NodeRef<'a, V>, b: &NodeRef<'a, V>| {
        match (Entry::try_from(*a), Entry::try_from(*b)) {
            (Ok(a), Ok(b)) => cmp(&a, &b),
            _ => Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrieBuilder;

    #[test]
    fn test_entry_from_terminal() {
        let mut builder = TrieBuilder::prefix();
        builder.put("dog", 4u32).unwrap();
        let trie = builder.finalize().unwrap();

        let entry = Entry::try_from(trie.node("dog").unwrap()).unwrap();
        assert_eq!(entry.key(), "dog");
        assert_eq!(*entry.value(), 4);
        assert_eq!(entry.into_pair(), ("dog".to_string(), &4));

        let err = Entry::try_from(trie.node("do").unwrap()).unwrap_err();
        assert_eq!(err, TrieError::NotTerminal { key: "do".into() });
        assert!(err.is_illegal_state());
    }

    #[test]
    fn test_entry_clones_without_clone_values() {
        // Only compared through the reference the entry holds.
        #[derive(Debug, PartialEq)]
        struct Handle(u32);

        let mut builder = TrieBuilder::prefix();
        builder.put("cat", Handle(7)).unwrap();
        let trie = builder.finalize().unwrap();

        let entry = trie.best_with_by("ca", |_, _| Ordering::Equal).unwrap();
        let copy = entry.clone();
        assert_eq!(copy.key(), "cat");
        assert!(std::ptr::eq(copy.value(), entry.value()));
        assert_eq!(copy, entry);
    }

    #[test]
    fn test_by_entry_orders_by_key() {
        let mut builder = TrieBuilder::prefix();
        for (k, v) in [("pear", 1u32), ("plum", 3), ("peach", 2)] {
            builder.put(k, v).unwrap();
        }
        let trie = builder.finalize().unwrap();

        let mut longest_key = by_entry(|a, b| a.key().len().cmp(&b.key().len()));
        let best = trie.root().best_terminal_by(&mut longest_key).unwrap();
        assert_eq!(best.key(), "peach");

        // Non-terminal nodes never win or lose.
        let p = trie.node("p").unwrap();
        assert_eq!(longest_key(&p, &best), Ordering::Equal);
    }
}
