//! Insert-then-freeze construction of tries.
//!
//! A [`TrieBuilder`] is the only way to add keys to a [`Trie`]. Once
//! [`finalize`](TrieBuilder::finalize) hands the trie out, the builder is
//! sealed and every further call fails with [`TrieError::Sealed`], so no key
//! can be added after the trie's memoized subtree lists are computed.

use tracing::{debug, trace};

use crate::charset::CharacterSet;
use crate::error::{Result, TrieError};
use crate::trie::{Trie, TrieConfig, TrieKind};

/// Builder for a single [`Trie`].
pub struct TrieBuilder<V> {
    /// `None` once the trie has been handed out.
    trie: Option<Trie<V>>,
    /// Keys rejected for containing unsupported characters.
    failed: u64,
}

impl<V> TrieBuilder<V> {
    /// Builder for a trie of the given kind over the default alphabet.
    pub fn new(kind: TrieKind) -> Self {
        Self::with_config(TrieConfig::new(kind))
    }

    pub fn with_charset(kind: TrieKind, charset: CharacterSet) -> Self {
        Self::with_config(TrieConfig::new(kind).with_charset(charset))
    }

    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            trie: Some(Trie::new(config)),
            failed: 0,
        }
    }

    /// Builder for a prefix trie over the default alphabet.
    pub fn prefix() -> Self {
        Self::new(TrieKind::Prefix)
    }

    /// Builder for a suffix trie over the default alphabet.
    pub fn suffix() -> Self {
        Self::new(TrieKind::Suffix)
    }

    /// Insert `key`, overwriting the value of an existing key.
    ///
    /// Returns `Ok(false)` and bumps [`failed_count`](Self::failed_count) if
    /// `key` contains a character outside the alphabet; the trie is left
    /// untouched in that case.
    pub fn put(&mut self, key: &str, value: V) -> Result<bool> {
        let trie = self.trie.as_mut().ok_or(TrieError::Sealed)?;
        if trie.put(key, value) {
            return Ok(true);
        }
        self.failed += 1;
        trace!(key, failed = self.failed, "rejected key with unsupported characters");
        Ok(false)
    }

    /// Insert every pair of `pairs`, returning how many were accepted.
    pub fn put_all<K, I>(&mut self, pairs: I) -> Result<usize>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut accepted = 0;
        for (key, value) in pairs {
            if self.put(key.as_ref(), value)? {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    /// Number of keys rejected so far.
    pub fn failed_count(&self) -> u64 {
        self.failed
    }

    /// Number of distinct keys accepted so far; zero once sealed.
    pub fn len(&self) -> usize {
        self.trie.as_ref().map_or(0, Trie::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_sealed(&self) -> bool {
        self.trie.is_none()
    }

    /// Seal the builder and hand out the finished trie.
    ///
    /// Can only succeed once; later calls fail with [`TrieError::Sealed`].
    pub fn finalize(&mut self) -> Result<Trie<V>> {
        let mut trie = self.trie.take().ok_or(TrieError::Sealed)?;
        trie.seal();
        debug!(
            kind = ?trie.kind(),
            keys = trie.len(),
            rejected = self.failed,
            "finalized trie builder"
        );
        Ok(trie)
    }
}

impl<V> Default for TrieBuilder<V> {
    fn default() -> Self {
        Self::with_config(TrieConfig::default())
    }
}

impl<V> std::fmt::Debug for TrieBuilder<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrieBuilder")
            .field("trie", &self.trie)
            .field("failed", &self.failed)
            .finish()
    }
}
