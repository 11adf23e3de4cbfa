//! # affix-trie
//!
//! Character tries for autocomplete and suggestion ranking over static
//! vocabularies. A trie is either a *prefix* trie, answering "which keys start
//! with this fragment", or a *suffix* trie, answering "which keys end with
//! it". Each key carries a value, and queries can return the best `n` keys
//! below a fragment under any comparator.
//!
//! Tries are built once through a [`TrieBuilder`] and then frozen: the
//! builder computes every node's terminal-descendant list when it hands the
//! trie out, after which the trie is immutable and `Sync`.
//!
//! ## Example
//!
//! ```rust
//! use affix_trie::{TrieBuilder, TrieError};
//!
//! let mut builder = TrieBuilder::prefix();
//! builder.put("apple", 1)?;
//! builder.put("app", 2)?;
//! builder.put("apply", 3)?;
//! // Characters outside the alphabet reject the key without failing.
//! assert!(!builder.put("apple!", 4)?);
//! let trie = builder.finalize()?;
//!
//! assert_eq!(trie.get("app"), Some(&2));
//! let best = trie.best_with("app").unwrap();
//! assert_eq!((best.key(), *best.value()), ("apply", 3));
//! # Ok::<(), TrieError>(())
//! ```

#![warn(clippy::all)]

mod arena;
mod builder;
mod charset;
mod entry;
mod error;
mod node;
mod select;
mod trie;

pub use arena::NodeId;
pub use builder::TrieBuilder;
pub use charset::{CharacterSet, DEFAULT_ALPHABET};
pub use entry::{by_entry, Entry};
pub use error::{Result, TrieError};
pub use node::{by_value, Ancestors, NodeRef};
pub use select::{best_n_of, best_of};
pub use trie::{Trie, TrieConfig, TrieKind};


#[cfg(test)]
mod proptests;
