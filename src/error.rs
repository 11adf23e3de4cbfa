//! Error type shared by every fallible trie operation.
//!
//! Keys containing characters outside the alphabet are *not* errors: they are
//! reported through [`TrieBuilder::put`](crate::TrieBuilder::put) returning
//! `Ok(false)` and counted by the builder.

/// Errors returned by character sets, builders and trie queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrieError {
    #[error("character set cannot be empty")]
    EmptyAlphabet,

    #[error("character set must contain unique characters, {c:?} appears more than once")]
    DuplicateCharacter { c: char },

    #[error("character set only supports U+0000..=U+00FF, got {c:?}")]
    UnsupportedAlphabetCharacter { c: char },

    #[error("fragment length {length} is out of range 0..={max}")]
    LengthOutOfRange { length: usize, max: usize },

    #[error("number of best nodes to select must be positive")]
    ZeroCount,

    #[error("trie has already been finalized; the builder cannot be used again")]
    Sealed,

    #[error("node {key:?} is not a terminal node")]
    NotTerminal { key: String },
}

impl TrieError {
    /// Invalid alphabet, length or count argument.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TrieError::EmptyAlphabet
                | TrieError::DuplicateCharacter { .. }
                | TrieError::UnsupportedAlphabetCharacter { .. }
                | TrieError::LengthOutOfRange { .. }
                | TrieError::ZeroCount
        )
    }

    /// Operation not permitted in the current state of the receiver.
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, TrieError::Sealed | TrieError::NotTerminal { .. })
    }
}

/// Result type for trie operations.
pub type Result<T> = std::result::Result<T, TrieError>;
