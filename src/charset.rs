//! Fixed alphabets mapping characters to dense child slot indices.
//!
//! Every node of a trie owns one child slot per alphabet character, so a small
//! alphabet keeps nodes compact and child access O(1). Characters are limited to
//! U+0000..=U+00FF so that the lookup is a single 256-entry table read.

use crate::error::{Result, TrieError};

/// Alphabet used by [`CharacterSet::default`]: lowercase ASCII letters and digits.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

const TABLE_SIZE: usize = 256;

/// Marks a table entry for a character outside the alphabet.
const UNSUPPORTED: u16 = u16::MAX;

/// An immutable alphabet with a character → slot index mapping.
#[derive(Clone, PartialEq, Eq)]
pub struct CharacterSet {
    /// Alphabet characters in slot order.
    chars: Box<[char]>,
    /// Slot index of each code point below 256, or `UNSUPPORTED`.
    table: Box<[u16; TABLE_SIZE]>,
}

impl CharacterSet {
    /// Build a character set from a string of unique characters.
    ///
    /// Slot indices follow the order of `alphabet`. Fails if `alphabet` is
    /// empty, repeats a character, or contains a character above U+00FF.
    pub fn new(alphabet: &str) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(TrieError::EmptyAlphabet);
        }

        let mut table = Box::new([UNSUPPORTED; TABLE_SIZE]);
        let mut chars = Vec::with_capacity(alphabet.len());
        for c in alphabet.chars() {
            let code = c as u32 as usize;
            if code >= TABLE_SIZE {
                return Err(TrieError::UnsupportedAlphabetCharacter { c });
            }
            if table[code] != UNSUPPORTED {
                return Err(TrieError::DuplicateCharacter { c });
            }
            table[code] = chars.len() as u16;
            chars.push(c);
        }

        Ok(Self {
            chars: chars.into_boxed_slice(),
            table,
        })
    }

    /// Slot index of `c`, or `None` if `c` is not in the alphabet.
    #[inline]
    pub fn char_to_index(&self, c: char) -> Option<usize> {
        let code = c as u32 as usize;
        if code >= TABLE_SIZE {
            return None;
        }
        match self.table[code] {
            UNSUPPORTED => None,
            index => Some(index as usize),
        }
    }

    /// Character stored at slot `index`.
    #[inline]
    pub fn index_to_char(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.char_to_index(c).is_some()
    }

    /// Number of characters, i.e. the fan-out of every node.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; empty alphabets are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Alphabet characters in slot order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Resolve every character of `key` up front.
    ///
    /// Returns `None` as soon as one character is unsupported, so callers can
    /// reject a key before touching the tree.
    pub(crate) fn resolve(&self, key: &str) -> Option<Vec<(usize, char)>> {
        key.chars()
            .map(|c| self.char_to_index(c).map(|index| (index, c)))
            .collect()
    }
}

impl Default for CharacterSet {
    fn default() -> Self {
        let mut table = Box::new([UNSUPPORTED; TABLE_SIZE]);
        let chars: Box<[char]> = DEFAULT_ALPHABET.chars().collect();
        for (index, &c) in chars.iter().enumerate() {
            table[c as usize] = index as u16;
        }
        Self { chars, table }
    }
}

impl std::fmt::Debug for CharacterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let alphabet: String = self.chars.iter().collect();
        f.debug_tuple("CharacterSet").field(&alphabet).finish()
    }
}
