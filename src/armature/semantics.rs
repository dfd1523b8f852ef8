//! Joint semantic tagging.
//!
//! A joint's anatomical role is inferred from its name: the name is split
//! into words, each word is lowercased and looked up in a [`SemanticTable`],
//! and the matches are OR-ed into a [`JointSemantic`] mask.
//!
//! Word splitting follows the pattern "optional `_` or whitespace separator,
//! one letter, any lowercase letters, any digits", so `LeftUpperArm` yields
//! `left`, `upper`, `arm` and `hand_L2` yields `hand`, `l2`.

use bitflags::bitflags;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

bitflags! {
    /// Anatomical role of a joint, accumulated from the words of its name.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct JointSemantic: u32 {
        const HAND  = 1 << 0;
        const FOOT  = 1 << 1;
        const LEFT  = 1 << 2;
        const RIGHT = 1 << 3;
        const WING  = 1 << 4;
        const TAIL  = 1 << 5;
        const HEAD  = 1 << 6;
        const EAR   = 1 << 7;
        const EYE   = 1 << 8;
        const NOSE  = 1 << 9;
    }
}

impl JointSemantic {
    /// Returns the mirrored side tag: `LEFT` and `RIGHT` swap, everything
    /// else is kept.
    #[must_use]
    pub fn mirrored(self) -> Self {
        let mut out = self - (Self::LEFT | Self::RIGHT);
        if self.contains(Self::LEFT) {
            out |= Self::RIGHT;
        }
        if self.contains(Self::RIGHT) {
            out |= Self::LEFT;
        }
        out
    }

    /// True if one mask is tagged left-only and the other right-only.
    #[must_use]
    pub fn is_opposite_side(self, other: Self) -> bool {
        let sides = Self::LEFT | Self::RIGHT;
        let (a, b) = (self & sides, other & sides);
        (a == Self::LEFT && b == Self::RIGHT) || (a == Self::RIGHT && b == Self::LEFT)
    }
}

/// Lowercase word → semantic mask vocabulary.
///
/// The built-in vocabulary is available through [`SemanticTable::global`];
/// it is built once on first use and never mutated afterwards. Custom
/// vocabularies are plain values built with [`SemanticTable::with_word`].
#[derive(Debug, Clone, Default)]
pub struct SemanticTable {
    words: FxHashMap<String, JointSemantic>,
}

static DEFAULT_TABLE: Lazy<SemanticTable> = Lazy::new(SemanticTable::builtin);

impl SemanticTable {
    /// An empty vocabulary (every word maps to the empty mask).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in vocabulary.
    #[must_use]
    pub fn builtin() -> Self {
        use JointSemantic as S;

        [
            ("hand", S::HAND),
            ("foreleg", S::HAND | S::FOOT),
            ("arm", S::HAND),
            ("claw", S::HAND),
            ("wing", S::HAND | S::WING),
            ("head", S::HEAD),
            ("l", S::LEFT),
            ("r", S::RIGHT),
            ("left", S::LEFT),
            ("right", S::RIGHT),
            ("leg", S::FOOT),
            ("foot", S::FOOT),
            ("tail", S::TAIL),
            ("ear", S::EAR),
            ("eye", S::EYE),
            ("nose", S::NOSE),
        ]
        .into_iter()
        .fold(Self::new(), |table, (word, semantic)| table.with_word(word, semantic))
    }

    /// The process-wide built-in vocabulary.
    #[must_use]
    pub fn global() -> &'static SemanticTable {
        &DEFAULT_TABLE
    }

    /// Adds (or replaces) a word. The word is stored lowercased.
    #[must_use]
    pub fn with_word(mut self, word: &str, semantic: JointSemantic) -> Self {
        self.words.insert(word.to_ascii_lowercase(), semantic);
        self
    }

    /// Looks up an already-lowercased word. Unknown words map to the empty mask.
    #[inline]
    #[must_use]
    pub fn lookup(&self, word: &str) -> JointSemantic {
        self.words.get(word).copied().unwrap_or_default()
    }

    /// OR-accumulates the masks of every word in `name`.
    #[must_use]
    pub fn classify(&self, name: &str) -> JointSemantic {
        words_from_name(name)
            .map(|word| self.lookup(&word.to_ascii_lowercase()))
            .fold(JointSemantic::empty(), |acc, s| acc | s)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Splits a joint name into words (separators stripped, case preserved).
pub fn words_from_name(name: &str) -> impl Iterator<Item = &str> {
    NameWords { rest: name }
}

struct NameWords<'a> {
    rest: &'a str,
}

impl<'a> Iterator for NameWords<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.rest.as_bytes();
        let start = bytes.iter().position(u8::is_ascii_alphabetic)?;

        let mut end = start + 1;
        while end < bytes.len() && bytes[end].is_ascii_lowercase() {
            end += 1;
        }
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }

        let word = &self.rest[start..end];
        self.rest = &self.rest[end..];
        Some(word)
    }
}
