//! Confusable-character cleanup for raw recognizer output.
//!
//! Engines tuned for glyph shapes routinely misread digits as look-alike
//! letters (0 as O, 5 as S, 8 as B). For a digits-only identifier those
//! letters almost always stand for the digit they resemble, so rewriting
//! them before accumulation recovers readings that would otherwise vote for
//! the wrong character. This is the single source of truth for the mapping.

use std::collections::HashMap;

/// Digits every identifier is composed of.
pub const IDENTIFIER_DIGITS: &str = "1234567890";

/// Default confusion table for digit identifiers: each look-alike letter
/// and the digit it is read as.
pub const DIGIT_CONFUSIONS: &[(char, char)] = &[
    ('O', '0'),
    ('o', '0'),
    ('Z', '7'),
    ('z', '7'),
    ('A', '4'),
    ('T', '7'),
    ('S', '5'),
    ('s', '5'),
    ('g', '9'),
    ('D', '0'),
    ('p', '0'),
    ('e', '8'),
    ('B', '8'),
    ('b', '6'),
    ('G', '6'),
    ('t', '1'),
    ('a', '4'),
    ('X', '7'),
    ('q', '4'),
];

/// Rewrites confusable characters in a reading, one char at a time.
/// Characters without a table entry pass through unchanged.
#[derive(Debug, Clone)]
pub struct Normalizer {
    table: HashMap<char, char>,
}

impl Normalizer {
    /// Normalizer with the default digit confusion table.
    pub fn digits() -> Self {
        Self::with_table(DIGIT_CONFUSIONS.iter().copied())
    }

    /// Normalizer with a caller-supplied confusion table.
    pub fn with_table(pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        Self {
            table: pairs.into_iter().collect(),
        }
    }

    pub fn normalize(&self, reading: &str) -> String {
        reading
            .chars()
            .map(|ch| self.table.get(&ch).copied().unwrap_or(ch))
            .collect()
    }

    /// Every character the table accepts: mapped look-alikes plus the
    /// identifier digits themselves. Hosts can hand this to a recognizer
    /// as a character whitelist.
    pub fn accepted_chars(&self) -> String {
        let mut chars: Vec<char> = IDENTIFIER_DIGITS.chars().collect();
        chars.extend(self.table.keys().copied());
        chars.into_iter().collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::digits()
    }
}
