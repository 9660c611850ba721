//! Character classes.
//!
//! A class is expanded eagerly into the explicit set of characters it
//! names; ranges are inclusive by code point.

use std::collections::BTreeSet;

/// An explicit set of characters, optionally negated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CharSet {
    chars: BTreeSet<char>,
    negated: bool,
}

impl CharSet {
    /// Creates an empty, non-negated set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty negated set (matches every character).
    #[must_use]
    pub fn negated() -> Self {
        Self {
            chars: BTreeSet::new(),
            negated: true,
        }
    }

    /// Creates a set from an inclusive range.
    #[must_use]
    pub fn from_range(start: char, stop: char) -> Self {
        let mut set = Self::new();
        set.insert_range(start, stop);
        set
    }

    /// Adds a single character.
    pub fn insert(&mut self, c: char) {
        self.chars.insert(c);
    }

    /// Adds every character in an inclusive code point range.
    ///
    /// Reversed bounds are swapped. Code points that are not valid `char`s
    /// (the surrogate block) are skipped.
    pub fn insert_range(&mut self, start: char, stop: char) {
        let (lo, hi) = if start > stop {
            (stop, start)
        } else {
            (start, stop)
        };
        self.chars.extend(lo..=hi);
    }

    /// Returns true if the class is negated.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Returns true if `c` is listed in the set, ignoring negation.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Tests `c` against the class, honoring negation.
    #[must_use]
    pub fn matches(&self, c: char) -> bool {
        self.contains(c) != self.negated
    }

    /// Returns the number of listed characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if no characters are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Iterates the listed characters in code point order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    /// Collapses the listed characters into maximal inclusive runs.
    #[must_use]
    pub fn ranges(&self) -> Vec<(char, char)> {
        let mut runs: Vec<(char, char)> = Vec::new();
        for c in self.iter() {
            match runs.last_mut() {
                Some((_, hi)) if char::from_u32(u32::from(*hi) + 1) == Some(c) => *hi = c,
                _ => runs.push((c, c)),
            }
        }
        runs
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            chars: iter.into_iter().collect(),
            negated: false,
        }
    }
}

impl Extend<char> for CharSet {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        self.chars.extend(iter);
    }
}
