//! Per-item keystroke matching against every accepted spelling at once.

use std::sync::Arc;

use crate::romaji::generate_variants;

/// Result of feeding one character to a [`TypingTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// No spelling accepted the character.
    Rejected,
    /// At least one spelling advanced.
    Advanced,
    /// A spelling was completed; `pattern` indexes [`TypingTarget::patterns`].
    Captured { pattern: usize },
}

/// Progress display hint for a live item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum Highlight {
    Idle,
    /// Typing has started and more than [`ALMOST_REMAINING`] chars remain.
    Glowing,
    Almost,
}

/// Remaining-character threshold for [`Highlight::Almost`].
pub const ALMOST_REMAINING: usize = 3;

/// The spellings of one reading with an independent cursor per spelling.
///
/// Cursors only move forward and never pass their spelling's length; a cursor
/// reaching the end captures the target.
#[derive(Debug, Clone)]
pub struct TypingTarget {
    patterns: Arc<[String]>,
    cursors: Vec<usize>,
    captured: Option<usize>,
}

impl TypingTarget {
    pub fn new(patterns: Arc<[String]>) -> Self {
        let cursors = vec![0; patterns.len()];
        Self {
            patterns,
            cursors,
            captured: None,
        }
    }

    /// Target for `reading`, using the process-wide variant cache.
    pub fn for_reading(reading: &str) -> Self {
        Self::new(generate_variants(reading))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn cursors(&self) -> &[usize] {
        &self.cursors
    }

    pub fn is_captured(&self) -> bool {
        self.captured.is_some()
    }

    /// Index of the spelling that completed the target.
    pub fn captured_by(&self) -> Option<usize> {
        self.captured
    }

    /// Advances every spelling whose next character is `ch`.
    ///
    /// Stops at the first spelling that completes; spellings after it are not
    /// advanced. A captured target rejects everything.
    pub fn feed(&mut self, ch: char) -> Feed {
        if self.captured.is_some() {
            return Feed::Rejected;
        }
        let mut advanced = false;
        for (idx, pattern) in self.patterns.iter().enumerate() {
            let cursor = self.cursors[idx];
            let Some(next) = pattern[cursor..].chars().next() else {
                continue;
            };
            if next != ch {
                continue;
            }
            advanced = true;
            self.cursors[idx] = cursor + next.len_utf8();
            if self.cursors[idx] == pattern.len() {
                self.captured = Some(idx);
                return Feed::Captured { pattern: idx };
            }
        }
        if advanced { Feed::Advanced } else { Feed::Rejected }
    }

    /// Spelling with the most progress (the first one on ties) and its cursor.
    pub fn best(&self) -> (&str, usize) {
        if let Some(idx) = self.captured {
            return (&self.patterns[idx], self.cursors[idx]);
        }
        let mut best = 0;
        for (idx, &cursor) in self.cursors.iter().enumerate() {
            if cursor > self.cursors[best] {
                best = idx;
            }
        }
        match self.patterns.get(best) {
            Some(p) => (p, self.cursors[best]),
            None => ("", 0),
        }
    }

    pub fn progress(&self) -> usize {
        self.best().1
    }

    /// Already typed part of the best spelling.
    pub fn typed_prefix(&self) -> &str {
        let (pattern, cursor) = self.best();
        &pattern[..cursor]
    }

    /// Not yet typed part of the best spelling.
    pub fn remaining_suffix(&self) -> &str {
        let (pattern, cursor) = self.best();
        &pattern[cursor..]
    }

    pub fn highlight(&self) -> Highlight {
        let (pattern, cursor) = self.best();
        if cursor == 0 {
            Highlight::Idle
        } else if pattern.len() - cursor > ALMOST_REMAINING {
            Highlight::Glowing
        } else {
            Highlight::Almost
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(patterns: &[&str]) -> TypingTarget {
        TypingTarget::new(patterns.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_cursors_advance_independently() {
        let mut t = target(&["shi", "si", "ci"]);
        assert_eq!(t.feed('s'), Feed::Advanced);
        assert_eq!(t.cursors(), &[1, 1, 0]);
        assert_eq!(t.feed('h'), Feed::Advanced);
        assert_eq!(t.cursors(), &[2, 1, 0]);
        assert_eq!(t.feed('i'), Feed::Captured { pattern: 0 });
        assert!(t.is_captured());
    }

    #[test]
    fn test_mismatch_does_not_reset() {
        let mut t = target(&["maguro"]);
        t.feed('m');
        t.feed('a');
        assert_eq!(t.feed('x'), Feed::Rejected);
        assert_eq!(t.progress(), 2);
        assert_eq!(t.typed_prefix(), "ma");
        assert_eq!(t.remaining_suffix(), "guro");
    }

    #[test]
    fn test_shorter_spelling_captures() {
        let mut t = target(&["shi", "si"]);
        t.feed('s');
        assert_eq!(t.feed('i'), Feed::Captured { pattern: 1 });
        assert_eq!(t.captured_by(), Some(1));
        assert_eq!(t.best(), ("si", 2));
        assert_eq!(t.feed('s'), Feed::Rejected);
    }

    #[test]
    fn test_highlight_thresholds() {
        let mut t = target(&["tamago"]);
        assert_eq!(t.highlight(), Highlight::Idle);
        t.feed('t');
        t.feed('a');
        assert_eq!(t.highlight(), Highlight::Glowing);
        t.feed('m');
        assert_eq!(t.highlight(), Highlight::Almost);
    }

    #[test]
    fn test_best_prefers_first_on_tie() {
        let mut t = target(&["tsu", "tu"]);
        t.feed('t');
        assert_eq!(t.best(), ("tsu", 1));
    }

    #[test]
    fn test_for_reading_uses_variants() {
        let mut t = TypingTarget::for_reading("ikka");
        for c in "ixtsuka".chars() {
            t.feed(c);
        }
        assert!(t.is_captured());
    }
}
