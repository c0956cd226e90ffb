//! Source positions for diagnostics.
//!
//! The analyzer never reads source text itself; positions arrive on AST
//! nodes from the parser and are carried through unchanged.

use serde::{Deserialize, Serialize};

/// A position in a source file (1-based line and column, byte offset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Location {
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// A contiguous region of source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    #[must_use]
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// A zero-width span at a single position.
    #[must_use]
    pub const fn point(at: Location) -> Self {
        Self { start: at, end: at }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start.offset <= other.start.offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.offset >= other.end.offset {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Whether `offset` falls inside this span.
    #[must_use]
    pub const fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.start.offset && offset < self.end.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize) -> Span {
        Span::new(Location::new(1, 1, start), Location::new(1, 1, end))
    }

    #[test]
    fn merge_covers_both_spans() {
        let merged = span(4, 9).merge(span(1, 6));
        assert_eq!(merged.start.offset, 1);
        assert_eq!(merged.end.offset, 9);
    }

    #[test]
    fn contains_is_half_open() {
        let s = span(2, 5);
        assert!(s.contains_offset(2));
        assert!(s.contains_offset(4));
        assert!(!s.contains_offset(5));
    }

    #[test]
    fn point_span_is_empty() {
        assert!(Span::point(Location::new(3, 7, 42)).is_empty());
    }
}
