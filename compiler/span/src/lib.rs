// Copyright (C) 2019-2022 The Railway Team.
// This file is part of the Railway library.

// The Railway library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Railway library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Railway library. If not, see <https://www.gnu.org/licenses/>.

//! Source positions shared by the tokenizer, the AST, and diagnostics.
//!
//! Railway sources are line oriented, so a [`Span`] records the line it
//! starts on together with a column range. Spans of multi-line constructs
//! keep the first line and widen the column range.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// A range of source text, used to point diagnostics at the offending code.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// 1-indexed line the spanned text starts on.
    pub line: usize,
    /// 0-indexed column of the first spanned character.
    pub start: usize,
    /// 0-indexed column one past the last spanned character.
    pub end: usize,
}

impl Span {
    /// Generates a new span from the `line` and the `start` and `end` columns within it.
    pub fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }

    /// Generates a dummy span with all defaults.
    /// Should only be used in temporary or test situations.
    pub const fn dummy() -> Self {
        Self { line: 0, start: 0, end: 0 }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.start + 1)
    }
}

impl std::ops::Add for Span {
    type Output = Self;

    /// Merges two spans, keeping the earliest line and the widest column range.
    fn add(self, other: Self) -> Self {
        if self == Self::dummy() {
            return other;
        }
        if other == Self::dummy() {
            return self;
        }
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Less => Self::new(self.line, self.start, other.end),
            std::cmp::Ordering::Greater => Self::new(other.line, other.start, self.end),
            std::cmp::Ordering::Equal => Self::new(
                self.line,
                self.start.min(other.start),
                self.end.max(other.end),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_same_line() {
        let merged = Span::new(3, 4, 7) + Span::new(3, 10, 12);
        assert_eq!(merged, Span::new(3, 4, 12));
    }

    #[test]
    fn merge_across_lines() {
        let merged = Span::new(5, 8, 11) + Span::new(2, 0, 4);
        assert_eq!(merged, Span::new(2, 0, 11));
    }

    #[test]
    fn merge_with_dummy() {
        let span = Span::new(1, 2, 3);
        assert_eq!(span + Span::dummy(), span);
        assert_eq!(Span::dummy() + span, span);
    }

    #[test]
    fn display_is_one_indexed() {
        assert_eq!(Span::new(7, 0, 4).to_string(), "7:1");
    }
}
