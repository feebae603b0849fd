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

use crate::{Expression, Identifier, Node, Statement};

use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `try` statement searching its iterator for a value that completes the
/// body without a `catch` firing, e.g. `try (k in [0 to 5]) … yrt`.
///
/// A firing catch rewinds the body to the try entry and the next candidate
/// is attempted. On a pass the iterator variable stays bound in the
/// surrounding scope, which is what lets a backward run find the branch
/// that was taken.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TryStatement {
    /// The variable bound to each candidate value in turn.
    pub variable: Identifier,
    /// The array (or lazy range) of candidate values.
    pub iterator: Expression,
    /// The statements attempted per candidate; `catch` statements may only
    /// appear at this level.
    pub body: Vec<Statement>,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for TryStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for TryStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "try ({} in {})", self.variable, self.iterator)?;
        for statement in &self.body {
            writeln!(f, "    {statement}")?;
        }
        write!(f, "yrt")
    }
}
