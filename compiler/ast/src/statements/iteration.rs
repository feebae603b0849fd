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

/// A `for` statement iterating an array, e.g. `for (x in values) … rof`.
///
/// Each element is copied into the loop variable, so the body cannot alias
/// the iterated array. Backwards, the elements are visited in reverse order
/// with the body running backwards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ForStatement {
    /// The loop variable bound to a copy of each element in turn.
    pub variable: Identifier,
    /// The array (or lazy range) being iterated.
    pub iterator: Expression,
    /// The statements run once per element.
    pub body: Vec<Statement>,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for ForStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for ForStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "for ({} in {})", self.variable, self.iterator)?;
        for statement in &self.body {
            writeln!(f, "    {statement}")?;
        }
        write!(f, "rof")
    }
}
