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

use crate::{Expression, Node};

use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `print` statement, e.g. `print x, total`.
///
/// The one sanctioned impure operation: arguments are written to standard
/// output space-separated and newline-terminated. Printing has no backward
/// effect; already-written output is never rolled back.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PrintStatement {
    /// The expressions to serialise.
    pub arguments: Vec<Expression>,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for PrintStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for PrintStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "print ")?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{argument}")?;
        }
        Ok(())
    }
}
