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

use crate::{Identifier, Node, Statement};

use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `mutex … xetum` statement guarding a critical section.
///
/// One lane at a time runs the body, and passage order is fixed: ascending
/// TID when time runs forwards, descending when backwards. That makes a
/// backward run re-serialise shared mutations in exactly the opposite
/// order, which is what keeps guarded parallel programs reversible.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MutexStatement {
    /// The name identifying the critical section.
    pub name: Identifier,
    /// The statements run while holding the mutex.
    pub body: Vec<Statement>,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for MutexStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for MutexStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mutex {}", self.name)?;
        for statement in &self.body {
            writeln!(f, "    {statement}")?;
        }
        write!(f, "xetum")
    }
}
