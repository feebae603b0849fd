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

use crate::{Expression, Identifier, Node};

use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `call` or `uncall` statement:
///
/// ```text
/// call (seed) => shuffle(deck) => (permutation)
/// uncall (permutation) => shuffle(deck) => (seed)
/// ```
///
/// The leading list names variables consumed from the caller, the trailing
/// list names variables produced into it; `deck` stays borrowed throughout.
/// An `uncall` runs the callee backwards with the consumed/produced roles
/// swapped. A brace-count after the function name makes the call parallel:
/// `call (chunks) => sum{4}(total) => (sums)` runs four lanes, each stealing
/// its slice of every consumed array.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CallStatement {
    /// Is this an `uncall`?
    pub uncall: bool,
    /// The variables consumed from the caller's scope.
    pub stolen: Vec<Identifier>,
    /// The function being called.
    pub function: Identifier,
    /// The lane count of a parallel call, evaluated in the caller.
    pub lanes: Option<Expression>,
    /// The variables lent to the callee and kept by the caller.
    pub borrowed: Vec<Identifier>,
    /// The variables produced into the caller's scope.
    pub results: Vec<Identifier>,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for CallStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for CallStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = |names: &[Identifier]| {
            names.iter().map(|name| name.name.clone()).collect::<Vec<_>>().join(", ")
        };
        write!(f, "{}", if self.uncall { "uncall" } else { "call" })?;
        if !self.stolen.is_empty() {
            write!(f, " ({}) =>", list(&self.stolen))?;
        }
        write!(f, " {}", self.function)?;
        if let Some(lanes) = &self.lanes {
            write!(f, "{{{lanes}}}")?;
        }
        write!(f, "({})", list(&self.borrowed))?;
        if !self.results.is_empty() {
            write!(f, " => ({})", list(&self.results))?;
        }
        Ok(())
    }
}
