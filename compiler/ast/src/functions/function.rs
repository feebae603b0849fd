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

/// A Railway function:
///
/// ```text
/// func halve(counter)(value)
///     value /= 2
///     counter += 1
/// return (value)
/// ```
///
/// The first parameter list is borrowed (shared with the caller), the
/// second is stolen (moved out of the caller). An `undoreturn` function
/// copies its return values and then undoes its own body, so only the
/// copies survive the call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// The name of the function.
    pub identifier: Identifier,
    /// Parameters shared with the caller for the duration of the call.
    pub borrowed: Vec<Identifier>,
    /// Parameters moved out of the caller's scope.
    pub stolen: Vec<Identifier>,
    /// The statements making up the body.
    pub body: Vec<Statement>,
    /// The names whose cells are handed back to the caller.
    pub returns: Vec<Identifier>,
    /// Does this function return with `undoreturn`?
    pub undoreturn: bool,
    /// The location of the `func` header in the source.
    pub span: Span,
}

impl Function {
    /// Is this a mono function, callable only during forward execution?
    pub fn is_mono(&self) -> bool {
        self.identifier.is_mono()
    }
}

impl Node for Function {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = |names: &[Identifier]| {
            names.iter().map(|name| name.name.clone()).collect::<Vec<_>>().join(", ")
        };
        writeln!(f, "func {}({})({})", self.identifier, list(&self.borrowed), list(&self.stolen))?;
        for statement in &self.body {
            writeln!(f, "    {statement}")?;
        }
        let keyword = if self.undoreturn { "undoreturn" } else { "return" };
        write!(f, "{keyword} ({})", list(&self.returns))
    }
}
