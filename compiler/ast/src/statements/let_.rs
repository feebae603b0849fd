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

/// A `let` statement creating a fresh variable, e.g. `let x = 6`.
///
/// Run backwards it behaves as `unlet`: the expression is re-evaluated and
/// must match the variable's content before the binding is destroyed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LetStatement {
    /// The variable being created.
    pub variable: Identifier,
    /// The initial value of the variable.
    pub value: Expression,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for LetStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for LetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "let {} = {}", self.variable, self.value)
    }
}
