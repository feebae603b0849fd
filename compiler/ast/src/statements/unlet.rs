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

/// An `unlet` statement destroying a variable, e.g. `unlet x = 11`.
///
/// The expression states the value the variable must hold; a mismatch is a
/// runtime error, since silently destroying an unknown value would lose
/// information. Run backwards it behaves as `let`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UnletStatement {
    /// The variable being destroyed.
    pub variable: Identifier,
    /// The value the variable must hold for the destruction to be legal.
    pub value: Expression,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for UnletStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for UnletStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unlet {} = {}", self.variable, self.value)
    }
}
