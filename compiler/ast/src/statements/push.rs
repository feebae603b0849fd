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

use crate::{Identifier, LookupExpression, Node};

use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `push` statement moving a variable onto the tail of an array,
/// e.g. `push x => stack`.
///
/// The pushed variable ceases to exist; its value lives in the array. Run
/// backwards this is exactly a `pop`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PushStatement {
    /// The variable whose ownership moves into the array.
    pub element: Identifier,
    /// The array receiving the value.
    pub array: LookupExpression,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for PushStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for PushStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "push {} => {}", self.element, self.array)
    }
}
