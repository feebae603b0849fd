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

/// A `pop` statement moving the tail of an array into a fresh variable,
/// e.g. `pop stack => x`.
///
/// Run backwards this is exactly a `push`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PopStatement {
    /// The array losing its last element.
    pub array: LookupExpression,
    /// The variable created from the removed element.
    pub element: Identifier,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for PopStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for PopStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pop {} => {}", self.array, self.element)
    }
}
