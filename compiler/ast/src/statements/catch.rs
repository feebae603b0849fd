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

/// A `catch` statement inside a `try` body, e.g. `catch (k = 3)`.
///
/// A truthy condition rejects the current candidate: the body rewinds to
/// the try entry and the next candidate is attempted. Catches do nothing
/// during backward execution.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CatchStatement {
    /// The condition rejecting the current candidate when truthy.
    pub condition: Expression,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for CatchStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for CatchStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "catch ({})", self.condition)
    }
}
