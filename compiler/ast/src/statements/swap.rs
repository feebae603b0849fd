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

use crate::{LookupExpression, Node};

use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `swap` statement exchanging two values, e.g. `swap x <=> board[i]`.
///
/// Self-inverse; the engine runs it identically in both directions.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SwapStatement {
    /// The left side of the exchange.
    pub left: LookupExpression,
    /// The right side of the exchange.
    pub right: LookupExpression,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for SwapStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for SwapStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swap {} <=> {}", self.left, self.right)
    }
}
