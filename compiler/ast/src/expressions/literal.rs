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

use crate::Node;

use railway_span::Span;

use num_rational::BigRational;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rational number literal, e.g. `42` or `3/4`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LiteralExpression {
    /// The exact value of the literal.
    pub value: BigRational,
    /// The location of the literal in the source.
    pub span: Span,
}

impl Node for LiteralExpression {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for LiteralExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
