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

/// An array expression listing its elements inline, e.g. `[1, [2, 3], x]`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ArrayInlineExpression {
    /// The elements of the array, in order.
    pub elements: Vec<Expression>,
    /// The location of the whole expression in the source.
    pub span: Span,
}

impl Node for ArrayInlineExpression {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for ArrayInlineExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "]")
    }
}
