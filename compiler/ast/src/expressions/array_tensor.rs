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

/// A tensor expression building an array of copies, e.g. `[8 tensor 0]`.
///
/// Higher-rank tensors nest, e.g. `[3 tensor [3 tensor 0]]`; each element is
/// a deep copy of the fill value, so no two slots alias.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ArrayTensorExpression {
    /// The number of elements to build.
    pub length: Box<Expression>,
    /// The value each element is a copy of.
    pub fill: Box<Expression>,
    /// The location of the whole expression in the source.
    pub span: Span,
}

impl Node for ArrayTensorExpression {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for ArrayTensorExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} tensor {}]", self.length, self.fill)
    }
}
