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

/// A half-open arithmetic range, e.g. `[0 to 10]` or `[1 to 0 by -1/2]`.
///
/// Ranges are lazy when driving a `for` or `try`: element `i` is
/// materialised as `start + i * step` without building the whole array.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ArrayRangeExpression {
    /// The first element of the range.
    pub start: Box<Expression>,
    /// The excluded bound of the range.
    pub stop: Box<Expression>,
    /// The step between elements; 1 when absent.
    pub step: Option<Box<Expression>>,
    /// The location of the whole expression in the source.
    pub span: Span,
}

impl Node for ArrayRangeExpression {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for ArrayRangeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} to {}", self.start, self.stop)?;
        if let Some(step) = &self.step {
            write!(f, " by {step}")?;
        }
        write!(f, "]")
    }
}
