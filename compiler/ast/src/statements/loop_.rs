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

use crate::{Expression, Node, Statement};

use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `loop` statement with the dual conditions reversibility demands:
///
/// ```text
/// loop (n > 1)
///     n /= 2
/// pool (n != 10)
/// ```
///
/// Each direction runs the body while its own condition holds; the other
/// direction's condition is asserted false at entry and true at exit, which
/// pins down where a backward run must stop.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LoopStatement {
    /// The condition driving forward iteration.
    pub condition: Expression,
    /// The `pool` condition driving backward iteration; [`None`] only when
    /// the forward condition is mono and the loop never runs backwards.
    pub backward_condition: Option<Expression>,
    /// The statements repeated by the loop.
    pub body: Vec<Statement>,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for LoopStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for LoopStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "loop ({})", self.condition)?;
        for statement in &self.body {
            writeln!(f, "    {statement}")?;
        }
        match &self.backward_condition {
            Some(condition) => write!(f, "pool ({condition})"),
            None => write!(f, "pool ()"),
        }
    }
}
