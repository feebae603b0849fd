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

/// An `if` statement with the dual conditions reversibility demands:
///
/// ```text
/// if (ball_y <= 0)
///     ball_speed_y *= -1
/// fi (ball_y - ball_speed_y <= 0)
/// ```
///
/// Forwards, the `if` condition selects the branch and the `fi` condition
/// must agree afterwards; backwards the roles swap. An empty `fi ()` reuses
/// the forward condition.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    /// The condition evaluated before the branch when running forwards.
    pub condition: Expression,
    /// The `fi` condition; [`None`] when `fi ()` was written, meaning it
    /// equals the forward condition.
    pub backward_condition: Option<Expression>,
    /// The statements run when the condition is truthy.
    pub then: Vec<Statement>,
    /// The statements run when the condition is falsy.
    pub otherwise: Vec<Statement>,
    /// The location of the statement in the source.
    pub span: Span,
}

impl IfStatement {
    /// The condition checked before the branch in the given direction.
    pub fn entry_condition(&self, backwards: bool) -> &Expression {
        if backwards {
            self.backward_condition.as_ref().unwrap_or(&self.condition)
        } else {
            &self.condition
        }
    }

    /// The condition checked after the branch in the given direction.
    pub fn exit_condition(&self, backwards: bool) -> &Expression {
        self.entry_condition(!backwards)
    }
}

impl Node for IfStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for IfStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "if ({})", self.condition)?;
        for statement in &self.then {
            writeln!(f, "    {statement}")?;
        }
        if !self.otherwise.is_empty() {
            writeln!(f, "else")?;
            for statement in &self.otherwise {
                writeln!(f, "    {statement}")?;
            }
        }
        match &self.backward_condition {
            Some(condition) => write!(f, "fi ({condition})"),
            None => write!(f, "fi ()"),
        }
    }
}
