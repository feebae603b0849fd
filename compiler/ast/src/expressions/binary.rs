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

/// A binary operator.
///
/// The precedence levels, tightest first, are: `**`; `*` `/` `//` `%`;
/// `+` `-`; the comparisons; `^` `|` `&`. All levels fold left-associatively.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BinaryOperation {
    /// Exponentiation, i.e. `**`.
    Pow,
    /// Multiplication, i.e. `*`.
    Mul,
    /// Division, i.e. `/`.
    Div,
    /// Floor division, i.e. `//`.
    IntDiv,
    /// Modulo, i.e. `%`, with the sign conventions of floor division.
    Rem,
    /// Addition, i.e. `+`.
    Add,
    /// Subtraction, i.e. `-`.
    Sub,
    /// Less than comparison, i.e. `<`.
    Lt,
    /// Less than or equal comparison, i.e. `<=`.
    Le,
    /// Greater than comparison, i.e. `>`.
    Gt,
    /// Greater than or equal comparison, i.e. `>=`.
    Ge,
    /// Equality, i.e. `=`.
    Eq,
    /// Inequality, i.e. `!=`.
    Neq,
    /// Logical exclusive-or over truthiness, i.e. `^`.
    Xor,
    /// Logical or over truthiness, i.e. `|`.
    Or,
    /// Logical and over truthiness, i.e. `&`.
    And,
}

impl fmt::Display for BinaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperation::*;
        let symbol = match self {
            Pow => "**",
            Mul => "*",
            Div => "/",
            IntDiv => "//",
            Rem => "%",
            Add => "+",
            Sub => "-",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            Eq => "=",
            Neq => "!=",
            Xor => "^",
            Or => "|",
            And => "&",
        };
        write!(f, "{symbol}")
    }
}

/// A binary expression, e.g. `n + 1`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    /// The left operand of the expression.
    pub left: Box<Expression>,
    /// The right operand of the expression.
    pub right: Box<Expression>,
    /// The operator defining the meaning of the expression.
    pub op: BinaryOperation,
    /// The location of the whole expression in the source.
    pub span: Span,
}

impl Node for BinaryExpression {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for BinaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op, self.right)
    }
}
