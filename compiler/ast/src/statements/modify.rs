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

use crate::{Expression, LookupExpression, Node};

use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// An in-place modification operator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ModOperation {
    /// Addition, i.e. `+=`.
    Add,
    /// Subtraction, i.e. `-=`.
    Sub,
    /// Multiplication, i.e. `*=`.
    Mul,
    /// Division, i.e. `/=`.
    Div,
    /// Exponentiation, i.e. `**=`. Mono targets only.
    Pow,
    /// Modulo, i.e. `%=`. Mono targets only.
    Rem,
    /// Logical exclusive-or, i.e. `^=`. Mono targets only.
    Xor,
    /// Logical and, i.e. `&=`. Mono targets only.
    And,
    /// Logical or, i.e. `|=`. Mono targets only.
    Or,
}

impl ModOperation {
    /// The operation applied when the statement runs backwards, or [`None`]
    /// for operations that destroy information and are therefore restricted
    /// to mono targets.
    pub fn inverse(self) -> Option<Self> {
        match self {
            Self::Add => Some(Self::Sub),
            Self::Sub => Some(Self::Add),
            Self::Mul => Some(Self::Div),
            Self::Div => Some(Self::Mul),
            Self::Xor => Some(Self::Xor),
            Self::Pow | Self::Rem | Self::And | Self::Or => None,
        }
    }

    /// May this operation target a non-mono variable?
    ///
    /// `^=` is self-inverse, but the surface language still restricts it to
    /// mono targets together with the other non-arithmetic operators.
    pub fn is_reversible(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div)
    }
}

impl fmt::Display for ModOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
            Self::Pow => "**=",
            Self::Rem => "%=",
            Self::Xor => "^=",
            Self::And => "&=",
            Self::Or => "|=",
        };
        write!(f, "{symbol}")
    }
}

/// An in-place modification of a variable or array slot, e.g. `x[i] += 5`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ModifyStatement {
    /// The variable or array slot being modified.
    pub target: LookupExpression,
    /// The operation applied to the target.
    pub operation: ModOperation,
    /// The right-hand side of the modification. May not mention the target
    /// variable; the parser rejects self-modifications.
    pub value: Expression,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for ModifyStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for ModifyStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.target, self.operation, self.value)
    }
}
