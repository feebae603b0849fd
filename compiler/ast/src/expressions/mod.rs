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

use serde::{Deserialize, Serialize};
use std::fmt;

mod array_inline;
pub use array_inline::*;
mod array_range;
pub use array_range::*;
mod array_tensor;
pub use array_tensor::*;
mod binary;
pub use binary::*;
mod literal;
pub use literal::*;
mod lookup;
pub use lookup::*;
mod thread_id;
pub use thread_id::*;
mod unary;
pub use unary::*;

/// Expression that evaluates to a value.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// A rational number literal.
    Literal(LiteralExpression),
    /// A variable lookup, with zero or more indices, e.g. `board[i]`.
    Lookup(LookupExpression),
    /// A binary expression, e.g. `n + 1`.
    Binary(BinaryExpression),
    /// A unary expression, e.g. `-x`.
    Unary(UnaryExpression),
    /// An array with its elements listed inline, e.g. `[1, 2, 3]`.
    ArrayInline(ArrayInlineExpression),
    /// A lazy arithmetic range, e.g. `[0 to 10 by 2]`.
    ArrayRange(ArrayRangeExpression),
    /// An array of copies of a fill value, e.g. `[8 tensor 0]`.
    ArrayTensor(ArrayTensorExpression),
    /// The current lane index `TID`.
    ThreadId(ThreadIdExpression),
    /// The lane count `#TID`.
    ThreadCount(ThreadCountExpression),
}

impl Expression {
    /// Is this expression mono-tainted, i.e. does its value depend on any
    /// mono variable?
    ///
    /// The taint is purely syntactic, so it is fixed at parse time.
    pub fn is_mono(&self) -> bool {
        use Expression::*;
        match self {
            Literal(_) | ThreadId(_) | ThreadCount(_) => false,
            Lookup(lookup) => lookup.is_mono(),
            Binary(binary) => binary.left.is_mono() || binary.right.is_mono(),
            Unary(unary) => unary.operand.is_mono(),
            ArrayInline(array) => array.elements.iter().any(Expression::is_mono),
            ArrayRange(range) => {
                range.start.is_mono()
                    || range.stop.is_mono()
                    || range.step.as_deref().is_some_and(Expression::is_mono)
            }
            ArrayTensor(tensor) => tensor.length.is_mono() || tensor.fill.is_mono(),
        }
    }

    /// Does this expression mention the variable `name` anywhere, including
    /// inside index expressions?
    ///
    /// This drives the self-modification check.
    pub fn references(&self, name: &str) -> bool {
        use Expression::*;
        match self {
            Literal(_) | ThreadId(_) | ThreadCount(_) => false,
            Lookup(lookup) => lookup.references(name),
            Binary(binary) => binary.left.references(name) || binary.right.references(name),
            Unary(unary) => unary.operand.references(name),
            ArrayInline(array) => array.elements.iter().any(|element| element.references(name)),
            ArrayRange(range) => {
                range.start.references(name)
                    || range.stop.references(name)
                    || range.step.as_deref().is_some_and(|step| step.references(name))
            }
            ArrayTensor(tensor) => tensor.length.references(name) || tensor.fill.references(name),
        }
    }
}

impl Node for Expression {
    fn span(&self) -> Span {
        use Expression::*;
        match self {
            Literal(n) => n.span(),
            Lookup(n) => n.span(),
            Binary(n) => n.span(),
            Unary(n) => n.span(),
            ArrayInline(n) => n.span(),
            ArrayRange(n) => n.span(),
            ArrayTensor(n) => n.span(),
            ThreadId(n) => n.span(),
            ThreadCount(n) => n.span(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expression::*;
        match self {
            Literal(n) => n.fmt(f),
            Lookup(n) => n.fmt(f),
            Binary(n) => n.fmt(f),
            Unary(n) => n.fmt(f),
            ArrayInline(n) => n.fmt(f),
            ArrayRange(n) => n.fmt(f),
            ArrayTensor(n) => n.fmt(f),
            ThreadId(n) => n.fmt(f),
            ThreadCount(n) => n.fmt(f),
        }
    }
}
