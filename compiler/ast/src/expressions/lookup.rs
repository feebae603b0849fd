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

use crate::{Expression, Identifier, Node};

use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A variable lookup with zero or more index expressions, e.g. `x` or `board[i][j]`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LookupExpression {
    /// The variable being looked up.
    pub variable: Identifier,
    /// The index expressions, outermost first.
    pub indices: Vec<Expression>,
    /// The location of the whole lookup in the source.
    pub span: Span,
}

impl LookupExpression {
    /// Is this lookup mono-tainted, either through its variable or an index?
    pub fn is_mono(&self) -> bool {
        self.variable.is_mono() || self.indices.iter().any(Expression::is_mono)
    }

    /// Does this lookup mention `name`, as its variable or inside an index?
    pub fn references(&self, name: &str) -> bool {
        self.variable.name == name || self.indices.iter().any(|index| index.references(name))
    }
}

impl Node for LookupExpression {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for LookupExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variable)?;
        for index in &self.indices {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}
