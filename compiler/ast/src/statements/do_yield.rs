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

use crate::{Node, Statement};

use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `do … yield … undo` statement.
///
/// Forwards: the do-block runs forwards, the yield-block runs forwards, then
/// the do-block runs backwards, so nothing the do-block created survives.
/// Backwards the yield-block direction flips, making the whole construct
/// self-inverse.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DoYieldStatement {
    /// The statements establishing (and later withdrawing) the local context.
    pub do_block: Vec<Statement>,
    /// The statements run inside the established context.
    pub yield_block: Vec<Statement>,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for DoYieldStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for DoYieldStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "do")?;
        for statement in &self.do_block {
            writeln!(f, "    {statement}")?;
        }
        writeln!(f, "yield")?;
        for statement in &self.yield_block {
            writeln!(f, "    {statement}")?;
        }
        write!(f, "undo")
    }
}
