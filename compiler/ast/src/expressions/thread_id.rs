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

/// The pseudo-identifier `TID`: the index of the current parallel lane.
///
/// Evaluates to 0 outside parallel calls.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThreadIdExpression {
    /// The location of the pseudo-identifier in the source.
    pub span: Span,
}

impl Node for ThreadIdExpression {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for ThreadIdExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TID")
    }
}

/// The pseudo-identifier `#TID`: the number of lanes in the current parallel call.
///
/// Evaluates to 1 outside parallel calls.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThreadCountExpression {
    /// The location of the pseudo-identifier in the source.
    pub span: Span,
}

impl Node for ThreadCountExpression {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for ThreadCountExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#TID")
    }
}
