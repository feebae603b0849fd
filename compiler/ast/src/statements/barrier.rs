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

use crate::{Identifier, Node};

use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `barrier` statement, e.g. `barrier rendezvous`.
///
/// Every lane of the current parallel call must reach a barrier of this
/// name before any lane proceeds. Its own inverse; outside a parallel call
/// it does nothing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BarrierStatement {
    /// The name all lanes must agree on.
    pub name: Identifier,
    /// The location of the statement in the source.
    pub span: Span,
}

impl Node for BarrierStatement {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for BarrierStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "barrier {}", self.name)
    }
}
