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

/// An identifier in a Railway program.
///
/// Mono identifiers keep their leading `.` in `name`, so the same string
/// that appeared in the source is used for scope lookups and diagnostics.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// The name of the identifier, including the `.` of mono names.
    pub name: String,
    /// The location of the name in the source.
    pub span: Span,
}

impl Identifier {
    /// Returns a new identifier with the given name and span.
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self { name: name.into(), span }
    }

    /// Is this a mono identifier, existing only during forward execution?
    pub fn is_mono(&self) -> bool {
        self.name.starts_with('.')
    }
}

impl Node for Identifier {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
