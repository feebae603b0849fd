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

use crate::{Expression, Function, Identifier, Node};

use railway_span::Span;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level `global` declaration, e.g. `global board_size = 8`.
///
/// Globals are evaluated once when the program is loaded, in declaration
/// order, and are read-only from inside functions. A local binding of the
/// same name shadows the global while it lives.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GlobalDeclaration {
    /// The name of the global.
    pub variable: Identifier,
    /// Its value, which may refer to globals declared above it.
    pub value: Expression,
    /// The location of the declaration in the source.
    pub span: Span,
}

impl Node for GlobalDeclaration {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for GlobalDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "global {} = {}", self.variable, self.value)
    }
}

/// A parsed Railway program: the global declarations and the function table.
#[derive(Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    /// The global declarations, in source order.
    pub globals: Vec<GlobalDeclaration>,
    /// All functions keyed by name, in source order.
    pub functions: IndexMap<String, Function>,
}

impl Program {
    /// Serializes the program into a JSON string, mostly useful for
    /// inspecting what the parser produced.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for global in &self.globals {
            writeln!(f, "{global}")?;
        }
        for (_, function) in &self.functions {
            writeln!(f, "{function}")?;
        }
        Ok(())
    }
}
