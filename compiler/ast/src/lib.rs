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

//! The abstract syntax tree (AST) for the Railway language.
//!
//! The AST is a pure tree: no node refers back to its parent, which is what
//! lets the execution engine walk the same nodes in either time direction.
//! Statements know whether they are mono (forward-only); the taint is
//! derived syntactically from the identifiers inside them.

#![forbid(unsafe_code)]

pub mod common;
pub use common::*;

pub mod expressions;
pub use expressions::*;

pub mod functions;
pub use functions::*;

pub mod program;
pub use program::*;

pub mod statements;
pub use statements::*;
