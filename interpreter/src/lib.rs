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

//! The execution engine for the Railway programming language.
//!
//! Railway is reversible: the same AST walks forwards and backwards, and
//! this crate implements both directions with one recursive engine. The
//! pieces are the value model ([`Value`]), the variable cell ([`Variable`]),
//! per-activation scopes ([`Scope`]), the operator tables ([`ops`]), the
//! walker itself ([`Engine`]) and the synchronisation primitives backing
//! parallel calls.

#![forbid(unsafe_code)]

pub mod engine;
pub use engine::Engine;

pub mod ops;

pub mod output;
pub use output::{Output, OutputBuffer};

mod parallel;

pub mod scope;
pub use scope::Scope;

pub mod value;
pub use value::Value;

pub mod variable;
pub use variable::Variable;
