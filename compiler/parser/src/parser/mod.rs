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

//! The parser to convert Railway code text into a [`Program`] AST type.
//!
//! This module contains the [`parse()`] method which calls the underlying
//! [`tokenize()`](crate::tokenizer) method to create a new program AST.

use crate::tokenizer::*;

use railway_ast::*;
use railway_errors::Result;
use railway_span::Span;

mod context;
pub use context::*;

pub mod expression;
pub mod file;
pub mod statement;

/// Creates a new program from the given source code text.
pub fn parse(source: &str) -> Result<Program> {
    let mut tokens = ParserContext::new(crate::tokenize(source)?);

    tokens.parse_program()
}
