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

use super::*;

use railway_errors::ParserError;

use indexmap::IndexMap;
use std::collections::HashSet;

impl ParserContext {
    /// Returns a [`Program`] AST if all tokens parse as a Railway file:
    /// any number of `global` declarations and `func` definitions.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut globals: Vec<GlobalDeclaration> = Vec::new();
        let mut functions = IndexMap::new();

        loop {
            self.eat_newlines();
            match &self.token.token {
                Token::Global => {
                    let global = self.parse_global_declaration()?;
                    if globals.iter().any(|existing| existing.variable.name == global.variable.name) {
                        return Err(ParserError::duplicate_global(&global.variable.name, global.span).into());
                    }
                    globals.push(global);
                }
                Token::Func => {
                    let function = self.parse_function()?;
                    let name = function.identifier.name.clone();
                    let span = function.span;
                    if functions.insert(name.clone(), function).is_some() {
                        return Err(ParserError::duplicate_function(name, span).into());
                    }
                }
                Token::Include => return Err(ParserError::include_unsupported(self.token.span).into()),
                Token::Eof => break,
                _ => return self.unexpected("a function or global declaration"),
            }
        }

        Ok(Program { globals, functions })
    }

    /// Returns a [`GlobalDeclaration`] AST node, e.g. `global board_size = 8`.
    fn parse_global_declaration(&mut self) -> Result<GlobalDeclaration> {
        let start = self.expect(&Token::Global)?;
        let variable = self.expect_identifier()?;
        self.expect(&Token::Eq)?;
        let value = self.parse_expression()?;
        let span = start + value.span();

        if variable.is_mono() || value.is_mono() {
            return Err(ParserError::mono_global(&variable.name, span).into());
        }

        self.expect_line_end()?;
        Ok(GlobalDeclaration { variable, value, span })
    }

    /// Returns a [`Function`] AST node:
    ///
    /// ```text
    /// func name(borrowed, …)(stolen, …)
    ///     statements…
    /// return (names, …)
    /// ```
    ///
    /// with `undoreturn` in place of `return` for self-undoing functions.
    fn parse_function(&mut self) -> Result<Function> {
        let start = self.expect(&Token::Func)?;
        let identifier = self.expect_identifier()?;
        let (borrowed, _) = self.parse_paren_name_list()?;
        let (stolen, _) = self.parse_paren_name_list()?;
        self.expect_line_end()?;

        let body = self.parse_block(&[Token::Return, Token::Undoreturn])?;

        self.expect_any(&[Token::Return, Token::Undoreturn])?;
        let undoreturn = self.prev_token.token == Token::Undoreturn;
        let (returns, end) = self.parse_paren_name_list()?;
        self.expect_line_end()?;

        // Parameter and return names must be distinct; two parameters with
        // one name could never both be rebound into the caller.
        let mut seen = HashSet::new();
        for name in borrowed.iter().chain(&stolen) {
            if !seen.insert(name.name.as_str()) {
                return Err(ParserError::duplicate_parameter(&name.name, name.span).into());
            }
        }
        let mut returned = HashSet::new();
        for name in &returns {
            if !returned.insert(name.name.as_str()) {
                return Err(ParserError::duplicate_parameter(&name.name, name.span).into());
            }
        }

        Ok(Function {
            identifier,
            borrowed,
            stolen,
            body,
            returns,
            undoreturn,
            span: start + end,
        })
    }
}
