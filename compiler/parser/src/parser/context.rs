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

use crate::tokenizer::*;

use railway_ast::Identifier;
use railway_errors::{ParserError, Result};
use railway_span::Span;

use std::fmt::Display;
use std::mem;

/// Stores a program in tokenized format plus additional context.
/// May be converted into a [`railway_ast::Program`] AST by parsing all tokens.
pub struct ParserContext {
    /// All un-bumped tokens.
    tokens: Vec<SpannedToken>,
    /// The current token, i.e., if `p.tokens = ['3', *, '4']`,
    /// then after a `p.bump()`, we'll have `p.token = '3'`.
    pub(crate) token: SpannedToken,
    /// The previous token, i.e., if `p.tokens = ['3', *, '4']`,
    /// then after two `p.bump()`s, we'll have `p.token = '*'` and `p.prev_token = '3'`.
    pub(crate) prev_token: SpannedToken,

    /// True while parsing the direct children of a `try` body, where `catch`
    /// statements are legal.
    pub(crate) in_try: bool,
    /// True while parsing anywhere inside a mutex body, where barriers and
    /// further mutexes are not.
    pub(crate) in_mutex: bool,
}

impl ParserContext {
    /// Returns a new [`ParserContext`] type given a vector of tokens.
    pub fn new(mut tokens: Vec<SpannedToken>) -> Self {
        // Strip out comments.
        tokens.retain(|x| !matches!(x.token, Token::Comment(_)));
        // For performance we reverse so that we get cheap `.pop()`s.
        tokens.reverse();

        let token = SpannedToken::dummy();
        let mut p = Self {
            in_try: false,
            in_mutex: false,
            prev_token: token.clone(),
            token,
            tokens,
        };
        p.bump();
        p
    }

    /// Advances the parser cursor by one token.
    pub fn bump(&mut self) {
        // Extract next token, or `Eof` if there was none.
        let next_token = self.tokens.pop().unwrap_or_else(|| SpannedToken {
            token: Token::Eof,
            span: self.token.span,
        });

        // Set the new token.
        self.prev_token = mem::replace(&mut self.token, next_token);
    }

    /// Checks whether the current token is `token`.
    pub fn check(&self, tok: &Token) -> bool {
        &self.token.token == tok
    }

    /// Removes the next token if it exists and returns it, or `false` if
    /// the next token does not exist.
    pub fn eat(&mut self, token: &Token) -> bool {
        self.check(token).then(|| self.bump()).is_some()
    }

    /// Eats any of the given `tokens`, returning `true` if anything was eaten.
    pub fn eat_any(&mut self, tokens: &[Token]) -> bool {
        tokens.iter().any(|x| self.check(x)).then(|| self.bump()).is_some()
    }

    /// Returns true if the next token exists.
    pub fn has_next(&self) -> bool {
        !matches!(self.token.token, Token::Eof)
    }

    /// Eats the next token if it is an identifier and returns it.
    pub fn eat_identifier(&mut self) -> Option<Identifier> {
        if let Token::Ident(name) = &self.token.token {
            let name = name.clone();
            self.bump();
            return Some(Identifier::new(name, self.prev_token.span));
        }
        None
    }

    /// Expects an [`Identifier`], or errors.
    pub fn expect_identifier(&mut self) -> Result<Identifier> {
        self.eat_identifier()
            .ok_or_else(|| ParserError::unexpected(&self.token.token, "a name", self.token.span).into())
    }

    /// Returns an unexpected error at the current token.
    pub(crate) fn unexpected<T>(&self, expected: impl Display) -> Result<T> {
        Err(ParserError::unexpected(&self.token.token, expected, self.token.span).into())
    }

    /// Eats the expected `token`, or errors.
    pub fn expect(&mut self, token: &Token) -> Result<Span> {
        if self.eat(token) {
            Ok(self.prev_token.span)
        } else {
            self.unexpected(format!("'{token}'"))
        }
    }

    /// Eats one of the expected `tokens`, or errors.
    pub fn expect_any(&mut self, tokens: &[Token]) -> Result<Span> {
        if self.eat_any(tokens) {
            Ok(self.prev_token.span)
        } else {
            self.unexpected(tokens.iter().map(|x| format!("'{x}'")).collect::<Vec<_>>().join(", "))
        }
    }

    /// Eats the logical end of a line: a newline, or the end of the file.
    pub fn expect_line_end(&mut self) -> Result<()> {
        if self.check(&Token::Eof) || self.eat(&Token::Newline) {
            Ok(())
        } else {
            self.unexpected("the end of the line")
        }
    }

    /// Eats any number of blank lines.
    pub fn eat_newlines(&mut self) {
        while self.eat(&Token::Newline) {}
    }

    /// Parses a list of `T`s using `inner`.
    /// The opening and closing delimiters are `open` and `close`,
    /// and elements in the list are separated by `sep`.
    pub(super) fn parse_list<T>(
        &mut self,
        open: Token,
        close: Token,
        sep: Token,
        mut inner: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<(Vec<T>, Span)> {
        let mut list = Vec::new();

        // Parse opening delimiter.
        let open_span = self.expect(&open)?;

        while !self.check(&close) {
            // Parse the element.
            list.push(inner(self)?);
            // Parse the separator.
            if !self.eat(&sep) {
                break;
            }
        }

        // Parse closing delimiter.
        let span = open_span + self.expect(&close)?;

        Ok((list, span))
    }

    /// Parse a list of names separated by `,` and delimited by parens.
    pub(super) fn parse_paren_name_list(&mut self) -> Result<(Vec<Identifier>, Span)> {
        self.parse_list(Token::LeftParen, Token::RightParen, Token::Comma, |p| p.expect_identifier())
    }
}
