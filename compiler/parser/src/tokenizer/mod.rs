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

//! The tokenizer to convert Railway code text into tokens.
//!
//! This module contains the [`tokenize()`] method which breaks down string
//! text into tokens, separated by whitespace. Newlines are significant (they
//! terminate statements) and survive tokenization; a `\` continuation
//! swallows the newline that follows it.

pub(crate) mod token;

pub use self::token::KEYWORD_TOKENS;
pub(crate) use self::token::*;

pub(crate) mod lexer;
pub(crate) use self::lexer::*;

use railway_errors::Result;
use railway_span::Span;

/// Creates a new vector of spanned tokens from the given source code text.
pub(crate) fn tokenize(input: &str) -> Result<Vec<SpannedToken>> {
    let mut tokens = Vec::new();
    let mut index = 0usize;
    let mut line = 1usize;
    let mut column = 0usize;
    // Set while a `\` continuation is waiting to swallow its newline.
    let mut continuing = false;

    while input.len() > index {
        let position = Span::new(line, column, column);
        let (token_len, token) = Token::eat(&input[index..], position)?;
        let consumed = &input[index..index + token_len];
        index += token_len;

        let span = Span::new(line, column, column + token_len);

        // Track the physical position. Only comments can contain newlines.
        match consumed.rfind('\n') {
            Some(offset) => {
                line += consumed.matches('\n').count();
                column = token_len - offset - 1;
            }
            None => column += token_len,
        }

        match token {
            Token::WhiteSpace => continue,
            Token::Continuation => continuing = true,
            Token::Newline if continuing => continuing = false,
            _ => tokens.push(SpannedToken { token, span }),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_strings(input: &str) -> Vec<String> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|spanned| spanned.token.to_string())
            .collect()
    }

    #[test]
    fn test_tokenizer() {
        let output = token_strings("let x = 6\nx += 5/2 ** 2\nswap x <=> y");
        let expected = [
            "let", "x", "=", "6", "newline", "x", "+=", "5/2", "**", "2", "newline", "swap", "x", "<=>", "y",
        ];
        assert_eq!(output, expected);
    }

    #[test]
    fn number_literals_and_floor_division() {
        // `5/2` is one rational token, `5 / 2` and `5//2` are not.
        assert_eq!(token_strings("5/2"), ["5/2"]);
        assert_eq!(token_strings("5 / 2"), ["5", "/", "2"]);
        assert_eq!(token_strings("5//2"), ["5", "//", "2"]);
        assert_eq!(token_strings("5/=2"), ["5", "/=", "2"]);
    }

    #[test]
    fn continuation_swallows_the_newline() {
        let output = token_strings("let x = \\\n    6\nprint x");
        assert_eq!(output, ["let", "x", "=", "6", "newline", "print", "x"]);
    }

    #[test]
    fn comments_may_span_lines() {
        let output = token_strings("x $ first $ += $ second\nstill second $ 1");
        assert_eq!(output[0], "x");
        assert_eq!(output[2], "+=");
        assert_eq!(*output.last().unwrap(), "1");
    }

    #[test]
    fn unclosed_comment_is_rejected() {
        let err = tokenize("x += 1 $ never closed").unwrap_err();
        assert_eq!(err.error_code(), railway_errors::ParserError::unclosed_comment(Span::dummy()).error_code());
    }

    #[test]
    fn mono_names_keep_their_dot() {
        assert_eq!(token_strings(".best_index"), [".best_index"]);
    }

    #[test]
    fn pseudo_identifiers() {
        assert_eq!(token_strings("TID #TID"), ["TID", "#TID"]);
    }

    #[test]
    fn spans_point_into_the_line() {
        let tokens = tokenize("let x = 6\nx += 5").unwrap();
        let plus = tokens.iter().find(|t| t.token == Token::AddAssign).unwrap();
        assert_eq!(plus.span, Span::new(2, 2, 4));
    }
}
