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

use crate::tokenizer::Token;

use railway_errors::{ParserError, Result};
use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::{
    fmt,
    iter::{from_fn, Peekable},
};

/// Eat an identifier, that is, a string matching '[a-zA-Z_][a-zA-Z\d_]*', if any.
fn eat_identifier(input: &mut Peekable<impl Iterator<Item = char>>) -> Option<String> {
    input.peek().filter(|c| c.is_ascii_alphabetic() || **c == '_')?;
    Some(from_fn(|| input.next_if(|c| c.is_ascii_alphanumeric() || c == &'_')).collect())
}

impl Token {
    /// Returns a tuple: [(number length, number token)].
    /// A number literal matches `\d+(/\d+)?`; the slash form needs the raw
    /// input so `1/2` (one token) and `1//2` (floor division) stay distinct.
    fn eat_number(input: &str) -> (usize, Token) {
        let digits = |s: &str| s.bytes().take_while(u8::is_ascii_digit).count();

        let mut len = digits(input);
        let rest = &input[len..];
        if rest.starts_with('/') {
            let denominator = digits(&rest[1..]);
            if denominator > 0 {
                len += 1 + denominator;
            }
        }

        (len, Token::Number(input[..len].to_string()))
    }

    /// Returns a tuple: [(token length, token)] if the next token can be eaten, otherwise returns an error.
    /// The next token can be eaten if the bytes at the front of the given `input` string can be scanned into a token.
    pub(crate) fn eat(input: &str, span: Span) -> Result<(usize, Token)> {
        if input.is_empty() {
            return Err(ParserError::unexpected_eof(span).into());
        }

        let mut chars = input.chars().peekable();

        // Consumes a single character token.
        let single = |input: &mut Peekable<_>, token| {
            input.next();
            Ok((1, token))
        };
        // Consumes a character followed by `on` with `then` if found or `els` otherwise.
        let followed_by = |input: &mut Peekable<_>, on, then, els| {
            input.next();
            Ok(if input.next_if_eq(&on).is_some() {
                (2, then)
            } else {
                (1, els)
            })
        };

        match *chars.peek().ok_or_else(|| ParserError::unexpected_eof(span))? {
            '\n' => return single(&mut chars, Token::Newline),
            x if x.is_ascii_whitespace() => return single(&mut chars, Token::WhiteSpace),
            '\\' => return single(&mut chars, Token::Continuation),
            '$' => {
                // A `$ ... $` comment, possibly spanning lines.
                let mut comment = String::from('$');
                chars.next();

                let mut ended = false;
                for c in chars.by_ref() {
                    comment.push(c);
                    if c == '$' {
                        ended = true;
                        break;
                    }
                }

                if !ended {
                    return Err(ParserError::unclosed_comment(span).into());
                }
                return Ok((comment.len(), Token::Comment(comment)));
            }
            x if x.is_ascii_digit() => return Ok(Self::eat_number(input)),
            '!' => return followed_by(&mut chars, '=', Token::NotEq, Token::Not),
            '&' => return followed_by(&mut chars, '=', Token::AndAssign, Token::And),
            '|' => return followed_by(&mut chars, '=', Token::OrAssign, Token::Or),
            '^' => return followed_by(&mut chars, '=', Token::XorAssign, Token::Xor),
            '%' => return followed_by(&mut chars, '=', Token::RemAssign, Token::Rem),
            '+' => return followed_by(&mut chars, '=', Token::AddAssign, Token::Add),
            '-' => return followed_by(&mut chars, '=', Token::SubAssign, Token::Minus),
            '(' => return single(&mut chars, Token::LeftParen),
            ')' => return single(&mut chars, Token::RightParen),
            '[' => return single(&mut chars, Token::LeftSquare),
            ']' => return single(&mut chars, Token::RightSquare),
            '{' => return single(&mut chars, Token::LeftCurly),
            '}' => return single(&mut chars, Token::RightCurly),
            ',' => return single(&mut chars, Token::Comma),
            '*' => {
                chars.next();
                return Ok(if chars.next_if_eq(&'*').is_some() {
                    if chars.next_if_eq(&'=').is_some() {
                        (3, Token::ExpAssign)
                    } else {
                        (2, Token::Exp)
                    }
                } else if chars.next_if_eq(&'=').is_some() {
                    (2, Token::MulAssign)
                } else {
                    (1, Token::Mul)
                });
            }
            '/' => {
                chars.next();
                return Ok(if chars.next_if_eq(&'/').is_some() {
                    (2, Token::IntDiv)
                } else if chars.next_if_eq(&'=').is_some() {
                    (2, Token::DivAssign)
                } else {
                    (1, Token::Div)
                });
            }
            '<' => {
                chars.next();
                return Ok(if chars.next_if_eq(&'=').is_some() {
                    if chars.next_if_eq(&'>').is_some() {
                        (3, Token::SwapArrow)
                    } else {
                        (2, Token::LtEq)
                    }
                } else {
                    (1, Token::Lt)
                });
            }
            '>' => return followed_by(&mut chars, '=', Token::GtEq, Token::Gt),
            '=' => return followed_by(&mut chars, '>', Token::Arrow, Token::Eq),
            '#' => {
                chars.next();
                return match eat_identifier(&mut chars) {
                    Some(ident) if ident == "TID" => Ok((1 + ident.len(), Token::NumTids)),
                    _ => Err(ParserError::lone_hash(span).into()),
                };
            }
            '.' => {
                chars.next();
                return match eat_identifier(&mut chars) {
                    Some(ident) => Ok((1 + ident.len(), Token::Ident(format!(".{ident}")))),
                    None => Err(ParserError::lone_dot(span).into()),
                };
            }
            _ => (),
        }
        if let Some(ident) = eat_identifier(&mut chars) {
            return Ok((
                ident.len(),
                match &*ident {
                    "barrier" => Token::Barrier,
                    "by" => Token::By,
                    "call" => Token::Call,
                    "catch" => Token::Catch,
                    "do" => Token::Do,
                    "else" => Token::Else,
                    "fi" => Token::Fi,
                    "for" => Token::For,
                    "func" => Token::Func,
                    "global" => Token::Global,
                    "if" => Token::If,
                    "in" => Token::In,
                    "include" => Token::Include,
                    "let" => Token::Let,
                    "loop" => Token::Loop,
                    "mutex" => Token::Mutex,
                    "pool" => Token::Pool,
                    "pop" => Token::Pop,
                    "print" => Token::Print,
                    "promote" => Token::Promote,
                    "push" => Token::Push,
                    "return" => Token::Return,
                    "rof" => Token::Rof,
                    "swap" => Token::Swap,
                    "tensor" => Token::Tensor,
                    "to" => Token::To,
                    "try" => Token::Try,
                    "uncall" => Token::Uncall,
                    "undo" => Token::Undo,
                    "undoreturn" => Token::Undoreturn,
                    "unlet" => Token::Unlet,
                    "xetum" => Token::Xetum,
                    "yield" => Token::Yield,
                    "yrt" => Token::Yrt,
                    "TID" => Token::Tid,
                    _ => Token::Ident(ident),
                },
            ));
        }

        Err(ParserError::could_not_lex(
            input.chars().take_while(|c| !c.is_whitespace()).collect::<String>(),
            span,
        )
        .into())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

impl SpannedToken {
    /// Returns a dummy token at a dummy span.
    pub const fn dummy() -> Self {
        Self {
            token: Token::Eof,
            span: Span::dummy(),
        }
    }
}

impl fmt::Display for SpannedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' @ ", self.token.to_string().trim())?;
        self.span.fmt(f)
    }
}
