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

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents all valid Railway syntax tokens.
///
/// Railway is line oriented: `Newline` terminates a logical line and is
/// significant to the parser, while a `Continuation` (a trailing `\`)
/// splices the following physical line onto the current one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    // Lexical Grammar
    // Literals
    Comment(String),
    Ident(String),
    Number(String),
    WhiteSpace,
    Continuation,
    Newline,

    // Symbols
    Not,
    And,
    Or,
    Xor,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Minus,
    Mul,
    Div,
    IntDiv,
    Rem,
    Exp,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ExpAssign,
    RemAssign,
    XorAssign,
    AndAssign,
    OrAssign,
    SwapArrow,
    Arrow,
    LeftParen,
    RightParen,
    LeftSquare,
    RightSquare,
    LeftCurly,
    RightCurly,
    Comma,

    // Regular Keywords
    Barrier,
    By,
    Call,
    Catch,
    Do,
    Else,
    Fi,
    For,
    Func,
    Global,
    If,
    In,
    Include,
    Let,
    Loop,
    Mutex,
    Pool,
    Pop,
    Print,
    Promote,
    Push,
    Return,
    Rof,
    Swap,
    Tensor,
    To,
    Try,
    Uncall,
    Undo,
    Undoreturn,
    Unlet,
    Xetum,
    Yield,
    Yrt,

    // Pseudo identifiers
    Tid,
    NumTids,

    // Meta Tokens
    Eof,
}

/// Represents all valid Railway keyword tokens.
pub const KEYWORD_TOKENS: &[Token] = &[
    Token::Barrier,
    Token::By,
    Token::Call,
    Token::Catch,
    Token::Do,
    Token::Else,
    Token::Fi,
    Token::For,
    Token::Func,
    Token::Global,
    Token::If,
    Token::In,
    Token::Include,
    Token::Let,
    Token::Loop,
    Token::Mutex,
    Token::Pool,
    Token::Pop,
    Token::Print,
    Token::Promote,
    Token::Push,
    Token::Return,
    Token::Rof,
    Token::Swap,
    Token::Tensor,
    Token::To,
    Token::Try,
    Token::Uncall,
    Token::Undo,
    Token::Undoreturn,
    Token::Unlet,
    Token::Xetum,
    Token::Yield,
    Token::Yrt,
];

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Token::*;
        match self {
            Comment(s) => write!(f, "{s}"),
            Ident(s) => write!(f, "{s}"),
            Number(s) => write!(f, "{s}"),
            WhiteSpace => write!(f, "whitespace"),
            Continuation => write!(f, "\\"),
            Newline => write!(f, "newline"),

            Not => write!(f, "!"),
            And => write!(f, "&"),
            Or => write!(f, "|"),
            Xor => write!(f, "^"),
            Eq => write!(f, "="),
            NotEq => write!(f, "!="),
            Lt => write!(f, "<"),
            LtEq => write!(f, "<="),
            Gt => write!(f, ">"),
            GtEq => write!(f, ">="),
            Add => write!(f, "+"),
            Minus => write!(f, "-"),
            Mul => write!(f, "*"),
            Div => write!(f, "/"),
            IntDiv => write!(f, "//"),
            Rem => write!(f, "%"),
            Exp => write!(f, "**"),
            AddAssign => write!(f, "+="),
            SubAssign => write!(f, "-="),
            MulAssign => write!(f, "*="),
            DivAssign => write!(f, "/="),
            ExpAssign => write!(f, "**="),
            RemAssign => write!(f, "%="),
            XorAssign => write!(f, "^="),
            AndAssign => write!(f, "&="),
            OrAssign => write!(f, "|="),
            SwapArrow => write!(f, "<=>"),
            Arrow => write!(f, "=>"),
            LeftParen => write!(f, "("),
            RightParen => write!(f, ")"),
            LeftSquare => write!(f, "["),
            RightSquare => write!(f, "]"),
            LeftCurly => write!(f, "{{"),
            RightCurly => write!(f, "}}"),
            Comma => write!(f, ","),

            Barrier => write!(f, "barrier"),
            By => write!(f, "by"),
            Call => write!(f, "call"),
            Catch => write!(f, "catch"),
            Do => write!(f, "do"),
            Else => write!(f, "else"),
            Fi => write!(f, "fi"),
            For => write!(f, "for"),
            Func => write!(f, "func"),
            Global => write!(f, "global"),
            If => write!(f, "if"),
            In => write!(f, "in"),
            Include => write!(f, "include"),
            Let => write!(f, "let"),
            Loop => write!(f, "loop"),
            Mutex => write!(f, "mutex"),
            Pool => write!(f, "pool"),
            Pop => write!(f, "pop"),
            Print => write!(f, "print"),
            Promote => write!(f, "promote"),
            Push => write!(f, "push"),
            Return => write!(f, "return"),
            Rof => write!(f, "rof"),
            Swap => write!(f, "swap"),
            Tensor => write!(f, "tensor"),
            To => write!(f, "to"),
            Try => write!(f, "try"),
            Uncall => write!(f, "uncall"),
            Undo => write!(f, "undo"),
            Undoreturn => write!(f, "undoreturn"),
            Unlet => write!(f, "unlet"),
            Xetum => write!(f, "xetum"),
            Yield => write!(f, "yield"),
            Yrt => write!(f, "yrt"),

            Tid => write!(f, "TID"),
            NumTids => write!(f, "#TID"),

            Eof => write!(f, "<eof>"),
        }
    }
}
