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

use railway_errors::{ParserError, Result};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

impl ParserContext {
    /// Returns an [`Expression`] AST node if the next tokens represent an expression.
    pub(crate) fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_logical_expression()
    }

    /// Constructs a binary expression `left op right`.
    fn bin_expr(left: Expression, right: Expression, op: BinaryOperation) -> Expression {
        Expression::Binary(BinaryExpression {
            span: left.span() + right.span(),
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Parses a left-associative binary expression `<left> token <right>` using `f` for left/right.
    /// The `token` is translated to `op` in the AST.
    fn parse_bin_expr(
        &mut self,
        tokens: &[Token],
        mut f: impl FnMut(&mut Self) -> Result<Expression>,
    ) -> Result<Expression> {
        let mut expr = f(self)?;
        while let Some(op) = self.eat_bin_op(tokens) {
            expr = Self::bin_expr(expr, f(self)?, op);
        }
        Ok(expr)
    }

    /// Eats one of binary operators matching any in `tokens`.
    fn eat_bin_op(&mut self, tokens: &[Token]) -> Option<BinaryOperation> {
        self.eat_any(tokens).then(|| match &self.prev_token.token {
            Token::Eq => BinaryOperation::Eq,
            Token::NotEq => BinaryOperation::Neq,
            Token::Lt => BinaryOperation::Lt,
            Token::LtEq => BinaryOperation::Le,
            Token::Gt => BinaryOperation::Gt,
            Token::GtEq => BinaryOperation::Ge,
            Token::Add => BinaryOperation::Add,
            Token::Minus => BinaryOperation::Sub,
            Token::Mul => BinaryOperation::Mul,
            Token::Div => BinaryOperation::Div,
            Token::IntDiv => BinaryOperation::IntDiv,
            Token::Rem => BinaryOperation::Rem,
            Token::Exp => BinaryOperation::Pow,
            Token::Xor => BinaryOperation::Xor,
            Token::Or => BinaryOperation::Or,
            Token::And => BinaryOperation::And,
            _ => unreachable!("`eat_bin_op` shouldn't produce this"),
        })
    }

    /// Returns an [`Expression`] AST node if the next tokens represent one of
    /// the loosest-binding binary operators `^`, `|` or `&`.
    ///
    /// Otherwise, tries to parse the next token using [`Self::parse_comparison_expression`].
    fn parse_logical_expression(&mut self) -> Result<Expression> {
        self.parse_bin_expr(&[Token::Xor, Token::Or, Token::And], Self::parse_comparison_expression)
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// comparison expression.
    ///
    /// Otherwise, tries to parse the next token using [`Self::parse_additive_expression`].
    fn parse_comparison_expression(&mut self) -> Result<Expression> {
        self.parse_bin_expr(
            &[Token::Lt, Token::LtEq, Token::Gt, Token::GtEq, Token::Eq, Token::NotEq],
            Self::parse_additive_expression,
        )
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// binary addition or subtraction expression.
    ///
    /// Otherwise, tries to parse the next token using [`Self::parse_multiplicative_expression`].
    fn parse_additive_expression(&mut self) -> Result<Expression> {
        self.parse_bin_expr(&[Token::Add, Token::Minus], Self::parse_multiplicative_expression)
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// binary multiplication, division, floor-division or modulo expression.
    ///
    /// Otherwise, tries to parse the next token using [`Self::parse_exponential_expression`].
    fn parse_multiplicative_expression(&mut self) -> Result<Expression> {
        self.parse_bin_expr(
            &[Token::Mul, Token::Div, Token::IntDiv, Token::Rem],
            Self::parse_exponential_expression,
        )
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// binary exponentiation expression.
    ///
    /// Otherwise, tries to parse the next token using [`Self::parse_unary_expression`].
    fn parse_exponential_expression(&mut self) -> Result<Expression> {
        self.parse_bin_expr(&[Token::Exp], Self::parse_unary_expression)
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// unary not or negate expression.
    ///
    /// Otherwise, tries to parse the next token using [`Self::parse_primary_expression`].
    pub(super) fn parse_unary_expression(&mut self) -> Result<Expression> {
        let mut ops = Vec::new();
        while self.eat_any(&[Token::Not, Token::Minus]) {
            let operation = match self.prev_token.token {
                Token::Not => UnaryOperation::Not,
                Token::Minus => UnaryOperation::Negate,
                _ => unreachable!("`parse_unary_expression` shouldn't produce this"),
            };
            ops.push((operation, self.prev_token.span));
        }
        let mut inner = self.parse_primary_expression()?;
        for (op, op_span) in ops.into_iter().rev() {
            inner = Expression::Unary(UnaryExpression {
                span: op_span + inner.span(),
                op,
                operand: Box::new(inner),
            });
        }
        Ok(inner)
    }

    /// Returns a [`LookupExpression`] AST node: a name followed by zero or
    /// more bracketed index expressions.
    ///
    /// Also used by the statement parser for modification and swap targets.
    pub(crate) fn parse_lookup(&mut self) -> Result<LookupExpression> {
        let variable = self.expect_identifier()?;
        let mut span = variable.span;
        let mut indices = Vec::new();
        while self.check(&Token::LeftSquare) {
            self.bump();
            indices.push(self.parse_expression()?);
            span = span + self.expect(&Token::RightSquare)?;
        }
        Ok(LookupExpression { variable, indices, span })
    }

    /// Converts a number literal into the exact rational it denotes.
    fn parse_number(&mut self, text: String, span: Span) -> Result<Expression> {
        let (numerator, denominator) = match text.split_once('/') {
            None => (text.as_str(), None),
            Some((numerator, denominator)) => (numerator, Some(denominator)),
        };
        let numerator: BigInt = numerator.parse().expect("the lexer only produces digits");
        let denominator: BigInt = match denominator {
            None => BigInt::from(1),
            Some(denominator) => denominator.parse().expect("the lexer only produces digits"),
        };
        if denominator.is_zero() {
            return Err(ParserError::invalid_number(text, span).into());
        }
        Ok(Expression::Literal(LiteralExpression {
            value: BigRational::new(numerator, denominator),
            span,
        }))
    }

    /// Returns an [`Expression`] AST node for one of the bracketed array
    /// forms: `[a, b, c]`, `[start to stop by step]` or `[length tensor fill]`.
    fn parse_array_expression(&mut self) -> Result<Expression> {
        let open = self.expect(&Token::LeftSquare)?;

        // The empty array `[]`.
        if self.check(&Token::RightSquare) {
            let span = open + self.expect(&Token::RightSquare)?;
            return Ok(Expression::ArrayInline(ArrayInlineExpression { elements: Vec::new(), span }));
        }

        let first = self.parse_expression()?;

        if self.eat(&Token::To) {
            let stop = self.parse_expression()?;
            let step = if self.eat(&Token::By) {
                Some(Box::new(self.parse_expression()?))
            } else {
                None
            };
            let span = open + self.expect(&Token::RightSquare)?;
            return Ok(Expression::ArrayRange(ArrayRangeExpression {
                start: Box::new(first),
                stop: Box::new(stop),
                step,
                span,
            }));
        }

        if self.eat(&Token::Tensor) {
            let fill = self.parse_expression()?;
            let span = open + self.expect(&Token::RightSquare)?;
            return Ok(Expression::ArrayTensor(ArrayTensorExpression {
                length: Box::new(first),
                fill: Box::new(fill),
                span,
            }));
        }

        let mut elements = vec![first];
        while self.eat(&Token::Comma) {
            elements.push(self.parse_expression()?);
        }
        let span = open + self.expect(&Token::RightSquare)?;
        Ok(Expression::ArrayInline(ArrayInlineExpression { elements, span }))
    }

    /// Returns an [`Expression`] AST node if the next token is a primary expression:
    /// - Literals: rational numbers
    /// - Lookups: variables with optional indices
    /// - Pseudo identifiers: `TID`, `#TID`
    /// - Parenthesised subexpressions
    /// - Array forms: inline, range, tensor
    ///
    /// Returns an expression error if the token cannot be matched.
    fn parse_primary_expression(&mut self) -> Result<Expression> {
        match &self.token.token {
            Token::LeftParen => {
                self.bump();
                let expression = self.parse_expression()?;
                self.expect(&Token::RightParen)?;
                Ok(expression)
            }
            Token::LeftSquare => self.parse_array_expression(),
            Token::Number(text) => {
                let text = text.clone();
                self.bump();
                self.parse_number(text, self.prev_token.span)
            }
            Token::Ident(_) => Ok(Expression::Lookup(self.parse_lookup()?)),
            Token::Tid => {
                self.bump();
                Ok(Expression::ThreadId(ThreadIdExpression { span: self.prev_token.span }))
            }
            Token::NumTids => {
                self.bump();
                Ok(Expression::ThreadCount(ThreadCountExpression { span: self.prev_token.span }))
            }
            _ => self.unexpected("an expression"),
        }
    }
}
