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

use std::mem;

const MOD_TOKENS: &[Token] = &[
    Token::AddAssign,
    Token::SubAssign,
    Token::MulAssign,
    Token::DivAssign,
    Token::ExpAssign,
    Token::RemAssign,
    Token::XorAssign,
    Token::AndAssign,
    Token::OrAssign,
];

impl ParserContext {
    /// Returns a [`Statement`] AST node if the next tokens represent a statement.
    pub(crate) fn parse_statement(&mut self) -> Result<Statement> {
        match &self.token.token {
            Token::Let => Ok(Statement::Let(self.parse_let_statement()?)),
            Token::Unlet => Ok(Statement::Unlet(self.parse_unlet_statement()?)),
            Token::Swap => Ok(Statement::Swap(self.parse_swap_statement()?)),
            Token::Push => Ok(Statement::Push(self.parse_push_statement()?)),
            Token::Pop => Ok(Statement::Pop(self.parse_pop_statement()?)),
            Token::If => Ok(Statement::If(self.parse_if_statement()?)),
            Token::Loop => Ok(Statement::Loop(self.parse_loop_statement()?)),
            Token::For => Ok(Statement::For(self.parse_for_statement()?)),
            Token::Do => Ok(Statement::DoYield(self.parse_do_yield_statement()?)),
            Token::Try => Ok(Statement::Try(self.parse_try_statement()?)),
            Token::Catch => Ok(Statement::Catch(self.parse_catch_statement()?)),
            Token::Call | Token::Uncall => Ok(Statement::Call(self.parse_call_statement()?)),
            Token::Print => Ok(Statement::Print(self.parse_print_statement()?)),
            Token::Promote => Ok(Statement::Promote(self.parse_promote_statement()?)),
            Token::Barrier => Ok(Statement::Barrier(self.parse_barrier_statement()?)),
            Token::Mutex => Ok(Statement::Mutex(self.parse_mutex_statement()?)),
            Token::Ident(_) => Ok(Statement::Modify(self.parse_modification()?)),
            _ => self.unexpected("a statement"),
        }
    }

    /// Returns a block of [`Statement`] AST nodes, parsed until one of the
    /// `terminators` is the current token. Blank lines are skipped.
    pub(super) fn parse_block(&mut self, terminators: &[Token]) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            self.eat_newlines();
            if terminators.iter().any(|terminator| self.check(terminator)) {
                return Ok(statements);
            }
            if !self.has_next() {
                return Err(ParserError::unexpected_eof(self.token.span).into());
            }
            statements.push(self.parse_statement()?);
        }
    }

    /// Returns a [`ModifyStatement`] AST node if the next tokens represent a
    /// modification such as `x[i] += 5`.
    ///
    /// This is where the syntactic reversibility obligations of
    /// modifications are enforced: no self-modification, no information
    /// flowing from mono values into non-mono variables, and no
    /// non-invertible operator on a non-mono target.
    fn parse_modification(&mut self) -> Result<ModifyStatement> {
        let target = self.parse_lookup()?;
        self.expect_any(MOD_TOKENS)?;
        let operation = match &self.prev_token.token {
            Token::AddAssign => ModOperation::Add,
            Token::SubAssign => ModOperation::Sub,
            Token::MulAssign => ModOperation::Mul,
            Token::DivAssign => ModOperation::Div,
            Token::ExpAssign => ModOperation::Pow,
            Token::RemAssign => ModOperation::Rem,
            Token::XorAssign => ModOperation::Xor,
            Token::AndAssign => ModOperation::And,
            Token::OrAssign => ModOperation::Or,
            _ => unreachable!("`parse_modification` shouldn't produce this"),
        };
        let value = self.parse_expression()?;
        let span = target.span + value.span();

        // The target name may not appear on the right-hand side, nor in the
        // target's own indices. Purely syntactic and deliberately
        // conservative; it is the first line of defence for reversibility.
        let name = &target.variable.name;
        if value.references(name) || target.indices.iter().any(|index| index.references(name)) {
            return Err(ParserError::self_modification(name, span).into());
        }

        if !target.variable.is_mono() {
            if !operation.is_reversible() {
                return Err(ParserError::mono_only_operator(operation, span).into());
            }
            if value.is_mono() || target.indices.iter().any(Expression::is_mono) {
                return Err(ParserError::mono_information_flow(name, span).into());
            }
        }

        self.expect_line_end()?;
        Ok(ModifyStatement { target, operation, value, span })
    }

    /// Returns a [`LetStatement`] AST node if the next tokens represent one.
    fn parse_let_statement(&mut self) -> Result<LetStatement> {
        let start = self.expect(&Token::Let)?;
        let variable = self.expect_identifier()?;
        self.expect(&Token::Eq)?;
        let value = self.parse_expression()?;
        let span = start + value.span();

        if !variable.is_mono() && value.is_mono() {
            return Err(ParserError::mono_information_flow(&variable.name, span).into());
        }

        self.expect_line_end()?;
        Ok(LetStatement { variable, value, span })
    }

    /// Returns an [`UnletStatement`] AST node if the next tokens represent one.
    fn parse_unlet_statement(&mut self) -> Result<UnletStatement> {
        let start = self.expect(&Token::Unlet)?;
        let variable = self.expect_identifier()?;
        self.expect(&Token::Eq)?;
        let value = self.parse_expression()?;
        let span = start + value.span();

        if !variable.is_mono() && value.is_mono() {
            return Err(ParserError::mono_information_flow(&variable.name, span).into());
        }

        self.expect_line_end()?;
        Ok(UnletStatement { variable, value, span })
    }

    /// Returns a [`SwapStatement`] AST node if the next tokens represent one.
    fn parse_swap_statement(&mut self) -> Result<SwapStatement> {
        let start = self.expect(&Token::Swap)?;
        let left = self.parse_lookup()?;
        self.expect(&Token::SwapArrow)?;
        let right = self.parse_lookup()?;
        let span = start + right.span;

        if left.variable.is_mono() != right.variable.is_mono() {
            return Err(ParserError::mixed_mono_statement(span).into());
        }
        if !left.variable.is_mono()
            && left.indices.iter().chain(&right.indices).any(Expression::is_mono)
        {
            return Err(ParserError::mono_information_flow(&left.variable.name, span).into());
        }

        self.expect_line_end()?;
        Ok(SwapStatement { left, right, span })
    }

    /// Returns a [`PushStatement`] AST node if the next tokens represent one.
    fn parse_push_statement(&mut self) -> Result<PushStatement> {
        let start = self.expect(&Token::Push)?;
        let element = self.expect_identifier()?;
        self.expect(&Token::Arrow)?;
        let array = self.parse_lookup()?;
        let span = start + array.span;

        self.check_transfer_monos(&element, &array, span)?;
        self.expect_line_end()?;
        Ok(PushStatement { element, array, span })
    }

    /// Returns a [`PopStatement`] AST node if the next tokens represent one.
    fn parse_pop_statement(&mut self) -> Result<PopStatement> {
        let start = self.expect(&Token::Pop)?;
        let array = self.parse_lookup()?;
        self.expect(&Token::Arrow)?;
        let element = self.expect_identifier()?;
        let span = start + element.span;

        self.check_transfer_monos(&element, &array, span)?;
        self.expect_line_end()?;
        Ok(PopStatement { array, element, span })
    }

    /// Checks the mono obligations shared by `push` and `pop`: both sides
    /// agree, and non-mono transfers take no mono indices.
    fn check_transfer_monos(&self, element: &Identifier, array: &LookupExpression, span: Span) -> Result<()> {
        if element.is_mono() != array.variable.is_mono() {
            return Err(ParserError::mixed_mono_statement(span).into());
        }
        if !element.is_mono() && array.indices.iter().any(Expression::is_mono) {
            return Err(ParserError::mono_information_flow(&element.name, span).into());
        }
        Ok(())
    }

    /// Parses a parenthesised expression.
    fn parse_paren_expression(&mut self) -> Result<Expression> {
        self.expect(&Token::LeftParen)?;
        let expression = self.parse_expression()?;
        self.expect(&Token::RightParen)?;
        Ok(expression)
    }

    /// Parses a parenthesised expression that may be empty, i.e. `( )`.
    fn parse_paren_expression_opt(&mut self) -> Result<Option<Expression>> {
        self.expect(&Token::LeftParen)?;
        if self.eat(&Token::RightParen) {
            return Ok(None);
        }
        let expression = self.parse_expression()?;
        self.expect(&Token::RightParen)?;
        Ok(Some(expression))
    }

    /// Returns an [`IfStatement`] AST node if the next tokens represent an
    /// `if (…) … else … fi (…)` construct.
    fn parse_if_statement(&mut self) -> Result<IfStatement> {
        let start = self.expect(&Token::If)?;
        let condition = self.parse_paren_expression()?;
        self.expect_line_end()?;

        let in_try = mem::replace(&mut self.in_try, false);
        let then = self.parse_block(&[Token::Else, Token::Fi])?;
        let otherwise = if self.eat(&Token::Else) {
            self.expect_line_end()?;
            self.parse_block(&[Token::Fi])?
        } else {
            Vec::new()
        };
        self.in_try = in_try;

        self.expect(&Token::Fi)?;
        let backward_condition = self.parse_paren_expression_opt()?;
        let span = start + self.prev_token.span;

        self.check_dual_conditions(&condition, backward_condition.as_ref(), then.iter().chain(&otherwise), span)?;

        self.expect_line_end()?;
        Ok(IfStatement { condition, backward_condition, then, otherwise, span })
    }

    /// Returns a [`LoopStatement`] AST node if the next tokens represent a
    /// `loop (…) … pool (…)` construct.
    fn parse_loop_statement(&mut self) -> Result<LoopStatement> {
        let start = self.expect(&Token::Loop)?;
        let condition = self.parse_paren_expression()?;
        self.expect_line_end()?;

        let in_try = mem::replace(&mut self.in_try, false);
        let body = self.parse_block(&[Token::Pool])?;
        self.in_try = in_try;

        self.expect(&Token::Pool)?;
        let backward_condition = self.parse_paren_expression_opt()?;
        let span = start + self.prev_token.span;

        // A loop without a backward condition can never run backwards, so
        // the forward condition must be mono.
        if backward_condition.is_none() && !condition.is_mono() {
            return Err(ParserError::missing_backward_condition(span).into());
        }
        self.check_dual_conditions(&condition, backward_condition.as_ref(), body.iter(), span)?;

        self.expect_line_end()?;
        Ok(LoopStatement { condition, backward_condition, body, span })
    }

    /// Checks the mono obligations shared by `if` and `loop`: a mono
    /// forward condition makes the whole construct mono (so its body must
    /// be too), and a mono backward condition could never be evaluated
    /// while running backwards.
    fn check_dual_conditions<'a>(
        &self,
        condition: &Expression,
        backward_condition: Option<&Expression>,
        mut body: impl Iterator<Item = &'a Statement>,
        span: Span,
    ) -> Result<()> {
        if condition.is_mono() {
            if !body.all(Statement::is_mono) {
                return Err(ParserError::mono_condition_non_mono_body(span).into());
            }
        } else if backward_condition.is_some_and(Expression::is_mono) {
            return Err(ParserError::mono_backward_condition(span).into());
        }
        Ok(())
    }

    /// Returns a [`ForStatement`] AST node if the next tokens represent a
    /// `for (x in …) … rof` construct.
    fn parse_for_statement(&mut self) -> Result<ForStatement> {
        let start = self.expect(&Token::For)?;
        self.expect(&Token::LeftParen)?;
        let variable = self.expect_identifier()?;
        self.expect(&Token::In)?;
        let iterator = self.parse_expression()?;
        self.expect(&Token::RightParen)?;
        self.expect_line_end()?;

        let in_try = mem::replace(&mut self.in_try, false);
        let body = self.parse_block(&[Token::Rof])?;
        self.in_try = in_try;

        let span = start + self.expect(&Token::Rof)?;

        if iterator.is_mono() && !variable.is_mono() {
            return Err(ParserError::mono_information_flow(&variable.name, span).into());
        }
        if (variable.is_mono() || iterator.is_mono()) && !body.iter().all(Statement::is_mono) {
            return Err(ParserError::mono_condition_non_mono_body(span).into());
        }

        self.expect_line_end()?;
        Ok(ForStatement { variable, iterator, body, span })
    }

    /// Returns a [`DoYieldStatement`] AST node if the next tokens represent
    /// a `do … yield … undo` construct.
    fn parse_do_yield_statement(&mut self) -> Result<DoYieldStatement> {
        let start = self.expect(&Token::Do)?;
        self.expect_line_end()?;

        let in_try = mem::replace(&mut self.in_try, false);
        let do_block = self.parse_block(&[Token::Yield])?;
        self.expect(&Token::Yield)?;
        self.expect_line_end()?;
        let yield_block = self.parse_block(&[Token::Undo])?;
        self.in_try = in_try;

        let span = start + self.expect(&Token::Undo)?;
        self.expect_line_end()?;
        Ok(DoYieldStatement { do_block, yield_block, span })
    }

    /// Returns a [`TryStatement`] AST node if the next tokens represent a
    /// `try (x in …) … yrt` construct.
    fn parse_try_statement(&mut self) -> Result<TryStatement> {
        let start = self.expect(&Token::Try)?;
        self.expect(&Token::LeftParen)?;
        let variable = self.expect_identifier()?;
        self.expect(&Token::In)?;
        let iterator = self.parse_expression()?;
        self.expect(&Token::RightParen)?;
        self.expect_line_end()?;

        // `catch` is legal only for the direct children of this block.
        let in_try = mem::replace(&mut self.in_try, true);
        let body = self.parse_block(&[Token::Yrt])?;
        self.in_try = in_try;

        let span = start + self.expect(&Token::Yrt)?;

        if iterator.is_mono() && !variable.is_mono() {
            return Err(ParserError::mono_information_flow(&variable.name, span).into());
        }
        if variable.is_mono() && !body.iter().all(Statement::is_mono) {
            return Err(ParserError::mono_condition_non_mono_body(span).into());
        }

        self.expect_line_end()?;
        Ok(TryStatement { variable, iterator, body, span })
    }

    /// Returns a [`CatchStatement`] AST node if the next tokens represent one.
    fn parse_catch_statement(&mut self) -> Result<CatchStatement> {
        let start = self.expect(&Token::Catch)?;
        if !self.in_try {
            return Err(ParserError::catch_outside_try(start).into());
        }
        let condition = self.parse_paren_expression()?;
        let span = start + condition.span();
        self.expect_line_end()?;
        Ok(CatchStatement { condition, span })
    }

    /// Returns a [`CallStatement`] AST node if the next tokens represent a
    /// `call` or `uncall`, e.g. `call (seed) => shuffle{4}(deck) => (order)`.
    fn parse_call_statement(&mut self) -> Result<CallStatement> {
        let start = self.expect_any(&[Token::Call, Token::Uncall])?;
        let uncall = self.prev_token.token == Token::Uncall;

        let stolen = if self.check(&Token::LeftParen) {
            let (stolen, _) = self.parse_paren_name_list()?;
            self.expect(&Token::Arrow)?;
            stolen
        } else {
            Vec::new()
        };

        let function = self.expect_identifier()?;

        let lanes = if self.eat(&Token::LeftCurly) {
            let lanes = self.parse_expression()?;
            self.expect(&Token::RightCurly)?;
            Some(lanes)
        } else {
            None
        };

        let (borrowed, _) = self.parse_paren_name_list()?;

        let results = if self.eat(&Token::Arrow) {
            self.parse_paren_name_list()?.0
        } else {
            Vec::new()
        };

        let span = start + self.prev_token.span;

        if function.is_mono() {
            let all_mono = stolen.iter().chain(&borrowed).chain(&results).all(Identifier::is_mono);
            if !all_mono || lanes.is_some() {
                return Err(ParserError::mono_call(&function.name, span).into());
            }
        } else if lanes.as_ref().is_some_and(Expression::is_mono) {
            return Err(ParserError::mono_information_flow(&function.name, span).into());
        }

        self.expect_line_end()?;
        Ok(CallStatement { uncall, stolen, function, lanes, borrowed, results, span })
    }

    /// Returns a [`PrintStatement`] AST node if the next tokens represent one.
    fn parse_print_statement(&mut self) -> Result<PrintStatement> {
        let start = self.expect(&Token::Print)?;
        let mut arguments = Vec::new();
        if !self.check(&Token::Newline) && self.has_next() {
            arguments.push(self.parse_expression()?);
            while self.eat(&Token::Comma) {
                arguments.push(self.parse_expression()?);
            }
        }
        let span = arguments.iter().fold(start, |span, argument| span + argument.span());
        self.expect_line_end()?;
        Ok(PrintStatement { arguments, span })
    }

    /// Returns a [`PromoteStatement`] AST node if the next tokens represent one.
    fn parse_promote_statement(&mut self) -> Result<PromoteStatement> {
        let start = self.expect(&Token::Promote)?;
        let source = self.expect_identifier()?;
        self.expect(&Token::Arrow)?;
        let destination = self.expect_identifier()?;
        let span = start + destination.span;

        if !source.is_mono() || destination.is_mono() {
            return Err(ParserError::invalid_promotion(span).into());
        }

        self.expect_line_end()?;
        Ok(PromoteStatement { source, destination, span })
    }

    /// Returns a [`BarrierStatement`] AST node if the next tokens represent one.
    fn parse_barrier_statement(&mut self) -> Result<BarrierStatement> {
        let start = self.expect(&Token::Barrier)?;
        if self.in_mutex {
            return Err(ParserError::barrier_inside_mutex(start).into());
        }
        let name = self.expect_identifier()?;
        let span = start + name.span;
        self.expect_line_end()?;
        Ok(BarrierStatement { name, span })
    }

    /// Returns a [`MutexStatement`] AST node if the next tokens represent a
    /// `mutex … xetum` construct.
    fn parse_mutex_statement(&mut self) -> Result<MutexStatement> {
        let start = self.expect(&Token::Mutex)?;
        if self.in_mutex {
            return Err(ParserError::nested_mutex(start).into());
        }
        let name = self.expect_identifier()?;
        self.expect_line_end()?;

        self.in_mutex = true;
        let in_try = mem::replace(&mut self.in_try, false);
        let body = self.parse_block(&[Token::Xetum])?;
        self.in_try = in_try;
        self.in_mutex = false;

        let span = start + self.expect(&Token::Xetum)?;
        self.expect_line_end()?;
        Ok(MutexStatement { name, body, span })
    }
}
