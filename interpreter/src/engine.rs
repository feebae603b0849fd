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

//! The reversible execution engine.
//!
//! One recursive AST walker serves both time directions: every statement
//! handler takes a `backwards` flag and implements its own inverse. The
//! reversibility assertions (dual conditions on `if` and `loop`, the value
//! check on `unlet`, the leak check on function return) are not optional
//! diagnostics; they are what makes backward execution the exact inverse
//! of forward execution.

use crate::{
    ops,
    parallel::{Lane, SharedSync},
    Output, Scope, Value, Variable,
};

use railway_ast::*;
use railway_errors::{InterpreterError, Result};
use railway_span::Span;

use indexmap::IndexMap;
use itertools::Itertools;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use std::collections::HashSet;
use std::sync::Arc;

/// Control flow signal produced by statement execution.
///
/// `Caught` travels from a firing `catch` up to the enclosing `try`, which
/// rewinds and retries; everything else is `Normal`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Flow {
    Normal,
    Caught,
}

/// The tree-walking interpreter for a parsed program.
pub struct Engine {
    program: Program,
    globals: Arc<IndexMap<String, Variable>>,
    output: Output,
}

impl Engine {
    /// Builds an engine for `program`, evaluating its global declarations
    /// top to bottom (each may refer to the ones above it).
    pub fn new(program: Program, output: Output) -> Result<Self> {
        let mut engine = Self {
            program,
            globals: Arc::new(IndexMap::new()),
            output,
        };

        for i in 0..engine.program.globals.len() {
            let declaration = engine.program.globals[i].clone();
            let scope = Scope::new(engine.globals.clone());
            let value = engine.evaluate(&declaration.value, &scope, &Lane::sequential())?;

            let mut globals = (*engine.globals).clone();
            globals.insert(declaration.variable.name.clone(), Variable::new(value));
            engine.globals = Arc::new(globals);
        }

        Ok(engine)
    }

    /// Runs the program: `call main` with an `argv` placeholder.
    pub fn run(&self) -> Result<()> {
        self.run_main(false)
    }

    /// Runs `main` in the given direction. Backward execution exists for
    /// the round-trip property: running main backwards immediately after a
    /// forward run must restore the initial (empty) state.
    pub fn run_main(&self, backwards: bool) -> Result<()> {
        let main = self
            .program
            .functions
            .get("main")
            .ok_or_else(|| InterpreterError::undefined_function("main", Span::dummy()))?;

        let mut scope = Scope::new(self.globals.clone());
        scope.bind("argv", Variable::new(Value::Array(Vec::new())), main.span)?;

        self.execute_block(&main.body, &mut scope, &Lane::sequential(), backwards)?;

        // Anything main returns has no receiver; collect and drop it.
        for name in &main.returns {
            scope.unbind(&name.name, main.span)?;
        }
        let argv = [Identifier::new("argv", main.span)];
        check_leaks(&scope, argv.iter(), main.span)
    }

    /// Executes a sequence of statements. When running backwards the
    /// sequence is traversed in reverse order and mono statements are
    /// skipped entirely.
    pub(crate) fn execute_block(
        &self,
        statements: &[Statement],
        scope: &mut Scope,
        lane: &Lane<'_>,
        backwards: bool,
    ) -> Result<Flow> {
        if backwards {
            for statement in statements.iter().rev() {
                if statement.is_mono() {
                    continue;
                }
                if self.execute_statement(statement, scope, lane, true)? == Flow::Caught {
                    return Ok(Flow::Caught);
                }
            }
        } else {
            for statement in statements {
                if self.execute_statement(statement, scope, lane, false)? == Flow::Caught {
                    return Ok(Flow::Caught);
                }
            }
        }
        Ok(Flow::Normal)
    }

    /// Dispatches one statement to its handler.
    pub(crate) fn execute_statement(
        &self,
        statement: &Statement,
        scope: &mut Scope,
        lane: &Lane<'_>,
        backwards: bool,
    ) -> Result<Flow> {
        match statement {
            Statement::Let(s) => {
                if backwards {
                    self.destroy_binding(&s.variable, &s.value, scope, lane, s.span)?;
                } else {
                    self.create_binding(&s.variable, &s.value, scope, lane, s.span)?;
                }
            }
            Statement::Unlet(s) => {
                if backwards {
                    self.create_binding(&s.variable, &s.value, scope, lane, s.span)?;
                } else {
                    self.destroy_binding(&s.variable, &s.value, scope, lane, s.span)?;
                }
            }
            Statement::Modify(s) => self.execute_modify(s, scope, lane, backwards)?,
            Statement::Swap(s) => self.execute_swap(s, scope, lane)?,
            Statement::Push(s) => {
                if backwards {
                    self.run_pop(&s.array, &s.element, scope, lane, s.span)?;
                } else {
                    self.run_push(&s.element, &s.array, scope, lane, s.span)?;
                }
            }
            Statement::Pop(s) => {
                if backwards {
                    self.run_push(&s.element, &s.array, scope, lane, s.span)?;
                } else {
                    self.run_pop(&s.array, &s.element, scope, lane, s.span)?;
                }
            }
            Statement::If(s) => return self.execute_if(s, scope, lane, backwards),
            Statement::Loop(s) => self.execute_loop(s, scope, lane, backwards)?,
            Statement::For(s) => self.execute_for(s, scope, lane, backwards)?,
            Statement::DoYield(s) => {
                // do forwards, yield in the current direction, undo. The
                // do-block cancels itself, so the construct leaves no
                // residue in the surrounding scope.
                self.execute_block(&s.do_block, scope, lane, false)?;
                self.execute_block(&s.yield_block, scope, lane, backwards)?;
                self.execute_block(&s.do_block, scope, lane, true)?;
            }
            Statement::Try(s) => self.execute_try(s, scope, lane, backwards)?,
            Statement::Catch(s) => {
                // Catches only fire while moving forwards.
                if !backwards && self.evaluate(&s.condition, scope, lane)?.is_truthy() {
                    return Ok(Flow::Caught);
                }
            }
            Statement::Call(s) => self.execute_call(s, scope, lane, backwards)?,
            Statement::Print(s) => {
                if !backwards {
                    let line = s
                        .arguments
                        .iter()
                        .map(|argument| self.evaluate(argument, scope, lane).map(|value| value.to_string()))
                        .collect::<Result<Vec<_>>>()?
                        .join(" ");
                    self.output.write_line(&line)?;
                }
            }
            Statement::Promote(s) => {
                if backwards {
                    // Demote: the value is rederivable on the next forward
                    // pass, so it is destroyed outright.
                    scope.unbind(&s.destination.name, s.span)?;
                } else {
                    let cell = scope.unbind(&s.source.name, s.span)?;
                    scope.bind(&s.destination.name, cell, s.span)?;
                }
            }
            Statement::Barrier(s) => {
                if let Some(sync) = lane.sync {
                    tracing::debug!(name = %s.name, tid = lane.tid, "barrier");
                    sync.barrier(&s.name.name, lane.tid, s.span)?;
                }
            }
            Statement::Mutex(s) => self.execute_mutex(s, scope, lane, backwards)?,
        }
        Ok(Flow::Normal)
    }

    /// Forward `let` / backward `unlet`: evaluate and bind a fresh cell.
    fn create_binding(
        &self,
        variable: &Identifier,
        value: &Expression,
        scope: &mut Scope,
        lane: &Lane<'_>,
        span: Span,
    ) -> Result<()> {
        let value = self.evaluate(value, scope, lane)?;
        scope.bind(&variable.name, Variable::new(value), span)
    }

    /// Forward `unlet` / backward `let`: the stated value must match the
    /// cell's content, otherwise destroying it would lose information.
    fn destroy_binding(
        &self,
        variable: &Identifier,
        value: &Expression,
        scope: &mut Scope,
        lane: &Lane<'_>,
        span: Span,
    ) -> Result<()> {
        let expected = self.evaluate(value, scope, lane)?;
        let cell = scope.unbind(&variable.name, span)?;
        let actual = cell.into_value();
        if actual != expected {
            return Err(InterpreterError::unlet_value_mismatch(&variable.name, expected, actual, span).into());
        }
        Ok(())
    }

    fn execute_modify(&self, s: &ModifyStatement, scope: &mut Scope, lane: &Lane<'_>, backwards: bool) -> Result<()> {
        let operation = if backwards {
            match s.operation.inverse() {
                Some(inverse) => inverse,
                // Non-invertible operations only target mono variables,
                // and mono statements never run backwards.
                None => unreachable!("non-invertible modification executed backwards"),
            }
        } else {
            s.operation
        };

        let cell = scope.resolve_local(&s.target.variable.name, s.span)?;
        let indices = self.evaluate_indices(&s.target.indices, scope, lane)?;
        let operand = self.evaluate(&s.value, scope, lane)?;
        cell.modify(&indices, s.span, |current| {
            ops::evaluate_modification(operation, current, &operand, s.span)
        })
    }

    /// `swap` is its own inverse; no direction branch.
    fn execute_swap(&self, s: &SwapStatement, scope: &mut Scope, lane: &Lane<'_>) -> Result<()> {
        let left = scope.resolve_local(&s.left.variable.name, s.span)?;
        let right = scope.resolve_local(&s.right.variable.name, s.span)?;
        let left_indices = self.evaluate_indices(&s.left.indices, scope, lane)?;
        let right_indices = self.evaluate_indices(&s.right.indices, scope, lane)?;

        let left_value = left.get(&left_indices, s.span)?;
        let right_value = right.get(&right_indices, s.span)?;
        left.set(&left_indices, right_value, s.span)?;
        right.set(&right_indices, left_value, s.span)
    }

    /// Forward `push` / backward `pop`: the element variable's cell is
    /// consumed and its value appended to the array.
    fn run_push(
        &self,
        element: &Identifier,
        array: &LookupExpression,
        scope: &mut Scope,
        lane: &Lane<'_>,
        span: Span,
    ) -> Result<()> {
        let cell = scope.unbind(&element.name, span)?;
        let value = cell.into_value();
        let target = scope.resolve_local(&array.variable.name, span)?;
        let indices = self.evaluate_indices(&array.indices, scope, lane)?;
        target.push(&indices, value, span)
    }

    /// Forward `pop` / backward `push`: the array's last element becomes a
    /// fresh variable.
    fn run_pop(
        &self,
        array: &LookupExpression,
        element: &Identifier,
        scope: &mut Scope,
        lane: &Lane<'_>,
        span: Span,
    ) -> Result<()> {
        let target = scope.resolve_local(&array.variable.name, span)?;
        let indices = self.evaluate_indices(&array.indices, scope, lane)?;
        let value = target.pop(&indices, span)?;
        scope.bind(&element.name, Variable::new(value), span)
    }

    /// `if` with the dual-condition reversibility assertion: the entry
    /// condition selects the branch, and after the branch the exit
    /// condition must select the same one.
    fn execute_if(&self, s: &IfStatement, scope: &mut Scope, lane: &Lane<'_>, backwards: bool) -> Result<Flow> {
        let taken = self.evaluate(s.entry_condition(backwards), scope, lane)?.is_truthy();
        let branch = if taken { &s.then } else { &s.otherwise };

        let flow = self.execute_block(branch, scope, lane, backwards)?;

        let confirmed = self.evaluate(s.exit_condition(backwards), scope, lane)?.is_truthy();
        if confirmed != taken {
            let which = if taken { "true" } else { "false" };
            return Err(InterpreterError::if_assertion(which, s.span).into());
        }
        Ok(flow)
    }

    /// `loop` runs its body while the current direction's condition holds.
    /// The other direction's condition is asserted false at entry and true
    /// at exit; those endpoint assertions are what pin down where a
    /// backward run must stop.
    fn execute_loop(&self, s: &LoopStatement, scope: &mut Scope, lane: &Lane<'_>, backwards: bool) -> Result<()> {
        let (entry, other) = if backwards {
            let backward = s
                .backward_condition
                .as_ref()
                .unwrap_or_else(|| unreachable!("a loop without a backward condition is mono"));
            (backward, Some(&s.condition))
        } else {
            (&s.condition, s.backward_condition.as_ref())
        };
        let (direction, other_direction) = if backwards { ("backward", "forward") } else { ("forward", "backward") };

        if !self.evaluate(entry, scope, lane)?.is_truthy() {
            return Err(InterpreterError::loop_assertion(direction, "true", s.span).into());
        }
        if let Some(other) = other {
            if self.evaluate(other, scope, lane)?.is_truthy() {
                return Err(InterpreterError::loop_assertion(other_direction, "false", s.span).into());
            }
        }

        while self.evaluate(entry, scope, lane)?.is_truthy() {
            self.execute_block(&s.body, scope, lane, backwards)?;
        }

        if let Some(other) = other {
            if !self.evaluate(other, scope, lane)?.is_truthy() {
                return Err(InterpreterError::loop_assertion(other_direction, "true", s.span).into());
            }
        }
        Ok(())
    }

    /// `for` copies each element into the loop variable, runs the body and
    /// removes the variable again; backwards it walks the elements in
    /// reverse with the body running backwards.
    fn execute_for(&self, s: &ForStatement, scope: &mut Scope, lane: &Lane<'_>, backwards: bool) -> Result<()> {
        let iterated = self.evaluate_iterator(&s.iterator, scope, lane)?;
        let length = iterated.len();

        let mut step = |i: usize| -> Result<()> {
            let element = iterated.get(i);
            scope.bind(&s.variable.name, Variable::new(element.clone()), s.span)?;
            self.execute_block(&s.body, scope, lane, backwards)?;
            let actual = scope.unbind(&s.variable.name, s.span)?.into_value();
            if actual != element {
                return Err(InterpreterError::loop_variable_modified(&s.variable.name, element, actual, s.span).into());
            }
            Ok(())
        };

        if backwards {
            for i in (0..length).rev() {
                step(i)?;
            }
        } else {
            for i in 0..length {
                step(i)?;
            }
        }
        Ok(())
    }

    fn execute_try(&self, s: &TryStatement, scope: &mut Scope, lane: &Lane<'_>, backwards: bool) -> Result<()> {
        if !backwards {
            self.run_try_forward(s, scope, lane)?;
            return Ok(());
        }

        // Undo the body once under the bound candidate, then rerun the
        // whole search forwards to defend invertibility: the candidate that
        // passes must be the value that was bound.
        let bound = scope.resolve(&s.variable.name, s.span)?.copy();
        self.execute_block(&s.body, scope, lane, true)?;
        scope.unbind(&s.variable.name, s.span)?;

        let chosen = self.run_try_forward(s, scope, lane)?;
        if chosen != bound {
            return Err(InterpreterError::try_reversal_mismatch(&s.variable.name, bound, chosen, s.span).into());
        }

        self.execute_block(&s.body, scope, lane, true)?;
        scope.unbind(&s.variable.name, s.span)?;
        Ok(())
    }

    /// The forward try search: candidates are attempted in order until the
    /// body completes without a truthy catch. A firing catch rewinds the
    /// executed prefix of the body and the next candidate is tried. On a
    /// pass, the candidate stays bound and is returned.
    fn run_try_forward(&self, s: &TryStatement, scope: &mut Scope, lane: &Lane<'_>) -> Result<Value> {
        let iterated = self.evaluate_iterator(&s.iterator, scope, lane)?;

        'candidates: for i in 0..iterated.len() {
            let element = iterated.get(i);
            scope.bind(&s.variable.name, Variable::new(element.clone()), s.span)?;

            for (index, statement) in s.body.iter().enumerate() {
                match self.execute_statement(statement, scope, lane, false)? {
                    Flow::Normal => {}
                    Flow::Caught => {
                        // Rewind what ran, drop the candidate, retry.
                        self.execute_block(&s.body[..index], scope, lane, true)?;
                        let actual = scope.unbind(&s.variable.name, s.span)?.into_value();
                        if actual != element {
                            return Err(InterpreterError::loop_variable_modified(
                                &s.variable.name,
                                element,
                                actual,
                                s.span,
                            )
                            .into());
                        }
                        continue 'candidates;
                    }
                }
            }
            return Ok(element);
        }

        Err(InterpreterError::exhausted_try(s.span).into())
    }

    fn execute_mutex(&self, s: &MutexStatement, scope: &mut Scope, lane: &Lane<'_>, backwards: bool) -> Result<()> {
        let Some(sync) = lane.sync else {
            // Sequential execution: nothing to serialise.
            self.execute_block(&s.body, scope, lane, backwards)?;
            return Ok(());
        };

        tracing::debug!(name = %s.name, tid = lane.tid, backwards, "mutex enter");
        sync.mutex_enter(&s.name.name, lane.tid, backwards, s.span)?;
        let result = self.execute_block(&s.body, scope, lane, backwards);
        sync.mutex_exit(&s.name.name, lane.tid, backwards);
        result.map(|_| ())
    }

    fn execute_call(&self, s: &CallStatement, scope: &mut Scope, lane: &Lane<'_>, backwards: bool) -> Result<()> {
        let function = self
            .program
            .functions
            .get(&s.function.name)
            .ok_or_else(|| InterpreterError::undefined_function(&s.function.name, s.span))?;

        // `uncall` is `call` with the direction flipped; running either
        // backwards flips it again, and also swaps which caller list is
        // consumed and which is produced.
        let body_backwards = backwards ^ s.uncall;
        let (in_names, out_names): (&[Identifier], &[Identifier]) = if backwards {
            (&s.results, &s.stolen)
        } else {
            (&s.stolen, &s.results)
        };

        let (in_params, out_params): (&[Identifier], &[Identifier]) = if body_backwards {
            (&function.returns, &function.stolen)
        } else {
            (&function.stolen, &function.returns)
        };

        check_arity(function, "borrowed", &function.borrowed, &s.borrowed, s.span)?;
        check_arity(function, "consumed", in_params, in_names, s.span)?;
        check_arity(function, "produced", out_params, out_names, s.span)?;

        tracing::debug!(function = %function.identifier, backwards = body_backwards, "call");

        match &s.lanes {
            None => self.call_sequential(function, s, in_names, out_names, scope, lane, body_backwards),
            Some(lanes) => self.call_parallel(function, s, lanes, in_names, out_names, scope, lane, body_backwards),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn call_sequential(
        &self,
        function: &Function,
        s: &CallStatement,
        in_names: &[Identifier],
        out_names: &[Identifier],
        scope: &mut Scope,
        lane: &Lane<'_>,
        body_backwards: bool,
    ) -> Result<()> {
        // Undoing an undoreturn call destroys the surviving copies; the
        // body cancelled itself out during the forward run.
        if function.undoreturn && body_backwards {
            for name in in_names {
                scope.unbind(&name.name, s.span)?;
            }
            return Ok(());
        }

        let (in_params, out_params): (&[Identifier], &[Identifier]) = if body_backwards {
            (&function.returns, &function.stolen)
        } else {
            (&function.stolen, &function.returns)
        };

        // Gather the argument cells before binding anything, so aliasing
        // between any two of them is caught.
        let borrowed_cells = s
            .borrowed
            .iter()
            .map(|name| scope.resolve(&name.name, s.span))
            .collect::<Result<Vec<_>>>()?;
        let in_cells = in_names
            .iter()
            .map(|name| scope.unbind(&name.name, s.span))
            .collect::<Result<Vec<_>>>()?;
        check_aliasing(s.borrowed.iter().chain(in_names), borrowed_cells.iter().chain(&in_cells), s.span)?;

        let mut callee = Scope::new(self.globals.clone());
        for ((name, param), cell) in s.borrowed.iter().zip(&function.borrowed).zip(borrowed_cells) {
            check_mono_agreement(name, param, s.span)?;
            callee.bind(&param.name, cell, s.span)?;
        }
        for ((name, param), cell) in in_names.iter().zip(in_params).zip(in_cells) {
            check_mono_agreement(name, param, s.span)?;
            callee.bind(&param.name, cell, s.span)?;
        }

        self.execute_block(&function.body, &mut callee, lane, body_backwards)?;

        if function.undoreturn {
            // Copy the returns, undo the body, hand the stolen cells back.
            let copies = function
                .returns
                .iter()
                .map(|name| callee.resolve(&name.name, s.span).map(|cell| cell.copy()))
                .collect::<Result<Vec<_>>>()?;
            self.execute_block(&function.body, &mut callee, lane, true)?;

            check_leaks(&callee, function.borrowed.iter().chain(&function.stolen), s.span)?;
            for (name, param) in in_names.iter().zip(in_params) {
                let cell = callee.unbind(&param.name, s.span)?;
                scope.bind(&name.name, cell, s.span)?;
            }
            for (name, value) in out_names.iter().zip(copies) {
                scope.bind(&name.name, Variable::new(value), s.span)?;
            }
            return Ok(());
        }

        let out_cells = out_params
            .iter()
            .map(|param| callee.unbind(&param.name, s.span))
            .collect::<Result<Vec<_>>>()?;

        check_leaks(&callee, function.borrowed.iter(), s.span)?;

        for ((name, param), cell) in out_names.iter().zip(out_params).zip(out_cells) {
            check_mono_agreement(name, param, s.span)?;
            scope.bind(&name.name, cell, s.span)?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn call_parallel(
        &self,
        function: &Function,
        s: &CallStatement,
        lanes: &Expression,
        in_names: &[Identifier],
        out_names: &[Identifier],
        scope: &mut Scope,
        lane: &Lane<'_>,
        body_backwards: bool,
    ) -> Result<()> {
        let count = self.evaluate(lanes, scope, lane)?;
        let count = match &count {
            Value::Rational(n) if n.is_integer() && n.is_positive() => {
                n.to_integer().to_usize().ok_or_else(|| InterpreterError::invalid_lane_count(&count, s.span))?
            }
            other => return Err(InterpreterError::invalid_lane_count(other, s.span).into()),
        };

        if function.undoreturn && body_backwards {
            for name in in_names {
                scope.unbind(&name.name, s.span)?;
            }
            return Ok(());
        }

        let (in_params, out_params): (&[Identifier], &[Identifier]) = if body_backwards {
            (&function.returns, &function.stolen)
        } else {
            (&function.stolen, &function.returns)
        };

        let borrowed_cells = s
            .borrowed
            .iter()
            .map(|name| scope.resolve(&name.name, s.span))
            .collect::<Result<Vec<_>>>()?;
        check_aliasing(s.borrowed.iter(), borrowed_cells.iter(), s.span)?;

        // Every consumed argument must be an array of lane length; lane j
        // steals slice j of each.
        let mut lane_inputs: Vec<Vec<Variable>> = (0..count).map(|_| Vec::new()).collect();
        for name in in_names {
            let cell = scope.unbind(&name.name, s.span)?;
            match cell.into_value() {
                Value::Array(elements) if elements.len() == count => {
                    for (inputs, element) in lane_inputs.iter_mut().zip(elements) {
                        inputs.push(Variable::new(element));
                    }
                }
                other => {
                    return Err(InterpreterError::lane_slice_mismatch(&name.name, count, other, s.span).into());
                }
            }
        }

        tracing::debug!(function = %function.identifier, lanes = count, backwards = body_backwards, "parallel call");

        let sync = SharedSync::new(count);
        // Per lane: the produced cells (in out_params order), or the
        // stolen-back cells plus return copies for undoreturn functions.
        let mut lane_results: Vec<Result<(Vec<Value>, Vec<Value>)>> = Vec::new();

        std::thread::scope(|threads| {
            let mut handles = Vec::new();
            for (tid, inputs) in lane_inputs.into_iter().enumerate() {
                let sync = &sync;
                let borrowed_cells = &borrowed_cells;
                let handle = threads.spawn(move || {
                    let lane = Lane { tid, count, sync: Some(sync) };
                    let result = self.run_lane(function, s, inputs, borrowed_cells, in_params, out_params, &lane, body_backwards);
                    if let Err(error) = &result {
                        sync.fail(error.clone());
                    }
                    result
                });
                handles.push(handle);
            }
            for handle in handles {
                lane_results.push(handle.join().expect("a lane panicked"));
            }
        });

        if lane_results.iter().any(|result| result.is_err()) {
            // Propagate the original failure, not a sympathetic one.
            if let Some(original) = sync.take_failure() {
                return Err(original);
            }
        }
        let lane_results = lane_results.into_iter().collect::<Result<Vec<_>>>()?;

        // Re-collect per-lane values into arrays of lane length.
        if function.undoreturn {
            for (position, name) in in_names.iter().enumerate() {
                let elements = lane_results.iter().map(|(ins, _)| ins[position].clone()).collect();
                scope.bind(&name.name, Variable::new(Value::Array(elements)), s.span)?;
            }
        }
        for (position, name) in out_names.iter().enumerate() {
            let elements = lane_results.iter().map(|(_, outs)| outs[position].clone()).collect();
            scope.bind(&name.name, Variable::new(Value::Array(elements)), s.span)?;
        }
        Ok(())
    }

    /// One lane of a parallel call: bind, run, collect, leak-check.
    ///
    /// Returns the lane's consumed-cells-to-hand-back (undoreturn only)
    /// and its produced values.
    #[allow(clippy::too_many_arguments)]
    fn run_lane(
        &self,
        function: &Function,
        s: &CallStatement,
        inputs: Vec<Variable>,
        borrowed_cells: &[Variable],
        in_params: &[Identifier],
        out_params: &[Identifier],
        lane: &Lane<'_>,
        body_backwards: bool,
    ) -> Result<(Vec<Value>, Vec<Value>)> {
        let mut callee = Scope::new(self.globals.clone());
        for (param, cell) in function.borrowed.iter().zip(borrowed_cells) {
            callee.bind(&param.name, cell.clone(), s.span)?;
        }
        for (param, cell) in in_params.iter().zip(inputs) {
            callee.bind(&param.name, cell, s.span)?;
        }

        self.execute_block(&function.body, &mut callee, lane, body_backwards)?;

        if function.undoreturn {
            let copies = function
                .returns
                .iter()
                .map(|name| callee.resolve(&name.name, s.span).map(|cell| cell.copy()))
                .collect::<Result<Vec<_>>>()?;
            self.execute_block(&function.body, &mut callee, lane, true)?;
            check_leaks(&callee, function.borrowed.iter().chain(&function.stolen), s.span)?;
            let handed_back = in_params
                .iter()
                .map(|param| callee.unbind(&param.name, s.span).map(Variable::into_value))
                .collect::<Result<Vec<_>>>()?;
            return Ok((handed_back, copies));
        }

        let outs = out_params
            .iter()
            .map(|param| callee.unbind(&param.name, s.span).map(Variable::into_value))
            .collect::<Result<Vec<_>>>()?;
        check_leaks(&callee, function.borrowed.iter(), s.span)?;
        Ok((Vec::new(), outs))
    }

    /// Evaluates index expressions into concrete array positions.
    fn evaluate_indices(&self, indices: &[Expression], scope: &Scope, lane: &Lane<'_>) -> Result<Vec<usize>> {
        indices
            .iter()
            .map(|index| {
                let value = self.evaluate(index, scope, lane)?;
                value.as_index(index.span())
            })
            .collect()
    }

    /// Evaluates an iterator expression for `for` and `try`. Ranges stay
    /// lazy: only the requested element is materialised per step.
    fn evaluate_iterator(&self, iterator: &Expression, scope: &Scope, lane: &Lane<'_>) -> Result<Iterated> {
        if let Expression::ArrayRange(range) = iterator {
            let (start, step, length) = self.evaluate_range(range, scope, lane)?;
            return Ok(Iterated::Range { start, step, length });
        }
        match self.evaluate(iterator, scope, lane)? {
            Value::Array(elements) => Ok(Iterated::Eager(elements)),
            other => Err(InterpreterError::type_mismatch("iterate over", other.kind(), iterator.span()).into()),
        }
    }

    /// Evaluates a range's bounds once, yielding its start, step and length.
    fn evaluate_range(
        &self,
        range: &ArrayRangeExpression,
        scope: &Scope,
        lane: &Lane<'_>,
    ) -> Result<(BigRational, BigRational, usize)> {
        let start = self.evaluate(&range.start, scope, lane)?.as_rational("range over", range.span)?.clone();
        let stop = self.evaluate(&range.stop, scope, lane)?.as_rational("range over", range.span)?.clone();
        let step = match &range.step {
            None => BigRational::from(BigInt::from(1)),
            Some(step) => self.evaluate(step, scope, lane)?.as_rational("range over", range.span)?.clone(),
        };
        if step.is_zero() {
            return Err(InterpreterError::zero_range_step(range.span).into());
        }

        // Half-open: all i >= 0 with start + i*step strictly before stop.
        let span_ratio = (&stop - &start) / &step;
        let length = if span_ratio.is_positive() {
            let length = span_ratio.ceil().to_integer();
            length
                .to_usize()
                .ok_or_else(|| InterpreterError::range_too_long(&length, range.span))?
        } else {
            0
        };
        Ok((start, step, length))
    }

    /// Evaluates an expression to a value. Expressions are pure; all state
    /// changes go through statements.
    pub(crate) fn evaluate(&self, expression: &Expression, scope: &Scope, lane: &Lane<'_>) -> Result<Value> {
        match expression {
            Expression::Literal(literal) => Ok(Value::Rational(literal.value.clone())),
            Expression::Lookup(lookup) => {
                let cell = scope.resolve(&lookup.variable.name, lookup.span)?;
                let indices = self.evaluate_indices(&lookup.indices, scope, lane)?;
                cell.get(&indices, lookup.span)
            }
            Expression::Binary(binary) => {
                let left = self.evaluate(&binary.left, scope, lane)?;
                let right = self.evaluate(&binary.right, scope, lane)?;
                ops::evaluate_binary(binary.op, &left, &right, binary.span)
            }
            Expression::Unary(unary) => {
                let operand = self.evaluate(&unary.operand, scope, lane)?;
                ops::evaluate_unary(unary.op, &operand, unary.span)
            }
            Expression::ArrayInline(array) => {
                let elements = array
                    .elements
                    .iter()
                    .map(|element| self.evaluate(element, scope, lane))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Array(elements))
            }
            Expression::ArrayRange(range) => {
                let (start, step, length) = self.evaluate_range(range, scope, lane)?;
                let elements = (0..length)
                    .map(|i| Value::Rational(&start + &step * BigRational::from(BigInt::from(i))))
                    .collect();
                Ok(Value::Array(elements))
            }
            Expression::ArrayTensor(tensor) => {
                let length = match self.evaluate(&tensor.length, scope, lane)? {
                    Value::Rational(n) if n.is_integer() && !n.is_negative() => n.to_integer().to_usize(),
                    other => return Err(InterpreterError::invalid_tensor_length(other, tensor.span).into()),
                };
                let length =
                    length.ok_or_else(|| InterpreterError::invalid_tensor_length(&tensor.length, tensor.span))?;
                let fill = self.evaluate(&tensor.fill, scope, lane)?;
                Ok(Value::Array(vec![fill; length]))
            }
            Expression::ThreadId(_) => Ok(Value::integer(lane.tid as i64)),
            Expression::ThreadCount(_) => Ok(Value::integer(lane.count as i64)),
        }
    }
}

/// An iterator source for `for` and `try`: an eager element list, or a
/// lazy arithmetic range.
pub(crate) enum Iterated {
    Eager(Vec<Value>),
    Range {
        start: BigRational,
        step: BigRational,
        length: usize,
    },
}

impl Iterated {
    pub fn len(&self) -> usize {
        match self {
            Self::Eager(elements) => elements.len(),
            Self::Range { length, .. } => *length,
        }
    }

    /// Materialises element `i`.
    pub fn get(&self, i: usize) -> Value {
        match self {
            Self::Eager(elements) => elements[i].clone(),
            Self::Range { start, step, .. } => {
                Value::Rational(start + step * BigRational::from(BigInt::from(i)))
            }
        }
    }
}

/// At scope exit, the live bindings must be exactly the allowed names:
/// a missing name means a borrowed cell was destroyed, an extra one is an
/// information leak, named explicitly in the diagnostic.
fn check_leaks<'a>(scope: &Scope, allowed: impl Iterator<Item = &'a Identifier> + Clone, span: Span) -> Result<()> {
    for name in allowed.clone() {
        if !scope.is_bound(&name.name) {
            return Err(InterpreterError::borrowed_destroyed(&name.name, span).into());
        }
    }

    let allowed_names: HashSet<&str> = allowed.map(|name| name.name.as_str()).collect();
    let leaked = scope
        .snapshot_names()
        .into_iter()
        .filter(|name| !allowed_names.contains(name.as_str()))
        .collect::<Vec<_>>();
    if !leaked.is_empty() {
        let listed = leaked.iter().map(|name| format!("`{name}`")).join(", ");
        return Err(InterpreterError::information_leak(listed, span).into());
    }
    Ok(())
}

/// Argument lists must match the function header in length.
fn check_arity(
    function: &Function,
    list: &str,
    params: &[Identifier],
    names: &[Identifier],
    span: Span,
) -> Result<()> {
    if params.len() != names.len() {
        return Err(
            InterpreterError::call_arity(&function.identifier.name, list, params.len(), names.len(), span).into(),
        );
    }
    Ok(())
}

/// No two argument cells of one call may be the same cell.
fn check_aliasing<'a>(
    names: impl Iterator<Item = &'a Identifier>,
    cells: impl Iterator<Item = &'a Variable>,
    span: Span,
) -> Result<()> {
    let pairs: Vec<(&Identifier, &Variable)> = names.zip(cells).collect();
    for (i, (first_name, first_cell)) in pairs.iter().enumerate() {
        for (second_name, second_cell) in &pairs[i + 1..] {
            if first_cell.same_cell(second_cell) {
                return Err(InterpreterError::aliased_arguments(&first_name.name, &second_name.name, span).into());
            }
        }
    }
    Ok(())
}

/// A caller-side name and the parameter it binds to must agree on
/// mono-ness; mono cells cannot cross into the reversible world through a
/// call boundary.
fn check_mono_agreement(name: &Identifier, param: &Identifier, span: Span) -> Result<()> {
    if name.is_mono() != param.is_mono() {
        return Err(InterpreterError::mono_parameter_mismatch(&name.name, &param.name, span).into());
    }
    Ok(())
}
