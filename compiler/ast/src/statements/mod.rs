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

use crate::Node;

use railway_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

mod barrier;
pub use barrier::*;
mod call;
pub use call::*;
mod catch;
pub use catch::*;
mod conditional;
pub use conditional::*;
mod do_yield;
pub use do_yield::*;
mod iteration;
pub use iteration::*;
mod let_;
pub use let_::*;
mod loop_;
pub use loop_::*;
mod modify;
pub use modify::*;
mod mutex;
pub use mutex::*;
mod pop;
pub use pop::*;
mod print_;
pub use print_::*;
mod promote;
pub use promote::*;
mod push;
pub use push::*;
mod swap;
pub use swap::*;
mod try_;
pub use try_::*;
mod unlet;
pub use unlet::*;

/// Program statement that defines some action (or expression) to be carried out.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// A `let` statement creating a variable.
    Let(LetStatement),
    /// An `unlet` statement destroying a variable.
    Unlet(UnletStatement),
    /// An in-place modification, e.g. `x += 1`.
    Modify(ModifyStatement),
    /// A `swap` statement exchanging two values.
    Swap(SwapStatement),
    /// A `push` statement moving a variable onto an array.
    Push(PushStatement),
    /// A `pop` statement moving an array tail into a variable.
    Pop(PopStatement),
    /// An `if … fi` statement with dual conditions.
    If(IfStatement),
    /// A `loop … pool` statement with dual conditions.
    Loop(LoopStatement),
    /// A `for … rof` statement iterating an array.
    For(ForStatement),
    /// A `do … yield … undo` statement.
    DoYield(DoYieldStatement),
    /// A `try … yrt` statement searching for a passing candidate.
    Try(TryStatement),
    /// A `catch` statement rejecting the current try candidate.
    Catch(CatchStatement),
    /// A `call` or `uncall` statement, possibly parallel.
    Call(CallStatement),
    /// A `print` statement.
    Print(PrintStatement),
    /// A `promote` statement moving a mono value into the reversible world.
    Promote(PromoteStatement),
    /// A `barrier` statement synchronising parallel lanes.
    Barrier(BarrierStatement),
    /// A `mutex … xetum` statement guarding a critical section.
    Mutex(MutexStatement),
}

impl Statement {
    /// Is this statement mono, i.e. skipped entirely during backward
    /// execution?
    ///
    /// The parser has already checked that a mono statement cannot write to
    /// non-mono state, so skipping it cannot lose reversible information.
    /// `print` and `promote` are not mono even when they mention mono names:
    /// printing is handled by its own direction rule, and promotion has a
    /// backward effect (demotion) of its own.
    pub fn is_mono(&self) -> bool {
        use Statement::*;
        match self {
            Let(s) => s.variable.is_mono(),
            Unlet(s) => s.variable.is_mono(),
            Modify(s) => s.target.variable.is_mono(),
            Swap(s) => s.left.variable.is_mono(),
            Push(s) => s.element.is_mono(),
            Pop(s) => s.element.is_mono(),
            If(s) => s.condition.is_mono(),
            Loop(s) => s.condition.is_mono(),
            For(s) => s.variable.is_mono() || s.iterator.is_mono(),
            DoYield(s) => {
                !(s.do_block.is_empty() && s.yield_block.is_empty())
                    && s.do_block.iter().chain(&s.yield_block).all(Statement::is_mono)
            }
            Try(s) => s.variable.is_mono(),
            Call(s) => s.function.is_mono(),
            Catch(_) | Print(_) | Promote(_) | Barrier(_) | Mutex(_) => false,
        }
    }
}

impl Node for Statement {
    fn span(&self) -> Span {
        use Statement::*;
        match self {
            Let(n) => n.span(),
            Unlet(n) => n.span(),
            Modify(n) => n.span(),
            Swap(n) => n.span(),
            Push(n) => n.span(),
            Pop(n) => n.span(),
            If(n) => n.span(),
            Loop(n) => n.span(),
            For(n) => n.span(),
            DoYield(n) => n.span(),
            Try(n) => n.span(),
            Catch(n) => n.span(),
            Call(n) => n.span(),
            Print(n) => n.span(),
            Promote(n) => n.span(),
            Barrier(n) => n.span(),
            Mutex(n) => n.span(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Statement::*;
        match self {
            Let(n) => n.fmt(f),
            Unlet(n) => n.fmt(f),
            Modify(n) => n.fmt(f),
            Swap(n) => n.fmt(f),
            Push(n) => n.fmt(f),
            Pop(n) => n.fmt(f),
            If(n) => n.fmt(f),
            Loop(n) => n.fmt(f),
            For(n) => n.fmt(f),
            DoYield(n) => n.fmt(f),
            Try(n) => n.fmt(f),
            Catch(n) => n.fmt(f),
            Call(n) => n.fmt(f),
            Print(n) => n.fmt(f),
            Promote(n) => n.fmt(f),
            Barrier(n) => n.fmt(f),
            Mutex(n) => n.fmt(f),
        }
    }
}
