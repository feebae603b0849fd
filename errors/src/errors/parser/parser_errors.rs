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

use crate::create_messages;

use std::fmt::Display;

create_messages!(
    /// ParserError enum that represents all the errors for the `railway-parser` crate.
    ParserError,
    code_mask: 370_000i32,
    code_prefix: "PAR",

    /// For when the parser encountered an unexpected token.
    @formatted
    unexpected {
        args: (found: impl Display, expected: impl Display),
        msg: format!("expected {expected} -- found `{found}`"),
        help: None,
    }

    /// For when the source ended mid-construct.
    @formatted
    unexpected_eof {
        args: (),
        msg: "unexpected end of input".to_string(),
        help: None,
    }

    /// For when the tokenizer could not make sense of the input.
    @formatted
    could_not_lex {
        args: (input: impl Display),
        msg: format!("could not lex the following content: `{input}`"),
        help: None,
    }

    /// For when a `$ ... $` comment never sees its closing dollar.
    @formatted
    unclosed_comment {
        args: (),
        msg: "comment is never closed with `$`".to_string(),
        help: None,
    }

    /// For when a number literal has a zero denominator, e.g. `3/0`.
    @formatted
    invalid_number {
        args: (literal: impl Display),
        msg: format!("number literal `{literal}` has a zero denominator"),
        help: None,
    }

    /// For when a `#` is not followed by `TID`.
    @formatted
    lone_hash {
        args: (),
        msg: "`#` must be followed by `TID`".to_string(),
        help: None,
    }

    /// For when a mono marker `.` is not followed by a name.
    @formatted
    lone_dot {
        args: (),
        msg: "mono marker `.` must be followed by a name".to_string(),
        help: None,
    }

    /// For when two functions in the same file share a name.
    @formatted
    duplicate_function {
        args: (name: impl Display),
        msg: format!("function `{name}` is defined more than once"),
        help: None,
    }

    /// For when a parameter name appears twice in a function header.
    @formatted
    duplicate_parameter {
        args: (name: impl Display),
        msg: format!("parameter `{name}` is listed more than once"),
        help: None,
    }

    /// For when two globals share a name.
    @formatted
    duplicate_global {
        args: (name: impl Display),
        msg: format!("global `{name}` is declared more than once"),
        help: None,
    }

    /// For when a global is declared with a mono name.
    @formatted
    mono_global {
        args: (name: impl Display),
        msg: format!("global `{name}` may not be mono"),
        help: Some("globals outlive any single forward pass, so a mono global could never be rederived".to_string()),
    }

    /// For when a modification's right-hand side mentions the variable being modified.
    @formatted
    self_modification {
        args: (name: impl Display),
        msg: format!("variable `{name}` may not appear in the expression modifying it"),
        help: Some("a self-referential modification cannot be inverted; use a temporary with `let`".to_string()),
    }

    /// For when mono data flows into a non-mono binding.
    @formatted
    mono_information_flow {
        args: (name: impl Display),
        msg: format!("non-mono variable `{name}` may not be derived from mono values"),
        help: Some("mono values do not exist during backward execution".to_string()),
    }

    /// For when a non-invertible modification operator targets a non-mono variable.
    @formatted
    mono_only_operator {
        args: (op: impl Display),
        msg: format!("operator `{op}` has no inverse and may only modify mono variables"),
        help: None,
    }

    /// For when a loop over a non-mono condition has no backward condition.
    @formatted
    missing_backward_condition {
        args: (),
        msg: "loop has no backward condition".to_string(),
        help: Some("supply `pool (condition)`; only loops with a mono forward condition may leave it empty".to_string()),
    }

    /// For when a construct guarded by a mono condition contains non-mono work.
    @formatted
    mono_condition_non_mono_body {
        args: (),
        msg: "construct with a mono condition may only contain mono statements".to_string(),
        help: Some("the whole construct is skipped during backward execution".to_string()),
    }

    /// For when a backward condition is mono but the forward condition is not.
    @formatted
    mono_backward_condition {
        args: (),
        msg: "backward condition may not be mono unless the forward condition is".to_string(),
        help: None,
    }

    /// For when the two sides of a `swap`, `push` or `pop` disagree about mono-ness.
    @formatted
    mixed_mono_statement {
        args: (),
        msg: "both sides of this statement must agree on being mono".to_string(),
        help: None,
    }

    /// For when a mono function is called with non-mono arguments or results.
    @formatted
    mono_call {
        args: (name: impl Display),
        msg: format!("all arguments and results of mono function `{name}` must be mono"),
        help: None,
    }

    /// For when `promote` is not of the shape `promote .x => x`.
    @formatted
    invalid_promotion {
        args: (),
        msg: "promote moves a mono variable into a non-mono one".to_string(),
        help: Some("write `promote .source => destination`".to_string()),
    }

    /// For when a `catch` appears outside the body of a `try`.
    @formatted
    catch_outside_try {
        args: (),
        msg: "`catch` must appear directly inside a `try` block".to_string(),
        help: None,
    }

    /// For when a `barrier` appears inside a mutex body, which must deadlock.
    @formatted
    barrier_inside_mutex {
        args: (),
        msg: "`barrier` may not appear inside a mutex".to_string(),
        help: Some("a lane holding the mutex would wait for lanes that are waiting for the mutex".to_string()),
    }

    /// For when a mutex body contains another mutex.
    @formatted
    nested_mutex {
        args: (),
        msg: "mutexes may not be nested".to_string(),
        help: None,
    }

    /// For when the source uses the unsupported `include` form.
    @formatted
    include_unsupported {
        args: (),
        msg: "`include` is not supported".to_string(),
        help: None,
    }
);
