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
    /// InterpreterError enum that represents all the errors for the `railway-interpreter` crate.
    InterpreterError,
    code_mask: 371_000i32,
    code_prefix: "RUN",

    /// For when a name is not bound in the current scope or the globals.
    @formatted
    undefined_variable {
        args: (name: impl Display),
        msg: format!("variable `{name}` does not exist"),
        help: None,
    }

    /// For when a call names a function the program does not define.
    @formatted
    undefined_function {
        args: (name: impl Display),
        msg: format!("function `{name}` does not exist"),
        help: None,
    }

    /// For when `let` targets a name that is already bound.
    @formatted
    variable_exists {
        args: (name: impl Display),
        msg: format!("variable `{name}` already exists"),
        help: None,
    }

    /// For when the value given to `unlet` disagrees with the variable's content.
    @formatted
    unlet_value_mismatch {
        args: (name: impl Display, expected: impl Display, actual: impl Display),
        msg: format!("cannot unlet `{name}`: expected value {expected}, found {actual}"),
        help: None,
    }

    /// For when a statement writes to a global.
    @formatted
    write_to_global {
        args: (name: impl Display),
        msg: format!("global `{name}` is read-only inside functions"),
        help: Some("shadow it with a local `let` to work on a copy".to_string()),
    }

    /// For when the two conditions of an `if` disagree about the branch taken.
    @formatted
    if_assertion {
        args: (taken: impl Display),
        msg: format!("if statement is not reversible: the conditions disagree about the {taken} branch"),
        help: Some("after the branch, the other direction's condition must select the same branch".to_string()),
    }

    /// For when a loop condition does not hold where reversibility requires it.
    @formatted
    loop_assertion {
        args: (condition: impl Display, state: impl Display),
        msg: format!("loop is not reversible: the {condition} condition must be {state} here"),
        help: None,
    }

    /// For when an index selects past the end of an array.
    @formatted
    index_out_of_bounds {
        args: (index: impl Display, length: impl Display),
        msg: format!("index {index} is out of bounds for an array of length {length}"),
        help: None,
    }

    /// For when an index expression is not a non-negative integer.
    @formatted
    invalid_index {
        args: (index: impl Display),
        msg: format!("arrays can only be indexed by non-negative integers, found {index}"),
        help: None,
    }

    /// For when a value of one type appears where the other is required.
    @formatted
    type_mismatch {
        args: (operation: impl Display, found: impl Display),
        msg: format!("cannot {operation} {found}"),
        help: None,
    }

    /// For when an exponent is not a whole number.
    @formatted
    fractional_exponent {
        args: (exponent: impl Display),
        msg: format!("exponent must be a whole number, found {exponent}"),
        help: None,
    }

    /// For when an exponent is too large to materialise.
    @formatted
    exponent_too_large {
        args: (exponent: impl Display),
        msg: format!("exponent {exponent} is too large"),
        help: None,
    }

    /// For when an expression divides by zero.
    @formatted
    division_by_zero {
        args: (),
        msg: "division by zero".to_string(),
        help: None,
    }

    /// For when an in-place multiplication by zero would destroy information.
    @formatted
    zero_multiplication {
        args: (),
        msg: "in-place multiplication by zero".to_string(),
        help: Some("its reversal would be a division by zero".to_string()),
    }

    /// For when a range has a zero step.
    @formatted
    zero_range_step {
        args: (),
        msg: "range step must be nonzero".to_string(),
        help: None,
    }

    /// For when a tensor length is not a non-negative integer.
    @formatted
    invalid_tensor_length {
        args: (length: impl Display),
        msg: format!("tensor length must be a non-negative integer, found {length}"),
        help: None,
    }

    /// For when a function returns with stray bindings in scope.
    @formatted
    information_leak {
        args: (names: impl Display),
        msg: format!("scope ends while still owning {names}"),
        help: Some("every variable must be unlet, pushed, stolen or returned before the scope ends".to_string()),
    }

    /// For when a callee destroyed a binding it only borrowed.
    @formatted
    borrowed_destroyed {
        args: (name: impl Display),
        msg: format!("borrowed variable `{name}` no longer exists at function return"),
        help: None,
    }

    /// For when a call passes the same variable under two names.
    @formatted
    aliased_arguments {
        args: (first: impl Display, second: impl Display),
        msg: format!("arguments `{first}` and `{second}` are the same variable"),
        help: Some("aliased cells would let one write silently change another value".to_string()),
    }

    /// For when argument or result counts disagree with the function header.
    @formatted
    call_arity {
        args: (name: impl Display, list: impl Display, expected: impl Display, found: impl Display),
        msg: format!("function `{name}` takes {expected} {list} parameters, found {found}"),
        help: None,
    }

    /// For when no candidate value satisfies a try block.
    @formatted
    exhausted_try {
        args: (),
        msg: "no candidate value passes the try block".to_string(),
        help: None,
    }

    /// For when re-running a try forwards does not reproduce the bound value.
    @formatted
    try_reversal_mismatch {
        args: (name: impl Display, expected: impl Display, actual: impl Display),
        msg: format!("try block is not reversible: `{name}` holds {expected} but re-running selects {actual}"),
        help: None,
    }

    /// For when a for-loop body changed its loop variable.
    @formatted
    loop_variable_modified {
        args: (name: impl Display, expected: impl Display, actual: impl Display),
        msg: format!("loop variable `{name}` must still hold {expected} after the body, found {actual}"),
        help: None,
    }

    /// For when parallel lanes approach a mutex in opposing directions.
    @formatted
    mutex_direction {
        args: (name: impl Display),
        msg: format!("lanes reached mutex `{name}` in opposing time directions"),
        help: None,
    }

    /// For when a sibling lane failed and this lane is torn down with it.
    @formatted
    lane_cancelled {
        args: (tid: impl Display),
        msg: format!("lane {tid} cancelled because a sibling lane failed"),
        help: None,
    }

    /// For when a stolen argument to a parallel call is not an array of lane length.
    @formatted
    lane_slice_mismatch {
        args: (name: impl Display, lanes: impl Display, found: impl Display),
        msg: format!("stolen argument `{name}` must be an array of length {lanes} to split across lanes, found {found}"),
        help: None,
    }

    /// For when the lane count of a parallel call is not a positive integer.
    @formatted
    invalid_lane_count {
        args: (count: impl Display),
        msg: format!("lane count must be a positive integer, found {count}"),
        help: None,
    }

    /// For when `pop` targets an array with no elements.
    @formatted
    pop_from_empty_array {
        args: (),
        msg: "cannot pop from an empty array".to_string(),
        help: None,
    }

    /// For when an argument's mono-ness disagrees with the parameter's.
    @formatted
    mono_parameter_mismatch {
        args: (name: impl Display, parameter: impl Display),
        msg: format!("argument `{name}` and parameter `{parameter}` must agree on being mono"),
        help: None,
    }

    /// For when a range has more elements than could ever be materialised.
    @formatted
    range_too_long {
        args: (length: impl Display),
        msg: format!("range with {length} elements is too long"),
        help: None,
    }
);
