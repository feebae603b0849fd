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

use crate::parse;

use railway_ast::*;
use railway_errors::RailwayError;

/// Wraps a statement into a minimal function so it can be parsed alone.
fn parse_main(body: &str) -> Result<Program, RailwayError> {
    parse(&format!("func main()()\n{body}\nreturn ()\n"))
}

fn main_body(program: &Program) -> &[Statement] {
    &program.functions["main"].body
}

#[track_caller]
fn assert_error_code(result: Result<Program, RailwayError>, code: &str) {
    match result {
        Ok(program) => panic!("expected {code}, parsed: {program}"),
        Err(error) => assert_eq!(error.error_code(), code),
    }
}

#[test]
fn parses_function_table() {
    let program = parse(
        "func helper(a)(b)\n    b += a\nreturn (b)\n\nfunc main()()\nreturn ()\n",
    )
    .unwrap();
    assert_eq!(program.functions.len(), 2);
    let helper = &program.functions["helper"];
    assert_eq!(helper.borrowed.len(), 1);
    assert_eq!(helper.stolen.len(), 1);
    assert_eq!(helper.returns.len(), 1);
    assert!(!helper.undoreturn);
}

#[test]
fn parses_undoreturn() {
    let program = parse("func probe(x)()\n    let t = x + 1\nundoreturn (t)\n").unwrap();
    assert!(program.functions["probe"].undoreturn);
}

#[test]
fn binary_folding_is_left_associative() {
    let program = parse_main("let x = 1 - 2 - 3").unwrap();
    let Statement::Let(let_) = &main_body(&program)[0] else {
        panic!("expected let");
    };
    // (1 - 2) - 3, not 1 - (2 - 3).
    assert_eq!(let_.value.to_string(), "((1 - 2) - 3)");
}

#[test]
fn precedence_tightens_towards_pow() {
    let program = parse_main("let x = 1 + 2 * 3 ** 4 < 5 & 6").unwrap();
    let Statement::Let(let_) = &main_body(&program)[0] else {
        panic!("expected let");
    };
    assert_eq!(let_.value.to_string(), "(((1 + (2 * (3 ** 4))) < 5) & 6)");
}

#[test]
fn unary_prefixes_bind_tighter_than_binops() {
    let program = parse_main("let x = -1 + !y").unwrap();
    let Statement::Let(let_) = &main_body(&program)[0] else {
        panic!("expected let");
    };
    assert_eq!(let_.value.to_string(), "(-1 + !y)");
}

#[test]
fn rational_literals() {
    let program = parse_main("let x = 5/2").unwrap();
    let Statement::Let(let_) = &main_body(&program)[0] else {
        panic!("expected let");
    };
    let Expression::Literal(literal) = &let_.value else {
        panic!("expected literal");
    };
    assert_eq!(literal.value.to_string(), "5/2");
}

#[test]
fn zero_denominator_is_rejected() {
    assert_error_code(parse_main("let x = 3/0"), "EPAR0370004");
}

#[test]
fn self_modification_is_rejected() {
    assert_error_code(parse_main("x += x"), "EPAR0370011");
    assert_error_code(parse_main("x += y + board[x - 1]"), "EPAR0370011");
    assert_error_code(parse_main("x[x[0]] += 1"), "EPAR0370011");
    // A different name is fine.
    parse_main("x += y").unwrap();
}

#[test]
fn non_invertible_operators_need_mono_targets() {
    assert_error_code(parse_main("x %= 2"), "EPAR0370013");
    assert_error_code(parse_main("x ^= 1"), "EPAR0370013");
    parse_main(".x %= 2").unwrap();
}

#[test]
fn mono_values_must_not_reach_non_mono_bindings() {
    assert_error_code(parse_main("let x = .hidden + 1"), "EPAR0370012");
    assert_error_code(parse_main("x += .hidden"), "EPAR0370012");
    parse_main("let .x = visible + 1").unwrap();
}

#[test]
fn loop_without_pool_needs_mono_condition() {
    assert_error_code(parse_main("loop (n > 0)\n    n -= 1\npool ()"), "EPAR0370014");
    parse_main("loop (.n > 0)\n    .n -= 1\npool ()").unwrap();
    parse_main("loop (n > 0)\n    n -= 1\npool (n < limit)").unwrap();
}

#[test]
fn mono_conditions_demand_mono_bodies() {
    assert_error_code(parse_main("if (.flag)\n    x += 1\nfi ()"), "EPAR0370015");
    parse_main("if (.flag)\n    .x += 1\nfi ()").unwrap();
}

#[test]
fn empty_fi_reuses_the_forward_condition() {
    let program = parse_main("if (x > 0)\n    x -= 1\nfi ()").unwrap();
    let Statement::If(if_) = &main_body(&program)[0] else {
        panic!("expected if");
    };
    assert!(if_.backward_condition.is_none());
    assert_eq!(if_.entry_condition(true), if_.entry_condition(false));
}

#[test]
fn catch_outside_try_is_rejected() {
    assert_error_code(parse_main("catch (x = 3)"), "EPAR0370020");
    // Nested blocks do not inherit catch permission.
    assert_error_code(
        parse_main("try (k in [0 to 5])\n    if (k > 1)\n        catch (k = 3)\n    fi ()\nyrt"),
        "EPAR0370020",
    );
    parse_main("try (k in [0 to 5])\n    catch (k = 3)\nyrt").unwrap();
}

#[test]
fn barriers_may_not_sit_inside_mutexes() {
    assert_error_code(parse_main("mutex guard\n    barrier sync\nxetum"), "EPAR0370021");
    parse_main("mutex guard\n    total += 1\nxetum\nbarrier sync").unwrap();
}

#[test]
fn call_shapes() {
    let program = parse_main("call (seed) => shuffle(deck) => (order)").unwrap();
    let Statement::Call(call) = &main_body(&program)[0] else {
        panic!("expected call");
    };
    assert!(!call.uncall);
    assert_eq!(call.stolen.len(), 1);
    assert_eq!(call.borrowed.len(), 1);
    assert_eq!(call.results.len(), 1);
    assert!(call.lanes.is_none());

    let program = parse_main("uncall step()").unwrap();
    let Statement::Call(call) = &main_body(&program)[0] else {
        panic!("expected uncall");
    };
    assert!(call.uncall);
    assert!(call.stolen.is_empty() && call.results.is_empty());

    let program = parse_main("call (chunks) => sum{4}(total) => (partials)").unwrap();
    let Statement::Call(call) = &main_body(&program)[0] else {
        panic!("expected parallel call");
    };
    assert_eq!(call.lanes.as_ref().unwrap().to_string(), "4");
}

#[test]
fn global_declarations() {
    let program = parse("global size = 8\nglobal area = size * size\nfunc main()()\nreturn ()\n").unwrap();
    assert_eq!(program.globals.len(), 2);
    assert_error_code(
        parse("global size = 8\nglobal size = 9\nfunc main()()\nreturn ()\n"),
        "EPAR0370009",
    );
    assert_error_code(parse("global .size = 8\n"), "EPAR0370010");
}

#[test]
fn duplicate_definitions_are_rejected() {
    assert_error_code(
        parse("func f()()\nreturn ()\nfunc f()()\nreturn ()\n"),
        "EPAR0370007",
    );
    assert_error_code(parse("func f(a)(a)\nreturn ()\n"), "EPAR0370008");
}

#[test]
fn include_is_recognised_but_unsupported() {
    assert_error_code(parse("include library\n"), "EPAR0370023");
}

#[test]
fn statements_end_at_newlines() {
    assert_error_code(parse_main("let x = 1 let y = 2"), "EPAR0370000");
    parse_main("let x = 1\nlet y = 2\nunlet y = 2\nunlet x = 1").unwrap();
}

#[test]
fn continuations_extend_statements() {
    parse_main("let x = 1 + \\\n    2").unwrap();
}

#[test]
fn mono_statements_are_tagged() {
    let program = parse_main("let .x = 1\nlet y = 2\nunlet y = 2").unwrap();
    let body = main_body(&program);
    assert!(body[0].is_mono());
    assert!(!body[1].is_mono());
}
