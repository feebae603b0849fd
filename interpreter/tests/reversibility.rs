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

//! End-to-end tests of the sequential engine: whole programs are parsed and
//! run, forwards and backwards.
//!
//! A program whose `main` ends with a clean scope exercises the leak check
//! by merely completing; the `unlet` value checks double as state
//! assertions, so most tests assert through the language itself.

use railway_errors::RailwayError;
use railway_interpreter::{Engine, Output};

/// Parses and runs `source` forwards, returning what it printed.
fn run(source: &str) -> Result<String, RailwayError> {
    let program = railway_parser::parse(source)?;
    let (output, buffer) = Output::buffer();
    let engine = Engine::new(program, output)?;
    engine.run()?;
    Ok(buffer.contents())
}

/// Runs `source` forwards and then backwards. Since a successful forward
/// run leaves nothing but `argv`, the backward run starts from the same
/// state the forward run ended in; it must complete cleanly too, undoing
/// every statement in reverse.
fn run_round_trip(source: &str) -> Result<(), RailwayError> {
    let program = railway_parser::parse(source)?;
    let (output, _buffer) = Output::buffer();
    let engine = Engine::new(program, output)?;
    engine.run()?;
    engine.run_main(true)
}

#[track_caller]
fn assert_error_code(result: Result<String, RailwayError>, code: &str) {
    match result {
        Ok(output) => panic!("expected {code}, ran fine with output: {output:?}"),
        Err(error) => assert_eq!(error.error_code(), code),
    }
}

// A let/modify/unlet chain that balances.
#[test]
fn unlet_with_matching_value_succeeds() {
    let source = "func main()()\n    let x = 6\n    x += 5\n    unlet x = 11\nreturn ()\n";
    assert_eq!(run(source).unwrap(), "");
    run_round_trip(source).unwrap();
}

// The same chain with a wrong unlet value.
#[test]
fn unlet_with_wrong_value_fails() {
    let source = "func main()()\n    let x = 6\n    x += 5\n    unlet x = 10\nreturn ()\n";
    assert_error_code(run(source), "ERUN0371003");
}

// The halving loop. Forward it divides until the condition dies;
// backward it doubles until n is 10 again.
#[test]
fn loop_halving_round_trips() {
    let source = "\
func main()()
    let n = 10
    loop (n > 1)
        n /= 2
    pool (n != 10)
    unlet n = 5/8
return ()
";
    assert_eq!(run(source).unwrap(), "");
    run_round_trip(source).unwrap();
}

// The loop endpoint assertions pin down where a backward run stops: the
// backward condition must be false on entry and true on exit.
#[test]
fn loop_endpoint_assertions_fire() {
    // n != 10 is already true at entry.
    let source = "\
func main()()
    let n = 12
    loop (n > 1)
        n /= 2
    pool (n != 10)
    unlet n = 3/4
return ()
";
    assert_error_code(run(source), "ERUN0371006");

    // The forward condition is false at entry.
    let source = "\
func main()()
    let n = 1
    loop (n > 1)
        n /= 2
    pool (n != 1)
    unlet n = 1
return ()
";
    assert_error_code(run(source), "ERUN0371006");
}

// The bouncing ball. The `fi` condition distinguishes the bounce from
// the flight, so the whole step is reversible.
#[test]
fn ball_bounce_round_trips() {
    let source = "\
func main()()
    let ball_y = -2
    let ball_speed_y = -3
    ball_y += ball_speed_y
    if (ball_y <= 0)
        ball_speed_y *= -1
        ball_y *= -1
    fi (ball_speed_y > 0)
    unlet ball_y = 5
    unlet ball_speed_y = 3
return ()
";
    assert_eq!(run(source).unwrap(), "");
    run_round_trip(source).unwrap();
}

// An `fi` condition that disagrees with the branch taken is an error,
// not a silent wrong answer.
#[test]
fn if_condition_disagreement_is_detected() {
    let source = "\
func main()()
    let ball_y = -2
    let ball_speed_y = -3
    ball_y += ball_speed_y
    if (ball_y <= 0)
        ball_speed_y *= -1
        ball_y *= -1
    fi (ball_y - ball_speed_y <= 0)
    unlet ball_y = 5
    unlet ball_speed_y = 3
return ()
";
    assert_error_code(run(source), "ERUN0371005");
}

// argmax finds its answer with mono scratch variables, promotes it,
// and the caller can uncall the whole thing to consume the answer again.
#[test]
fn argmax_via_mono_calls_and_uncalls() {
    let source = "\
func argmax(list)()
    let .i = 0
    let .best = 0
    for (.v in list)
        if (.v > list[.best])
            .best &= 0
            .best += .i
        fi ()
        .i += 1
    rof
    unlet .i = 5
    promote .best => best
return (best)

func main()()
    let data = [2, 3, 91, 5, 4]
    call argmax(data) => (winner)
    print winner
    uncall (winner) => argmax(data)
    unlet data = [2, 3, 91, 5, 4]
return ()
";
    assert_eq!(run(source).unwrap(), "2\n");
    run_round_trip(source).unwrap();
}

// try searches its candidates; the passing one stays bound, and the
// backward run removes it again.
#[test]
fn try_binds_the_passing_candidate() {
    let source = "\
func main()()
    try (k in [0 to 5])
        catch (k != 3)
    yrt
    print k
    unlet k = 3
return ()
";
    assert_eq!(run(source).unwrap(), "3\n");
    run_round_trip(source).unwrap();
}

#[test]
fn try_rewinds_partial_work_between_candidates() {
    // Each rejected candidate's work is undone before the next attempt, so
    // `seen` counts only the passing candidate.
    let source = "\
func main()()
    let seen = 0
    try (k in [0 to 5])
        seen += 1
        catch (k < 2)
    yrt
    print k, seen
    unlet k = 2
    seen -= 1
    unlet seen = 0
return ()
";
    assert_eq!(run(source).unwrap(), "2 1\n");
    run_round_trip(source).unwrap();
}

#[test]
fn exhausted_try_is_an_error() {
    let source = "\
func main()()
    try (k in [0 to 3])
        catch (1)
    yrt
    unlet k = 0
return ()
";
    assert_error_code(run(source), "ERUN0371020");
}

// A call followed by the matching uncall is the identity, even with stolen cells and
// borrowed state in play.
#[test]
fn call_then_uncall_is_identity() {
    let source = "\
func shuffle_pair(base)(x, y)
    swap x <=> y
    x += base
return (x, y)

func main()()
    let base = 10
    let p = 1
    let q = 2
    call (p, q) => shuffle_pair(base) => (r, s)
    print r, s
    uncall (r, s) => shuffle_pair(base) => (p, q)
    unlet q = 2
    unlet p = 1
    unlet base = 10
return ()
";
    assert_eq!(run(source).unwrap(), "12 1\n");
    run_round_trip(source).unwrap();
}

// A stray binding at function return is an information leak naming the
// culprit, not a silent success.
#[test]
fn leaked_bindings_are_reported_by_name() {
    let source = "\
func sloppy()()
    let leftover = 1
return ()

func main()()
    call sloppy()
return ()
";
    let error = run(source).unwrap_err();
    assert_eq!(error.error_code(), "ERUN0371016");
    assert!(error.to_string().contains("`leftover`"), "{error}");
}

#[test]
fn destroying_a_borrowed_cell_is_detected() {
    let source = "\
func vandal(x)()
    unlet x = 5
return ()

func main()()
    let x = 5
    call vandal(x)
    unlet x = 5
return ()
";
    assert_error_code(run(source), "ERUN0371017");
}

#[test]
fn aliased_arguments_are_rejected() {
    let source = "\
func twice(a, b)()
    a += b
return ()

func main()()
    let x = 1
    call twice(x, x)
    unlet x = 1
return ()
";
    assert_error_code(run(source), "ERUN0371018");
}

// Rationals are exact; a third three times is one.
#[test]
fn thirds_sum_exactly() {
    let source = "\
func main()()
    let x = 1/3 + 1/3 + 1/3
    unlet x = 1
return ()
";
    assert_eq!(run(source).unwrap(), "");
}

#[test]
fn print_serialises_rationals_and_arrays() {
    let source = "\
func main()()
    let x = 10/8
    let xs = [1, [2, 5/2], []]
    print x, xs, 4
    unlet xs = [1, [2, 5/2], []]
    unlet x = 5/4
return ()
";
    assert_eq!(run(source).unwrap(), "5/4 [1, [2, 5/2], []] 4\n");
}

#[test]
fn zero_multiplication_in_place_fails() {
    let source = "\
func main()()
    let x = 5
    let y = 0
    x *= y
    unlet y = 0
    unlet x = 0
return ()
";
    assert_error_code(run(source), "ERUN0371013");
}

#[test]
fn division_by_zero_fails() {
    let source = "func main()()\n    let x = 1 / 0\n    unlet x = 0\nreturn ()\n";
    assert_error_code(run(source), "ERUN0371012");
}

#[test]
fn indexing_is_bounds_checked() {
    let source = "\
func main()()
    let xs = [1, 2, 3]
    print xs[5]
    unlet xs = [1, 2, 3]
return ()
";
    assert_error_code(run(source), "ERUN0371007");
}

#[test]
fn for_loops_push_and_pop_round_trip() {
    let source = "\
func main()()
    let squares = []
    for (i in [1 to 4])
        let sq = i * i
        push sq => squares
    rof
    print squares
    pop squares => nine
    unlet nine = 9
    pop squares => four
    unlet four = 4
    pop squares => one
    unlet one = 1
    unlet squares = []
return ()
";
    assert_eq!(run(source).unwrap(), "[1, 4, 9]\n");
    run_round_trip(source).unwrap();
}

#[test]
fn for_loops_iterate_backwards_in_reverse() {
    // The loop records its visit order; the unlets then pin it down.
    let source = "\
func main()()
    let order = []
    for (i in [1, 2, 3])
        let item = i
        push item => order
    rof
    unlet order = [1, 2, 3]
return ()
";
    run_round_trip(source).unwrap();
}

#[test]
fn ranges_with_steps_and_tensors() {
    let source = "\
func main()()
    let evens = [0 to 7 by 2]
    let board = [2 tensor [2 tensor 0]]
    board[1][0] += 5
    print evens, board
    board[1][0] -= 5
    unlet board = [2 tensor [2 tensor 0]]
    unlet evens = [0, 2, 4, 6]
return ()
";
    assert_eq!(run(source).unwrap(), "[0, 2, 4, 6] [[0, 0], [5, 0]]\n");
}

#[test]
fn do_yield_undo_leaves_no_residue() {
    let source = "\
func main()()
    let a = 5
    let b = 0
    do
        let tmp = a * 2
    yield
        b += tmp
    undo
    unlet b = 10
    unlet a = 5
return ()
";
    assert_eq!(run(source).unwrap(), "");
    run_round_trip(source).unwrap();
}

#[test]
fn undoreturn_functions_leave_only_their_copies() {
    let source = "\
func peek(data)()
    let total = data[0] + data[1]
undoreturn (total)

func main()()
    let data = [3, 4]
    call peek(data) => (sum)
    print sum
    unlet sum = 7
    unlet data = [3, 4]
return ()
";
    assert_eq!(run(source).unwrap(), "7\n");
    run_round_trip(source).unwrap();
}

// An undoreturn function that steals its argument: once the body has
// undone itself, the stolen cell moves back to the caller under its
// call-site name, so only the returned copy is new. Uncalling the same
// shape destroys the copy and leaves the handed-back cell alone.
#[test]
fn undoreturn_hands_stolen_cells_back() {
    let source = "\
func total_of()(data)
    let total = data[0] + data[1]
undoreturn (total)

func main()()
    let data = [3, 4]
    call (data) => total_of() => (sum)
    print sum, data
    uncall (sum) => total_of() => (data)
    unlet data = [3, 4]
return ()
";
    // `data` is printable after the call: the callee stole it, undid
    // itself, and gave it back.
    assert_eq!(run(source).unwrap(), "7 [3, 4]\n");
    // Backwards, the call's inverse destroys the copy without touching
    // the handed-back cell, and the uncall's inverse replays the whole
    // steal/copy/undo/hand-back dance.
    run_round_trip(source).unwrap();
}

#[test]
fn swap_exchanges_array_slots() {
    let source = "\
func main()()
    let xs = [1, 2, 3]
    let y = 9
    swap y <=> xs[0]
    unlet y = 1
    unlet xs = [9, 2, 3]
return ()
";
    assert_eq!(run(source).unwrap(), "");
    run_round_trip(source).unwrap();
}

#[test]
fn globals_are_readable_shadowable_and_write_protected() {
    let source = "\
global size = 4
global area = size * size

func main()()
    print area
    let size = 2
    print size
    unlet size = 2
    print size
return ()
";
    assert_eq!(run(source).unwrap(), "16\n2\n4\n");

    let source = "\
global size = 4

func main()()
    size += 1
return ()
";
    assert_error_code(run(source), "ERUN0371004");
}

#[test]
fn undefined_names_are_exists_errors() {
    assert_error_code(
        run("func main()()\n    print ghost\nreturn ()\n"),
        "ERUN0371000",
    );
    assert_error_code(
        run("func main()()\n    call ghost()\nreturn ()\n"),
        "ERUN0371001",
    );
}

#[test]
fn let_into_an_occupied_name_fails() {
    let source = "func main()()\n    let x = 1\n    let x = 2\nreturn ()\n";
    assert_error_code(run(source), "ERUN0371002");
}

#[test]
fn recursion_unwinds_cleanly() {
    // A recursive triangular sum: each activation steals the counter and
    // hands it back rebuilt, so every scope ends clean.
    let source = "\
func triangle(acc)(n)
    if (n > 0)
        acc += n
        n -= 1
        call (n) => triangle(acc) => (n)
        n += 1
    fi ()
return (n)

func main()()
    let acc = 0
    let n = 3
    call (n) => triangle(acc) => (m)
    print m, acc
    unlet m = 3
    acc -= 6
    unlet acc = 0
return ()
";
    assert_eq!(run(source).unwrap(), "3 6\n");
    run_round_trip(source).unwrap();
}
