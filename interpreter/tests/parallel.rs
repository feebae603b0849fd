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

//! End-to-end tests of parallel calls, barriers and the directional mutex.

use railway_errors::RailwayError;
use railway_interpreter::{Engine, Output};

fn run(source: &str) -> Result<String, RailwayError> {
    let program = railway_parser::parse(source)?;
    let (output, buffer) = Output::buffer();
    let engine = Engine::new(program, output)?;
    engine.run()?;
    Ok(buffer.contents())
}

fn run_round_trip(source: &str) -> Result<(), RailwayError> {
    let program = railway_parser::parse(source)?;
    let (output, _buffer) = Output::buffer();
    let engine = Engine::new(program, output)?;
    engine.run()?;
    engine.run_main(true)
}

#[test]
fn lanes_slice_stolen_arrays_and_regroup_results() {
    let source = "\
func add_tid(total)(x)
    mutex guard
        total += x
    xetum
    x += TID
return (x)

func main()()
    let total = 0
    let chunks = [10, 20, 30]
    call (chunks) => add_tid{3}(total) => (out)
    print total
    print out
    unlet out = [10, 21, 32]
    total -= 60
    unlet total = 0
return ()
";
    assert_eq!(run(source).unwrap(), "60\n[10, 21, 32]\n");
    // Backwards, the mutex serialises the subtractions in descending TID
    // order and the slices are reassembled into the original chunks.
    run_round_trip(source).unwrap();
}

#[test]
fn tid_and_lane_count_are_visible_inside_lanes() {
    let source = "\
func label()(x)
    x += TID * 10 + #TID
return (x)

func main()()
    let xs = [0, 0, 0, 0]
    call (xs) => label{4}() => (out)
    print out
    unlet out = [4, 14, 24, 34]
return ()
";
    assert_eq!(run(source).unwrap(), "[4, 14, 24, 34]\n");
}

#[test]
fn sequential_code_sees_lane_zero_of_one() {
    let source = "\
func main()()
    print TID, #TID
return ()
";
    assert_eq!(run(source).unwrap(), "0 1\n");
}

#[test]
fn barriers_order_phases_across_lanes() {
    // Every lane deposits into `acc` under the mutex, the barrier waits for
    // all deposits, then every lane reads the same settled total.
    let source = "\
func rendezvous(acc)(x)
    mutex gather
        acc += x
    xetum
    barrier settled
    x += acc
return (x)

func main()()
    let acc = 0
    let parts = [1, 2, 3]
    call (parts) => rendezvous{3}(acc) => (out)
    print out
    unlet out = [7, 8, 9]
    acc -= 6
    unlet acc = 0
return ()
";
    assert_eq!(run(source).unwrap(), "[7, 8, 9]\n");
    run_round_trip(source).unwrap();
}

#[test]
fn opposing_mutex_directions_cancel_the_context() {
    // Lane 0 calls the critical section forwards while lane 1 uncalls it,
    // so the two lanes approach the mutex in opposing time directions.
    let source = "\
func crit(t)()
    mutex guard
        t += 1
    xetum
return ()

func mixed(t)(x)
    if (TID = 0)
        call crit(t)
    else
        uncall crit(t)
    fi (TID = 0)
return (x)

func main()()
    let t = 0
    let xs = [0, 0]
    call (xs) => mixed{2}(t) => (out)
    unlet out = [0, 0]
    unlet t = 0
return ()
";
    let error = run(source).unwrap_err();
    assert_eq!(error.error_code(), "ERUN0371023");
}

#[test]
fn a_failing_lane_cancels_its_siblings() {
    // Lane 1 divides by zero; lane 0 is parked at a barrier it would
    // otherwise wait on forever, and the original error is what surfaces.
    let source = "\
func risky(acc)(x)
    if (TID = 1)
        x /= 0
    else
        barrier never
    fi (TID = 1)
return (x)

func main()()
    let acc = 0
    let xs = [1, 1]
    call (xs) => risky{2}(acc) => (out)
    unlet out = [1, 1]
    unlet acc = 0
return ()
";
    let error = run(source).unwrap_err();
    assert_eq!(error.error_code(), "ERUN0371012");
}

#[test]
fn stolen_arguments_must_slice_per_lane() {
    let source = "\
func noop()(x)
return (x)

func main()()
    let xs = [1, 2]
    call (xs) => noop{3}() => (out)
    unlet out = [1, 2]
return ()
";
    let error = run(source).unwrap_err();
    assert_eq!(error.error_code(), "ERUN0371025");
}

#[test]
fn lane_counts_must_be_positive_integers() {
    let source = "\
func noop()(x)
return (x)

func main()()
    let xs = [1]
    call (xs) => noop{0}() => (out)
    unlet out = [1]
return ()
";
    let error = run(source).unwrap_err();
    assert_eq!(error.error_code(), "ERUN0371026");
}
