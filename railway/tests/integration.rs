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

//! Driver-level tests: source in, printed output (or a diagnostic) out.

use railway_interpreter::Output;
use railway_lang::{run_file, run_source};

use std::io::Write;

const FIBONACCI: &str = "\
$ Iteratively computes fibonacci numbers; the loop conditions
  make the iteration count recoverable from the final state. $
func main()()
    let a = 1
    let b = 1
    let i = 0
    loop (i < 10)
        swap a <=> b
        b += a
        i += 1
    pool (b != 1)
    print b
    i -= 10
    unlet i = 0
    b -= 144
    unlet b = 0
    a -= 89
    unlet a = 0
return ()
";

#[test]
fn fibonacci_program_prints_its_answer() {
    let (output, buffer) = Output::buffer();
    run_source(FIBONACCI, output).unwrap();
    assert_eq!(buffer.contents(), "144\n");
}

#[test]
fn programs_run_from_files() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FIBONACCI.as_bytes()).unwrap();
    run_file(file.path()).unwrap();
}

#[test]
fn missing_files_are_cli_errors() {
    let error = run_file(std::path::Path::new("does-not-exist.rail")).unwrap_err();
    assert!(error.error_code().starts_with("ECLI"), "{error}");
}

#[test]
fn parse_errors_surface_with_their_span() {
    let error = run_source("func main()()\n    let = 6\nreturn ()\n", Output::buffer().0).unwrap_err();
    assert!(error.error_code().starts_with("EPAR"), "{error}");
    assert!(error.to_string().contains("2:"), "{error}");
}

#[test]
fn runtime_errors_surface_to_the_driver() {
    let source = "func main()()\n    let x = 6\n    unlet x = 7\nreturn ()\n";
    let error = run_source(source, Output::buffer().0).unwrap_err();
    assert!(error.error_code().starts_with("ERUN"), "{error}");
}
