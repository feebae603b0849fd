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

//! The Railway reversible programming language.
//!
//! Railway programs run deterministically in both time directions; this
//! crate wires the parser and the execution engine together behind the
//! `railway` command-line driver.

#![forbid(unsafe_code)]

pub use railway_ast as ast;
pub use railway_errors as errors;
pub use railway_interpreter as interpreter;
pub use railway_parser as parser;

use railway_errors::{CliError, Result};
use railway_interpreter::{Engine, Output};

use std::fs;
use std::path::Path;

/// Parses and executes Railway source text, printing into `output`.
pub fn run_source(source: &str, output: Output) -> Result<()> {
    let program = railway_parser::parse(source)?;
    let engine = Engine::new(program, output)?;
    engine.run()
}

/// Executes the Railway program in the file at `path`, printing to the
/// process standard output.
pub fn run_file(path: &Path) -> Result<()> {
    let source = fs::read_to_string(path)
        .map_err(|error| CliError::failed_to_read_file(path.display(), error))?;
    run_source(&source, Output::stdout())
}
