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

/// Contains the CLI error definitions.
pub mod cli;
pub use self::cli::*;

/// Contains the interpreter error definitions.
pub mod interpreter;
pub use self::interpreter::*;

/// Contains the parser error definitions.
pub mod parser;
pub use self::parser::*;

use thiserror::Error;

/// The RailwayError type that contains all sub error types.
/// This allows a unified error type throughout the Railway crates.
#[derive(Clone, Debug, Error)]
pub enum RailwayError {
    /// Represents a CLI Error in a RailwayError.
    #[error(transparent)]
    CliError(#[from] CliError),

    /// Represents an Interpreter Error in a RailwayError.
    #[error(transparent)]
    InterpreterError(#[from] InterpreterError),

    /// Represents a Parser Error in a RailwayError.
    #[error(transparent)]
    ParserError(#[from] ParserError),
}

impl RailwayError {
    /// Implements the trait for RailwayError.
    pub fn error_code(&self) -> String {
        use RailwayError::*;

        match self {
            CliError(error) => error.error_code(),
            InterpreterError(error) => error.error_code(),
            ParserError(error) => error.error_code(),
        }
    }
}
