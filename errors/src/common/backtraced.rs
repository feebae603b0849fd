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

use backtrace::Backtrace;
use colored::Colorize;
use std::fmt;

/// A diagnostic without a source location, carrying the backtrace of the
/// point it was constructed at.
#[derive(Clone, Debug)]
pub struct Backtraced {
    /// The error message.
    pub message: String,
    /// An optional hint on how to fix the error.
    pub help: Option<String>,
    /// The unique numeric identifier of the diagnostic.
    pub exit_code: i32,
    /// The prefix identifying the error type, e.g. `PAR`.
    pub code_prefix: String,
    /// The backtrace at the point the diagnostic was constructed.
    pub backtrace: Backtrace,
}

impl Backtraced {
    /// Creates a diagnostic from the given message and code parts, capturing
    /// the current backtrace.
    pub fn new_from_backtrace<S>(message: S, help: Option<String>, exit_code: i32, code_prefix: &str) -> Self
    where
        S: ToString,
    {
        Self {
            message: message.to_string(),
            help,
            exit_code,
            code_prefix: code_prefix.to_string(),
            backtrace: Backtrace::new(),
        }
    }

    /// The stable code of this diagnostic, e.g. `ECLI0372001`.
    pub fn error_code(&self) -> String {
        format!("E{}{:0>7}", self.code_prefix, self.exit_code)
    }
}

impl fmt::Display for Backtraced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = format!("Error [{}]:", self.error_code());
        write!(f, "{} {}", header.bold().red(), self.message)?;

        if let Some(help) = &self.help {
            write!(f, "\n{} {}", "= help:".bold(), help)?;
        }

        if std::env::var("RAILWAY_BACKTRACE").is_ok() {
            write!(f, "\n{:?}", self.backtrace)?;
        }

        Ok(())
    }
}

impl std::error::Error for Backtraced {
    fn description(&self) -> &str {
        &self.message
    }
}

// The backtrace is display-only state; two diagnostics are the same
// diagnostic when their code and message agree.
impl PartialEq for Backtraced {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && self.exit_code == other.exit_code && self.code_prefix == other.code_prefix
    }
}

impl Eq for Backtraced {}
