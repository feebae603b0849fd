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

use crate::common::Backtraced;

use railway_span::Span;

use colored::Colorize;
use std::fmt;

/// A diagnostic pointing at a span of source code.
///
/// Rendered as:
/// ```text
/// Error [EPAR0370003]: unexpected token `pool`
///     --> 4:9
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Formatted {
    /// The location of the offending source text.
    pub span: Span,
    /// The message, help, code and backtrace of the diagnostic.
    pub backtrace: Backtraced,
}

impl Formatted {
    /// Creates a diagnostic from the given message, code parts and span,
    /// capturing the current backtrace.
    pub fn new_from_span<S>(message: S, help: Option<String>, exit_code: i32, code_prefix: &str, span: Span) -> Self
    where
        S: ToString,
    {
        Self {
            span,
            backtrace: Backtraced::new_from_backtrace(message, help, exit_code, code_prefix),
        }
    }

    /// The stable code of this diagnostic, e.g. `EPAR0370003`.
    pub fn error_code(&self) -> String {
        self.backtrace.error_code()
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = format!("Error [{}]:", self.error_code());
        write!(f, "{} {}", header.bold().red(), self.backtrace.message)?;
        write!(f, "\n    {} {}", "-->".bold(), self.span)?;

        if let Some(help) = &self.backtrace.help {
            write!(f, "\n     {} {}", "= help:".bold(), help)?;
        }

        if std::env::var("RAILWAY_BACKTRACE").is_ok() {
            write!(f, "\n{:?}", self.backtrace.backtrace)?;
        }

        Ok(())
    }
}

impl std::error::Error for Formatted {
    fn description(&self) -> &str {
        &self.backtrace.message
    }
}
