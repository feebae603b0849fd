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

//! The errors for the Railway interpreter and its parser.
//!
//! Every diagnostic carries a stable error code (`EPAR…`, `ERUN…`, `ECLI…`)
//! so tests and users can match on the kind of failure without parsing the
//! message text.

#![forbid(unsafe_code)]

#[macro_use]
extern crate thiserror;

/// Contains the common functionalities for defining errors.
#[macro_use]
pub mod common;
pub use self::common::*;

/// Contains the errors for the Railway crates.
pub mod errors;
pub use self::errors::*;

/// A global result type for all Railway crates, that defaults the errors to be a RailwayError.
pub type Result<T, E = RailwayError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use railway_span::Span;

    #[test]
    fn parser_error_codes_are_stable() {
        let err = ParserError::unexpected("pool", "a statement", Span::dummy());
        assert_eq!(err.error_code(), "EPAR0370000");
    }

    #[test]
    fn interpreter_error_codes_use_their_own_mask() {
        let err = InterpreterError::division_by_zero(Span::dummy());
        assert!(err.error_code().starts_with("ERUN037"));
    }

    #[test]
    fn formatted_display_points_at_the_span() {
        colored::control::set_override(false);
        let err = ParserError::unexpected("&", "an expression", Span::new(3, 8, 9));
        let rendered = err.to_string();
        assert!(rendered.contains("--> 3:9"), "{rendered}");
        assert!(rendered.contains("found `&`"), "{rendered}");
    }
}
