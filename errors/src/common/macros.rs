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

/// A macro that, given an error type name, a code mask, a code prefix, and a
/// list of diagnostics, generates the error type plus one constructor per
/// diagnostic, each carrying a stable error code.
///
/// `@formatted` diagnostics take a trailing `span` argument and point at
/// source code; `@backtraced` diagnostics have no source location.
#[macro_export]
macro_rules! create_messages {
    // Done recursing over diagnostics.
    (@step $code:expr,) => {
        /// Returns the number of diagnostics defined for this error type.
        #[inline(always)]
        pub fn num_exit_codes() -> i32 {
            $code
        }
    };
    // A diagnostic pointing at a source span.
    (@step $code:expr, $(#[$error_func_docs:meta])* @formatted $name:ident { args: ($($arg_names:ident: $arg_types:ty),*$(,)?), msg: $message:expr, help: $help:expr, } $($tail:tt)*) => {
        $(#[$error_func_docs])*
        pub fn $name($($arg_names: $arg_types,)* span: ::railway_span::Span) -> Self {
            Self::Formatted($crate::common::Formatted::new_from_span(
                $message,
                $help,
                $code + Self::code_mask(),
                Self::code_prefix(),
                span,
            ))
        }

        $crate::create_messages!(@step $code + 1i32, $($tail)*);
    };
    // A diagnostic with no source location.
    (@step $code:expr, $(#[$error_func_docs:meta])* @backtraced $name:ident { args: ($($arg_names:ident: $arg_types:ty),*$(,)?), msg: $message:expr, help: $help:expr, } $($tail:tt)*) => {
        $(#[$error_func_docs])*
        pub fn $name($($arg_names: $arg_types),*) -> Self {
            Self::Backtraced($crate::common::Backtraced::new_from_backtrace(
                $message,
                $help,
                $code + Self::code_mask(),
                Self::code_prefix(),
            ))
        }

        $crate::create_messages!(@step $code + 1i32, $($tail)*);
    };
    // Entry point: generate the type, then recurse over the diagnostics.
    ($(#[$error_type_docs:meta])* $type_:ident, code_mask: $code_mask:expr, code_prefix: $code_prefix:expr, $($tail:tt)*) => {
        $(#[$error_type_docs])*
        #[derive(Clone, Debug, ::thiserror::Error)]
        pub enum $type_ {
            #[error(transparent)]
            Formatted(#[from] $crate::common::Formatted),

            #[error(transparent)]
            Backtraced(#[from] $crate::common::Backtraced),
        }

        impl $type_ {
            /// The offset this error type's codes start at.
            #[inline(always)]
            pub fn code_mask() -> i32 {
                $code_mask
            }

            /// The prefix identifying this error type in codes.
            #[inline(always)]
            pub fn code_prefix() -> &'static str {
                $code_prefix
            }

            /// The stable code of this diagnostic, e.g. `EPAR0370003`.
            pub fn error_code(&self) -> String {
                match self {
                    Self::Formatted(formatted) => formatted.error_code(),
                    Self::Backtraced(backtraced) => backtraced.error_code(),
                }
            }

            $crate::create_messages!(@step 0i32, $($tail)*);
        }
    };
}
