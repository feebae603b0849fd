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

use crate::create_messages;

use std::fmt::Display;

create_messages!(
    /// CliError enum that represents all the errors for the `railway` driver.
    CliError,
    code_mask: 372_000i32,
    code_prefix: "CLI",

    /// For when the source file cannot be read.
    @backtraced
    failed_to_read_file {
        args: (path: impl Display, error: impl Display),
        msg: format!("failed to read `{path}`: {error}"),
        help: None,
    }

    /// For when output cannot be written to the standard output sink.
    @backtraced
    failed_to_write_output {
        args: (error: impl Display),
        msg: format!("failed to write output: {error}"),
        help: None,
    }
);
