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

use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;
use std::process::exit;

/// The Railway interpreter: runs a reversible program's `main` function.
#[derive(Parser)]
#[command(name = "railway", author, version, about)]
struct Cli {
    /// Path to the Railway source file to execute.
    path: PathBuf,
}

fn main() {
    // `RAILWAY_LOG` selects tracing verbosity, e.g. `RAILWAY_LOG=debug`.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("RAILWAY_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(error) = railway_lang::run_file(&cli.path) {
        eprintln!("{error}");
        exit(1);
    }
}
