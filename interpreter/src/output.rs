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

use railway_errors::{CliError, Result};

use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// The standard-output sink `print` writes to.
///
/// Shared by all lanes of a parallel call; each `print` statement appends
/// one whole line under the lock, so lines never interleave mid-way.
#[derive(Clone)]
pub struct Output {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Output {
    /// An output sink writing to the process standard output.
    pub fn stdout() -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(std::io::stdout()))),
        }
    }

    /// An in-memory output sink, plus a handle to read back what was
    /// written. Used by tests and embedders.
    pub fn buffer() -> (Self, OutputBuffer) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let output = Self {
            sink: Arc::new(Mutex::new(Box::new(SharedBuffer(buffer.clone())))),
        };
        (output, OutputBuffer(buffer))
    }

    /// Writes one line, newline-terminated.
    pub(crate) fn write_line(&self, line: &str) -> Result<()> {
        let mut sink = self.sink.lock();
        writeln!(sink, "{line}")
            .and_then(|()| sink.flush())
            .map_err(|error| CliError::failed_to_write_output(error).into())
    }
}

/// Reads back what a buffered [`Output`] has collected.
#[derive(Clone)]
pub struct OutputBuffer(Arc<Mutex<Vec<u8>>>);

impl OutputBuffer {
    /// Everything printed so far, as UTF-8 text.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
