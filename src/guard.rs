// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Header guard rewriting
//!
//! A header is accepted when its first line starts with `#ifndef`, its
//! second with `#define` and its last with `#endif `. Those three lines are
//! replaced with a guard derived from the header's path; every other line is
//! copied byte for byte, line endings included.
//!
//! The new content is built in memory and only written back once the whole
//! file has been validated, so a rejected header is never touched on disk.

use crate::args::Base;
use log::{debug, info};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

// Prefix checks are 7 bytes wide: `#ifndef` and `#define` without their
// trailing space, `#endif` with it.
const IFNDEF: &[u8] = b"#ifndef";
const DEFINE: &[u8] = b"#define";
const ENDIF: &[u8] = b"#endif ";

/// Per-file failure. Display text is the diagnostic shown after the file name.
#[derive(Debug, Error)]
pub enum FixError {
    #[error("File path does not begin with base ({base}/)")]
    OutsideBase { base: String },
    #[error("Failed to open file for reading: {0}")]
    OpenRead(#[source] io::Error),
    #[error("Failed to read from file: End of file")]
    UnexpectedEof,
    #[error("Failed to read from file: {0}")]
    Read(#[source] io::Error),
    #[error("First line does not begin with #ifndef")]
    FirstLine,
    #[error("Second line does not begin with #define")]
    SecondLine,
    #[error("Last line does not begin with #endif")]
    LastLine,
    #[error("Failed to open file for writing: {0}")]
    OpenWrite(#[source] io::Error),
    #[error("Failed to write to file: {0}")]
    Write(#[source] io::Error),
}

/// Guard macro name derived from a header's path, as raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderGuard(Vec<u8>);

impl HeaderGuard {
    /// Strip `base` and one `/` from `file`, upper-case the rest and map
    /// `/` and `.` to `_`. `None` when `file` is not under `base/`.
    ///
    /// - `compute("/a/b/c/d.h", "/a/b")` -> `C_D_H`
    /// - `compute("/foo/bar.h", "")` -> `FOO_BAR_H`
    pub fn compute(file: impl AsRef<[u8]>, base: impl AsRef<[u8]>) -> Option<Self> {
        let relative = file.as_ref().strip_prefix(base.as_ref())?.strip_prefix(b"/")?;
        let token = relative
            .iter()
            .map(|&b| match b {
                b'/' | b'.' => b'_',
                b => b.to_ascii_uppercase(),
            })
            .collect();
        Some(HeaderGuard(token))
    }

    pub fn from_path(file: &Path, base: &Base) -> Result<Self, FixError> {
        Self::compute(file.as_os_str().as_encoded_bytes(), base.as_bytes()).ok_or_else(|| {
            FixError::OutsideBase {
                base: base.display().to_string(),
            }
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for HeaderGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// The two line buffers behind `Lookahead`, kept between files so their
/// allocations are reused.
#[derive(Debug, Default)]
pub struct LineBuffers {
    pending: Vec<u8>,
    next: Vec<u8>,
}

/// Line reader holding at most one pending line.
///
/// `advance` reads a new line and, when it gets one, releases the line that
/// was pending before it. The line still pending at end of input is the last
/// line of the file and is never released by `advance`.
pub struct Lookahead<'a, R> {
    reader: R,
    lines: &'a mut LineBuffers,
    held: bool,
}

impl<'a, R: BufRead> Lookahead<'a, R> {
    pub fn new(reader: R, lines: &'a mut LineBuffers) -> Self {
        lines.pending.clear();
        lines.next.clear();
        Self { reader, lines, held: false }
    }

    /// Read one line into the pending slot, dropping whatever it held.
    /// End of input is an error here.
    pub fn read_line(&mut self) -> Result<&[u8], FixError> {
        self.lines.pending.clear();
        self.held = false;
        match self.reader.read_until(b'\n', &mut self.lines.pending) {
            Ok(0) => Err(FixError::UnexpectedEof),
            Ok(_) => {
                self.held = true;
                Ok(&self.lines.pending)
            }
            Err(e) => Err(FixError::Read(e)),
        }
    }

    /// Read the next line. Returns `false` at end of input, leaving the
    /// pending line where it is.
    pub fn advance(&mut self) -> Result<bool, FixError> {
        self.lines.next.clear();
        match self.reader.read_until(b'\n', &mut self.lines.next) {
            Ok(0) => Ok(false),
            Ok(_) => {
                std::mem::swap(&mut self.lines.pending, &mut self.lines.next);
                if !self.held {
                    // Nothing was pending, so there is nothing to release.
                    self.lines.next.clear();
                    self.held = true;
                }
                Ok(true)
            }
            Err(e) => Err(FixError::Read(e)),
        }
    }

    /// Line displaced by the last successful `advance`
    pub fn released(&self) -> &[u8] {
        &self.lines.next
    }

    pub fn pending(&self) -> Option<&[u8]> {
        self.held.then_some(self.lines.pending.as_slice())
    }
}

/// Rewrites header guards one file at a time
#[derive(Debug, Default)]
pub struct GuardFixer {
    lines: LineBuffers,
}

impl GuardFixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `file` and rewrite its guard in place.
    ///
    /// Nothing is written unless every check passes. Once the file has been
    /// reopened for writing its old content is gone, so a failure in the
    /// final write can leave it truncated.
    pub fn fix_file(&mut self, file: &Path, base: &Base) -> Result<(), FixError> {
        let guard = HeaderGuard::from_path(file, base)?;
        debug!("{}: guard is {}", file.display(), guard);

        let input = File::open(file).map_err(FixError::OpenRead)?;
        // `rewrite` takes the reader by value, so the input is closed before
        // the file is reopened for writing.
        let content = self.rewrite(BufReader::new(input), &guard)?;

        let mut output = File::create(file).map_err(FixError::OpenWrite)?;
        output.write_all(&content).map_err(FixError::Write)?;
        output.flush().map_err(FixError::Write)?;
        debug!("{}: wrote {} bytes", file.display(), content.len());

        info!("{}: rewrote guard as {}", file.display(), guard);
        Ok(())
    }

    /// Produce the rewritten content of a header read from `reader`
    pub fn rewrite<R: BufRead>(&mut self, reader: R, guard: &HeaderGuard) -> Result<Vec<u8>, FixError> {
        let mut out = Vec::new();
        let mut lines = Lookahead::new(reader, &mut self.lines);

        if !lines.read_line()?.starts_with(IFNDEF) {
            return Err(FixError::FirstLine);
        }
        emit_line(&mut out, "#ifndef ", guard);

        if !lines.read_line()?.starts_with(DEFINE) {
            return Err(FixError::SecondLine);
        }
        emit_line(&mut out, "#define ", guard);

        lines.read_line()?;
        while lines.advance()? {
            out.extend_from_slice(lines.released());
        }

        match lines.pending() {
            Some(last) if last.starts_with(ENDIF) => {}
            _ => return Err(FixError::LastLine),
        }
        emit_line(&mut out, "#endif // ", guard);

        Ok(out)
    }
}

fn emit_line(out: &mut Vec<u8>, directive: &str, guard: &HeaderGuard) {
    out.extend_from_slice(directive.as_bytes());
    out.extend_from_slice(guard.as_bytes());
    out.push(b'\n');
}
