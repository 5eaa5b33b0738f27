// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Argument parsing and path resolution for fix-header-guard
//!
//! Turns the command line into a `Config`: the canonical base directory and
//! the canonical header paths to rewrite, in argument order.
//!
//! Usage: fix-header-guard [-b|--base BASE] [FILES...]
//!
//! Only the exact words `-b` and `--base` are flags. Every other argument,
//! including ones that start with `-`, is a file path.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Usage line printed on argument errors
pub const USAGE: &str = "Usage: fix-header-guard [-b|--base BASE] [FILES...]";

#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("-b|--base must be used with an argument")]
    MissingBase,
    #[error("-b|--base can only be specified once")]
    DuplicateBase,
    #[error("Failed to resolve {}: {}", .path.display(), .source)]
    ResolveBase {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to resolve {}: {}", .path.display(), .source)]
    ResolveFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ArgsError {
    /// Diagnostic line as printed on standard error
    pub fn diagnostic(&self) -> String {
        match self {
            ArgsError::MissingBase | ArgsError::DuplicateBase => format!("ERROR: {self}"),
            ArgsError::ResolveBase { .. } | ArgsError::ResolveFile { .. } => format!("Error: {self}"),
        }
    }
}

/// Canonical base directory.
///
/// The filesystem root is stored as an empty path so that stripping the base
/// and then `/` leaves the path relative to the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Base(PathBuf);

impl Base {
    /// Build a base from an already canonicalized directory
    pub fn from_canonical(path: &Path) -> Self {
        if path.parent().is_none() {
            Base(PathBuf::new())
        } else {
            Base(path.to_path_buf())
        }
    }

    /// Raw bytes of the base path, empty for the root
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_os_str().as_encoded_bytes()
    }

    pub fn display(&self) -> std::path::Display<'_> {
        self.0.display()
    }
}

/// Resolved run configuration
#[derive(Debug, Default)]
pub struct Config {
    pub base: Base,
    /// Canonical header paths, in argument order
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Parse arguments (without the program name) and canonicalize every path,
    /// in order.
    ///
    /// A missing, repeated or unresolvable base is fatal. A file that fails to
    /// resolve is passed to `on_skip` when it is reached and left out of
    /// `files`, so skips seen before a fatal error are still reported.
    pub fn from_args<I, S>(args: I, mut on_skip: impl FnMut(ArgsError)) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::<OsString>::into);
        let mut base = None;
        let mut files = Vec::new();

        while let Some(arg) = args.next() {
            if arg == "-b" || arg == "--base" {
                let value = args.next().ok_or(ArgsError::MissingBase)?;
                if base.is_some() {
                    return Err(ArgsError::DuplicateBase);
                }
                let path = PathBuf::from(value);
                let canonical = path
                    .canonicalize()
                    .map_err(|source| ArgsError::ResolveBase { path, source })?;
                base = Some(Base::from_canonical(&canonical));
            } else {
                let path = PathBuf::from(arg);
                match path.canonicalize() {
                    Ok(canonical) => files.push(canonical),
                    Err(source) => on_skip(ArgsError::ResolveFile { path, source }),
                }
            }
        }

        let base = base.unwrap_or_default();
        log::debug!("base resolved to {}", base.display());
        Ok(Config { base, files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_base_is_empty() {
        assert!(Base::from_canonical(Path::new("/")).as_bytes().is_empty());
    }

    #[test]
    fn test_base_keeps_path_bytes() {
        assert_eq!(Base::from_canonical(Path::new("/a/b")).as_bytes(), b"/a/b");
    }

    #[test]
    fn test_diagnostic_prefixes() {
        assert_eq!(
            ArgsError::MissingBase.diagnostic(),
            "ERROR: -b|--base must be used with an argument"
        );
        assert_eq!(
            ArgsError::DuplicateBase.diagnostic(),
            "ERROR: -b|--base can only be specified once"
        );
        let err = ArgsError::ResolveFile {
            path: PathBuf::from("missing.h"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.diagnostic(), "Error: Failed to resolve missing.h: No such file or directory");
    }
}
