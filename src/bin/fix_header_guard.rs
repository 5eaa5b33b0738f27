// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Fix: Header Guards
//!
//! Rewrites the include guard of each header so it matches the header's path
//! relative to BASE: `include/foo/bar.h` gets `INCLUDE_FOO_BAR_H`.
//!
//! Usage:
//!   fix-header-guard -b . include/foo/bar.h      # Guard relative to current dir
//!   fix-header-guard --base include src/*.h      # Guard relative to include/
//!
//! Set RUST_LOG=info to see each rewritten file.
//!
//! Binary: fix-header-guard

use anyhow::{Context, Result};
use env_logger::Env;
use header_guard::{Config, GuardFixer, USAGE};

fn main() -> Result<()> {
    init_logging()?;

    let report = |err: header_guard::ArgsError| eprintln!("{}", err.diagnostic());
    let config = match Config::from_args(std::env::args_os().skip(1), report) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err.diagnostic());
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    // Per-file failures are reported and do not affect the exit status
    let mut fixer = GuardFixer::new();
    for file in &config.files {
        if let Err(err) = fixer.fix_file(file, &config.base) {
            eprintln!("Error: {}: {err}", file.display());
        }
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .try_init()
        .context("failed to initialize logging")
}
