// Copyright (c) 2025 Brian G. Milnes
// SPDX-License-Identifier: MIT

//! Header Guard - canonical include guards for C/C++ headers
//!
//! Rewrites the `#ifndef` / `#define` / `#endif` guard of each header so the
//! macro name matches the header's path relative to a base directory.

pub mod args;
pub mod guard;

// Re-export commonly used items
pub use args::{ArgsError, Base, Config, USAGE};
pub use guard::{FixError, GuardFixer, HeaderGuard};
