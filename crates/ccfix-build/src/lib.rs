//! compile_commands.json fixups for cross-compiled C/C++ projects.
//!
//! This crate provides:
//! - compile_commands.json loading and order-preserving rewriting
//! - Inline expansion of `@file` response-file references
//! - System include flags for MinGW and MSVC toolchains
//! - Optional toolchain configuration (`ccfix.toml`)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = ccfix_build::fix(Path::new("build")).unwrap();
//! println!("fixed {} entries", report.entries);
//! ```

mod compile_commands;
mod config;
mod error;
mod fixer;
mod json;
mod response_file;
mod toolchain;

pub use compile_commands::{CompileCommands, CompileEntry, InvalidEntry};
pub use config::{
    MinGwConfig, MsvcConfig, ToolchainConfig, DEFAULT_MINGW_PREFIX, DEFAULT_MSVC_VERSION,
    DEFAULT_WINDOWS_SDK_VERSION,
};
pub use error::{FixError, Result};
pub use fixer::{fix, FixReport, Fixer, COMPILE_COMMANDS, COMPILE_COMMANDS_BACKUP};
pub use json::{to_string_pretty_ascii, AsciiPrettyFormatter};
pub use response_file::{expand, find_tokens, Expansion};
pub use toolchain::{msvc_root, Toolchain, MSVC_CL_ANCHOR, WINDOWS_SDK_SUBDIRS};
