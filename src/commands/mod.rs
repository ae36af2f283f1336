//! # CLI Command Implementations
//!
//! Each subcommand of the `app-sync` command-line tool lives in its own file.
//! A command module contains:
//! - An `Args` struct defining the command-specific options, derived using
//!   `clap`.
//! - An `execute` function that takes the parsed `Args`, calls into the
//!   `app_sync` library, and reports the result.

pub mod sync;
