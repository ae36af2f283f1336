//! # Error Handling
//!
//! This module defines the centralized error type for `app-sync`. It uses the
//! `thiserror` library to build a single `Error` enum that covers every
//! anticipated failure mode of a sync run, with enough context in each variant
//! to tell which dependency, file, or git command was involved.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. The variants fall into a few groups:
//!   - resolution failures (`Lookup`, `MissingManifest`, `InvalidManifest`),
//!   - external process failures (`GitCommand`, `GitSpawn`),
//!   - registry failures (`Registry`),
//!   - input document failures (`ConfigParse`),
//!   - the aggregate `BatchFailed` reported by the orchestrator,
//!   - wrapped library errors (`Io`, `ThreadPool`, `UrlParse`).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use thiserror::Error;

/// Main error type for app-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// A dependency has no matching record in the application registry.
    #[error("No application record for dependency \"{dependency}\"")]
    Lookup { dependency: String },

    /// A git command exited with a non-zero status.
    #[error("Git command failed in {dir}: git {command} - {stderr}")]
    GitCommand {
        command: String,
        dir: String,
        stderr: String,
    },

    /// The git binary could not be started at all.
    #[error("Failed to run git {command}: {message}")]
    GitSpawn { command: String, message: String },

    /// A registry lookup failed or returned no usable entry.
    #[error("Registry lookup failed for \"{package}\": {message}")]
    Registry { package: String, message: String },

    /// The installed package manifest used to derive a version tag is absent.
    #[error("Installed package manifest not found: {path}")]
    MissingManifest { path: String },

    /// The installed package manifest exists but carries no usable version.
    #[error("Invalid package manifest {path}: {message}")]
    InvalidManifest { path: String, message: String },

    /// An input document could not be read as the expected JSON shape.
    #[error("Configuration parsing error in {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// One or more dependency operations in a batch failed.
    #[error("Sync failed for {} of {total} dependencies: {}", failed.len(), failed.join(", "))]
    BatchFailed { failed: Vec<String>, total: usize },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The worker pool for a batch could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
