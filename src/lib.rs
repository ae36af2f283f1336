//! # App Sync Library
//!
//! This library synchronizes the front-end "app" dependencies of a project
//! with their git repositories. Every dependency declared in the project's
//! `bower.json` (apart from the project itself) is mapped through the
//! application registry (`apps.json`) to a directory under `src/apps/`, and
//! then either cloned, when that directory is absent, or fetched and
//! hard-reset to its checkout target, when it is present.
//!
//! ## Quick Example
//!
//! ```
//! use app_sync::locator::Locator;
//! use app_sync::resolve::Workspace;
//!
//! let workspace = Workspace::new("/project");
//! let locator = Locator::parse("git://host/widget#release");
//! assert_eq!(workspace.resolve_target(&locator, "widget").unwrap(), "release");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the `.bowerrc`, `bower.json` and
//!   `apps.json` documents.
//! - **Locators (`locator`)**: explicit `git…#ref` repositories versus
//!   registry packages.
//! - **Resolution (`resolve`)**: the `Workspace` context, which resolves app
//!   directories and checkout targets.
//! - **Registry (`registry`)**: package name to repository URL lookups.
//! - **Synchronization (`repository`, `git`)**: the clone and update command
//!   sequences.
//! - **Orchestration (`orchestrator`)**: planning a batch and running it in
//!   parallel.
//!
//! ## Execution Flow
//!
//! 1.  **Load**: read the three configuration documents.
//! 2.  **Plan**: resolve each dependency's directory and choose clone or
//!     update. Missing application records fail the run here.
//! 3.  **Execute**: run every dependency's git sequence in parallel.
//! 4.  **Report**: the run succeeds only if every dependency succeeded.

pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod locator;
pub mod orchestrator;
pub mod output;
pub mod registry;
pub mod repository;
pub mod resolve;

#[cfg(test)]
mod locator_proptest;
