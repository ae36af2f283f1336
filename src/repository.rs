//! # Repository Synchronization
//!
//! This module provides the `RepositorySynchronizer`, which brings one app
//! dependency in line with its locator. It has two variants, chosen by the
//! caller from whether the app directory already exists:
//!
//! - **Update** (`update_repository`): inside the existing checkout, run
//!   `git fetch --all`, `git reset --hard origin/<target>` and
//!   `git pull origin <target>`, strictly in that order. The first failing
//!   step stops the sequence and its error is returned.
//!
//! - **Clone** (`clone_repository`): clone the explicit repository at its
//!   ref, or look the package up in the registry and clone the repository it
//!   names at the installed version's tag. A failed registry lookup is logged
//!   and returned like any other failure.
//!
//! ## Design
//!
//! The synchronizer is built around two traits so it can be exercised
//! without a git binary or a network:
//!
//! - **`GitOperations`**: the four git invocations a sync performs.
//! - **`RegistryClient`** (see `registry`): resolves package names to
//!   repository URLs.
//!
//! `DefaultGitOperations` wraps the system `git` command; tests inject
//! recording mocks instead.

use std::path::Path;

use log::{debug, info};

use crate::error::Result;
use crate::locator::Locator;
use crate::registry::RegistryClient;
use crate::resolve::Workspace;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Fetches all remotes of the checkout at `dir`.
    fn fetch_all(&self, dir: &Path) -> Result<String>;

    /// Hard-resets the checkout at `dir` to `origin/<target>`.
    fn reset_hard(&self, dir: &Path, target: &str) -> Result<String>;

    /// Pulls `target` from `origin` into the checkout at `dir`.
    fn pull(&self, dir: &Path, target: &str) -> Result<String>;

    /// Clones `branch` of `repository` into `dir`, relative to `cwd`.
    fn clone_branch(&self, cwd: &Path, repository: &str, branch: &str, dir: &Path)
        -> Result<String>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn fetch_all(&self, dir: &Path) -> Result<String> {
        crate::git::fetch_all(dir)
    }

    fn reset_hard(&self, dir: &Path, target: &str) -> Result<String> {
        crate::git::reset_hard(dir, target)
    }

    fn pull(&self, dir: &Path, target: &str) -> Result<String> {
        crate::git::pull(dir, target)
    }

    fn clone_branch(
        &self,
        cwd: &Path,
        repository: &str,
        branch: &str,
        dir: &Path,
    ) -> Result<String> {
        crate::git::clone_branch(cwd, repository, branch, dir)
    }
}

/// Drives git for individual dependencies.
pub struct RepositorySynchronizer {
    workspace: Workspace,
    git_ops: Box<dyn GitOperations>,
    registry: Box<dyn RegistryClient>,
}

impl RepositorySynchronizer {
    pub fn new(
        workspace: Workspace,
        git_ops: Box<dyn GitOperations>,
        registry: Box<dyn RegistryClient>,
    ) -> Self {
        Self {
            workspace,
            git_ops,
            registry,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Fetch, hard-reset and pull the existing checkout of `name`.
    ///
    /// `directory` is relative to the workspace root.
    pub fn update_repository(&self, name: &str, locator: &Locator, directory: &Path) -> Result<()> {
        let target = self.workspace.resolve_target(locator, name)?;
        let dir = self.workspace.absolute(directory);

        info!(":: Fetching remote changes from \"{}\"...", name);
        log_output(&self.git_ops.fetch_all(&dir)?);

        info!(":: Resetting local changes of \"{}\"...", name);
        log_output(&self.git_ops.reset_hard(&dir, &target)?);

        info!(":: Pulling changes from \"{}\"...", name);
        log_output(&self.git_ops.pull(&dir, &target)?);

        Ok(())
    }

    /// Clone `name` into `directory`, relative to the workspace root.
    pub fn clone_repository(&self, name: &str, locator: &Locator, directory: &Path) -> Result<()> {
        let (repository, branch) = match locator {
            Locator::Repository { url, .. } => {
                let branch = self.workspace.resolve_target(locator, name)?;
                (url.clone(), branch)
            }
            Locator::Package { .. } => {
                let entry = self.registry.lookup(name).inspect_err(|e| {
                    debug!("Registry lookup for \"{}\" failed: {}", name, e);
                })?;
                let branch = self.workspace.resolve_target(locator, name)?;
                (entry.url, branch)
            }
        };

        info!(
            ":: Cloning {} at {} into {}",
            repository,
            branch,
            directory.display()
        );
        log_output(&self.git_ops.clone_branch(
            self.workspace.root(),
            &repository,
            &branch,
            directory,
        )?);

        Ok(())
    }
}

fn log_output(stdout: &str) {
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        info!("{}", stdout);
    }
}
