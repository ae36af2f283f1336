//! # Batch Orchestration
//!
//! A sync run happens in two steps:
//!
//! 1.  **Planning (`plan`)**: every manifest dependency except the
//!     self-reference is resolved to its app directory and assigned a
//!     `SyncAction`: `Update` when the directory exists, `Clone` otherwise.
//!     Planning is sequential and runs no external process, so a dependency
//!     without an application record aborts the run before git is touched.
//!
//! 2.  **Execution (`execute`)**: the planned operations run in parallel on
//!     a dedicated rayon pool. Operations are independent: a failure never
//!     cancels the others. Once all of them have finished, the outcomes are
//!     collected into a `SyncReport`, which `SyncReport::into_result` turns
//!     into a single `Error::BatchFailed` if anything went wrong.

use std::fmt;
use std::path::PathBuf;

use log::{error, info, warn};
use rayon::prelude::*;

use crate::config::{Applications, PackageManifest};
use crate::defaults;
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::repository::RepositorySynchronizer;
use crate::resolve::Workspace;

/// What a sync does to one dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// The app directory exists: fetch, reset and pull.
    Update,
    /// The app directory is absent: clone.
    Clone,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Update => write!(f, "update"),
            SyncAction::Clone => write!(f, "clone"),
        }
    }
}

/// A dependency resolved and ready to sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSync {
    pub name: String,
    pub locator: Locator,
    /// App directory relative to the workspace root.
    pub directory: PathBuf,
    pub action: SyncAction,
}

/// Options that shape planning and execution.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// The project's own package, never synchronized.
    pub self_name: String,
    /// When non-empty, only these dependencies are synchronized.
    pub only: Vec<String>,
    /// Maximum number of dependencies synchronized at once. `None` runs all
    /// of them at once.
    pub jobs: Option<usize>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            self_name: defaults::SELF_REFERENCE_NAME.to_string(),
            only: Vec::new(),
            jobs: None,
        }
    }
}

/// Resolve every dependency of `manifest` to a planned sync.
pub fn plan(
    manifest: &PackageManifest,
    apps: &Applications,
    workspace: &Workspace,
    options: &SyncOptions,
) -> Result<Vec<PlannedSync>> {
    for name in &options.only {
        if !manifest.dependencies.contains_key(name) {
            warn!("Dependency \"{}\" is not declared in the manifest", name);
        }
    }

    manifest
        .dependencies
        .iter()
        .filter(|(name, _)| **name != options.self_name)
        .filter(|(name, _)| options.only.is_empty() || options.only.contains(*name))
        .map(|(name, raw)| -> Result<PlannedSync> {
            let directory = workspace.resolve_directory(apps, name)?;
            let action = if workspace.path_exists(&directory) {
                info!("Checking out repository \"{}\"", name);
                SyncAction::Update
            } else {
                info!("Cloning repository \"{}\"", name);
                SyncAction::Clone
            };

            Ok(PlannedSync {
                name: name.clone(),
                locator: Locator::parse(raw),
                directory,
                action,
            })
        })
        .collect()
}

/// The result of syncing one dependency.
#[derive(Debug)]
pub struct SyncOutcome {
    pub name: String,
    pub action: SyncAction,
    pub result: Result<()>,
}

/// Outcomes of a whole batch, in plan order.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub outcomes: Vec<SyncOutcome>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &SyncOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &SyncOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }

    pub fn count(&self, action: SyncAction) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.action == action)
            .count()
    }

    /// Collapse the report into one result for the whole batch.
    pub fn into_result(self) -> Result<SyncReport> {
        if self.is_success() {
            return Ok(self);
        }

        Err(Error::BatchFailed {
            failed: self.failed().map(|outcome| outcome.name.clone()).collect(),
            total: self.outcomes.len(),
        })
    }
}

/// Run every planned sync and wait for all of them to finish.
///
/// Errors returned here concern the batch itself; per-dependency failures
/// are recorded in the report.
pub fn execute(
    planned: &[PlannedSync],
    synchronizer: &RepositorySynchronizer,
    jobs: Option<usize>,
) -> Result<SyncReport> {
    if planned.is_empty() {
        info!("No dependencies to synchronize");
        return Ok(SyncReport::default());
    }

    let threads = jobs.unwrap_or(planned.len()).clamp(1, planned.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|index| format!("app-sync-{}", index))
        .build()?;

    let outcomes: Vec<SyncOutcome> = pool.install(|| {
        planned
            .par_iter()
            .map(|item| {
                let result = match item.action {
                    SyncAction::Update => {
                        synchronizer.update_repository(&item.name, &item.locator, &item.directory)
                    }
                    SyncAction::Clone => {
                        synchronizer.clone_repository(&item.name, &item.locator, &item.directory)
                    }
                };

                if let Err(e) = &result {
                    error!("Failed to {} \"{}\": {}", item.action, item.name, e);
                }

                SyncOutcome {
                    name: item.name.clone(),
                    action: item.action,
                    result,
                }
            })
            .collect()
    });

    Ok(SyncReport { outcomes })
}

/// Plan and execute a full batch.
pub fn run(
    manifest: &PackageManifest,
    apps: &Applications,
    synchronizer: &RepositorySynchronizer,
    options: &SyncOptions,
) -> Result<SyncReport> {
    let planned = plan(manifest, apps, synchronizer.workspace(), options)?;
    execute(&planned, synchronizer, options.jobs)?.into_result()
}
