//! # Sync Command Implementation
//!
//! This module implements the `sync` subcommand, which brings every app
//! dependency of the project in line with its declared source.
//!
//! ## Functionality
//!
//! - **Loading**: reads `.bowerrc` (optional), the dependency manifest and the
//!   application registry, all relative to the project root.
//!
//! - **Planning**: every dependency except the project itself is resolved to
//!   its app directory. Existing directories are updated (fetch, hard reset,
//!   pull); missing ones are cloned.
//!
//! - **Execution**: all dependencies are synchronized in parallel. `--jobs`
//!   caps how many run at once.
//!
//! - **Dry Run**: `--dry-run` prints the plan and checkout targets without
//!   running git or contacting the registry.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use app_sync::config::{self, Applications, PackageManifest};
use app_sync::defaults;
use app_sync::orchestrator::{self, PlannedSync, SyncOptions};
use app_sync::output::{self, OutputConfig};
use app_sync::registry::HttpRegistryClient;
use app_sync::repository::{DefaultGitOperations, RepositorySynchronizer};
use app_sync::resolve::Workspace;

/// Clone missing app dependencies and update existing ones
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Project root; every other path is relative to it
    #[arg(long, value_name = "DIR", env = "APP_SYNC_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Dependency manifest
    #[arg(long, value_name = "PATH", default_value = defaults::MANIFEST_FILE)]
    pub manifest: PathBuf,

    /// Application registry mapping dependencies to directories
    #[arg(long, value_name = "PATH", default_value = defaults::APPS_FILE)]
    pub apps: PathBuf,

    /// Mirror configuration with registry and install directory settings
    #[arg(long, value_name = "PATH", default_value = defaults::MIRROR_CONFIG_FILE)]
    pub bowerrc: PathBuf,

    /// Directory every app directory is relative to
    #[arg(long, value_name = "DIR", default_value = defaults::APP_PREFIX)]
    pub app_prefix: PathBuf,

    /// The project's own package name, never synchronized
    #[arg(long, value_name = "NAME", default_value = defaults::SELF_REFERENCE_NAME)]
    pub self_name: String,

    /// Only synchronize the named dependency (repeatable)
    #[arg(long, value_name = "NAME")]
    pub only: Vec<String>,

    /// Maximum number of dependencies synchronized at once
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub jobs: Option<u32>,

    /// Show what would be done without running git
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, output: &OutputConfig) -> Result<()> {
    let mirror = config::load_mirror_config(&args.root.join(&args.bowerrc))?;
    let workspace = Workspace::new(&args.root)
        .with_app_prefix(&args.app_prefix)
        .with_install_dir(mirror.install_directory());

    let manifest: PackageManifest = workspace
        .read_document(&args.manifest)
        .with_context(|| format!("Failed to load manifest {}", args.manifest.display()))?;
    let apps: Applications = workspace
        .read_document(&args.apps)
        .with_context(|| format!("Failed to load apps {}", args.apps.display()))?;

    let options = SyncOptions {
        self_name: args.self_name,
        only: args.only,
        jobs: args.jobs.map(|jobs| jobs as usize),
    };

    let planned = orchestrator::plan(&manifest, &apps, &workspace, &options)?;

    if args.dry_run {
        print_plan(&planned, &workspace, output, args.quiet);
        return Ok(());
    }

    let registry = HttpRegistryClient::from_config(&mirror)?;
    let synchronizer = RepositorySynchronizer::new(
        workspace,
        Box::new(DefaultGitOperations),
        Box::new(registry),
    );

    let report = orchestrator::execute(&planned, &synchronizer, options.jobs)?;

    if !args.quiet {
        for outcome in &report.outcomes {
            println!("{}", output::outcome_line(output, outcome));
        }
        println!("{}", output::summary_line(output, &report));
    }

    report.into_result()?;
    Ok(())
}

fn print_plan(planned: &[PlannedSync], workspace: &Workspace, output: &OutputConfig, quiet: bool) {
    if quiet {
        return;
    }

    println!(
        "{} DRY RUN MODE - No changes will be made",
        output::emoji(output, "🔎", "[DRY RUN]")
    );
    for item in planned {
        let target = workspace
            .resolve_target(&item.locator, &item.name)
            .unwrap_or_else(|e| format!("unresolved: {}", e));
        println!("{}", output::plan_line(output, item, &target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PLAIN: OutputConfig = OutputConfig { use_color: false };

    fn args(root: &std::path::Path) -> SyncArgs {
        SyncArgs {
            root: root.to_path_buf(),
            manifest: PathBuf::from(defaults::MANIFEST_FILE),
            apps: PathBuf::from(defaults::APPS_FILE),
            bowerrc: PathBuf::from(defaults::MIRROR_CONFIG_FILE),
            app_prefix: PathBuf::from(defaults::APP_PREFIX),
            self_name: defaults::SELF_REFERENCE_NAME.to_string(),
            only: Vec::new(),
            jobs: None,
            dry_run: true,
            quiet: true,
        }
    }

    fn project(manifest: &str, apps: &str) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("src/config/settings")).unwrap();
        fs::write(temp_dir.path().join("src/bower.json"), manifest).unwrap();
        fs::write(temp_dir.path().join("src/config/settings/apps.json"), apps).unwrap();
        temp_dir
    }

    #[test]
    fn test_execute_missing_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let result = execute(args(temp_dir.path()), &PLAIN);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to load manifest"));
        assert!(message.contains("bower.json"));
    }

    #[test]
    fn test_execute_dry_run() {
        let temp_dir = project(
            r#"{"dependencies": {"neo-seed": "x", "widgetA": "git://host/widgetA#release"}}"#,
            r#"[{"dependency": "widgetA", "directory": "widgetA"}]"#,
        );
        let result = execute(args(temp_dir.path()), &PLAIN);
        assert!(result.is_ok());
        assert!(!temp_dir.path().join("src/apps/widgetA").exists());
    }

    #[test]
    fn test_execute_missing_app_record() {
        let temp_dir = project(
            r#"{"dependencies": {"widgetA": "git://host/widgetA#release"}}"#,
            "[]",
        );
        let result = execute(args(temp_dir.path()), &PLAIN);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("No application record"));
    }

    #[test]
    fn test_execute_nothing_to_sync() {
        let temp_dir = project(r#"{"dependencies": {"neo-seed": "x"}}"#, "[]");
        let mut sync_args = args(temp_dir.path());
        sync_args.dry_run = false;

        let result = execute(sync_args, &PLAIN);
        assert!(result.is_ok());
    }
}
