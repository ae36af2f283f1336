//! Shared test utilities for CLI end-to-end tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_manifest(manifests::WIDGET_A)
//!         .with_apps(apps::WIDGET_A);
//!     fixture.command().arg("sync").arg("--dry-run").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{apps, manifests};
    pub use super::TestFixture;
}

/// Dependency manifests (`src/bower.json`).
#[allow(dead_code)]
pub mod manifests {
    /// The project itself plus one explicit repository.
    pub const WIDGET_A: &str = r#"{
  "name": "neo-seed",
  "dependencies": {
    "neo-seed": "x",
    "widgetA": "git://host/widgetA#release"
  }
}"#;

    /// Two explicit repositories.
    pub const WIDGETS_A_B: &str = r#"{
  "name": "neo-seed",
  "dependencies": {
    "widgetA": "git://host/widgetA#release",
    "widgetB": "git://host/widgetB#main"
  }
}"#;

    pub const INVALID_JSON: &str = "{ dependencies: ";
}

/// Application registries (`src/config/settings/apps.json`).
#[allow(dead_code)]
pub mod apps {
    pub const WIDGET_A: &str = r#"[{"dependency": "widgetA", "directory": "widgetA"}]"#;

    pub const WIDGETS_A_B: &str = r#"[
  {"dependency": "widgetA", "directory": "widgetA"},
  {"dependency": "widgetB", "directory": "widgetB"}
]"#;

    pub const EMPTY: &str = "[]";
}

/// A temporary project directory with optional configuration documents.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `src/bower.json`.
    pub fn with_manifest(self, content: &str) -> Self {
        self.with_file("src/bower.json", content)
    }

    /// Write `src/config/settings/apps.json`.
    pub fn with_apps(self, content: &str) -> Self {
        self.with_file("src/config/settings/apps.json", content)
    }

    /// Write `.bowerrc`.
    pub fn with_bowerrc(self, content: &str) -> Self {
        self.with_file(".bowerrc", content)
    }

    /// Create an (empty) app checkout under `src/apps/`.
    pub fn with_app_dir(self, directory: &str) -> Self {
        self.temp_dir
            .child("src/apps")
            .child(directory)
            .create_dir_all()
            .expect("Failed to create app directory");
        self
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// The `app-sync` binary, run from the fixture root without colors.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("app-sync");
        cmd.current_dir(self.path())
            .env_remove("APP_SYNC_ROOT")
            .env_remove("RUST_LOG")
            .arg("--color")
            .arg("never");
        cmd
    }

    /// Install a fake git binary that records `<cwd>|<args>` per invocation
    /// into `git.log` and fails when its first argument equals `fail_on`.
    ///
    /// Returns the path to the script; pass it via `APP_SYNC_GIT`.
    #[cfg(unix)]
    pub fn with_fake_git(&self, fail_on: Option<&str>) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let log = self.path().join("git.log");
        let script = format!(
            "#!/bin/sh\n\
             echo \"$(pwd -P)|$*\" >> '{}'\n\
             if [ \"$1\" = '{}' ]; then echo \"fatal: simulated failure\" >&2; exit 128; fi\n\
             exit 0\n",
            log.display(),
            fail_on.unwrap_or("")
        );

        let bin_dir = self.path().join("bin");
        std::fs::create_dir_all(&bin_dir).expect("Failed to create bin directory");
        let path = bin_dir.join("git");
        std::fs::write(&path, script).expect("Failed to write fake git");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake git executable");
        path
    }

    /// Lines recorded by the fake git, empty when it never ran.
    pub fn git_calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.path().join("git.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// The fixture root with symlinks resolved, as `pwd -P` reports it.
    pub fn canonical_path(&self) -> PathBuf {
        self.path()
            .canonicalize()
            .expect("Failed to canonicalize fixture root")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
