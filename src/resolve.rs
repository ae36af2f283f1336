//! # Directory and Target Resolution
//!
//! The `Workspace` is the context every sync component receives explicitly.
//! It knows the project root, the prefix applications live under, and the
//! directory packages were installed into, and it answers the two questions a
//! sync run asks about each dependency:
//!
//! - **Where does it live?** `resolve_directory` looks the dependency up in
//!   the application registry and returns its path relative to the project
//!   root. A dependency without a record is an `Error::Lookup`.
//!
//! - **What should be checked out?** `resolve_target` returns the ref embedded
//!   in an explicit repository locator (or `HEAD`), or `v<version>` read from
//!   the package manifest a previous install step left in the install
//!   directory.

use std::path::{Path, PathBuf};

use log::{debug, info};
use semver::Version;
use serde::de::DeserializeOwned;

use crate::config::{self, Applications, PackageManifest};
use crate::defaults;
use crate::error::{Error, Result};
use crate::locator::Locator;

/// The filesystem context of a sync run.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    app_prefix: PathBuf,
    install_dir: PathBuf,
}

impl Workspace {
    /// Creates a workspace rooted at `root` with the default app prefix and
    /// install directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            app_prefix: PathBuf::from(defaults::APP_PREFIX),
            install_dir: PathBuf::from(defaults::INSTALL_DIRECTORY),
        }
    }

    pub fn with_app_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.app_prefix = prefix.into();
        self
    }

    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = dir.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins a root-relative path onto the project root.
    pub fn absolute(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn path_exists(&self, relative: &Path) -> bool {
        self.absolute(relative).exists()
    }

    /// Reads a root-relative JSON document.
    pub fn read_document<T: DeserializeOwned>(&self, relative: &Path) -> Result<T> {
        config::read_document(&self.absolute(relative))
    }

    /// Returns the directory of `name`, relative to the project root.
    pub fn resolve_directory(&self, apps: &Applications, name: &str) -> Result<PathBuf> {
        let record = apps.find(name).ok_or_else(|| Error::Lookup {
            dependency: name.to_string(),
        })?;

        let directory = self.app_prefix.join(&record.directory);
        info!(
            ":: Resolved directory of \"{}\" to: {}",
            name,
            directory.display()
        );
        Ok(directory)
    }

    /// Whether the directory of `name` is already present on disk.
    pub fn dependency_exists(&self, apps: &Applications, name: &str) -> Result<bool> {
        let directory = self.resolve_directory(apps, name)?;
        Ok(self.path_exists(&directory))
    }

    /// Returns the branch or tag `name` should be checked out at.
    pub fn resolve_target(&self, locator: &Locator, name: &str) -> Result<String> {
        let target = match locator.explicit_ref() {
            Some(reference) => reference.to_string(),
            None => format!("v{}", self.installed_version(name)?),
        };

        info!(":: Resolved target of \"{}\" to: {}", name, target);
        Ok(target)
    }

    /// Reads the version of the installed package `name`, without any
    /// leading `v`.
    ///
    /// Looks for `bower.json` inside the package's install directory, then
    /// for the `.bower.json` install metadata. A version that is not semver
    /// is logged at debug level and returned unchanged.
    pub fn installed_version(&self, name: &str) -> Result<String> {
        let package_dir = self.install_dir.join(name);
        let manifest_path = [defaults::PACKAGE_MANIFEST, defaults::PACKAGE_INSTALL_METADATA]
            .iter()
            .map(|file| package_dir.join(file))
            .find(|path| self.path_exists(path))
            .ok_or_else(|| Error::MissingManifest {
                path: package_dir
                    .join(defaults::PACKAGE_MANIFEST)
                    .display()
                    .to_string(),
            })?;

        let manifest: PackageManifest = self.read_document(&manifest_path)?;
        let raw = manifest.version.ok_or_else(|| Error::InvalidManifest {
            path: manifest_path.display().to_string(),
            message: "missing \"version\" field".to_string(),
        })?;

        let raw = raw.trim();
        let version = raw.strip_prefix('v').unwrap_or(raw);
        if version.is_empty() {
            return Err(Error::InvalidManifest {
                path: manifest_path.display().to_string(),
                message: "empty \"version\" field".to_string(),
            });
        }

        if let Err(e) = Version::parse(version) {
            debug!(
                "Installed version \"{}\" of \"{}\" is not semver: {}",
                version, name, e
            );
        }

        Ok(version.to_string())
    }
}
