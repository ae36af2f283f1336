//! # Configuration Documents
//!
//! This module defines the three JSON documents a sync run reads, and the
//! logic for loading them from disk.
//!
//! ## Key Components
//!
//! - **`MirrorConfig`**: The `.bowerrc` mirror configuration. It names the
//!   directory packages are installed into and the registries used to resolve
//!   package names to repository URLs. A missing `.bowerrc` is equivalent to
//!   an empty one.
//!
//! - **`PackageManifest`**: A `bower.json` document. The project manifest
//!   supplies the `dependencies` map (name to locator); installed package
//!   manifests supply the `version` used to derive checkout tags.
//!
//! - **`Applications`**: The application registry (`apps.json`), a list of
//!   `AppRecord`s mapping each dependency to the directory it is checked out
//!   into.
//!
//! All loaders report unreadable or malformed documents as
//! `Error::ConfigParse`, naming the offending file.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// One registry URL or a list of them, as accepted by `.bowerrc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(url) => vec![url],
            OneOrMany::Many(urls) => urls,
        }
    }
}

/// Registry endpoints in their expanded object form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEndpoints {
    /// Registries queried, in order, when resolving a package name.
    #[serde(default)]
    pub search: Option<OneOrMany>,
}

/// The `registry` field of `.bowerrc`: either a bare URL or an endpoint object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegistrySetting {
    Url(String),
    Endpoints(RegistryEndpoints),
}

/// The `.bowerrc` mirror configuration.
///
/// Unknown fields (proxies, storage paths, and so on) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Directory packages are installed into, relative to the project root.
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default)]
    pub registry: Option<RegistrySetting>,
    /// Registry request timeout, in milliseconds.
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl MirrorConfig {
    pub fn install_directory(&self) -> &str {
        self.directory
            .as_deref()
            .filter(|dir| !dir.is_empty())
            .unwrap_or(defaults::INSTALL_DIRECTORY)
    }

    /// Registries to search, in order. Falls back to the public registry.
    pub fn search_registries(&self) -> Vec<String> {
        let urls = match &self.registry {
            Some(RegistrySetting::Url(url)) => vec![url.clone()],
            Some(RegistrySetting::Endpoints(endpoints)) => endpoints
                .search
                .clone()
                .map(OneOrMany::into_vec)
                .unwrap_or_default(),
            None => Vec::new(),
        };

        let urls: Vec<String> = urls.into_iter().filter(|url| !url.is_empty()).collect();
        if urls.is_empty() {
            vec![defaults::REGISTRY_URL.to_string()]
        } else {
            urls
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout.unwrap_or(defaults::REGISTRY_TIMEOUT_MS))
    }
}

/// A `bower.json` package manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Dependency name to source locator.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

/// Maps one dependency to the directory it lives in under the app prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    pub dependency: String,
    pub directory: String,
}

/// The application registry loaded from `apps.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Applications {
    records: Vec<AppRecord>,
}

impl Applications {
    pub fn new(records: Vec<AppRecord>) -> Self {
        Self { records }
    }

    /// Returns the first record for `dependency`, if any.
    pub fn find(&self, dependency: &str) -> Option<&AppRecord> {
        self.records
            .iter()
            .find(|record| record.dependency == dependency)
    }
}

/// Read and deserialize a JSON document.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_document(path, &content)
}

fn parse_document<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|e| Error::ConfigParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load `.bowerrc`. A missing file yields the default configuration.
pub fn load_mirror_config(path: &Path) -> Result<MirrorConfig> {
    if !path.exists() {
        debug!(
            "No mirror configuration at {}, using defaults",
            path.display()
        );
        return Ok(MirrorConfig::default());
    }
    read_document(path)
}

pub fn load_manifest(path: &Path) -> Result<PackageManifest> {
    read_document(path)
}

pub fn load_applications(path: &Path) -> Result<Applications> {
    read_document(path)
}
