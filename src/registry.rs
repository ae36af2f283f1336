//! # Package Registry Lookup
//!
//! Registry packages are declared in the manifest by name only. Before one
//! can be cloned, the registry has to tell us where its repository lives.
//!
//! The lookup sits behind the `RegistryClient` trait so the synchronizer can
//! be tested without a network. `HttpRegistryClient` is the real
//! implementation: it queries `GET <registry>/packages/<name>` on each
//! configured registry in order and returns the first entry found. A 404
//! moves on to the next registry; any other failure ends the lookup.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::MirrorConfig;
use crate::error::{Error, Result};

/// A registry record for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub name: String,
    /// Repository URL the package is cloned from.
    pub url: String,
}

/// Trait for registry lookups - allows mocking in tests
pub trait RegistryClient: Send + Sync {
    /// Resolves `package` to its registry entry.
    fn lookup(&self, package: &str) -> Result<RegistryEntry>;
}

/// Registry client speaking the bower registry HTTP protocol.
pub struct HttpRegistryClient {
    search: Vec<Url>,
    agent: ureq::Agent,
}

impl HttpRegistryClient {
    pub fn new(search: Vec<Url>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { search, agent }
    }

    /// Builds a client from the registries and timeout in `.bowerrc`.
    pub fn from_config(config: &MirrorConfig) -> Result<Self> {
        let search = config
            .search_registries()
            .iter()
            .map(|url| Url::parse(url))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self::new(search, config.timeout()))
    }

    pub fn registries(&self) -> &[Url] {
        &self.search
    }

    fn lookup_in(&self, registry: &Url, package: &str) -> Result<Option<RegistryEntry>> {
        let url = package_url(registry, package)?;
        debug!("Looking up \"{}\" at {}", package, url);

        match self.agent.get(url.as_str()).call() {
            Ok(response) => {
                let entry = response
                    .into_json::<RegistryEntry>()
                    .map_err(|e| Error::Registry {
                        package: package.to_string(),
                        message: format!("invalid response from {}: {}", url, e),
                    })?;
                Ok(Some(entry))
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(ureq::Error::Status(code, _)) => Err(Error::Registry {
                package: package.to_string(),
                message: format!("{} returned HTTP {}", url, code),
            }),
            Err(e) => Err(Error::Registry {
                package: package.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

impl RegistryClient for HttpRegistryClient {
    fn lookup(&self, package: &str) -> Result<RegistryEntry> {
        for registry in &self.search {
            if let Some(entry) = self.lookup_in(registry, package)? {
                return Ok(entry);
            }
        }

        Err(Error::Registry {
            package: package.to_string(),
            message: format!("package not found in {} registries", self.search.len()),
        })
    }
}

/// `<registry>/packages/<package>`, with the package name percent-encoded.
pub fn package_url(registry: &Url, package: &str) -> Result<Url> {
    let mut url = registry.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Registry {
            package: package.to_string(),
            message: format!("registry URL cannot be a base: {}", registry),
        })?
        .pop_if_empty()
        .push("packages")
        .push(package);
    Ok(url)
}
