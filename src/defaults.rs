//! Default values for app-sync configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Prefix under which every application directory lives, relative to the
/// project root.
pub const APP_PREFIX: &str = "src/apps";

/// Mirror configuration read to construct the registry client.
pub const MIRROR_CONFIG_FILE: &str = ".bowerrc";

/// Dependency manifest listing every app dependency.
pub const MANIFEST_FILE: &str = "src/bower.json";

/// Application registry mapping dependencies to directories.
pub const APPS_FILE: &str = "src/config/settings/apps.json";

/// Name of the manifest inside an installed package directory.
pub const PACKAGE_MANIFEST: &str = "bower.json";

/// Install metadata written next to a package when the package ships no
/// manifest of its own.
pub const PACKAGE_INSTALL_METADATA: &str = ".bower.json";

/// Directory packages are installed into when `.bowerrc` names none.
pub const INSTALL_DIRECTORY: &str = "bower_components";

/// The project's own package, never synchronized.
pub const SELF_REFERENCE_NAME: &str = "neo-seed";

/// Registry queried when `.bowerrc` names none.
pub const REGISTRY_URL: &str = "https://registry.bower.io";

/// Registry request timeout in milliseconds.
pub const REGISTRY_TIMEOUT_MS: u64 = 60_000;

/// Checkout target used for explicit repositories without a ref.
pub const DEFAULT_REF: &str = "HEAD";

/// Environment variable overriding the git binary.
pub const GIT_BINARY_ENV: &str = "APP_SYNC_GIT";

/// Returns the git binary to invoke.
///
/// Falls back to `git` on the `PATH` unless `APP_SYNC_GIT` is set.
pub fn git_binary() -> String {
    std::env::var(GIT_BINARY_ENV).unwrap_or_else(|_| "git".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_metadata_differs_from_manifest() {
        assert_ne!(PACKAGE_MANIFEST, PACKAGE_INSTALL_METADATA);
        assert!(PACKAGE_INSTALL_METADATA.ends_with(PACKAGE_MANIFEST));
    }

    #[test]
    fn test_registry_url_parses() {
        assert!(url::Url::parse(REGISTRY_URL).is_ok());
    }
}
