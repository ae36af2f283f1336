//! Source locators.
//!
//! A locator is the value half of a manifest dependency entry. It either
//! points straight at a git repository, optionally pinned to a ref with a
//! `#<ref>` suffix, or it is a registry package requirement (a bare name or
//! a version range) that has to be resolved through the package registry.

use crate::defaults;

/// Prefix that marks a locator as an explicit repository reference.
const REPOSITORY_PREFIX: &str = "git";

/// Separates the repository from the ref in an explicit locator.
const REF_SEPARATOR: char = '#';

/// Where a dependency comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// An explicit git repository, e.g. `git://host/repo#release`.
    Repository {
        url: String,
        reference: Option<String>,
    },
    /// A registry package, resolved by dependency name.
    Package { range: String },
}

impl Locator {
    pub fn parse(raw: &str) -> Self {
        if !raw.starts_with(REPOSITORY_PREFIX) {
            return Locator::Package {
                range: raw.to_string(),
            };
        }

        match raw.split_once(REF_SEPARATOR) {
            Some((url, reference)) => Locator::Repository {
                url: url.to_string(),
                reference: (!reference.is_empty()).then(|| reference.to_string()),
            },
            None => Locator::Repository {
                url: raw.to_string(),
                reference: None,
            },
        }
    }

    pub fn is_repository(&self) -> bool {
        matches!(self, Locator::Repository { .. })
    }

    /// The ref embedded in an explicit locator, `HEAD` when none is given.
    ///
    /// Returns `None` for registry packages, whose target comes from the
    /// installed manifest instead.
    pub fn explicit_ref(&self) -> Option<&str> {
        match self {
            Locator::Repository { reference, .. } => {
                Some(reference.as_deref().unwrap_or(defaults::DEFAULT_REF))
            }
            Locator::Package { .. } => None,
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Repository {
                url,
                reference: Some(reference),
            } => write!(f, "{}{}{}", url, REF_SEPARATOR, reference),
            Locator::Repository { url, .. } => write!(f, "{}", url),
            Locator::Package { range } => write!(f, "{}", range),
        }
    }
}
