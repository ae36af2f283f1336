//! Property-based tests for locator parsing.
//!
//! These tests use proptest to generate random locators and verify that
//! the checkout-target rules hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::locator::Locator;
    use proptest::prelude::*;

    proptest! {
        /// Property: the ref of an explicit locator is exactly the text after `#`
        #[test]
        fn explicit_ref_is_suffix_after_separator(
            host in "[a-z]{1,12}",
            repo in "[a-zA-Z0-9_-]{1,16}",
            reference in "[a-zA-Z0-9._/-]{1,24}",
        ) {
            let raw = format!("git://{}/{}#{}", host, repo, reference);
            let locator = Locator::parse(&raw);
            prop_assert_eq!(locator.explicit_ref(), Some(reference.as_str()));
        }

        /// Property: explicit locators without `#` always target HEAD
        #[test]
        fn explicit_without_separator_targets_head(rest in "[^#]*") {
            let raw = format!("git{}", rest);
            let locator = Locator::parse(&raw);
            prop_assert_eq!(locator.explicit_ref(), Some("HEAD"));
        }

        /// Property: anything not starting with `git` is a registry package
        #[test]
        fn non_git_prefix_is_package(raw in "[^g].*") {
            let locator = Locator::parse(&raw);
            prop_assert!(!locator.is_repository());
            prop_assert_eq!(locator.explicit_ref(), None);
        }

        /// Property: the repository part never contains the separator
        #[test]
        fn repository_url_has_no_separator(rest in ".*") {
            let raw = format!("git{}", rest);
            if let Locator::Repository { url, .. } = Locator::parse(&raw) {
                prop_assert!(!url.contains('#'));
            }
        }

        /// Property: parsing is deterministic
        #[test]
        fn parse_is_deterministic(raw in ".*") {
            prop_assert_eq!(Locator::parse(&raw), Locator::parse(&raw));
        }
    }
}
