//! Property-based tests for repository URL preparation.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::urls::{prepare_url_with, redact, unresolved_placeholders};
    use proptest::prelude::*;

    // ============================================================================
    // prepare_url_with property tests
    // ============================================================================

    proptest! {
        /// Property: unrecognized placeholder names pass through even when the
        /// lookup could resolve them
        #[test]
        fn unrecognized_names_pass_through(
            name in "[A-Z][A-Z0-9_]{0,12}",
            value in "[a-zA-Z0-9]{1,16}",
        ) {
            // Substitution is textual, so a name extending a recognized one
            // (e.g. GITHUB_TOKEN_ALT) would be partially replaced.
            prop_assume!(!name.starts_with("GITHUB_TOKEN") && !name.starts_with("GITLAB_TOKEN"));
            let template = format!("https://${}@example.com/org/repo.git", name);
            let prepared = prepare_url_with(&template, |_| Some(value.clone()));
            prop_assert_eq!(prepared, template);
        }

        /// Property: preparation is deterministic (same input = same output)
        #[test]
        fn preparation_is_deterministic(
            template in "[a-zA-Z0-9:/@.$_-]{0,60}",
            value in "[a-zA-Z0-9]{0,16}",
        ) {
            let first = prepare_url_with(&template, |_| Some(value.clone()));
            let second = prepare_url_with(&template, |_| Some(value.clone()));
            prop_assert_eq!(first, second);
        }

        /// Property: templates without a '$' are never modified
        #[test]
        fn template_without_placeholder_unchanged(
            template in "[a-zA-Z0-9:/@._-]{0,60}",
            value in "[a-zA-Z0-9]{1,16}",
        ) {
            let prepared = prepare_url_with(&template, |_| Some(value.clone()));
            prop_assert_eq!(prepared, template);
        }

        /// Property: substitution is idempotent for placeholder-free values
        #[test]
        fn substitution_is_idempotent(value in "[a-zA-Z0-9]{1,20}") {
            let template = "https://$GITHUB_TOKEN@github.com/org/repo.git";
            let once = prepare_url_with(template, |_| Some(value.clone()));
            let twice = prepare_url_with(&once, |_| Some(value.clone()));
            prop_assert_eq!(once, twice);
        }

        /// Property: substituting a recognized token resolves its placeholder
        #[test]
        fn substitution_resolves_placeholder(
            value in "[a-zA-Z0-9]{1,20}",
            path in "[a-z]{1,10}",
        ) {
            let template = format!("https://$GITHUB_TOKEN@github.com/org/{}.git", path);
            let prepared = prepare_url_with(&template, |_| Some(value.clone()));
            let unresolved = unresolved_placeholders(&prepared);
            prop_assert!(
                !unresolved.iter().any(|name| name == "GITHUB_TOKEN"),
                "GITHUB_TOKEN still unresolved in '{}'",
                prepared
            );
        }
    }

    // ============================================================================
    // redact property tests
    // ============================================================================

    proptest! {
        /// Property: redact never panics and is deterministic on arbitrary input
        #[test]
        fn redact_is_total_and_deterministic(input in ".*") {
            let first = redact(&input);
            let second = redact(&input);
            prop_assert_eq!(first, second);
        }

        /// Property: a password never survives redaction
        #[test]
        fn redact_strips_password(password in "[0-9]{8,16}") {
            let url = format!("https://alice:{}@example.com/org/repo.git", password);
            let redacted = redact(&url);
            prop_assert!(
                !redacted.contains(&password),
                "password leaked into '{}'",
                redacted
            );
        }

        /// Property: URLs without userinfo are left unchanged
        #[test]
        fn redact_preserves_credential_free_urls(path in "[a-z][a-z0-9/-]{0,20}") {
            let url = format!("https://example.com/{}.git", path);
            prop_assert_eq!(redact(&url), url);
        }
    }
}
