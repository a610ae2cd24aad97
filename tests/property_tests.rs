//! Property-based tests for Statecraft
//!
//! Uses proptest for the validation and determinism invariants:
//! - build(resolve(...)) is deterministic for identical input
//! - the path-prefix rule accepts exactly the documented shape
//! - secret flags survive every build

mod common;

use proptest::prelude::*;

use common::{debian_facts, required_api_params, string_params};
use statecraft::modules::ShareApi;
use statecraft::{reconcile, ConfigError, EnsureState};

/// Strategy for path segments without slashes
fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,12}"
}

proptest! {
    /// Every well-formed prefix passes validation and lands in the graph
    /// verbatim
    #[test]
    fn valid_prefixes_are_kept_verbatim(segments in prop::collection::vec(segment(), 1..4)) {
        let prefix = format!("/{}", segments.join("/"));
        let params = string_params(&[
            ("keystone_password", "dummy"),
            ("keystone_auth_admin_prefix", &prefix),
        ]);

        let graph = reconcile(&ShareApi, &params, &debian_facts()).unwrap();
        let value = graph
            .get("filter:authtoken/auth_admin_prefix")
            .and_then(|n| n.value())
            .map(String::from);
        prop_assert_eq!(value, Some(prefix));
    }

    /// A trailing slash always aborts construction with a structured
    /// validation error
    #[test]
    fn trailing_slash_always_rejected(segments in prop::collection::vec(segment(), 1..4)) {
        let prefix = format!("/{}/", segments.join("/"));
        let params = string_params(&[
            ("keystone_password", "dummy"),
            ("keystone_auth_admin_prefix", &prefix),
        ]);

        let err = reconcile(&ShareApi, &params, &debian_facts()).unwrap_err();
        match err {
            ConfigError::Validation(v) => {
                prop_assert_eq!(v.param, "keystone_auth_admin_prefix");
                prop_assert_eq!(v.value, prefix);
            }
            other => prop_assert!(false, "expected validation error, got {:?}", other),
        }
    }

    /// A missing leading slash always aborts construction
    #[test]
    fn missing_leading_slash_always_rejected(segments in prop::collection::vec(segment(), 1..4)) {
        let prefix = segments.join("/");
        let params = string_params(&[
            ("keystone_password", "dummy"),
            ("keystone_auth_admin_prefix", &prefix),
        ]);

        let err = reconcile(&ShareApi, &params, &debian_facts()).unwrap_err();
        prop_assert!(matches!(err, ConfigError::Validation(_)));
    }

    /// The admin password node is secret whatever the value
    #[test]
    fn admin_password_secret_for_any_value(password in "[ -~]{1,32}") {
        let params = string_params(&[("keystone_password", &password)]);
        let graph = reconcile(&ShareApi, &params, &debian_facts()).unwrap();

        let node = graph.get("filter:authtoken/admin_password").unwrap();
        prop_assert!(node.is_secret());
        prop_assert_eq!(node.value(), Some(password.as_str()));
    }
}

#[test]
fn repeated_builds_are_identical() {
    let params = required_api_params();
    let first = reconcile(&ShareApi, &params, &debian_facts()).unwrap();
    let second = reconcile(&ShareApi, &params, &debian_facts()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.keys().collect::<Vec<_>>(),
        second.keys().collect::<Vec<_>>()
    );
}

#[test]
fn builds_do_not_share_state_across_invocations() {
    let stopped = {
        let mut params = required_api_params();
        params.insert("enabled".to_string(), statecraft::ParamValue::from(false));
        reconcile(&ShareApi, &params, &debian_facts()).unwrap()
    };
    let running = reconcile(&ShareApi, &required_api_params(), &debian_facts()).unwrap();

    assert_eq!(
        stopped.get("manila-api").and_then(|s| s.ensure()),
        Some(EnsureState::Stopped)
    );
    assert_eq!(
        running.get("manila-api").and_then(|s| s.ensure()),
        Some(EnsureState::Running)
    );
}
