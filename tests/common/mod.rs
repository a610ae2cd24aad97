//! Common test utilities for Statecraft integration tests

use statecraft::{ParamMap, ParamValue, PlatformFacts};

/// Facts for a Debian-family host
pub fn debian_facts() -> PlatformFacts {
    PlatformFacts::debian()
}

/// Facts for a RedHat-family host
#[allow(dead_code)]
pub fn redhat_facts() -> PlatformFacts {
    PlatformFacts::redhat()
}

/// Build a parameter map from string pairs
#[allow(dead_code)]
pub fn string_params(pairs: &[(&str, &str)]) -> ParamMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), ParamValue::from(*v)))
        .collect()
}

/// The minimal parameter set the share API module accepts
#[allow(dead_code)]
pub fn required_api_params() -> ParamMap {
    string_params(&[("keystone_password", "foo")])
}
