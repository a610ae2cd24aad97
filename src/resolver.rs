//! Parameter resolution for service modules
//!
//! This module handles:
//! - Rejecting parameters the schema does not declare
//! - Type and pattern checks on user-supplied values
//! - Applying platform-derived and static defaults
//! - Enforcing required parameters
//!
//! Resolution order per parameter: explicit user value, then platform
//! default, then static default, then a missing-required error.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{ConfigError, Result, ValidationError};
use crate::facts::PlatformFacts;
use crate::schema::{DefaultValue, ParamSpec, ParamType, ParamValue, Schema};
use crate::validate;

/// User-supplied parameters, by name
pub type ParamMap = BTreeMap<String, ParamValue>;

/// Final parameter values for one reconciliation pass
///
/// Produced once by [`resolve`] and consumed read-only downstream; there is
/// no way to mutate a value after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    values: BTreeMap<String, ParamValue>,
}

impl ResolvedConfig {
    /// Look up a resolved value by parameter name
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Look up a resolved string value
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(ParamValue::as_str)
    }

    /// Look up a resolved boolean value
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.values.get(name).and_then(ParamValue::as_bool)
    }

    /// Check whether a parameter resolved to a value at all
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over all resolved (name, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of resolved parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing resolved
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Merge user parameters with schema defaults into a [`ResolvedConfig`].
///
/// Optional parameters with neither a user value nor a default are simply
/// absent from the result, so downstream builders can distinguish "unset"
/// from any concrete value.
pub fn resolve(user: &ParamMap, facts: &PlatformFacts, schema: &Schema) -> Result<ResolvedConfig> {
    for name in user.keys() {
        if schema.get(name).is_none() {
            return Err(ConfigError::UnknownParam {
                param: name.clone(),
            });
        }
    }

    let mut values = BTreeMap::new();

    for spec in schema.params() {
        if let Some(value) = user.get(&spec.name) {
            check_type(spec, value)?;
            if let (Some(pattern), Some(s)) = (&spec.pattern, value.as_str()) {
                validate::validate(&spec.name, s, pattern)?;
            }
            trace!(param = %spec.name, source = "user", "parameter resolved");
            values.insert(spec.name.clone(), value.clone());
            continue;
        }

        match default_for(spec, facts)? {
            Some(value) => {
                trace!(param = %spec.name, source = "default", "parameter resolved");
                values.insert(spec.name.clone(), value);
            }
            None if spec.required => {
                return Err(ConfigError::MissingRequired {
                    param: spec.name.clone(),
                });
            }
            None => {}
        }
    }

    debug!(
        parameters = values.len(),
        os_family = %facts.os_family,
        "parameter resolution complete"
    );

    Ok(ResolvedConfig { values })
}

/// Check a user value against the declared parameter type
fn check_type(spec: &ParamSpec, value: &ParamValue) -> Result<()> {
    match (&spec.param_type, value) {
        (ParamType::Str, ParamValue::Str(_)) | (ParamType::Bool, ParamValue::Bool(_)) => Ok(()),
        (ParamType::Enum(allowed), ParamValue::Str(s)) => {
            if allowed.iter().any(|a| a == s) {
                Ok(())
            } else {
                Err(ValidationError::new(&spec.name, s, allowed.join("|")).into())
            }
        }
        _ => Err(ConfigError::TypeMismatch {
            param: spec.name.clone(),
            expected: spec.param_type.name(),
            actual: value.type_name(),
        }),
    }
}

/// Look up the default for a parameter, consulting the platform facts
fn default_for(spec: &ParamSpec, facts: &PlatformFacts) -> Result<Option<ParamValue>> {
    match &spec.default {
        None => Ok(None),
        Some(DefaultValue::Static(value)) => Ok(Some(value.clone())),
        Some(DefaultValue::PerOsFamily(table)) => match table.get(&facts.os_family) {
            Some(value) => Ok(Some(value.clone())),
            None => Err(ConfigError::UnsupportedPlatform {
                os_family: facts.os_family.to_string(),
                param: spec.name.clone(),
            }),
        },
    }
}
