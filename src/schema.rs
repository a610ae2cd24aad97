//! Parameter schema definitions for service modules
//!
//! A schema declares every parameter a module accepts: its type, defaults
//! (static or per OS family), validation pattern, and required/secret flags.
//! Specs are immutable once built; the resolver reads them, never writes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::facts::OsFamily;

/// Declared type of a parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamType {
    /// Free-form string, optionally pattern-checked
    Str,
    /// Boolean flag
    Bool,
    /// String restricted to a fixed set of allowed values
    Enum(Vec<String>),
}

impl ParamType {
    /// Human-readable type name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ParamType::Str => "string",
            ParamType::Bool => "bool",
            ParamType::Enum(_) => "enum",
        }
    }
}

/// A concrete parameter value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
}

impl ParamValue {
    /// String contents, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            ParamValue::Bool(_) => None,
        }
    }

    /// Boolean contents, if this is a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            ParamValue::Str(_) => None,
        }
    }

    /// Type name of the carried value for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Str(_) => "string",
            ParamValue::Bool(_) => "bool",
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

/// Where a parameter's default comes from when the user supplies nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// Same default everywhere
    Static(ParamValue),
    /// Default looked up by OS family; missing entry is an error
    PerOsFamily(BTreeMap<OsFamily, ParamValue>),
}

/// A single parameter declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name (unique within a schema)
    pub name: String,

    /// Declared type
    pub param_type: ParamType,

    /// Optional default applied when the user supplies no value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,

    /// Optional full-match validation pattern for string values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Whether resolution fails when no value and no default exist
    #[serde(default)]
    pub required: bool,

    /// Whether the value must be redacted from plain-text output
    #[serde(default)]
    pub secret: bool,
}

impl ParamSpec {
    /// Declare a string parameter
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: ParamType::Str,
            default: None,
            pattern: None,
            required: false,
            secret: false,
        }
    }

    /// Declare a boolean parameter
    pub fn boolean(name: impl Into<String>) -> Self {
        Self {
            param_type: ParamType::Bool,
            ..Self::string(name)
        }
    }

    /// Declare an enum-of-string parameter with its allowed values
    pub fn enumeration(name: impl Into<String>, allowed: &[&str]) -> Self {
        Self {
            param_type: ParamType::Enum(allowed.iter().map(|s| (*s).to_string()).collect()),
            ..Self::string(name)
        }
    }

    /// Set a static default
    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(DefaultValue::Static(value.into()));
        self
    }

    /// Add a per-OS-family default entry
    pub fn with_platform_default(
        mut self,
        family: OsFamily,
        value: impl Into<ParamValue>,
    ) -> Self {
        let table = match self.default {
            Some(DefaultValue::PerOsFamily(table)) => {
                let mut table = table;
                table.insert(family, value.into());
                table
            }
            _ => {
                let mut table = BTreeMap::new();
                table.insert(family, value.into());
                table
            }
        };
        self.default = Some(DefaultValue::PerOsFamily(table));
        self
    }

    /// Set the full-match validation pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Mark the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the parameter value as secret
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

/// The set of parameters a service module accepts, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    params: BTreeMap<String, ParamSpec>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self {
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter declaration (names are unique; re-adding replaces)
    pub fn with_param(mut self, spec: ParamSpec) -> Self {
        self.params.insert(spec.name.clone(), spec);
        self
    }

    /// Look up a parameter declaration by name
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.get(name)
    }

    /// Iterate over all parameter declarations
    pub fn params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.values()
    }

    /// Number of declared parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the schema declares no parameters
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
