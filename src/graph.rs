//! Typed configuration resource declarations and the resource graph
//!
//! A graph is a set of declarative nodes keyed by identity, handed to an
//! external applier. It is a value, not a catalog: built fresh per
//! reconciliation and never mutated behind the caller's back.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Kind of configuration resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// An installable package
    Package,
    /// A managed system service
    Service,
    /// A key/value entry in the service's main configuration
    ConfigEntry,
    /// An entry in a paste-pipeline filter section
    PasteFilterEntry,
    /// A one-shot command run during reconciliation
    Exec,
}

impl ResourceKind {
    /// Identifier form used in rendered output
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Package => "package",
            ResourceKind::Service => "service",
            ResourceKind::ConfigEntry => "config_entry",
            ResourceKind::PasteFilterEntry => "paste_filter_entry",
            ResourceKind::Exec => "exec",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Desired lifecycle state of a resource
///
/// A node carrying no ensure attribute at all is meaningful: the applier
/// must leave the live state untouched. That is distinct from every variant
/// here, including [`EnsureState::Absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnsureState {
    Present,
    Absent,
    Running,
    Stopped,
    Latest,
}

impl EnsureState {
    /// Identifier form used in rendered output
    pub fn as_str(&self) -> &'static str {
        match self {
            EnsureState::Present => "present",
            EnsureState::Absent => "absent",
            EnsureState::Running => "running",
            EnsureState::Stopped => "stopped",
            EnsureState::Latest => "latest",
        }
    }

    /// Parse an ensure state from its identifier form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "present" => Some(EnsureState::Present),
            "absent" => Some(EnsureState::Absent),
            "running" => Some(EnsureState::Running),
            "stopped" => Some(EnsureState::Stopped),
            "latest" => Some(EnsureState::Latest),
            _ => None,
        }
    }
}

impl fmt::Display for EnsureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute value on a resource node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Str(String),
    Bool(bool),
}

impl AttrValue {
    /// String contents, if this is a string attribute
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            AttrValue::Bool(_) => None,
        }
    }

    /// Boolean contents, if this is a boolean attribute
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            AttrValue::Str(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => f.write_str(s),
            AttrValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

/// A single declarative resource node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResource {
    kind: ResourceKind,

    /// Unique identity key within a graph
    /// (e.g. `"filter:authtoken/service_protocol"`)
    key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    ensure: Option<EnsureState>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, AttrValue>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    secret: bool,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    tags: BTreeSet<String>,
}

impl ConfigResource {
    /// Create a new resource node
    pub fn new(kind: ResourceKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            ensure: None,
            attributes: BTreeMap::new(),
            secret: false,
            tags: BTreeSet::new(),
        }
    }

    /// Set the ensure state
    pub fn with_ensure(mut self, ensure: EnsureState) -> Self {
        self.ensure = Some(ensure);
        self
    }

    /// Set the `value` attribute
    pub fn with_value(self, value: impl Into<AttrValue>) -> Self {
        self.with_attr("value", value)
    }

    /// Set a named attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add an ordering tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Mark the node's value as secret
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Resource kind
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Identity key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Ensure state, if one was declared
    pub fn ensure(&self) -> Option<EnsureState> {
        self.ensure
    }

    /// Look up an attribute by name
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Shortcut for the `value` attribute as a string
    pub fn value(&self) -> Option<&str> {
        self.attr("value").and_then(AttrValue::as_str)
    }

    /// Whether the node's value must be redacted from plain-text output
    pub fn is_secret(&self) -> bool {
        self.secret
    }

    /// Ordering tags
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Check for a specific ordering tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Plain-text rendering; secret values are redacted
impl fmt::Display for ConfigResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.key)?;
        if let Some(ensure) = self.ensure {
            write!(f, " ensure={}", ensure)?;
        }
        for (name, value) in &self.attributes {
            if self.secret && name == "value" {
                write!(f, " {}=[redacted]", name)?;
            } else {
                write!(f, " {}={}", name, value)?;
            }
        }
        Ok(())
    }
}

/// Set of resource nodes keyed by identity
///
/// Consumers must treat the contents as a set; iteration order is
/// deterministic but carries no ordering semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceGraph {
    resources: BTreeMap<String, ConfigResource>,
}

impl ResourceGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            resources: BTreeMap::new(),
        }
    }

    /// Insert a node, returning any node it displaced
    ///
    /// Builders compose keys statically and never displace; `merge` is the
    /// collision-checked path for combining graphs.
    pub fn insert(&mut self, resource: ConfigResource) -> Option<ConfigResource> {
        self.resources.insert(resource.key.clone(), resource)
    }

    /// Look up a node by identity key
    pub fn get(&self, key: &str) -> Option<&ConfigResource> {
        self.resources.get(key)
    }

    /// Check whether a node with the given identity key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.resources.contains_key(key)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterate over all nodes
    pub fn iter(&self) -> impl Iterator<Item = &ConfigResource> {
        self.resources.values()
    }

    /// Iterate over all identity keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// All nodes of a given kind
    pub fn by_kind(&self, kind: ResourceKind) -> Vec<&ConfigResource> {
        self.resources.values().filter(|r| r.kind == kind).collect()
    }

    /// Merge another graph into this one
    ///
    /// Fails with [`ConfigError::DuplicateResource`] on the first identity
    /// key both graphs declare; this graph is left unchanged on failure.
    pub fn merge(&mut self, other: ResourceGraph) -> Result<()> {
        if let Some(key) = other.resources.keys().find(|k| self.contains_key(k)) {
            return Err(ConfigError::DuplicateResource { key: key.clone() });
        }
        self.resources.extend(other.resources);
        Ok(())
    }

    /// Serialize the graph to YAML for an out-of-process applier
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self)?)
    }

    /// Serialize the graph to JSON for an out-of-process applier
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }
}
