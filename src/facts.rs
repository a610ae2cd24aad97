//! Platform facts supplied by the invoking process
//!
//! The core never inspects the host itself. Whatever gathers facts (the
//! external collaborator) hands in a read-only snapshot per reconciliation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating system family reported by the fact collector
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OsFamily {
    Debian,
    RedHat,
    /// Any family the built-in default tables do not cover
    Other(String),
}

impl OsFamily {
    /// Parse an OS family from a fact string (case-insensitive)
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "debian" => OsFamily::Debian,
            "redhat" => OsFamily::RedHat,
            _ => OsFamily::Other(s.to_string()),
        }
    }

    /// Canonical fact-string form
    pub fn as_str(&self) -> &str {
        match self {
            OsFamily::Debian => "Debian",
            OsFamily::RedHat => "RedHat",
            OsFamily::Other(name) => name,
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only snapshot of environment metadata used to select defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFacts {
    /// OS family of the target host
    pub os_family: OsFamily,
}

impl PlatformFacts {
    /// Create facts for the given OS family
    pub fn new(os_family: OsFamily) -> Self {
        Self { os_family }
    }

    /// Facts for a Debian-family host
    pub fn debian() -> Self {
        Self::new(OsFamily::Debian)
    }

    /// Facts for a RedHat-family host
    pub fn redhat() -> Self {
        Self::new(OsFamily::RedHat)
    }
}
