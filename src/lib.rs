//! Statecraft - declarative configuration-state reconciler
//!
//! A pure engine for service configuration management: validate input
//! parameters, merge them with platform-derived defaults, and expand them
//! into a typed resource graph for an external applier to reconcile
//! against real system state.
//!
//! Each reconciliation is one synchronous pass over immutable input:
//!
//! ```
//! use statecraft::{reconcile, EnsureState, ParamMap, ParamValue, PlatformFacts};
//! use statecraft::modules::ShareApi;
//!
//! let mut params = ParamMap::new();
//! params.insert("keystone_password".to_string(), ParamValue::from("foo"));
//!
//! let graph = reconcile(&ShareApi, &params, &PlatformFacts::debian())?;
//! assert_eq!(
//!     graph.get("manila-api").and_then(|s| s.ensure()),
//!     Some(EnsureState::Running)
//! );
//! # Ok::<(), statecraft::ConfigError>(())
//! ```

pub mod applier;
pub mod error;
pub mod facts;
pub mod graph;
pub mod modules;
pub mod resolver;
pub mod schema;
pub mod validate;

pub use applier::Applier;
pub use error::{ConfigError, Result, ValidationError};
pub use facts::{OsFamily, PlatformFacts};
pub use graph::{AttrValue, ConfigResource, EnsureState, ResourceGraph, ResourceKind};
pub use modules::{reconcile, ModuleRegistry, ServiceModule};
pub use resolver::{resolve, ParamMap, ResolvedConfig};
pub use schema::{DefaultValue, ParamSpec, ParamType, ParamValue, Schema};
