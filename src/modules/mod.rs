//! Built-in service module definitions
//!
//! A service module pairs a parameter schema with the composition rules
//! that expand a [`ResolvedConfig`] into a [`ResourceGraph`]:
//! - [`telemetry_client`]: telemetry client package installation
//! - [`share_api`]: shared-filesystem service API configuration
//! - [`registry`]: lookup of built-in modules by id

pub mod registry;
pub mod share_api;
pub mod telemetry_client;

pub use registry::ModuleRegistry;
pub use share_api::ShareApi;
pub use telemetry_client::TelemetryClient;

use crate::error::Result;
use crate::facts::PlatformFacts;
use crate::graph::ResourceGraph;
use crate::resolver::{self, ParamMap, ResolvedConfig};
use crate::schema::Schema;

/// A service module: a parameter schema plus graph composition rules
///
/// `build` is deterministic and all-or-nothing: identical resolved input
/// yields an identical graph, and any validation failure aborts the whole
/// construction rather than returning a partial graph.
pub trait ServiceModule {
    /// Module identifier (e.g. `"share-api"`)
    fn id(&self) -> &'static str;

    /// The parameters this module accepts
    fn schema(&self) -> Schema;

    /// Expand resolved parameters into the module's resource graph
    fn build(&self, config: &ResolvedConfig) -> Result<ResourceGraph>;
}

/// Resolve parameters and build the module's resource graph in one pass
pub fn reconcile(
    module: &dyn ServiceModule,
    user: &ParamMap,
    facts: &PlatformFacts,
) -> Result<ResourceGraph> {
    let schema = module.schema();
    let resolved = resolver::resolve(user, facts, &schema)?;
    module.build(&resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::schema::ParamValue;

    #[test]
    fn test_reconcile_chains_resolve_and_build() {
        let mut params = ParamMap::new();
        params.insert(
            "keystone_password".to_string(),
            ParamValue::from("secret"),
        );

        let graph = reconcile(&ShareApi, &params, &PlatformFacts::debian()).unwrap();
        assert!(graph.contains_key("manila-api"));
    }

    #[test]
    fn test_reconcile_propagates_resolver_errors() {
        let err = reconcile(&ShareApi, &ParamMap::new(), &PlatformFacts::debian()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequired { ref param } if param == "keystone_password"
        ));
    }
}
