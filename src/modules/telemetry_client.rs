//! Telemetry client package module
//!
//! Installs the telemetry client package; the package name comes from a
//! per-OS-family default table.

use tracing::debug;

use super::ServiceModule;
use crate::error::Result;
use crate::facts::OsFamily;
use crate::graph::{ConfigResource, EnsureState, ResourceGraph, ResourceKind};
use crate::resolver::ResolvedConfig;
use crate::schema::{ParamSpec, Schema};

/// Identity key of the client package node
pub const CLIENT_PACKAGE: &str = "python-ceilometerclient";

/// Telemetry client package installation
pub struct TelemetryClient;

impl ServiceModule for TelemetryClient {
    fn id(&self) -> &'static str {
        "telemetry-client"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_param(
                ParamSpec::enumeration("package_ensure", &["present", "absent", "latest"])
                    .with_default("present"),
            )
            .with_param(
                ParamSpec::string("client_package_name")
                    .with_platform_default(OsFamily::Debian, CLIENT_PACKAGE)
                    .with_platform_default(OsFamily::RedHat, CLIENT_PACKAGE),
            )
    }

    fn build(&self, config: &ResolvedConfig) -> Result<ResourceGraph> {
        let ensure = config
            .get_str("package_ensure")
            .and_then(EnsureState::parse)
            .unwrap_or(EnsureState::Present);
        let package_name = config
            .get_str("client_package_name")
            .unwrap_or(CLIENT_PACKAGE);

        let mut graph = ResourceGraph::new();
        graph.insert(
            ConfigResource::new(ResourceKind::Package, CLIENT_PACKAGE)
                .with_ensure(ensure)
                .with_attr("name", package_name)
                .with_tag("openstack"),
        );

        debug!(module = self.id(), resources = graph.len(), "resource graph built");
        Ok(graph)
    }
}
