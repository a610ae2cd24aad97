//! Shared-filesystem service API module
//!
//! Expands API parameters into the service node, core config entries, the
//! keystone auth-token paste-pipeline filter, the optional rate-limit
//! filter, and the database sync step.

use tracing::debug;

use super::ServiceModule;
use crate::error::Result;
use crate::graph::{ConfigResource, EnsureState, ResourceGraph, ResourceKind};
use crate::resolver::ResolvedConfig;
use crate::schema::{ParamSpec, Schema};
use crate::validate::{self, PATH_PREFIX_PATTERN};

/// Identity key of the API service node
pub const SERVICE_NAME: &str = "manila-api";

/// Identity key of the database sync exec node
pub const DB_SYNC: &str = "manila-manage db_sync";

/// Paste-pipeline keys in `filter:authtoken` and the parameters they carry
const AUTHTOKEN_KEYS: [(&str, &str); 8] = [
    ("service_protocol", "service_protocol"),
    ("service_host", "service_host"),
    ("service_port", "service_port"),
    ("auth_protocol", "keystone_protocol"),
    ("auth_host", "keystone_host"),
    ("auth_port", "keystone_port"),
    ("admin_tenant_name", "keystone_tenant"),
    ("admin_user", "keystone_user"),
];

/// Shared-filesystem service API configuration
pub struct ShareApi;

impl ServiceModule for ShareApi {
    fn id(&self) -> &'static str {
        "share-api"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_param(ParamSpec::string("keystone_password").required().secret())
            .with_param(ParamSpec::string("keystone_user").with_default("manila"))
            .with_param(ParamSpec::string("keystone_tenant").with_default("services"))
            .with_param(ParamSpec::string("keystone_host").with_default("localhost"))
            .with_param(ParamSpec::string("keystone_port").with_default("35357"))
            .with_param(ParamSpec::string("keystone_protocol").with_default("http"))
            .with_param(
                ParamSpec::string("keystone_auth_admin_prefix").with_pattern(PATH_PREFIX_PATTERN),
            )
            .with_param(ParamSpec::string("keystone_auth_uri"))
            .with_param(ParamSpec::string("service_host").with_default("localhost"))
            .with_param(ParamSpec::string("service_port").with_default("5000"))
            .with_param(ParamSpec::string("service_protocol").with_default("http"))
            .with_param(ParamSpec::string("auth_strategy").with_default("keystone"))
            .with_param(ParamSpec::string("bind_host").with_default("0.0.0.0"))
            .with_param(ParamSpec::string("os_region_name"))
            .with_param(ParamSpec::string("ratelimits"))
            .with_param(ParamSpec::boolean("enabled").with_default(true))
            .with_param(ParamSpec::boolean("manage_service").with_default(true))
    }

    fn build(&self, config: &ResolvedConfig) -> Result<ResourceGraph> {
        let enabled = config.get_bool("enabled").unwrap_or(true);
        let manage_service = config.get_bool("manage_service").unwrap_or(true);

        let mut graph = ResourceGraph::new();

        // Service lifecycle: no ensure attribute at all when unmanaged, so
        // the applier leaves the live process state untouched.
        let mut service = ConfigResource::new(ResourceKind::Service, SERVICE_NAME)
            .with_attr("hasstatus", true)
            .with_tag("manila-service");
        if manage_service {
            service = service.with_ensure(if enabled {
                EnsureState::Running
            } else {
                EnsureState::Stopped
            });
        }
        graph.insert(service);

        if let Some(strategy) = config.get_str("auth_strategy") {
            graph.insert(config_entry("DEFAULT/auth_strategy", strategy));
        }
        if let Some(bind_host) = config.get_str("bind_host") {
            graph.insert(config_entry("DEFAULT/osapi_share_listen", bind_host));
        }
        // Unset optional region produces no node, not a placeholder
        if let Some(region) = config.get_str("os_region_name") {
            graph.insert(config_entry("DEFAULT/os_region_name", region));
        }

        for (key, param) in AUTHTOKEN_KEYS {
            if let Some(value) = config.get_str(param) {
                graph.insert(authtoken_entry(key, value));
            }
        }

        if let Some(password) = config.get_str("keystone_password") {
            graph.insert(authtoken_entry("admin_password", password).secret());
        }

        graph.insert(authtoken_entry("auth_uri", &auth_uri(config)));

        match config.get_str("keystone_auth_admin_prefix") {
            Some(prefix) => {
                validate::validate("keystone_auth_admin_prefix", prefix, PATH_PREFIX_PATTERN)?;
                graph.insert(authtoken_entry("auth_admin_prefix", prefix));
            }
            None => {
                graph.insert(
                    ConfigResource::new(
                        ResourceKind::PasteFilterEntry,
                        "filter:authtoken/auth_admin_prefix",
                    )
                    .with_ensure(EnsureState::Absent),
                );
            }
        }

        if let Some(limits) = config.get_str("ratelimits") {
            graph.insert(
                ConfigResource::new(ResourceKind::PasteFilterEntry, "filter:ratelimit/limits")
                    .with_value(limits),
            );
        }

        if enabled {
            graph.insert(
                ConfigResource::new(ResourceKind::Exec, DB_SYNC)
                    .with_attr("command", DB_SYNC)
                    .with_tag("manila-service"),
            );
        }

        debug!(module = self.id(), resources = graph.len(), "resource graph built");
        Ok(graph)
    }
}

/// The auth endpoint handed to the auth-token filter: the explicit
/// `keystone_auth_uri` when set, else derived from the service endpoint
fn auth_uri(config: &ResolvedConfig) -> String {
    if let Some(uri) = config.get_str("keystone_auth_uri") {
        return uri.to_string();
    }
    format!(
        "{}://{}:{}/",
        config.get_str("service_protocol").unwrap_or("http"),
        config.get_str("service_host").unwrap_or("localhost"),
        config.get_str("service_port").unwrap_or("5000"),
    )
}

fn config_entry(key: &str, value: &str) -> ConfigResource {
    ConfigResource::new(ResourceKind::ConfigEntry, key).with_value(value)
}

fn authtoken_entry(key: &str, value: &str) -> ConfigResource {
    ConfigResource::new(ResourceKind::PasteFilterEntry, format!("filter:authtoken/{}", key))
        .with_value(value)
}
