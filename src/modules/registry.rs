//! Registry of built-in service modules
//!
//! Mirrors how the module set is published to embedding code: lookup by id,
//! iteration for discovery.

use super::{ServiceModule, ShareApi, TelemetryClient};

/// Registry of service modules available to the invoking process
pub struct ModuleRegistry {
    modules: Vec<Box<dyn ServiceModule>>,
}

impl ModuleRegistry {
    /// Create a registry with the given modules
    pub fn new(modules: Vec<Box<dyn ServiceModule>>) -> Self {
        Self { modules }
    }

    /// Create a registry with the built-in modules
    pub fn builtin() -> Self {
        Self::new(vec![Box::new(TelemetryClient), Box::new(ShareApi)])
    }

    /// Get a module by its id
    pub fn get(&self, id: &str) -> Option<&dyn ServiceModule> {
        self.modules
            .iter()
            .find(|m| m.id() == id)
            .map(Box::as_ref)
    }

    /// Iterate over all registered modules
    pub fn all(&self) -> impl Iterator<Item = &dyn ServiceModule> {
        self.modules.iter().map(Box::as_ref)
    }

    /// Ids of all registered modules
    pub fn ids(&self) -> Vec<&'static str> {
        self.modules.iter().map(|m| m.id()).collect()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_modules() {
        let registry = ModuleRegistry::builtin();
        let ids = registry.ids();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"telemetry-client"));
        assert!(ids.contains(&"share-api"));
    }

    #[test]
    fn test_get_by_id() {
        let registry = ModuleRegistry::builtin();
        assert!(registry.get("share-api").is_some());
        assert!(registry.get("unknown-module").is_none());
    }

    #[test]
    fn test_all_iterates_every_module() {
        let registry = ModuleRegistry::builtin();
        assert_eq!(registry.all().count(), 2);
    }

    #[test]
    fn test_every_module_declares_a_schema() {
        let registry = ModuleRegistry::builtin();
        for module in registry.all() {
            assert!(!module.schema().is_empty(), "module '{}'", module.id());
        }
    }
}
