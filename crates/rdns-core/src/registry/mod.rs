//! Plugin-based provider registry
//!
//! The registry allows reverse DNS providers to be registered
//! dynamically at runtime, avoiding hardcoded if-else chains.
//!
//! ## Registration
//!
//! Provider crates should register themselves during initialization:
//!
//! ```rust,ignore
//! // In rdns-provider-bound crate
//! pub fn register(registry: &ProviderRegistry) {
//!     registry.register_provider("bound", Box::new(BoundFactory));
//! }
//! ```

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::traits::{ReverseDnsProvider, ReverseDnsProviderFactory};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Provider registry for plugin-based reverse DNS provider creation
///
/// The registry maintains a map of provider type names to factory
/// objects, allowing dynamic instantiation of providers based on
/// configuration.
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing
/// concurrent reads and exclusive writes.
#[derive(Default)]
pub struct ProviderRegistry {
    /// Registered provider factories
    providers: RwLock<HashMap<String, Box<dyn ReverseDnsProviderFactory>>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider factory under a type name
    pub fn register_provider(
        &self,
        name: impl Into<String>,
        factory: Box<dyn ReverseDnsProviderFactory>,
    ) {
        let name = name.into();
        debug!(provider = %name, "registering provider factory");
        let mut providers = self.providers.write().unwrap();
        providers.insert(name, factory);
    }

    /// Create a provider from configuration
    ///
    /// Fails with [`Error::Config`] if the config's type name has no
    /// registered factory.
    pub fn create_provider(&self, config: &ProviderConfig) -> Result<Box<dyn ReverseDnsProvider>> {
        let provider_type = config.type_name();
        debug!(provider = %provider_type, "creating provider from config");
        let providers = self.providers.read().unwrap();

        let factory = providers
            .get(provider_type)
            .ok_or_else(|| Error::config(format!("Unknown provider type: {}", provider_type)))?;

        factory.create(config)
    }

    /// List all registered provider type names
    pub fn list_providers(&self) -> Vec<String> {
        let providers = self.providers.read().unwrap();
        providers.keys().cloned().collect()
    }

    /// Check if a provider type is registered
    pub fn has_provider(&self, name: &str) -> bool {
        let providers = self.providers.read().unwrap();
        providers.contains_key(name)
    }
}
