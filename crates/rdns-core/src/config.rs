//! Configuration types for the reverse DNS reconciliation system
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Main reverse DNS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdnsConfig {
    /// Reverse DNS provider configuration
    pub provider: ProviderConfig,

    /// Desired IP → hostname mappings to converge
    pub mappings: Vec<MappingConfig>,
}

impl RdnsConfig {
    /// Create a new configuration
    pub fn new(provider: ProviderConfig, mappings: Vec<MappingConfig>) -> Self {
        Self { provider, mappings }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.mappings.is_empty() {
            return Err(crate::Error::config("No mappings configured"));
        }

        self.provider.validate()?;

        for mapping in &self.mappings {
            mapping.validate()?;
        }

        Ok(())
    }
}

/// Reverse DNS provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Bound provider (self-hosted web interface on top of BIND)
    Bound {
        /// API host name or address
        host: String,
        /// API port
        port: u16,
        /// Whether to use TLS for API calls
        use_tls: bool,
        /// API key/token
        api_key: String,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Bound { host, api_key, .. } => {
                if host.is_empty() {
                    return Err(crate::Error::config("Bound API host cannot be empty"));
                }
                if api_key.is_empty() {
                    return Err(crate::Error::config("Bound API key cannot be empty"));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config("Custom provider config cannot be null"));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Bound { .. } => "bound",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Bound {
            host: String::new(),
            port: 443,
            use_tls: true,
            api_key: String::new(),
        }
    }
}

/// One desired IP → hostname mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    /// The IP address whose PTR record is managed
    pub ip: IpAddr,

    /// Desired target hostname; `None` means the PTR record should
    /// not exist
    pub hostname: Option<String>,
}

impl MappingConfig {
    /// Create a new mapping
    pub fn new(ip: IpAddr, hostname: Option<impl Into<String>>) -> Self {
        Self {
            ip,
            hostname: hostname.map(Into::into),
        }
    }

    /// Validate the mapping
    pub fn validate(&self) -> Result<(), crate::Error> {
        if let Some(hostname) = &self.hostname {
            let bare = hostname.trim().trim_end_matches('.');
            if bare.len() > 253 {
                return Err(crate::Error::config(format!(
                    "Hostname too long for {}: {} chars (max 253)",
                    self.ip,
                    bare.len()
                )));
            }
            for label in bare.split('.') {
                if !bare.is_empty() && label.is_empty() {
                    return Err(crate::Error::config(format!(
                        "Hostname for {} has an empty label: '{}'",
                        self.ip, hostname
                    )));
                }
                if label.len() > 63 {
                    return Err(crate::Error::config(format!(
                        "Hostname label too long for {}: '{}'",
                        self.ip, label
                    )));
                }
            }
        }
        Ok(())
    }
}
