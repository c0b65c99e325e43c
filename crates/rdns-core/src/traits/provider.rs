//! Reverse DNS provider trait
//!
//! Defines the interface exposed by reverse DNS provider
//! implementations to the orchestrator: converge the PTR record for
//! one IP address to a desired hostname (or to absence).
//!
//! ## Implementations
//!
//! - Bound: `rdns-provider-bound` crate
//! - Future: PowerDNS, Knot, etc.

use async_trait::async_trait;
use std::net::IpAddr;

/// Outcome of a single convergence call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvergeOutcome {
    /// A PTR record was created
    Created {
        /// Id assigned to the new record
        record_id: String,
    },
    /// An existing PTR record's hostname was updated
    Updated {
        /// Id of the updated record
        record_id: String,
    },
    /// An existing PTR record was deleted
    Deleted,
    /// Remote state already matched the desired state
    Unchanged {
        /// Id of the matching record, if one exists
        record_id: Option<String>,
    },
}

impl ConvergeOutcome {
    /// Id of the PTR record after convergence, if one exists
    pub fn record_id(&self) -> Option<&str> {
        match self {
            Self::Created { record_id } | Self::Updated { record_id } => Some(record_id.as_str()),
            Self::Unchanged { record_id } => record_id.as_deref(),
            Self::Deleted => None,
        }
    }
}

/// Trait for reverse DNS provider implementations
///
/// # Idempotency
///
/// `update` must be idempotent: invoking it twice with the same
/// desired state leaves the remote system unchanged on the second
/// call and reports the same surviving record id.
///
/// # Errors
///
/// Providers surface exactly one error kind to callers
/// ([`Error::Provider`](crate::Error::Provider)); remote failure
/// detail is logged, not propagated. A failed call aborts convergence
/// for that one IP only — there is no cross-call state.
#[async_trait]
pub trait ReverseDnsProvider: Send + Sync {
    /// Converge the PTR record for `ip` to `hostname`
    ///
    /// `None` (or a blank hostname) means no PTR record should exist
    /// for this IP. The hostname is normalized to carry exactly one
    /// trailing dot before being persisted.
    async fn update(
        &self,
        ip: IpAddr,
        hostname: Option<&str>,
    ) -> Result<ConvergeOutcome, crate::Error>;

    /// Check whether this provider can manage PTR records for `ip`
    fn supports(&self, ip: IpAddr) -> bool;

    /// Provider name (for logging/registry lookup)
    fn provider_name(&self) -> &'static str;

    /// Human-readable provider description
    fn provider_description(&self) -> &'static str;
}

/// Helper trait for constructing reverse DNS providers from configuration
pub trait ReverseDnsProviderFactory: Send + Sync {
    /// Create a provider instance from configuration
    fn create(
        &self,
        config: &crate::config::ProviderConfig,
    ) -> Result<Box<dyn ReverseDnsProvider>, crate::Error>;
}
