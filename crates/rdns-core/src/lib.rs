// # rdns-core
//
// Core library for the reverse DNS (PTR) reconciliation system.
//
// ## Architecture Overview
//
// This library provides the core functionality for converging PTR
// records on a remote authoritative DNS management API towards a
// desired IP → hostname mapping:
//
// - **ReverseName**: pure derivation of (zone, record) names from an IP
// - **ReverseDnsProvider**: trait for provider implementations that
//   converge one IP's PTR record per call
// - **DirectoryClient**: trait for the remote API collaborator
//   (list/create/update/destroy against zones and records)
// - **ProviderRegistry**: plugin-based registry for providers
//
// ## Design Principles
//
// 1. **Separation of Concerns**: core logic is separate from provider
//    implementations and from the HTTP transport
// 2. **Plugin-Based**: providers are registered dynamically, no
//    hard-coded if-else
// 3. **Stateless**: no ids or remote state are cached across calls —
//    everything is re-resolved by name per invocation
// 4. **Idempotency**: repeated convergence with the same desired state
//    is safe and changes nothing after the first call

pub mod config;
pub mod error;
pub mod registry;
pub mod reverse;
pub mod traits;

// Re-export core types for convenience
pub use config::{MappingConfig, ProviderConfig, RdnsConfig};
pub use error::{Error, Result};
pub use registry::ProviderRegistry;
pub use reverse::ReverseName;
pub use traits::{
    ApiResponse, ConvergeOutcome, DirectoryClient, RecordSummary, RecordTypeInfo,
    ReverseDnsProvider, ReverseDnsProviderFactory, ZoneSummary,
};
