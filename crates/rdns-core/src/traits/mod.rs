//! Trait definitions for the reverse DNS reconciliation system
//!
//! - [`ReverseDnsProvider`]: converge one IP's PTR record to a desired hostname
//! - [`DirectoryClient`]: list/create/update/destroy against the remote API

pub mod directory;
pub mod provider;

pub use directory::{ApiResponse, DirectoryClient, RecordSummary, RecordTypeInfo, ZoneSummary};
pub use provider::{ConvergeOutcome, ReverseDnsProvider, ReverseDnsProviderFactory};
