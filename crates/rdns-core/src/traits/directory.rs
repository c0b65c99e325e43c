//! Remote Directory Client trait
//!
//! Defines the interface to the authoritative DNS management API: an
//! RPC-style client offering list/create/update/destroy operations
//! against the `zones` and `records` collections.
//!
//! ## Implementations
//!
//! - Bound HTTP API: `rdns-provider-bound` crate
//! - Test doubles: in-memory directories in the provider's test suite
//!
//! Every remote call returns an [`ApiResponse`] envelope. A transport
//! failure (connectivity, protocol) is an `Err(Error::Transport)`;
//! a call that reached the remote system but was refused comes back
//! as `Ok` with `ok == false`. Callers must check the flag explicitly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Result envelope for a single remote call
///
/// `data` is present on success for calls that return a payload;
/// `error` carries the remote system's message when `ok` is false.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    /// Whether the remote system accepted the call
    pub ok: bool,
    /// Payload, if the call returns one
    #[serde(default)]
    pub data: Option<T>,
    /// Remote error message, if the call was refused
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying a payload
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// A refused response with the remote system's message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// The remote error message, or a placeholder when none was given
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("remote call reported failure")
    }
}

/// A zone as reported by the remote directory
///
/// The id is opaque, assigned by the remote system, and must never be
/// guessed or cached across invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSummary {
    /// Opaque zone identifier
    pub id: String,
    /// Zone domain name, e.g. `2.0.192.in-addr.arpa`
    pub name: String,
}

/// Type classification of a remote record
///
/// The remote system identifies record types by a class-name string;
/// this core treats it as an opaque constant, not a type-system
/// concept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordTypeInfo {
    /// Remote class name identifying the record type
    pub class: String,
}

/// A record as reported by the remote directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSummary {
    /// Opaque record identifier
    pub id: String,
    /// Host-part label within the zone
    pub name: String,
    /// Type classification
    #[serde(rename = "type")]
    pub record_type: RecordTypeInfo,
}

/// Trait for remote directory client implementations
///
/// Identity of a record is (zone, name, type) — ids are only learned
/// by listing or creating. Implementations perform exactly one remote
/// call per method, with no retries, caching, or background work;
/// retry policy belongs to the caller.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// List all zones known to the remote system
    async fn list_zones(&self) -> Result<ApiResponse<Vec<ZoneSummary>>>;

    /// Create a zone with the given name, returning the new zone
    async fn create_zone(&self, name: &str) -> Result<ApiResponse<ZoneSummary>>;

    /// List all records within a zone
    async fn list_records(&self, zone_id: &str) -> Result<ApiResponse<Vec<RecordSummary>>>;

    /// Create a record within a zone
    ///
    /// `record_class` is the remote type class name; `hostname` is the
    /// canonical target hostname stored in the record's form data.
    async fn create_record(
        &self,
        zone_id: &str,
        name: &str,
        record_class: &str,
        hostname: &str,
    ) -> Result<ApiResponse<RecordSummary>>;

    /// Update an existing record's target hostname
    async fn update_record(&self, record_id: &str, hostname: &str) -> Result<ApiResponse<()>>;

    /// Destroy an existing record
    async fn destroy_record(&self, record_id: &str) -> Result<ApiResponse<()>>;
}
