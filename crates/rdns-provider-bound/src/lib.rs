// # Bound Reverse DNS Provider
//
// This crate provides a Bound provider implementation for the reverse
// DNS reconciliation system. Bound is a self-hosted web interface on
// top of BIND that exposes zones and records through a management API.
//
// The provider converges one PTR record per `update` call:
//
// 1. Derive the reverse zone and record names from the IP
// 2. Resolve the zone id by name, creating the zone if absent
// 3. List the zone's records and apply the convergence decision
//    (create / update / destroy / no-op) for the PTR record
//
// All remote calls go through the `DirectoryClient` collaborator and
// are strictly sequential. There is no retry, no caching, and no
// locking around the check-then-create steps: concurrent callers that
// derive the same zone name can race and create duplicates. Callers
// either serialize updates per zone or accept manual cleanup.
//
// ## Dry-Run Mode
//
// When `dry_run` is true, the provider performs all list calls, logs
// the intended mutations, and leaves the remote system untouched.
// Selected via `RDNS_MODE=dry-run` in the factory.

use async_trait::async_trait;
use rdns_core::config::ProviderConfig;
use rdns_core::traits::{ConvergeOutcome, DirectoryClient, ReverseDnsProvider, ReverseDnsProviderFactory};
use rdns_core::{Error, Result, ReverseName};
use std::net::IpAddr;
use tracing::{debug, error, info, warn};

mod http;

pub use http::HttpDirectoryClient;

/// Remote class name identifying a PTR record in the Bound API
///
/// Opaque, defined by the remote system. Records whose type carries
/// any other class are ignored by the reconciler.
pub const PTR_RECORD_CLASS: &str = "Bound::BuiltinRecordTypes::PTR";

/// Provider name used for registration and error wrapping
const PROVIDER_NAME: &str = "bound";

/// Maximum length of remote error detail reproduced in logs
const ERROR_DETAIL_LIMIT: usize = 200;

/// Normalize a desired hostname to its canonical persisted form
///
/// Blank input means "no PTR record wanted" and maps to `None`.
/// Otherwise the result carries exactly one trailing dot, regardless
/// of how many the input had.
pub fn canonical_hostname(hostname: Option<&str>) -> Option<String> {
    let hostname = hostname?.trim();
    if hostname.is_empty() {
        return None;
    }
    Some(format!("{}.", hostname.trim_end_matches('.')))
}

/// Bound reverse DNS provider
///
/// Holds no state beyond its collaborator client: zone and record ids
/// are re-resolved by name on every call, never cached.
pub struct BoundProvider {
    /// Remote directory client for the Bound management API
    client: Box<dyn DirectoryClient>,

    /// Dry-run mode: list calls are performed, mutations are logged
    /// and skipped
    dry_run: bool,
}

impl std::fmt::Debug for BoundProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundProvider")
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl BoundProvider {
    /// Create a new Bound provider over the given directory client
    pub fn new(client: Box<dyn DirectoryClient>, dry_run: bool) -> Self {
        Self { client, dry_run }
    }

    /// Create a provider in live mode
    pub fn new_live(client: Box<dyn DirectoryClient>) -> Self {
        Self::new(client, false)
    }

    /// Create a provider in dry-run mode
    pub fn new_dry_run(client: Box<dyn DirectoryClient>) -> Self {
        Self::new(client, true)
    }

    /// Ensure a zone exists for `zone_name`, creating it if absent
    ///
    /// Returns the zone id. `None` is returned only in dry-run mode
    /// when the zone is absent: the creation is logged, not performed.
    ///
    /// Zone creation is not idempotency-checked beyond the existence
    /// scan here, and zones are never deleted by this provider.
    ///
    /// Fails with `Error::RemoteList` when the zone listing is refused
    /// and `Error::RemoteCreate` when creation is refused or returns
    /// no usable payload. Both are fatal to the surrounding `update`.
    pub async fn resolve_or_create_zone(&self, zone_name: &str) -> Result<Option<String>> {
        let listed = self.client.list_zones().await?;
        if !listed.ok {
            return Err(Error::remote_list("zones", listed.error_message()));
        }

        // First name match wins. Duplicate zones are a remote
        // data-integrity condition this provider does not resolve.
        if let Some(zone) = listed
            .data
            .unwrap_or_default()
            .into_iter()
            .find(|zone| zone.name == zone_name)
        {
            debug!(zone = %zone_name, zone_id = %zone.id, "zone already exists");
            return Ok(Some(zone.id));
        }

        if self.dry_run {
            info!(zone = %zone_name, "[DRY-RUN] would create zone");
            return Ok(None);
        }

        info!(zone = %zone_name, "creating zone");
        let created = self.client.create_zone(zone_name).await?;
        if !created.ok {
            return Err(Error::remote_create("zones", created.error_message()));
        }

        let zone = created
            .data
            .ok_or_else(|| Error::remote_create("zones", "create returned no payload"))?;
        Ok(Some(zone.id))
    }

    /// Converge the PTR record named `record_name` in `zone_id` to the
    /// desired hostname
    ///
    /// `desired` must already be canonical (see [`canonical_hostname`]);
    /// `None` means the record should not exist.
    pub async fn converge_record(
        &self,
        zone_id: &str,
        record_name: &str,
        desired: Option<&str>,
    ) -> Result<ConvergeOutcome> {
        let listed = self.client.list_records(zone_id).await?;
        if !listed.ok {
            return Err(Error::remote_list("records", listed.error_message()));
        }

        // Existence is keyed by (zone, name, type), never by id. First
        // match wins among duplicates.
        let existing = listed.data.unwrap_or_default().into_iter().find(|record| {
            record.name == record_name && record.record_type.class == PTR_RECORD_CLASS
        });

        match (existing, desired) {
            (Some(record), Some(hostname)) => {
                if self.dry_run {
                    info!(
                        record = %record_name,
                        record_id = %record.id,
                        hostname = %hostname,
                        "[DRY-RUN] would update PTR record"
                    );
                    return Ok(ConvergeOutcome::Unchanged {
                        record_id: Some(record.id),
                    });
                }

                let updated = self.client.update_record(&record.id, hostname).await?;
                if !updated.ok {
                    return Err(Error::remote_mutation("update", updated.error_message()));
                }

                info!(record = %record_name, record_id = %record.id, hostname = %hostname, "updated PTR record");
                Ok(ConvergeOutcome::Updated { record_id: record.id })
            }

            (Some(record), None) => {
                if self.dry_run {
                    info!(
                        record = %record_name,
                        record_id = %record.id,
                        "[DRY-RUN] would destroy PTR record"
                    );
                    return Ok(ConvergeOutcome::Unchanged {
                        record_id: Some(record.id),
                    });
                }

                let destroyed = self.client.destroy_record(&record.id).await?;
                if !destroyed.ok {
                    return Err(Error::remote_mutation("destroy", destroyed.error_message()));
                }

                info!(record = %record_name, record_id = %record.id, "destroyed PTR record");
                Ok(ConvergeOutcome::Deleted)
            }

            (None, Some(hostname)) => {
                if self.dry_run {
                    info!(
                        record = %record_name,
                        hostname = %hostname,
                        "[DRY-RUN] would create PTR record"
                    );
                    return Ok(ConvergeOutcome::Unchanged { record_id: None });
                }

                let created = self
                    .client
                    .create_record(zone_id, record_name, PTR_RECORD_CLASS, hostname)
                    .await?;
                if !created.ok {
                    return Err(Error::remote_create("records", created.error_message()));
                }

                let record = created
                    .data
                    .ok_or_else(|| Error::remote_create("records", "create returned no payload"))?;

                info!(record = %record_name, record_id = %record.id, hostname = %hostname, "created PTR record");
                Ok(ConvergeOutcome::Created { record_id: record.id })
            }

            (None, None) => {
                debug!(record = %record_name, "no PTR record exists and none wanted");
                Ok(ConvergeOutcome::Unchanged { record_id: None })
            }
        }
    }

    /// Full convergence for one IP: derive names, resolve the zone,
    /// reconcile the record
    async fn converge_ptr(&self, ip: IpAddr, hostname: Option<&str>) -> Result<ConvergeOutcome> {
        let name = ReverseName::derive(ip);
        let desired = canonical_hostname(hostname);

        debug!(
            ip = %ip,
            zone = %name.zone,
            record = %name.record,
            desired = ?desired,
            "derived reverse names"
        );

        let Some(zone_id) = self.resolve_or_create_zone(&name.zone).await? else {
            // Dry-run with an absent zone: no records can exist yet,
            // so report the intended record action and stop.
            if let Some(hostname) = desired.as_deref() {
                info!(record = %name.record, hostname = %hostname, "[DRY-RUN] would create PTR record");
            }
            return Ok(ConvergeOutcome::Unchanged { record_id: None });
        };

        self.converge_record(&zone_id, &name.record, desired.as_deref())
            .await
    }
}

#[async_trait]
impl ReverseDnsProvider for BoundProvider {
    /// Converge the PTR record for `ip` to `hostname`
    ///
    /// Remote calls run strictly in sequence: list zones →
    /// [create zone] → list records → [create|update|destroy record].
    /// Any remote failure aborts the call; no partial rollback is
    /// attempted, the remote system is the source of truth.
    ///
    /// Callers see a single provider-level error kind with a generic
    /// message; the underlying failure is logged with truncated detail.
    async fn update(&self, ip: IpAddr, hostname: Option<&str>) -> Result<ConvergeOutcome> {
        info!(
            ip = %ip,
            hostname = ?hostname,
            mode = if self.dry_run { "dry-run" } else { "live" },
            "converging PTR record"
        );

        match self.converge_ptr(ip, hostname).await {
            Ok(outcome) => {
                debug!(ip = %ip, outcome = ?outcome, "PTR convergence resolved");
                Ok(outcome)
            }
            Err(err) => {
                let mut detail = err.to_string();
                if detail.len() > ERROR_DETAIL_LIMIT {
                    detail = detail.chars().take(ERROR_DETAIL_LIMIT).collect();
                    detail.push_str("...");
                }
                error!(ip = %ip, error = %detail, "PTR convergence failed");

                Err(Error::provider(
                    PROVIDER_NAME,
                    format!("failed to converge PTR record for {ip}"),
                ))
            }
        }
    }

    fn supports(&self, _ip: IpAddr) -> bool {
        // Bound publishes both in-addr.arpa and ip6.arpa zones.
        true
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn provider_description(&self) -> &'static str {
        "Bound is a self hosted web interface on top of BIND and can \
         provide support for publishing reverse DNS records."
    }
}

/// Factory for creating Bound providers
pub struct BoundFactory;

impl ReverseDnsProviderFactory for BoundFactory {
    fn create(&self, config: &ProviderConfig) -> Result<Box<dyn ReverseDnsProvider>> {
        match config {
            ProviderConfig::Bound {
                host,
                port,
                use_tls,
                api_key,
            } => {
                if api_key.is_empty() {
                    return Err(Error::config("Bound API key is required"));
                }

                let dry_run = std::env::var("RDNS_MODE")
                    .unwrap_or_default()
                    .to_lowercase()
                    == "dry-run";

                if dry_run {
                    warn!("Bound provider running in dry-run mode, no changes will be made");
                }

                let client = HttpDirectoryClient::new(host, *port, *use_tls, api_key.clone())?;
                Ok(Box::new(BoundProvider::new(Box::new(client), dry_run)))
            }
            _ => Err(Error::config("Invalid config for Bound provider")),
        }
    }
}

/// Register the Bound provider with a registry
///
/// This function should be called during initialization to make the
/// Bound provider available.
///
/// # Example
///
/// ```rust
/// use rdns_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// rdns_provider_bound::register(&registry);
/// ```
pub fn register(registry: &rdns_core::ProviderRegistry) {
    registry.register_provider(PROVIDER_NAME, Box::new(BoundFactory));
}
