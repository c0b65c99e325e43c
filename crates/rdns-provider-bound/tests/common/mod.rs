//! Test doubles and common utilities for convergence tests
//!
//! Provides an in-memory remote directory that tracks every call and
//! can be told to refuse individual operations or fail at the
//! transport level.

use async_trait::async_trait;
use rdns_core::error::{Error, Result};
use rdns_core::traits::{ApiResponse, DirectoryClient, RecordSummary, RecordTypeInfo, ZoneSummary};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A stored record: the wire summary plus the hostname it points at
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub summary: RecordSummary,
    pub hostname: String,
}

#[derive(Default)]
struct DirectoryState {
    zones: Vec<ZoneSummary>,
    records: HashMap<String, Vec<StoredRecord>>,
    next_id: u64,
}

impl DirectoryState {
    fn assign_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }
}

/// Per-operation call counters
#[derive(Default)]
struct CallCounters {
    list_zones: AtomicUsize,
    create_zone: AtomicUsize,
    list_records: AtomicUsize,
    create_record: AtomicUsize,
    update_record: AtomicUsize,
    destroy_record: AtomicUsize,
}

/// Failure injection switches
///
/// `refuse_*` makes the remote report failure (`ok == false`);
/// `transport_errors` makes every call fail before reaching the
/// remote at all.
#[derive(Default)]
struct FailureInjection {
    refuse_list_zones: AtomicBool,
    refuse_create_zone: AtomicBool,
    refuse_list_records: AtomicBool,
    refuse_mutations: AtomicBool,
    transport_errors: AtomicBool,
}

/// In-memory mock of the remote directory
///
/// Cloning yields a handle sharing the same state and counters, so a
/// test can keep one clone while the provider owns another.
#[derive(Clone, Default)]
pub struct MockDirectory {
    state: Arc<Mutex<DirectoryState>>,
    counters: Arc<CallCounters>,
    failures: Arc<FailureInjection>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a zone, returning its assigned id
    pub fn add_zone(&self, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.assign_id();
        state.zones.push(ZoneSummary {
            id: id.clone(),
            name: name.to_string(),
        });
        id
    }

    /// Seed a record in a zone, returning its assigned id
    pub fn add_record(&self, zone_id: &str, name: &str, class: &str, hostname: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.assign_id();
        state
            .records
            .entry(zone_id.to_string())
            .or_default()
            .push(StoredRecord {
                summary: RecordSummary {
                    id: id.clone(),
                    name: name.to_string(),
                    record_type: RecordTypeInfo {
                        class: class.to_string(),
                    },
                },
                hostname: hostname.to_string(),
            });
        id
    }

    pub fn zones(&self) -> Vec<ZoneSummary> {
        self.state.lock().unwrap().zones.clone()
    }

    pub fn zone_id_by_name(&self, name: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .zones
            .iter()
            .find(|zone| zone.name == name)
            .map(|zone| zone.id.clone())
    }

    pub fn records_in(&self, zone_id: &str) -> Vec<StoredRecord> {
        self.state
            .lock()
            .unwrap()
            .records
            .get(zone_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn refuse_list_zones(&self) {
        self.failures.refuse_list_zones.store(true, Ordering::SeqCst);
    }

    pub fn refuse_create_zone(&self) {
        self.failures.refuse_create_zone.store(true, Ordering::SeqCst);
    }

    pub fn refuse_list_records(&self) {
        self.failures
            .refuse_list_records
            .store(true, Ordering::SeqCst);
    }

    pub fn refuse_mutations(&self) {
        self.failures.refuse_mutations.store(true, Ordering::SeqCst);
    }

    pub fn fail_transport(&self) {
        self.failures.transport_errors.store(true, Ordering::SeqCst);
    }

    pub fn list_zones_calls(&self) -> usize {
        self.counters.list_zones.load(Ordering::SeqCst)
    }

    pub fn create_zone_calls(&self) -> usize {
        self.counters.create_zone.load(Ordering::SeqCst)
    }

    pub fn list_records_calls(&self) -> usize {
        self.counters.list_records.load(Ordering::SeqCst)
    }

    pub fn create_record_calls(&self) -> usize {
        self.counters.create_record.load(Ordering::SeqCst)
    }

    pub fn update_record_calls(&self) -> usize {
        self.counters.update_record.load(Ordering::SeqCst)
    }

    pub fn destroy_record_calls(&self) -> usize {
        self.counters.destroy_record.load(Ordering::SeqCst)
    }

    pub fn mutation_calls(&self) -> usize {
        self.create_zone_calls()
            + self.create_record_calls()
            + self.update_record_calls()
            + self.destroy_record_calls()
    }

    fn check_transport(&self) -> Result<()> {
        if self.failures.transport_errors.load(Ordering::SeqCst) {
            Err(Error::transport("connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DirectoryClient for MockDirectory {
    async fn list_zones(&self) -> Result<ApiResponse<Vec<ZoneSummary>>> {
        self.counters.list_zones.fetch_add(1, Ordering::SeqCst);
        self.check_transport()?;

        if self.failures.refuse_list_zones.load(Ordering::SeqCst) {
            return Ok(ApiResponse::failure("zone listing refused"));
        }

        Ok(ApiResponse::success(self.zones()))
    }

    async fn create_zone(&self, name: &str) -> Result<ApiResponse<ZoneSummary>> {
        self.counters.create_zone.fetch_add(1, Ordering::SeqCst);
        self.check_transport()?;

        if self.failures.refuse_create_zone.load(Ordering::SeqCst) {
            return Ok(ApiResponse::failure("zone creation refused"));
        }

        let mut state = self.state.lock().unwrap();
        let id = state.assign_id();
        let zone = ZoneSummary {
            id,
            name: name.to_string(),
        };
        state.zones.push(zone.clone());
        Ok(ApiResponse::success(zone))
    }

    async fn list_records(&self, zone_id: &str) -> Result<ApiResponse<Vec<RecordSummary>>> {
        self.counters.list_records.fetch_add(1, Ordering::SeqCst);
        self.check_transport()?;

        if self.failures.refuse_list_records.load(Ordering::SeqCst) {
            return Ok(ApiResponse::failure("record listing refused"));
        }

        let records = self
            .records_in(zone_id)
            .into_iter()
            .map(|record| record.summary)
            .collect();
        Ok(ApiResponse::success(records))
    }

    async fn create_record(
        &self,
        zone_id: &str,
        name: &str,
        record_class: &str,
        hostname: &str,
    ) -> Result<ApiResponse<RecordSummary>> {
        self.counters.create_record.fetch_add(1, Ordering::SeqCst);
        self.check_transport()?;

        if self.failures.refuse_mutations.load(Ordering::SeqCst) {
            return Ok(ApiResponse::failure("record creation refused"));
        }

        let mut state = self.state.lock().unwrap();
        let id = state.assign_id();
        let summary = RecordSummary {
            id,
            name: name.to_string(),
            record_type: RecordTypeInfo {
                class: record_class.to_string(),
            },
        };
        state
            .records
            .entry(zone_id.to_string())
            .or_default()
            .push(StoredRecord {
                summary: summary.clone(),
                hostname: hostname.to_string(),
            });
        Ok(ApiResponse::success(summary))
    }

    async fn update_record(&self, record_id: &str, hostname: &str) -> Result<ApiResponse<()>> {
        self.counters.update_record.fetch_add(1, Ordering::SeqCst);
        self.check_transport()?;

        if self.failures.refuse_mutations.load(Ordering::SeqCst) {
            return Ok(ApiResponse::failure("record update refused"));
        }

        let mut state = self.state.lock().unwrap();
        for records in state.records.values_mut() {
            for record in records.iter_mut() {
                if record.summary.id == record_id {
                    record.hostname = hostname.to_string();
                    return Ok(ApiResponse::success(()));
                }
            }
        }
        Ok(ApiResponse::failure("no such record"))
    }

    async fn destroy_record(&self, record_id: &str) -> Result<ApiResponse<()>> {
        self.counters.destroy_record.fetch_add(1, Ordering::SeqCst);
        self.check_transport()?;

        if self.failures.refuse_mutations.load(Ordering::SeqCst) {
            return Ok(ApiResponse::failure("record destruction refused"));
        }

        let mut state = self.state.lock().unwrap();
        for records in state.records.values_mut() {
            if let Some(position) = records.iter().position(|record| record.summary.id == record_id)
            {
                records.remove(position);
                return Ok(ApiResponse::success(()));
            }
        }
        Ok(ApiResponse::failure("no such record"))
    }
}
