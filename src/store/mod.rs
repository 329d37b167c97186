//! Persistence boundary.
//!
//! The core hands the persistence collaborator a finished SBOM plus its
//! custom-JSON serialization and otherwise stays storage-agnostic. The
//! id sequence lives here too: ids must be allocated atomically so
//! concurrent generation requests never collide.

use crate::error::Result;
use crate::model::Sbom;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Storage contract for generated SBOMs.
pub trait SbomStore: Send + Sync {
    /// Allocate the next SBOM id. Must be atomic under concurrency.
    fn next_id(&self) -> Result<u64>;

    /// Persist the structured record and its custom-JSON blob together.
    fn save(&self, sbom: &Sbom, custom_json: &str) -> Result<()>;

    /// Fetch a structured record by id.
    fn find(&self, id: u64) -> Option<Sbom>;

    /// Fetch the stored custom-JSON blob by id.
    fn find_json(&self, id: u64) -> Option<String>;

    /// All stored records, ordered by id.
    fn list(&self) -> Vec<Sbom>;

    /// Remove both the structured record and the JSON blob. Returns
    /// whether a record existed.
    fn delete(&self, id: u64) -> bool;
}

/// In-memory store for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sequence: AtomicU64,
    records: Mutex<BTreeMap<u64, Sbom>>,
    blobs: Mutex<BTreeMap<u64, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SbomStore for MemoryStore {
    fn next_id(&self) -> Result<u64> {
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn save(&self, sbom: &Sbom, custom_json: &str) -> Result<()> {
        self.records
            .lock()
            .expect("records lock poisoned")
            .insert(sbom.id, sbom.clone());
        self.blobs
            .lock()
            .expect("blobs lock poisoned")
            .insert(sbom.id, custom_json.to_string());
        Ok(())
    }

    fn find(&self, id: u64) -> Option<Sbom> {
        self.records
            .lock()
            .expect("records lock poisoned")
            .get(&id)
            .cloned()
    }

    fn find_json(&self, id: u64) -> Option<String> {
        self.blobs
            .lock()
            .expect("blobs lock poisoned")
            .get(&id)
            .cloned()
    }

    fn list(&self) -> Vec<Sbom> {
        self.records
            .lock()
            .expect("records lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    fn delete(&self, id: u64) -> bool {
        let removed = self
            .records
            .lock()
            .expect("records lock poisoned")
            .remove(&id)
            .is_some();
        self.blobs
            .lock()
            .expect("blobs lock poisoned")
            .remove(&id);
        removed
    }
}
