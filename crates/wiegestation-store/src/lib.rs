//! Record store for weighing entries
//!
//! Holds the entries in store order (newest first) and nothing derived from them.
//! Persisting the list is left to the owner of the store.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use wiegestation_types::{EntryPatch, NewEntry, WeighingEntry};

/// In-memory ordered collection of weighing entries
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    entries: Vec<WeighingEntry>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a previously persisted list, keeping its order
    pub fn from_entries(entries: Vec<WeighingEntry>) -> Self {
        Self { entries }
    }

    /// Add a new entry at the front and return its id
    pub fn add(&mut self, new_entry: NewEntry) -> String {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();

        let entry = WeighingEntry {
            id: id.clone(),
            license_plate: new_entry.license_plate,
            full_weight: new_entry.full_weight,
            empty_weight: new_entry.empty_weight,
            cargo_type: new_entry.cargo_type,
            timestamp: now,
            last_updated: now,
        };

        debug!(id = %id, plate = %entry.license_plate, "entry added");
        self.entries.insert(0, entry);
        id
    }

    /// Merge `patch` into the entry with `id`. Returns false if there is no such entry.
    pub fn update(&mut self, id: &str, patch: &EntryPatch) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            debug!(id = %id, "update skipped, no such entry");
            return false;
        };

        patch.apply_to(entry);
        // imported entries may carry a timestamp ahead of the local clock
        entry.last_updated = Utc::now().max(entry.timestamp);
        debug!(id = %id, status = ?entry.status(), "entry updated");
        true
    }

    /// Remove the entry with `id`. Returns whether something was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        debug!(id = %id, removed, "entry delete");
        removed
    }

    /// Swap in a whole new collection. Ids are taken as given.
    pub fn replace_all(&mut self, entries: Vec<WeighingEntry>) {
        debug!(
            previous = self.entries.len(),
            incoming = entries.len(),
            "store replaced"
        );
        self.entries = entries;
    }

    /// All entries in store order
    pub fn entries(&self) -> &[WeighingEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&WeighingEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
