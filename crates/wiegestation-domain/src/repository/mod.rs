//! Repository trait definitions for data persistence

use wiegestation_types::{Result, WeighingEntry};

/// Persistence collaborator for the record store
///
/// Receives the full list after every mutation and hands it back on startup.
pub trait EntryRepository {
    /// Load the persisted entries in store order (empty if nothing was saved yet)
    fn load(&self) -> Result<Vec<WeighingEntry>>;

    /// Persist the complete list, replacing whatever was stored before
    fn save_all(&self, entries: &[WeighingEntry]) -> Result<()>;
}
