//! Weighing station service
//!
//! Owns the record store and its repository. Every successful mutation hands
//! the complete list to the repository; rejected input never reaches the store.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use wiegestation_domain::model::{KnownTare, MaterialTotal, VehicleTotal};
use wiegestation_domain::repository::EntryRepository;
use wiegestation_domain::service::{
    daily_material_summary, daily_total, known_tares, record_weighing, register_tare,
    vehicle_summary, TareOutcome, WeighingOutcome, WeighingRequest,
};
use wiegestation_infra::transaction_csv::{export_transactions_csv, import_transactions};
use wiegestation_store::RecordStore;
use wiegestation_types::{EntryPatch, Result, WeighingEntry};

/// Everything the Excel report shows, computed at one instant
#[derive(Debug, Clone, Serialize)]
pub struct StationReport {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<WeighingEntry>,
    pub vehicles: Vec<VehicleTotal>,
    pub daily_total_kg: f64,
    pub daily_materials: Vec<MaterialTotal>,
}

/// Read a CSV export completely without touching any store
pub fn read_import(path: &Path) -> Result<Vec<WeighingEntry>> {
    Ok(import_transactions(path)?)
}

pub struct WeighingStation<R: EntryRepository> {
    store: RecordStore,
    repo: R,
}

impl<R: EntryRepository> WeighingStation<R> {
    /// Load the persisted entries and take ownership of the repository
    pub fn open(repo: R) -> Result<Self> {
        let store = RecordStore::from_entries(repo.load()?);
        Ok(Self { store, repo })
    }

    fn persist(&self) -> Result<()> {
        self.repo.save_all(self.store.entries())
    }

    pub fn entries(&self) -> &[WeighingEntry] {
        self.store.entries()
    }

    /// Record a scale reading (opens or closes a ticket)
    pub fn weigh(&mut self, request: WeighingRequest) -> Result<WeighingOutcome> {
        let outcome = record_weighing(&mut self.store, request)?;
        self.persist()?;
        Ok(outcome)
    }

    /// Register a tare by hand
    pub fn register_tare(&mut self, license_plate: &str, weight: f64) -> Result<TareOutcome> {
        let outcome = register_tare(&mut self.store, license_plate, weight)?;
        self.persist()?;
        Ok(outcome)
    }

    /// Edit an entry. Returns false (and writes nothing) for an unknown id.
    /// Invalid plates or weights are rejected before the store is touched.
    pub fn update(&mut self, id: &str, patch: &EntryPatch) -> Result<bool> {
        patch.validate()?;
        if !self.store.update(id, patch) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Delete an entry. Returns false (and writes nothing) for an unknown id.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if !self.store.delete(id) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Replace the whole collection
    pub fn replace_all(&mut self, entries: Vec<WeighingEntry>) -> Result<()> {
        self.store.replace_all(entries);
        self.persist()
    }

    /// Replace the collection with the rows of a CSV export.
    ///
    /// The file is read completely before the store is touched; a read error
    /// leaves the current entries in place. Returns the number of imported rows.
    pub fn import_csv(&mut self, path: &Path) -> Result<usize> {
        let entries = read_import(path)?;
        let count = entries.len();
        self.replace_all(entries)?;
        info!(path = %path.display(), count, "store replaced from import");
        Ok(count)
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        export_transactions_csv(self.store.entries(), path)
    }

    pub fn known_tares(&self) -> Vec<KnownTare> {
        known_tares(self.store.entries())
    }

    pub fn vehicle_summary(&self) -> Vec<VehicleTotal> {
        vehicle_summary(self.store.entries())
    }

    pub fn daily_total(&self) -> f64 {
        daily_total(self.store.entries())
    }

    pub fn daily_material_summary(&self) -> Vec<MaterialTotal> {
        daily_material_summary(self.store.entries())
    }

    pub fn report(&self) -> StationReport {
        StationReport {
            generated_at: Utc::now(),
            entries: self.store.entries().to_vec(),
            vehicles: self.vehicle_summary(),
            daily_total_kg: self.daily_total(),
            daily_materials: self.daily_material_summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use wiegestation_types::{CargoType, ValidationError};

    /// Repository that counts writes and keeps the last saved list
    #[derive(Default)]
    struct RecordingRepo {
        initial: Vec<WeighingEntry>,
        saves: RefCell<Vec<Vec<WeighingEntry>>>,
    }

    impl EntryRepository for RecordingRepo {
        fn load(&self) -> Result<Vec<WeighingEntry>> {
            Ok(self.initial.clone())
        }

        fn save_all(&self, entries: &[WeighingEntry]) -> Result<()> {
            self.saves.borrow_mut().push(entries.to_vec());
            Ok(())
        }
    }

    fn request(plate: &str, weight: f64) -> WeighingRequest {
        WeighingRequest {
            license_plate: plate.to_string(),
            weight,
            cargo_type: CargoType::Kies,
        }
    }

    #[test]
    fn test_each_mutation_saves_full_list() {
        let mut station = WeighingStation::open(RecordingRepo::default()).unwrap();

        let opened = station.weigh(request("AB-123", 18000.0)).unwrap();
        station.weigh(request("CD-456", 15000.0)).unwrap();
        station.register_tare("CD-456", 6000.0).unwrap();
        assert!(station.delete(opened.id()).unwrap());

        let saves = station.repo.saves.borrow();
        assert_eq!(saves.len(), 4);
        assert_eq!(saves[1].len(), 2);
        assert_eq!(saves.last().unwrap().as_slice(), station.entries());
    }

    #[test]
    fn test_rejected_and_noop_operations_do_not_save() {
        let mut station = WeighingStation::open(RecordingRepo::default()).unwrap();

        assert!(station.weigh(request("", 18000.0)).is_err());
        assert!(station.register_tare("AB-123", 0.0).is_err());
        assert!(!station.update("missing", &EntryPatch::empty_weight(1.0)).unwrap());
        assert!(!station.delete("missing").unwrap());

        assert!(station.repo.saves.borrow().is_empty());
    }

    #[test]
    fn test_update_rejects_invalid_weights() {
        let mut station = WeighingStation::open(RecordingRepo::default()).unwrap();
        let opened = station.weigh(request("AB-123", 18000.0)).unwrap();
        let saves_before = station.repo.saves.borrow().len();

        let nan = EntryPatch {
            full_weight: Some(f64::NAN),
            ..Default::default()
        };
        let err = station.update(opened.id(), &nan).unwrap_err();
        assert!(matches!(
            err,
            wiegestation_types::Error::Validation(ValidationError::InvalidWeight(_))
        ));
        assert!(station.update(opened.id(), &EntryPatch::empty_weight(0.0)).is_err());

        let entry = &station.entries()[0];
        assert_eq!(entry.full_weight, Some(18000.0));
        assert_eq!(entry.empty_weight, None);
        assert_eq!(station.repo.saves.borrow().len(), saves_before);
    }

    #[test]
    fn test_open_restores_persisted_entries() {
        let mut first = WeighingStation::open(RecordingRepo::default()).unwrap();
        first.weigh(request("AB-123", 18000.0)).unwrap();
        let saved = first.repo.saves.borrow().last().unwrap().clone();

        let mut second = WeighingStation::open(RecordingRepo {
            initial: saved,
            ..Default::default()
        })
        .unwrap();
        let closed = second.weigh(request("AB-123", 7000.0)).unwrap();

        assert!(matches!(closed, WeighingOutcome::Closed { cargo_kg: Some(c), .. } if c == 11000.0));
        assert_eq!(second.entries().len(), 1);
    }

    #[test]
    fn test_report_collects_views() {
        let mut station = WeighingStation::open(RecordingRepo::default()).unwrap();
        station.weigh(request("AB-123", 18000.0)).unwrap();
        station.weigh(request("AB-123", 7000.0)).unwrap();

        let report = station.report();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.vehicles[0].total_cargo_kg, 11000.0);
        assert_eq!(report.daily_total_kg, 11000.0);
        assert_eq!(report.daily_materials[0].cargo_type, CargoType::Kies);
    }
}
