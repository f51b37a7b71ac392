//! Weighing workflow for a single license plate
//!
//! A plate has no stored state of its own; it is read off the entries:
//! - no open entry: a weighing opens a new ticket with the full weight, and
//!   if a tare is already known for the plate it is written right away,
//!   closing the ticket on creation
//! - open entry (no empty weight): a weighing closes that same entry
//!
//! Manual tare registration writes the empty weight of the plate's first
//! entry, or adds a tare-only entry when the plate is unknown.

use serde::{Deserialize, Serialize};
use tracing::info;

use wiegestation_store::RecordStore;
use wiegestation_types::{CargoType, EntryPatch, NewEntry, Result, ValidationError};

use crate::service::tare_lookup::known_tare;

/// Operator input for one weighing
#[derive(Debug, Clone, PartialEq)]
pub struct WeighingRequest {
    pub license_plate: String,
    /// Scale reading in kg
    pub weight: f64,
    pub cargo_type: CargoType,
}

/// What a weighing did to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WeighingOutcome {
    /// New ticket waiting for its tare
    Opened { id: String },
    /// New ticket closed immediately with the remembered tare
    ClosedWithKnownTare { id: String, empty_weight: f64, cargo_kg: f64 },
    /// Existing open ticket closed by this weighing
    Closed { id: String, cargo_kg: Option<f64> },
}

impl WeighingOutcome {
    pub fn id(&self) -> &str {
        match self {
            WeighingOutcome::Opened { id }
            | WeighingOutcome::ClosedWithKnownTare { id, .. }
            | WeighingOutcome::Closed { id, .. } => id,
        }
    }
}

/// What a manual tare registration did to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TareOutcome {
    Updated { id: String },
    Registered { id: String },
}

fn validate(license_plate: &str, weight: f64) -> std::result::Result<(), ValidationError> {
    if license_plate.trim().is_empty() {
        return Err(ValidationError::MissingPlate);
    }
    if !weight.is_finite() || weight <= 0.0 {
        return Err(ValidationError::InvalidWeight(weight));
    }
    Ok(())
}

/// Record a scale reading for a plate
pub fn record_weighing(store: &mut RecordStore, request: WeighingRequest) -> Result<WeighingOutcome> {
    validate(&request.license_plate, request.weight)?;

    let open_id = store
        .entries()
        .iter()
        .find(|e| e.license_plate == request.license_plate && e.is_open())
        .map(|e| e.id.clone());

    if let Some(id) = open_id {
        store.update(&id, &EntryPatch::empty_weight(request.weight));
        let cargo_kg = store.get(&id).and_then(|e| e.cargo_weight());
        info!(id = %id, plate = %request.license_plate, ?cargo_kg, "ticket closed");
        return Ok(WeighingOutcome::Closed { id, cargo_kg });
    }

    let tare = known_tare(store.entries(), &request.license_plate);
    let id = store.add(
        NewEntry::new(request.license_plate.clone())
            .with_full_weight(request.weight)
            .with_cargo_type(request.cargo_type)
            .with_empty_weight(tare),
    );

    let outcome = match tare {
        Some(empty_weight) => WeighingOutcome::ClosedWithKnownTare {
            id,
            empty_weight,
            cargo_kg: request.weight - empty_weight,
        },
        None => WeighingOutcome::Opened { id },
    };
    info!(
        id = %outcome.id(),
        plate = %request.license_plate,
        cargo = %request.cargo_type,
        tare_known = tare.is_some(),
        "ticket opened"
    );
    Ok(outcome)
}

/// Set the tare for a plate by hand
pub fn register_tare(store: &mut RecordStore, license_plate: &str, weight: f64) -> Result<TareOutcome> {
    validate(license_plate, weight)?;

    let existing = store
        .entries()
        .iter()
        .find(|e| e.license_plate == license_plate)
        .map(|e| e.id.clone());

    let outcome = match existing {
        Some(id) => {
            store.update(&id, &EntryPatch::empty_weight(weight));
            TareOutcome::Updated { id }
        }
        None => {
            let id = store.add(NewEntry::new(license_plate).with_empty_weight(Some(weight)));
            TareOutcome::Registered { id }
        }
    };
    info!(plate = %license_plate, weight, ?outcome, "tare registered");
    Ok(outcome)
}
