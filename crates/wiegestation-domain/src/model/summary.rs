//! Rows produced by the aggregations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wiegestation_types::CargoType;

/// Tare weight remembered for a license plate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownTare {
    pub license_plate: String,
    /// Leergewicht (kg)
    pub empty_weight: f64,
    /// Last change of the entry the tare was taken from
    pub last_updated: DateTime<Utc>,
}

/// Transported cargo per vehicle over all closed entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleTotal {
    pub license_plate: String,
    pub total_cargo_kg: f64,
    /// Number of closed round trips
    pub trips: usize,
}

/// Transported cargo per material for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialTotal {
    pub cargo_type: CargoType,
    pub total_weight_kg: f64,
}
