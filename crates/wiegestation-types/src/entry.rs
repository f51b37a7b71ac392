//! Weighing entry (Wiegeaktion) and the values used to create or patch one

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::CargoType;

/// One weighing ticket. Weights are kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeighingEntry {
    pub id: String,
    /// Kennzeichen; compared exactly, case-sensitive
    pub license_plate: String,
    /// Vollgewicht, recorded at arrival
    #[serde(default)]
    pub full_weight: Option<f64>,
    /// Leergewicht (tare), recorded on the second weighing
    #[serde(default)]
    pub empty_weight: Option<f64>,
    #[serde(default)]
    pub cargo_type: Option<CargoType>,
    /// Creation time, never changed by updates
    pub timestamp: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Lifecycle state derived from which weights are present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Full weight only; waiting for the tare
    Open,
    /// Both weights present
    Closed,
    /// Tare registered without a full weighing
    TareOnly,
    /// Neither weight present (only reachable through import)
    Empty,
}

impl EntryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::Open => "Offen",
            EntryStatus::Closed => "Abgeschlossen",
            EntryStatus::TareOnly => "Leergewicht",
            EntryStatus::Empty => "Leer",
        }
    }
}

impl WeighingEntry {
    pub fn status(&self) -> EntryStatus {
        match (self.full_weight, self.empty_weight) {
            (Some(_), Some(_)) => EntryStatus::Closed,
            (Some(_), None) => EntryStatus::Open,
            (None, Some(_)) => EntryStatus::TareOnly,
            (None, None) => EntryStatus::Empty,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status() == EntryStatus::Closed
    }

    /// No tare recorded yet. This is the condition the second weighing matches on.
    pub fn is_open(&self) -> bool {
        self.empty_weight.is_none()
    }

    /// Transported cargo in kg; only defined for closed entries
    pub fn cargo_weight(&self) -> Option<f64> {
        match (self.full_weight, self.empty_weight) {
            (Some(full), Some(empty)) => Some(full - empty),
            _ => None,
        }
    }
}

/// Fields supplied by the caller when adding an entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEntry {
    pub license_plate: String,
    pub full_weight: Option<f64>,
    pub empty_weight: Option<f64>,
    pub cargo_type: Option<CargoType>,
}

impl NewEntry {
    pub fn new(license_plate: impl Into<String>) -> Self {
        Self {
            license_plate: license_plate.into(),
            ..Default::default()
        }
    }

    pub fn with_full_weight(mut self, weight: f64) -> Self {
        self.full_weight = Some(weight);
        self
    }

    pub fn with_empty_weight(mut self, weight: Option<f64>) -> Self {
        self.empty_weight = weight;
        self
    }

    pub fn with_cargo_type(mut self, cargo_type: CargoType) -> Self {
        self.cargo_type = Some(cargo_type);
        self
    }
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub license_plate: Option<String>,
    pub full_weight: Option<f64>,
    pub empty_weight: Option<f64>,
    pub cargo_type: Option<CargoType>,
}

impl EntryPatch {
    pub fn empty_weight(weight: f64) -> Self {
        Self {
            empty_weight: Some(weight),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.license_plate.is_none()
            && self.full_weight.is_none()
            && self.empty_weight.is_none()
            && self.cargo_type.is_none()
    }

    /// Reject a blank plate and weights that are not positive finite numbers
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if let Some(ref plate) = self.license_plate {
            if plate.trim().is_empty() {
                return Err(ValidationError::MissingPlate);
            }
        }
        for weight in [self.full_weight, self.empty_weight].into_iter().flatten() {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ValidationError::InvalidWeight(weight));
            }
        }
        Ok(())
    }

    /// Merge the set fields into `entry`. Timestamps are the caller's business.
    pub fn apply_to(&self, entry: &mut WeighingEntry) {
        if let Some(ref plate) = self.license_plate {
            entry.license_plate = plate.clone();
        }
        if let Some(full) = self.full_weight {
            entry.full_weight = Some(full);
        }
        if let Some(empty) = self.empty_weight {
            entry.empty_weight = Some(empty);
        }
        if let Some(cargo) = self.cargo_type {
            entry.cargo_type = Some(cargo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(full: Option<f64>, empty: Option<f64>) -> WeighingEntry {
        let now = Utc::now();
        WeighingEntry {
            id: "e1".to_string(),
            license_plate: "RT-AB 12".to_string(),
            full_weight: full,
            empty_weight: empty,
            cargo_type: None,
            timestamp: now,
            last_updated: now,
        }
    }

    #[test]
    fn test_status_derivation() {
        assert_eq!(entry(Some(18000.0), None).status(), EntryStatus::Open);
        assert_eq!(entry(Some(18000.0), Some(7000.0)).status(), EntryStatus::Closed);
        assert_eq!(entry(None, Some(7000.0)).status(), EntryStatus::TareOnly);
        assert_eq!(entry(None, None).status(), EntryStatus::Empty);
    }

    #[test]
    fn test_cargo_weight_only_for_closed() {
        assert_eq!(entry(Some(18000.0), Some(7000.0)).cargo_weight(), Some(11000.0));
        assert_eq!(entry(Some(18000.0), None).cargo_weight(), None);
        assert_eq!(entry(None, Some(7000.0)).cargo_weight(), None);
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut e = entry(Some(18000.0), None);
        e.cargo_type = Some(CargoType::Sand);
        EntryPatch::empty_weight(7000.0).apply_to(&mut e);
        assert_eq!(e.full_weight, Some(18000.0));
        assert_eq!(e.empty_weight, Some(7000.0));
        assert_eq!(e.cargo_type, Some(CargoType::Sand));
        assert_eq!(e.license_plate, "RT-AB 12");
    }

    #[test]
    fn test_patch_validation() {
        assert!(EntryPatch::empty_weight(7000.0).validate().is_ok());
        assert!(EntryPatch::default().validate().is_ok());

        let nan = EntryPatch {
            full_weight: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(nan.validate(), Err(ValidationError::InvalidWeight(w)) if w.is_nan()));
        assert!(matches!(
            EntryPatch::empty_weight(-1.0).validate(),
            Err(ValidationError::InvalidWeight(_))
        ));

        let blank = EntryPatch {
            license_plate: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(blank.validate(), Err(ValidationError::MissingPlate)));
    }

    #[test]
    fn test_json_field_names() {
        let mut e = entry(Some(18000.0), None);
        e.cargo_type = Some(CargoType::Kies);
        let value = serde_json::to_value(&e).unwrap();
        assert_eq!(value["licensePlate"], "RT-AB 12");
        assert_eq!(value["fullWeight"], 18000.0);
        assert!(value["emptyWeight"].is_null());
        assert_eq!(value["cargoType"], "Kies");
        assert!(value.get("lastUpdated").is_some());
    }
}
