//! Known tare weights per license plate
//!
//! The first entry in store order that carries an empty weight defines the
//! plate's tare. Later, different tares for the same plate are ignored, so a
//! vehicle whose empty weight changed keeps reporting the value seen first.
//! The reported update time is that of the plate's first entry, whether or not
//! that entry carries the tare.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use wiegestation_types::WeighingEntry;

use crate::model::KnownTare;

/// One row per plate with a recorded empty weight, in first-seen order
pub fn known_tares(entries: &[WeighingEntry]) -> Vec<KnownTare> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut first_update: HashMap<&str, DateTime<Utc>> = HashMap::new();
    let mut tares = Vec::new();

    for entry in entries {
        let last_updated = *first_update
            .entry(entry.license_plate.as_str())
            .or_insert(entry.last_updated);
        if seen.contains(entry.license_plate.as_str()) {
            continue;
        }
        if let Some(empty_weight) = entry.empty_weight {
            seen.insert(&entry.license_plate);
            tares.push(KnownTare {
                license_plate: entry.license_plate.clone(),
                empty_weight,
                last_updated,
            });
        }
    }

    tares
}

/// Tare for a single plate, same first-seen rule as [`known_tares`]
pub fn known_tare(entries: &[WeighingEntry], license_plate: &str) -> Option<f64> {
    entries
        .iter()
        .filter(|e| e.license_plate == license_plate)
        .find_map(|e| e.empty_weight)
}
