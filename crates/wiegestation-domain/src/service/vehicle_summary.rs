//! Transported cargo per vehicle

use std::collections::HashMap;

use wiegestation_types::WeighingEntry;

use crate::model::VehicleTotal;

/// Sum `full - empty` over closed entries, grouped by license plate.
///
/// Open and tare-only entries are skipped entirely. Rows are ordered by
/// descending total, ties by plate.
pub fn vehicle_summary(entries: &[WeighingEntry]) -> Vec<VehicleTotal> {
    let mut totals: HashMap<&str, VehicleTotal> = HashMap::new();

    for entry in entries {
        let Some(cargo) = entry.cargo_weight() else {
            continue;
        };
        let row = totals
            .entry(entry.license_plate.as_str())
            .or_insert_with(|| VehicleTotal {
                license_plate: entry.license_plate.clone(),
                total_cargo_kg: 0.0,
                trips: 0,
            });
        row.total_cargo_kg += cargo;
        row.trips += 1;
    }

    let mut rows: Vec<VehicleTotal> = totals.into_values().collect();
    rows.sort_by(|a, b| {
        b.total_cargo_kg
            .total_cmp(&a.total_cargo_kg)
            .then_with(|| a.license_plate.cmp(&b.license_plate))
    });
    rows
}
