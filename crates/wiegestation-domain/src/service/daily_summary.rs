//! Daily totals (Tagesleistung), overall and per material
//!
//! "Today" is the local calendar date at the moment of computation. An entry
//! belongs to the day of its creation `timestamp`; closing it later does not
//! move it.

use std::collections::HashMap;

use chrono::{DateTime, Local, NaiveDate, Utc};

use wiegestation_types::WeighingEntry;

use crate::model::MaterialTotal;

/// Cargo transported today over all closed entries
pub fn daily_total(entries: &[WeighingEntry]) -> f64 {
    total_on(entries, today())
}

/// Cargo transported today per material, largest first
pub fn daily_material_summary(entries: &[WeighingEntry]) -> Vec<MaterialTotal> {
    material_totals_on(entries, today())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn local_date(ts: &DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

fn closed_on(entries: &[WeighingEntry], day: NaiveDate) -> impl Iterator<Item = (&WeighingEntry, f64)> {
    entries
        .iter()
        .filter(move |e| local_date(&e.timestamp) == day)
        .filter_map(|e| e.cargo_weight().map(|cargo| (e, cargo)))
}

fn total_on(entries: &[WeighingEntry], day: NaiveDate) -> f64 {
    closed_on(entries, day).map(|(_, cargo)| cargo).sum()
}

fn material_totals_on(entries: &[WeighingEntry], day: NaiveDate) -> Vec<MaterialTotal> {
    let mut totals = HashMap::new();
    for (entry, cargo) in closed_on(entries, day) {
        if let Some(cargo_type) = entry.cargo_type {
            *totals.entry(cargo_type).or_insert(0.0) += cargo;
        }
    }

    let mut rows: Vec<MaterialTotal> = totals
        .into_iter()
        .map(|(cargo_type, total_weight_kg)| MaterialTotal {
            cargo_type,
            total_weight_kg,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_weight_kg
            .total_cmp(&a.total_weight_kg)
            .then_with(|| a.cargo_type.cmp(&b.cargo_type))
    });
    rows
}
