//! Output formatting module

use serde::Serialize;

use wiegestation_domain::model::{KnownTare, MaterialTotal, VehicleTotal};
use wiegestation_domain::service::{TareOutcome, WeighingOutcome};
use wiegestation_types::{OutputFormat, Result, WeighingEntry};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

fn kg(weight: Option<f64>) -> String {
    weight
        .map(|w| format!("{} kg", w))
        .unwrap_or_else(|| "-".to_string())
}

fn local_time(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.with_timezone(&chrono::Local)
        .format("%d.%m.%Y %H:%M")
        .to_string()
}

pub fn output_weighing(output_format: OutputFormat, outcome: &WeighingOutcome) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(outcome);
    }

    match outcome {
        WeighingOutcome::Opened { id } => {
            println!("Ticket opened ({}); waiting for the empty weighing.", id);
        }
        WeighingOutcome::ClosedWithKnownTare {
            id,
            empty_weight,
            cargo_kg,
        } => {
            println!("Ticket closed on creation ({}).", id);
            println!("Known tare:      {} kg", empty_weight);
            println!("Cargo:           {} kg", cargo_kg);
        }
        WeighingOutcome::Closed { id, cargo_kg } => {
            println!("Ticket closed ({}).", id);
            println!("Cargo:           {}", kg(*cargo_kg));
        }
    }
    Ok(())
}

pub fn output_tare(output_format: OutputFormat, plate: &str, outcome: &TareOutcome) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(outcome);
    }

    match outcome {
        TareOutcome::Updated { id } => println!("Empty weight of {} updated ({}).", plate, id),
        TareOutcome::Registered { id } => println!("Empty weight of {} saved ({}).", plate, id),
    }
    Ok(())
}

pub fn output_entries(output_format: OutputFormat, entries: &[&WeighingEntry]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(entries);
    }

    if entries.is_empty() {
        println!("No entries.");
        return Ok(());
    }

    println!(
        "{:<36}  {:<14}  {:>12}  {:>12}  {:>12}  {:<20}  {:<13}  {:<16}",
        "ID", "Kennzeichen", "Vollgewicht", "Leergewicht", "Differenz", "Ladung", "Status", "Datum"
    );
    println!("{}", "-".repeat(150));
    for entry in entries {
        println!(
            "{:<36}  {:<14}  {:>12}  {:>12}  {:>12}  {:<20}  {:<13}  {:<16}",
            entry.id,
            entry.license_plate,
            kg(entry.full_weight),
            kg(entry.empty_weight),
            kg(entry.cargo_weight()),
            entry.cargo_type.map(|c| c.label()).unwrap_or("-"),
            entry.status().label(),
            local_time(&entry.timestamp),
        );
    }
    Ok(())
}

pub fn output_known_tares(output_format: OutputFormat, tares: &[KnownTare]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(tares);
    }

    if tares.is_empty() {
        println!("No empty weights recorded yet.");
        return Ok(());
    }

    println!("{:<14}  {:>14}  {:<16}", "Kennzeichen", "Leergewicht", "Zuletzt aktualisiert");
    println!("{}", "-".repeat(50));
    for tare in tares {
        println!(
            "{:<14}  {:>14}  {:<16}",
            tare.license_plate,
            kg(Some(tare.empty_weight)),
            local_time(&tare.last_updated)
        );
    }
    Ok(())
}

pub fn output_vehicle_summary(output_format: OutputFormat, rows: &[VehicleTotal]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(rows);
    }

    if rows.is_empty() {
        println!("No completed round trips yet.");
        return Ok(());
    }

    println!("{:<14}  {:>20}  {:>7}", "Kennzeichen", "Transportiert", "Fahrten");
    println!("{}", "-".repeat(45));
    for row in rows {
        println!(
            "{:<14}  {:>20}  {:>7}",
            row.license_plate,
            kg(Some(row.total_cargo_kg)),
            row.trips
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct DailyOutput<'a> {
    date: String,
    total_kg: f64,
    materials: &'a [MaterialTotal],
}

pub fn output_daily(output_format: OutputFormat, total_kg: f64, materials: &[MaterialTotal]) -> Result<()> {
    let date = chrono::Local::now().date_naive().to_string();
    if output_format == OutputFormat::Json {
        return print_json(&DailyOutput {
            date,
            total_kg,
            materials,
        });
    }

    println!("Tagesleistung {}", date);
    println!("===========================");
    println!("Gesamt:          {} kg", total_kg);

    if !materials.is_empty() {
        println!();
        println!("{:<22}  {:>16}", "Material", "Transportiert");
        println!("{}", "-".repeat(40));
        for material in materials {
            println!(
                "{:<22}  {:>16}",
                material.cargo_type.label(),
                kg(Some(material.total_weight_kg))
            );
        }
    }
    Ok(())
}
