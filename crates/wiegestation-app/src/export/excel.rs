//! Excel export functionality

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use wiegestation_infra::transaction_csv::format_display_date;
use wiegestation_types::{Error, Result};

use crate::app::StationReport;

fn xlsx_err(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Export the station report to an Excel file
///
/// Sheets: Wiegeaktionen (all entries), Fahrzeuge (cargo per vehicle),
/// Tagesleistung (today's total and per material).
pub fn export_to_excel(report: &StationReport, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let transactions_sheet = workbook.add_worksheet();
    write_transactions_sheet(transactions_sheet, report)?;

    let vehicles_sheet = workbook.add_worksheet();
    write_vehicles_sheet(vehicles_sheet, report)?;

    let daily_sheet = workbook.add_worksheet();
    write_daily_sheet(daily_sheet, report)?;

    workbook.save(output_path).map_err(xlsx_err)?;
    info!(path = %output_path.display(), entries = report.entries.len(), "excel report written");

    Ok(())
}

fn write_header_row(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let header_format = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }
    Ok(())
}

fn write_transactions_sheet(sheet: &mut Worksheet, report: &StationReport) -> Result<()> {
    sheet.set_name("Wiegeaktionen").map_err(xlsx_err)?;

    write_header_row(
        sheet,
        &[
            "Kennzeichen",
            "Vollgewicht (kg)",
            "Leergewicht (kg)",
            "Differenz (kg)",
            "Ladung",
            "Status",
            "Datum",
            "Letztes Update",
            "id",
        ],
    )?;

    for (row_idx, entry) in report.entries.iter().enumerate() {
        let row = (row_idx + 1) as u32;

        sheet
            .write_string(row, 0, &entry.license_plate)
            .map_err(xlsx_err)?;
        if let Some(full) = entry.full_weight {
            sheet.write_number(row, 1, full).map_err(xlsx_err)?;
        }
        if let Some(empty) = entry.empty_weight {
            sheet.write_number(row, 2, empty).map_err(xlsx_err)?;
        }
        match entry.cargo_weight() {
            Some(cargo) => sheet.write_number(row, 3, cargo).map_err(xlsx_err)?,
            None => sheet.write_string(row, 3, "-").map_err(xlsx_err)?,
        };
        if let Some(cargo_type) = entry.cargo_type {
            sheet
                .write_string(row, 4, cargo_type.label())
                .map_err(xlsx_err)?;
        }
        sheet
            .write_string(row, 5, entry.status().label())
            .map_err(xlsx_err)?;
        sheet
            .write_string(row, 6, format_display_date(&entry.timestamp))
            .map_err(xlsx_err)?;
        sheet
            .write_string(row, 7, format_display_date(&entry.last_updated))
            .map_err(xlsx_err)?;
        sheet.write_string(row, 8, &entry.id).map_err(xlsx_err)?;
    }

    sheet.set_column_width(0, 18).map_err(xlsx_err)?;
    sheet.set_column_width(4, 22).map_err(xlsx_err)?;
    sheet.set_column_width(6, 18).map_err(xlsx_err)?;
    sheet.set_column_width(7, 18).map_err(xlsx_err)?;
    sheet.set_column_width(8, 38).map_err(xlsx_err)?;

    Ok(())
}

fn write_vehicles_sheet(sheet: &mut Worksheet, report: &StationReport) -> Result<()> {
    sheet.set_name("Fahrzeuge").map_err(xlsx_err)?;

    write_header_row(
        sheet,
        &["Kennzeichen", "Gesamtgewicht transportiert (kg)", "Fahrten"],
    )?;

    for (row_idx, vehicle) in report.vehicles.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet
            .write_string(row, 0, &vehicle.license_plate)
            .map_err(xlsx_err)?;
        sheet
            .write_number(row, 1, vehicle.total_cargo_kg)
            .map_err(xlsx_err)?;
        sheet
            .write_number(row, 2, vehicle.trips as f64)
            .map_err(xlsx_err)?;
    }

    sheet.set_column_width(0, 18).map_err(xlsx_err)?;
    sheet.set_column_width(1, 32).map_err(xlsx_err)?;

    Ok(())
}

fn write_daily_sheet(sheet: &mut Worksheet, report: &StationReport) -> Result<()> {
    sheet.set_name("Tagesleistung").map_err(xlsx_err)?;
    let bold = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "Datum", &bold)
        .map_err(xlsx_err)?;
    sheet
        .write_string(0, 1, format_display_date(&report.generated_at))
        .map_err(xlsx_err)?;
    sheet
        .write_string_with_format(1, 0, "Gesamtgewicht transportiert (kg)", &bold)
        .map_err(xlsx_err)?;
    sheet
        .write_number(1, 1, report.daily_total_kg)
        .map_err(xlsx_err)?;

    sheet
        .write_string_with_format(3, 0, "Material", &bold)
        .map_err(xlsx_err)?;
    sheet
        .write_string_with_format(3, 1, "Gesamtgewicht transportiert (kg)", &bold)
        .map_err(xlsx_err)?;

    for (idx, material) in report.daily_materials.iter().enumerate() {
        let row = (idx + 4) as u32;
        sheet
            .write_string(row, 0, material.cargo_type.label())
            .map_err(xlsx_err)?;
        sheet
            .write_number(row, 1, material.total_weight_kg)
            .map_err(xlsx_err)?;
    }

    sheet.set_column_width(0, 32).map_err(xlsx_err)?;
    sheet.set_column_width(1, 32).map_err(xlsx_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;
    use wiegestation_domain::model::{MaterialTotal, VehicleTotal};
    use wiegestation_types::{CargoType, WeighingEntry};

    #[test]
    fn test_export_writes_workbook() {
        let now = Utc::now();
        let report = StationReport {
            generated_at: now,
            entries: vec![WeighingEntry {
                id: "e1".to_string(),
                license_plate: "AB-123".to_string(),
                full_weight: Some(18000.0),
                empty_weight: Some(7000.0),
                cargo_type: Some(CargoType::Sand),
                timestamp: now,
                last_updated: now,
            }],
            vehicles: vec![VehicleTotal {
                license_plate: "AB-123".to_string(),
                total_cargo_kg: 11000.0,
                trips: 1,
            }],
            daily_total_kg: 11000.0,
            daily_materials: vec![MaterialTotal {
                cargo_type: CargoType::Sand,
                total_weight_kg: 11000.0,
            }],
        };

        let dir = tempdir().unwrap();
        let path = dir.path().join("Wiegeaktionen.xlsx");
        export_to_excel(&report, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert!(bytes.starts_with(b"PK"));
    }
}
