//! CSV export and bulk import of weighing entries (Wiegeaktionen)
//!
//! The export carries the display columns plus `id`, `timestamp` and
//! `lastUpdated` in RFC 3339 with full precision, so an exported file can be
//! imported back without losing ids, weights, cargo types or time values.
//!
//! Columns:
//! id,Kennzeichen,Vollgewicht,Leergewicht,Differenz,Ladung,Status,Datum,Letztes Update,timestamp,lastUpdated

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Local, SecondsFormat, Utc};
use thiserror::Error;
use tracing::{info, warn};

use wiegestation_types::{CargoType, Error, Result, WeighingEntry};

const COL_ID: &str = "id";
const COL_PLATE: &str = "Kennzeichen";
const COL_FULL: &str = "Vollgewicht";
const COL_EMPTY: &str = "Leergewicht";
const COL_DIFF: &str = "Differenz";
const COL_CARGO: &str = "Ladung";
const COL_STATUS: &str = "Status";
const COL_DATE: &str = "Datum";
const COL_UPDATED_DISPLAY: &str = "Letztes Update";
const COL_TIMESTAMP: &str = "timestamp";
const COL_LAST_UPDATED: &str = "lastUpdated";

const HEADERS: [&str; 11] = [
    COL_ID,
    COL_PLATE,
    COL_FULL,
    COL_EMPTY,
    COL_DIFF,
    COL_CARGO,
    COL_STATUS,
    COL_DATE,
    COL_UPDATED_DISPLAY,
    COL_TIMESTAMP,
    COL_LAST_UPDATED,
];

#[derive(Error, Debug)]
pub enum CsvImportError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

impl From<CsvImportError> for Error {
    fn from(e: CsvImportError) -> Self {
        Error::Import(e.to_string())
    }
}

/// German short date with time, as shown in the transaction list
pub fn format_display_date(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%d.%m.%Y, %H:%M").to_string()
}

fn format_exact(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn format_weight(weight: Option<f64>) -> String {
    weight.map(|w| w.to_string()).unwrap_or_default()
}

/// Write entries to a CSV file at `path`
pub fn export_transactions_csv(entries: &[WeighingEntry], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_transactions(entries, file)?;
    info!(path = %path.display(), count = entries.len(), "transactions exported");
    Ok(())
}

/// Write entries as CSV to any writer
pub fn write_transactions<W: Write>(entries: &[WeighingEntry], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| Error::Export(e.to_string());

    csv_writer.write_record(HEADERS).map_err(export_err)?;
    for entry in entries {
        let diff = entry
            .cargo_weight()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        let cargo = entry.cargo_type.map(|c| c.label()).unwrap_or_default();
        let full = format_weight(entry.full_weight);
        let empty = format_weight(entry.empty_weight);
        let date = format_display_date(&entry.timestamp);
        let updated = format_display_date(&entry.last_updated);
        let timestamp = format_exact(&entry.timestamp);
        let last_updated = format_exact(&entry.last_updated);

        csv_writer
            .write_record([
                entry.id.as_str(),
                entry.license_plate.as_str(),
                full.as_str(),
                empty.as_str(),
                diff.as_str(),
                cargo,
                entry.status().label(),
                date.as_str(),
                updated.as_str(),
                timestamp.as_str(),
                last_updated.as_str(),
            ])
            .map_err(export_err)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read entries from a CSV file at `path`
pub fn import_transactions(path: &Path) -> std::result::Result<Vec<WeighingEntry>, CsvImportError> {
    let file = File::open(path)?;
    let entries = read_transactions(file)?;
    info!(path = %path.display(), count = entries.len(), "transactions read");
    Ok(entries)
}

struct Columns {
    id: usize,
    plate: usize,
    timestamp: usize,
    full: Option<usize>,
    empty: Option<usize>,
    cargo: Option<usize>,
    last_updated: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> std::result::Result<Self, CsvImportError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require =
            |name: &str| find(name).ok_or_else(|| CsvImportError::MissingColumn(name.to_string()));

        Ok(Self {
            id: require(COL_ID)?,
            plate: require(COL_PLATE)?,
            timestamp: require(COL_TIMESTAMP)?,
            full: find(COL_FULL),
            empty: find(COL_EMPTY),
            cargo: find(COL_CARGO),
            last_updated: find(COL_LAST_UPDATED),
        })
    }
}

/// Read entries from CSV.
///
/// Rows without id, plate, or a readable timestamp are skipped. Unreadable
/// weights or cargo labels are dropped from the row, which is kept. Id and
/// plate are taken verbatim; only numeric, time and cargo cells are trimmed.
pub fn read_transactions<R: Read>(reader: R) -> std::result::Result<Vec<WeighingEntry>, CsvImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = Columns::from_headers(&headers)?;

    let mut entries = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row_num = row_idx + 2; // header is row 1

        if let Some(entry) = parse_record(&record, &columns, row_num) {
            entries.push(entry);
        }
    }

    Ok(entries)
}

fn field<'a>(record: &'a csv::StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| record.get(i)).unwrap_or("")
}

fn parse_record(record: &csv::StringRecord, columns: &Columns, row: usize) -> Option<WeighingEntry> {
    let id = field(record, Some(columns.id));
    let plate = field(record, Some(columns.plate));
    if id.trim().is_empty() || plate.trim().is_empty() {
        warn!(row, "skipping row without id or license plate");
        return None;
    }

    let timestamp_str = field(record, Some(columns.timestamp));
    let Some(timestamp) = parse_time(timestamp_str) else {
        warn!(row, value = timestamp_str, "skipping row with unreadable timestamp");
        return None;
    };

    let last_updated = parse_time(field(record, columns.last_updated))
        .filter(|t| *t >= timestamp)
        .unwrap_or(timestamp);

    Some(WeighingEntry {
        id: id.to_string(),
        license_plate: plate.to_string(),
        full_weight: parse_weight(field(record, columns.full), row, COL_FULL),
        empty_weight: parse_weight(field(record, columns.empty), row, COL_EMPTY),
        cargo_type: parse_cargo(field(record, columns.cargo), row),
        timestamp,
        last_updated,
    })
}

fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn parse_weight(s: &str, row: usize, column: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    match s.parse::<f64>() {
        Ok(w) if w.is_finite() => Some(w),
        _ => {
            warn!(row, column, value = s, "ignoring unreadable weight");
            None
        }
    }
}

fn parse_cargo(s: &str, row: usize) -> Option<CargoType> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    match s.parse::<CargoType>() {
        Ok(cargo) => Some(cargo),
        Err(_) => {
            warn!(row, value = s, "ignoring unknown cargo type");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn entries() -> Vec<WeighingEntry> {
        let t0 = Utc.with_ymd_and_hms(2024, 6, 12, 7, 30, 15).unwrap() + Duration::nanoseconds(123_456_789);
        vec![
            WeighingEntry {
                id: "0b7c".to_string(),
                license_plate: "RT-AB 123".to_string(),
                full_weight: Some(18000.5),
                empty_weight: Some(7000.0),
                cargo_type: Some(CargoType::GesiebteErdeFein),
                timestamp: t0,
                last_updated: t0 + Duration::minutes(42),
            },
            WeighingEntry {
                id: "1d9e".to_string(),
                license_plate: "TÜ-X 9".to_string(),
                full_weight: Some(12000.0),
                empty_weight: None,
                cargo_type: Some(CargoType::LegoSteineBeton),
                timestamp: t0,
                last_updated: t0,
            },
            WeighingEntry {
                id: "2f01".to_string(),
                license_plate: "RT, Anhänger".to_string(),
                full_weight: None,
                empty_weight: Some(5100.25),
                cargo_type: None,
                timestamp: t0,
                last_updated: t0,
            },
        ]
    }

    #[test]
    fn test_export_then_import_is_lossless() {
        let original = entries();
        let mut buf = Vec::new();
        write_transactions(&original, &mut buf).unwrap();

        let imported = read_transactions(buf.as_slice()).unwrap();
        assert_eq!(imported, original);
    }

    #[test]
    fn test_padded_id_and_plate_survive_round_trip() {
        let mut original = entries();
        original[0].id = " 0b7c ".to_string();
        original[0].license_plate = " AB-123 ".to_string();

        let mut buf = Vec::new();
        write_transactions(&original, &mut buf).unwrap();
        let imported = read_transactions(buf.as_slice()).unwrap();

        assert_eq!(imported[0].license_plate, " AB-123 ");
        assert_eq!(imported[0].id, " 0b7c ");
        assert_eq!(imported, original);
    }

    #[test]
    fn test_padded_value_cells_still_parse() {
        let csv = "\
 id , Kennzeichen ,Vollgewicht,Leergewicht,Ladung,timestamp
a1,AB-123, 18000 , 7000 , Sand , 2024-06-12T07:30:00Z 
b2,   ,18000,7000,Sand,2024-06-12T07:30:00Z
";
        let imported = read_transactions(csv.as_bytes()).unwrap();
        assert_eq!(imported.len(), 1);
        let e = &imported[0];
        assert_eq!(e.full_weight, Some(18000.0));
        assert_eq!(e.empty_weight, Some(7000.0));
        assert_eq!(e.cargo_type, Some(CargoType::Sand));
    }

    #[test]
    fn test_export_display_columns() {
        let mut buf = Vec::new();
        write_transactions(&entries(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "id,Kennzeichen,Vollgewicht,Leergewicht,Differenz,Ladung,Status,Datum,Letztes Update,timestamp,lastUpdated"
        );
        let first = lines.next().unwrap();
        assert!(first.contains(",11000.5,gesiebte Erde fein,Abgeschlossen,"));
        let second = lines.next().unwrap();
        assert!(second.contains(",-,Lego Steine (Beton),Offen,"));
    }

    #[test]
    fn test_rows_without_identity_are_skipped() {
        let csv = "\
id,Kennzeichen,Vollgewicht,Leergewicht,Ladung,timestamp,lastUpdated
a1,AB-123,18000,7000,Sand,2024-06-12T07:30:00Z,2024-06-12T08:00:00Z
,AB-123,18000,7000,Sand,2024-06-12T07:30:00Z,
a3,,18000,7000,Sand,2024-06-12T07:30:00Z,
a4,AB-123,18000,7000,Sand,gestern,
";
        let imported = read_transactions(csv.as_bytes()).unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].id, "a1");
    }

    #[test]
    fn test_bad_fields_are_dropped_not_fatal() {
        let csv = "\
Kennzeichen,id,timestamp,Vollgewicht,Leergewicht,Ladung,lastUpdated
AB-123,a1,2024-06-12T07:30:00Z,viel,7000,Beton,2024-06-11T00:00:00Z
";
        let imported = read_transactions(csv.as_bytes()).unwrap();
        assert_eq!(imported.len(), 1);
        let e = &imported[0];
        assert_eq!(e.full_weight, None);
        assert_eq!(e.empty_weight, Some(7000.0));
        assert_eq!(e.cargo_type, None);
        assert_eq!(e.last_updated, e.timestamp);
    }

    #[test]
    fn test_missing_required_column_fails_import() {
        let csv = "Kennzeichen,Vollgewicht\nAB-123,18000\n";
        let err = read_transactions(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CsvImportError::MissingColumn(ref c) if c == "id"));
    }
}
