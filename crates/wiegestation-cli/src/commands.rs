//! Command handlers

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::output::{
    output_daily, output_entries, output_known_tares, output_tare, output_vehicle_summary,
    output_weighing,
};
use wiegestation_app::app::read_import;
use wiegestation_app::config::Config;
use wiegestation_app::export::export_to_excel;
use wiegestation_app::repository::open_station;
use wiegestation_domain::service::WeighingRequest;
use wiegestation_types::{CargoType, EntryPatch, EntryStatus, Error, OutputFormat, Result};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref dir) = cli.store_dir {
        config.store_dir = Some(dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    debug!(store_dir = ?config.store_dir, %output_format, "configuration resolved");

    match cli.command {
        Commands::Weigh {
            plate,
            weight,
            cargo,
        } => cmd_weigh(&config, output_format, plate, weight, cargo),

        Commands::Tare { plate, weight } => cmd_tare(&config, output_format, &plate, weight),

        Commands::List {
            open,
            closed,
            limit,
        } => cmd_list(&config, output_format, open, closed, limit),

        Commands::Edit {
            id,
            plate,
            full,
            empty,
            cargo,
        } => {
            let patch = EntryPatch {
                license_plate: plate,
                full_weight: full,
                empty_weight: empty,
                cargo_type: cargo,
            };
            cmd_edit(&config, &id, patch)
        }

        Commands::Delete { id } => cmd_delete(&config, &id),

        Commands::Vehicles => {
            let station = open_station(&config)?;
            output_known_tares(output_format, &station.known_tares())
        }

        Commands::Summary => {
            let station = open_station(&config)?;
            output_vehicle_summary(output_format, &station.vehicle_summary())
        }

        Commands::Daily => {
            let station = open_station(&config)?;
            output_daily(
                output_format,
                station.daily_total(),
                &station.daily_material_summary(),
            )
        }

        Commands::Export { output, csv } => cmd_export(&config, output, csv),

        Commands::Import { file, dry_run } => cmd_import(&config, &file, dry_run),

        Commands::Materials => {
            for cargo in CargoType::ALL {
                println!("{}", cargo);
            }
            Ok(())
        }

        Commands::Config {
            show,
            set_store_dir,
            set_output,
            set_export_dir,
            reset,
        } => cmd_config(show, set_store_dir, set_output, set_export_dir, reset),
    }
}

fn cmd_weigh(
    config: &Config,
    output_format: OutputFormat,
    plate: String,
    weight: f64,
    cargo: CargoType,
) -> Result<()> {
    let mut station = open_station(config)?;
    let outcome = station.weigh(WeighingRequest {
        license_plate: plate,
        weight,
        cargo_type: cargo,
    })?;
    output_weighing(output_format, &outcome)
}

fn cmd_tare(config: &Config, output_format: OutputFormat, plate: &str, weight: f64) -> Result<()> {
    let mut station = open_station(config)?;
    let outcome = station.register_tare(plate, weight)?;
    output_tare(output_format, plate, &outcome)
}

fn cmd_list(
    config: &Config,
    output_format: OutputFormat,
    open: bool,
    closed: bool,
    limit: usize,
) -> Result<()> {
    let station = open_station(config)?;
    let entries: Vec<_> = station
        .entries()
        .iter()
        .filter(|e| !open || e.status() == EntryStatus::Open)
        .filter(|e| !closed || e.is_closed())
        .take(limit)
        .collect();

    output_entries(output_format, &entries)
}

fn cmd_edit(config: &Config, id: &str, patch: EntryPatch) -> Result<()> {
    if patch.is_empty() {
        println!("Nothing to change. Use --plate, --full, --empty or --cargo.");
        return Ok(());
    }

    let mut station = open_station(config)?;
    if !station.update(id, &patch)? {
        return Err(Error::EntryNotFound(id.to_string()));
    }
    println!("Entry {} updated.", id);
    Ok(())
}

fn cmd_delete(config: &Config, id: &str) -> Result<()> {
    let mut station = open_station(config)?;
    if !station.delete(id)? {
        return Err(Error::EntryNotFound(id.to_string()));
    }
    println!("Entry {} deleted.", id);
    Ok(())
}

fn cmd_export(config: &Config, output: Option<PathBuf>, csv: bool) -> Result<()> {
    let station = open_station(config)?;

    let default_name = if csv {
        "Wiegeaktionen.csv"
    } else {
        "Wiegeaktionen.xlsx"
    };
    let output_path = output.unwrap_or_else(|| config.export_path(default_name));

    if csv {
        station.export_csv(&output_path)?;
    } else {
        export_to_excel(&station.report(), &output_path)?;
    }

    println!(
        "Exported {} entries to {}",
        station.entries().len(),
        output_path.display()
    );
    Ok(())
}

fn cmd_import(config: &Config, file: &Path, dry_run: bool) -> Result<()> {
    if !file.exists() {
        return Err(Error::Import(format!("file not found: {}", file.display())));
    }

    let mut station = open_station(config)?;

    if dry_run {
        let entries = read_import(file)?;
        let closed = entries.iter().filter(|e| e.is_closed()).count();
        println!("=== DRY RUN ===");
        println!(
            "Would replace {} entries with {} imported entries ({} closed).",
            station.entries().len(),
            entries.len(),
            closed
        );
        return Ok(());
    }

    let previous = station.entries().len();
    let count = station.import_csv(file)?;
    println!("Imported {} entries (replaced {}).", count, previous);
    Ok(())
}

fn cmd_config(
    show: bool,
    set_store_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_export_dir: Option<PathBuf>,
    reset: bool,
) -> Result<()> {
    if reset {
        Config::default().save()?;
        println!("Configuration reset to defaults.");
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut changed = false;

    if let Some(dir) = set_store_dir {
        config.store_dir = Some(dir);
        changed = true;
    }
    if let Some(format) = set_output {
        config.output_format = format;
        changed = true;
    }
    if let Some(dir) = set_export_dir {
        config.export_dir = Some(dir);
        changed = true;
    }

    if changed {
        config.save()?;
        println!("Configuration saved.");
    }

    if show || !changed {
        print!("{}", config);
    }

    Ok(())
}
