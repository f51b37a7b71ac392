//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wiegestation_types::{CargoType, OutputFormat};

#[derive(Parser)]
#[command(name = "wiegestation")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Weighbridge log: full and empty weighings, cargo per vehicle and day")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding entries.json. Uses config value if not specified.
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a scale reading: opens a ticket, or closes the plate's open ticket
    Weigh {
        /// License plate (Kennzeichen)
        plate: String,

        /// Scale reading in kg
        weight: f64,

        /// Cargo type, exact label (e.g. "Sand", "gesiebte Erde fein")
        #[arg(long, short = 'c', default_value = "Holz")]
        cargo: CargoType,
    },

    /// Register a vehicle's empty weight by hand
    Tare {
        /// License plate (Kennzeichen)
        plate: String,

        /// Empty weight in kg
        weight: f64,
    },

    /// List weighing entries (newest first)
    List {
        /// Show only open tickets
        #[arg(long, conflicts_with = "closed")]
        open: bool,

        /// Show only closed tickets
        #[arg(long)]
        closed: bool,

        /// Limit number of entries shown
        #[arg(long, short = 'n', default_value = "50")]
        limit: usize,
    },

    /// Edit fields of an entry
    Edit {
        /// Entry id
        id: String,

        /// New license plate
        #[arg(long)]
        plate: Option<String>,

        /// New full weight in kg
        #[arg(long)]
        full: Option<f64>,

        /// New empty weight in kg
        #[arg(long)]
        empty: Option<f64>,

        /// New cargo type
        #[arg(long)]
        cargo: Option<CargoType>,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
    },

    /// Show known empty weights per vehicle
    Vehicles,

    /// Show transported cargo per vehicle
    Summary,

    /// Show today's transported cargo, overall and per material
    Daily,

    /// Export to Excel (default) or CSV
    Export {
        /// Output file path
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Write the transactions as CSV (re-importable) instead of an Excel report
        #[arg(long)]
        csv: bool,
    },

    /// Replace all entries with the rows of an exported CSV file
    Import {
        /// Path to CSV file
        file: PathBuf,

        /// Dry run - show what would be imported without actually importing
        #[arg(long)]
        dry_run: bool,
    },

    /// List the accepted cargo types
    Materials,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default export directory
        #[arg(long)]
        set_export_dir: Option<PathBuf>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_weigh_parses_cargo_label() {
        let cli = Cli::parse_from(["wiegestation", "weigh", "AB-123", "18000", "-c", "gesiebte Erde Grob"]);
        match cli.command {
            Commands::Weigh { plate, weight, cargo } => {
                assert_eq!(plate, "AB-123");
                assert_eq!(weight, 18000.0);
                assert_eq!(cargo, CargoType::GesiebteErdeGrob);
            }
            _ => panic!("expected weigh"),
        }
    }

    #[test]
    fn test_weigh_defaults_to_holz() {
        let cli = Cli::parse_from(["wiegestation", "weigh", "AB-123", "7000"]);
        assert!(matches!(cli.command, Commands::Weigh { cargo: CargoType::Holz, .. }));
    }

    #[test]
    fn test_unknown_cargo_is_rejected() {
        let result = Cli::try_parse_from(["wiegestation", "weigh", "AB-123", "7000", "-c", "Beton"]);
        assert!(result.is_err());
    }
}
