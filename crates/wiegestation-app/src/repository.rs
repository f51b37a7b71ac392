//! Repository adapters for persistence layer

use wiegestation_infra::persistence::FileEntryRepository;
use wiegestation_types::Result;

use crate::app::WeighingStation;
use crate::config::Config;

/// Open file-based entry repository
pub fn open_entry_repo(config: &Config) -> Result<FileEntryRepository> {
    FileEntryRepository::open(config.store_dir()?)
}

/// Open the station on the configured store
pub fn open_station(config: &Config) -> Result<WeighingStation<FileEntryRepository>> {
    WeighingStation::open(open_entry_repo(config)?)
}
