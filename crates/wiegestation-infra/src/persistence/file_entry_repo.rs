//! File-based implementation of EntryRepository
//!
//! Stores the weighing entries as a pretty-printed JSON array in store order.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use wiegestation_domain::repository::EntryRepository;
use wiegestation_types::{Result, WeighingEntry};

const ENTRIES_FILE: &str = "entries.json";

/// JSON file repository for weighing entries
pub struct FileEntryRepository {
    store_path: PathBuf,
}

impl FileEntryRepository {
    /// Open a repository in `store_dir`, creating the directory if needed
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        Ok(Self {
            store_path: store_dir.join(ENTRIES_FILE),
        })
    }

    /// Path of the backing JSON file
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }
}

impl EntryRepository for FileEntryRepository {
    fn load(&self) -> Result<Vec<WeighingEntry>> {
        if !self.store_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.store_path)?;
        let reader = BufReader::new(file);
        let entries: Vec<WeighingEntry> = serde_json::from_reader(reader)?;
        debug!(path = %self.store_path.display(), count = entries.len(), "entries loaded");
        Ok(entries)
    }

    fn save_all(&self, entries: &[WeighingEntry]) -> Result<()> {
        // write next to the target and rename so a crash never leaves half a file
        let tmp_path = self.store_path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.store_path)?;
        debug!(path = %self.store_path.display(), count = entries.len(), "entries saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;
    use wiegestation_types::{CargoType, Error};

    fn sample(id: &str) -> WeighingEntry {
        let now = Utc::now();
        WeighingEntry {
            id: id.to_string(),
            license_plate: "RT-WS 42".to_string(),
            full_weight: Some(18000.0),
            empty_weight: Some(7000.0),
            cargo_type: Some(CargoType::Muell),
            timestamp: now,
            last_updated: now,
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let repo = FileEntryRepository::open(dir.path().join("nested")).unwrap();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_keeps_order_and_times() {
        let dir = tempdir().unwrap();
        let repo = FileEntryRepository::open(dir.path().to_path_buf()).unwrap();
        let entries = vec![sample("b"), sample("a")];

        repo.save_all(&entries).unwrap();
        assert_eq!(repo.load().unwrap(), entries);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let repo = FileEntryRepository::open(dir.path().to_path_buf()).unwrap();
        fs::write(repo.store_path(), "{ not json").unwrap();

        assert!(matches!(repo.load(), Err(Error::Json(_))));
    }
}
