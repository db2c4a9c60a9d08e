//! File-backed state repository.
//!
//! Persists each state slice as one JSON file under a data directory,
//! mirroring the original key-per-slice local storage layout. A missing
//! file is the valid initial-boot state; an unreadable or corrupted file
//! degrades to "absent" with a warning instead of failing the boot.

use inventaire_core::ledger::ScannedEntry;
use inventaire_core::session::SessionConfig;
use inventaire_core::storage::StateRepository;
use inventaire_core::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name of the persisted configuration slice.
pub const CONFIG_FILE: &str = "inventory_config.json";
/// File name of the persisted ledger slice.
pub const LEDGER_FILE: &str = "scanned_products.json";

/// [`StateRepository`] storing each slice as a JSON file in `dir`.
///
/// The directory is created on first save, not on construction, so a
/// read-only boot against a fresh directory stays side-effect free.
pub struct JsonStateRepository {
    dir: PathBuf,
}

impl JsonStateRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn load_slice<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        if !path.exists() {
            return None;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read state file, treating as absent");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupted state file, treating as absent");
                None
            }
        }
    }

    fn save_slice<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.dir.join(file), json)?;
        Ok(())
    }

    fn remove_slice(&self, file: &str) -> Result<()> {
        let path = self.dir.join(file);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// The directory this repository persists into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StateRepository for JsonStateRepository {
    fn load_config(&self) -> Result<Option<SessionConfig>> {
        Ok(self.load_slice(CONFIG_FILE))
    }

    fn save_config(&self, config: &SessionConfig) -> Result<()> {
        self.save_slice(CONFIG_FILE, config)
    }

    fn load_ledger(&self) -> Result<Option<Vec<ScannedEntry>>> {
        Ok(self.load_slice(LEDGER_FILE))
    }

    fn save_ledger(&self, entries: &[ScannedEntry]) -> Result<()> {
        self.save_slice(LEDGER_FILE, &entries)
    }

    fn clear_ledger(&self) -> Result<()> {
        self.remove_slice(LEDGER_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repository() -> (JsonStateRepository, TempDir) {
        let dir = TempDir::new().unwrap();
        (JsonStateRepository::new(dir.path()), dir)
    }

    fn sample_config() -> SessionConfig {
        SessionConfig {
            depot: "D1".to_string(),
            zone: "Z3".to_string(),
            inventoried_by: "Alex".to_string(),
            date: "2026-08-30".to_string(),
        }
    }

    fn sample_entry() -> ScannedEntry {
        ScannedEntry {
            id: 1,
            barcode: "123".to_string(),
            code: "A1".to_string(),
            label: "Widget".to_string(),
            quantity: 2,
            timestamp: "30/08/2026 10:00:00".to_string(),
        }
    }

    #[test]
    fn test_absent_slices_on_fresh_directory() {
        let (repo, _dir) = repository();

        assert_eq!(repo.load_config().unwrap(), None);
        assert_eq!(repo.load_ledger().unwrap(), None);
    }

    #[test]
    fn test_config_round_trip() {
        let (repo, _dir) = repository();

        repo.save_config(&sample_config()).unwrap();

        assert_eq!(repo.load_config().unwrap(), Some(sample_config()));
    }

    #[test]
    fn test_ledger_round_trip() {
        let (repo, _dir) = repository();

        repo.save_ledger(&[sample_entry()]).unwrap();

        assert_eq!(repo.load_ledger().unwrap(), Some(vec![sample_entry()]));
    }

    #[test]
    fn test_empty_shapes_round_trip() {
        let (repo, _dir) = repository();

        repo.save_ledger(&[]).unwrap();
        repo.save_config(&SessionConfig::default()).unwrap();

        assert_eq!(repo.load_ledger().unwrap(), Some(Vec::new()));
        assert_eq!(repo.load_config().unwrap(), Some(SessionConfig::default()));
    }

    #[test]
    fn test_clear_ledger_removes_file_and_is_idempotent() {
        let (repo, _dir) = repository();
        repo.save_ledger(&[sample_entry()]).unwrap();

        repo.clear_ledger().unwrap();
        assert_eq!(repo.load_ledger().unwrap(), None);

        // Absence is not an error
        repo.clear_ledger().unwrap();
    }

    #[test]
    fn test_corrupted_file_degrades_to_absent() {
        let (repo, dir) = repository();
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join(LEDGER_FILE), "{not json").unwrap();

        assert_eq!(repo.load_ledger().unwrap(), None);
    }

    #[test]
    fn test_slices_are_separate_files() {
        let (repo, dir) = repository();

        repo.save_config(&sample_config()).unwrap();
        repo.save_ledger(&[sample_entry()]).unwrap();
        repo.clear_ledger().unwrap();

        // Clearing the ledger leaves the config slice alone
        assert!(dir.path().join(CONFIG_FILE).exists());
        assert!(!dir.path().join(LEDGER_FILE).exists());
    }
}
