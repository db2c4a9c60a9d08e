//! In-memory state repository.
//!
//! Used by tests and by embedders that want a session without durability
//! (everything is re-imported/re-scanned per run).

use inventaire_core::ledger::ScannedEntry;
use inventaire_core::session::SessionConfig;
use inventaire_core::storage::StateRepository;
use inventaire_core::Result;
use std::sync::Mutex;

/// [`StateRepository`] backed by plain memory. Never fails.
#[derive(Default)]
pub struct MemoryStateRepository {
    config: Mutex<Option<SessionConfig>>,
    ledger: Mutex<Option<Vec<ScannedEntry>>>,
}

impl MemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateRepository for MemoryStateRepository {
    fn load_config(&self) -> Result<Option<SessionConfig>> {
        Ok(self.config.lock().expect("config slice lock poisoned").clone())
    }

    fn save_config(&self, config: &SessionConfig) -> Result<()> {
        *self.config.lock().expect("config slice lock poisoned") = Some(config.clone());
        Ok(())
    }

    fn load_ledger(&self) -> Result<Option<Vec<ScannedEntry>>> {
        Ok(self.ledger.lock().expect("ledger slice lock poisoned").clone())
    }

    fn save_ledger(&self, entries: &[ScannedEntry]) -> Result<()> {
        *self.ledger.lock().expect("ledger slice lock poisoned") = Some(entries.to_vec());
        Ok(())
    }

    fn clear_ledger(&self) -> Result<()> {
        *self.ledger.lock().expect("ledger slice lock poisoned") = None;
        Ok(())
    }
}
