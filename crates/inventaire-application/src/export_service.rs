//! Export use case.

use inventaire_core::export::{build_export, ExportSheet};
use inventaire_core::store::SessionStore;
use inventaire_core::Result;
use std::sync::Arc;

/// Builds the export sheet and consumes the ledger.
///
/// Export is not a passive read: once the sheet is built, the ledger is
/// cleared so the next zone starts from an empty count. A rejected export
/// (empty ledger, incomplete configuration) changes nothing.
pub struct ExportService {
    store: Arc<SessionStore>,
}

impl ExportService {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Builds the export sheet from the current state, then clears the
    /// ledger. The returned sheet is handed to the spreadsheet codec.
    pub fn export(&self) -> Result<ExportSheet> {
        let snapshot = self.store.snapshot();
        let sheet = build_export(&snapshot.config, &snapshot.ledger)?;
        self.store.clear_ledger();
        Ok(sheet)
    }
}
