//! Configuration validation use case.

use inventaire_core::session::{ActiveView, SessionConfig};
use inventaire_core::store::SessionStore;
use inventaire_core::{InventaireError, Result};
use std::sync::Arc;

/// Validates and applies the session configuration.
///
/// The store itself never decides when the session counts as configured;
/// that precondition (four non-empty fields and an imported catalog) is
/// enforced here, at the boundary.
pub struct ConfigService {
    store: Arc<SessionStore>,
}

impl ConfigService {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Validates the configuration, applies it, marks the session as
    /// configured, and moves to the scan view.
    ///
    /// Rejected configurations change nothing and can be retried
    /// immediately.
    pub fn validate_and_apply(&self, config: SessionConfig) -> Result<()> {
        if !config.is_complete() {
            return Err(InventaireError::validation(
                "all configuration fields are required",
            ));
        }
        if self.store.snapshot().catalog.is_empty() {
            return Err(InventaireError::validation(
                "import the article base before validating the configuration",
            ));
        }

        self.store.set_configuration(config.into());
        self.store.mark_configured(true);
        self.store.set_active_view(ActiveView::Scan);
        Ok(())
    }
}
