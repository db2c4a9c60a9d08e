//! Session snapshot.

use super::config::SessionConfig;
use super::view::ActiveView;
use crate::catalog::ProductReference;
use crate::ledger::ScannedEntry;
use serde::{Deserialize, Serialize};

/// A deep, independent snapshot of the whole session.
///
/// Subscribers and query callers receive this plain-data shape; mutating it
/// never affects the store's own state. The `ledger` is in recency order
/// (most recently touched first); the `catalog` is unique by barcode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub active_view: ActiveView,
    pub is_configured: bool,
    pub ledger: Vec<ScannedEntry>,
    pub catalog: Vec<ProductReference>,
    pub config: SessionConfig,
}

impl SessionState {
    /// Sum of all ledger quantities (the "total items" counter).
    pub fn total_quantity(&self) -> u64 {
        self.ledger.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Looks up a catalog reference by barcode.
    pub fn find_reference(&self, barcode: &str) -> Option<&ProductReference> {
        self.catalog.iter().find(|r| r.barcode == barcode)
    }
}
