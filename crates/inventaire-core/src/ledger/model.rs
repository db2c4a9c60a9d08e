//! Scanned-entry domain model.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Monotonic identifier assigned to a ledger entry at creation.
pub type EntryId = u64;

/// Format of ledger capture timestamps (day-first local time).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Returns the current local time formatted as a ledger timestamp.
pub fn capture_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One line of the scanned-product ledger.
///
/// Scan reconciliation guarantees at most one entry per barcode; entries
/// carry a separate monotonic `id` so the boundary can reference a row
/// across edits. `timestamp` reflects the most recent mutation (creation,
/// increment, or field edit), not the first capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedEntry {
    /// Monotonic identity, assigned at creation
    pub id: EntryId,
    /// Scanned barcode
    pub barcode: String,
    /// Article code copied from the matching product reference
    pub code: String,
    /// Article label copied from the matching product reference
    pub label: String,
    /// Accumulated quantity, always >= 1
    pub quantity: u32,
    /// Capture time of the most recent mutation ([`TIMESTAMP_FORMAT`])
    pub timestamp: String,
}

/// Field edits applied to an existing ledger entry.
///
/// `None` fields are left untouched. An edit may change the `barcode`
/// itself; this deliberately does not re-merge against another entry with
/// the same barcode (see [`crate::export::group_by_barcode`] for the
/// defensive aggregation).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub barcode: Option<String>,
    pub code: Option<String>,
    pub label: Option<String>,
    pub quantity: Option<u32>,
}

impl EntryPatch {
    /// A patch that only changes the quantity.
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }
}
