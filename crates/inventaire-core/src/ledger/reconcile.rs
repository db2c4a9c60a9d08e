//! Scan reconciliation over the ledger.

use super::model::{EntryId, EntryPatch, ScannedEntry};
use crate::catalog::ProductReference;
use crate::error::{InventaireError, Result};

/// The recency-ordered scanned-product ledger.
///
/// Owns the entry sequence and the monotonic id counter. All mutation paths
/// (scan, manual add, edit) promote the touched entry to the front, so the
/// sequence doubles as the "recent scans" view.
#[derive(Debug)]
pub struct Ledger {
    entries: Vec<ScannedEntry>,
    next_id: EntryId,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a ledger from persisted entries.
    ///
    /// The id counter resumes above the highest persisted id so restored
    /// sessions keep allocating unique, monotonic ids.
    pub fn from_entries(entries: Vec<ScannedEntry>) -> Self {
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self { entries, next_id }
    }

    /// The entries in recency order, most recently touched first.
    pub fn entries(&self) -> &[ScannedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry quantities.
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    /// Reconciles one scan (or manual addition) into the ledger.
    ///
    /// If an entry with the same barcode exists, it is removed from its
    /// current position, its quantity incremented by exactly 1, its
    /// timestamp refreshed, and it is reinserted at the front. The existing
    /// `code`/`label` are kept: the first-seen reference wins over a later
    /// scan of the same barcode.
    ///
    /// Otherwise a fresh entry with quantity 1 and a new monotonic id is
    /// inserted at the front.
    ///
    /// Returns the entry at the front after reconciliation.
    pub fn record(&mut self, reference: &ProductReference, timestamp: String) -> &ScannedEntry {
        match self
            .entries
            .iter()
            .position(|e| e.barcode == reference.barcode)
        {
            Some(position) => {
                let mut entry = self.entries.remove(position);
                entry.quantity += 1;
                entry.timestamp = timestamp;
                self.entries.insert(0, entry);
            }
            None => {
                let entry = ScannedEntry {
                    id: self.next_id,
                    barcode: reference.barcode.clone(),
                    code: reference.code.clone(),
                    label: reference.label.clone(),
                    quantity: 1,
                    timestamp,
                };
                self.next_id += 1;
                self.entries.insert(0, entry);
            }
        }
        &self.entries[0]
    }

    /// Applies a field edit to the entry with the given id.
    ///
    /// Edits count as touches: the entry's timestamp is refreshed and it is
    /// promoted to the front. An unknown id is a silent no-op (`Ok(false)`),
    /// defensive against stale boundary references. A quantity below 1 is
    /// rejected without changing any state.
    ///
    /// A patched `barcode` is applied as-is even if it now collides with
    /// another entry's barcode; the export aggregation re-groups such rows.
    pub fn update(&mut self, id: EntryId, patch: EntryPatch, timestamp: String) -> Result<bool> {
        if patch.quantity.is_some_and(|q| q < 1) {
            return Err(InventaireError::validation(
                "quantity must be a number greater than or equal to 1",
            ));
        }

        let Some(position) = self.entries.iter().position(|e| e.id == id) else {
            return Ok(false);
        };

        let mut entry = self.entries.remove(position);
        if let Some(barcode) = patch.barcode {
            entry.barcode = barcode;
        }
        if let Some(code) = patch.code {
            entry.code = code;
        }
        if let Some(label) = patch.label {
            entry.label = label;
        }
        if let Some(quantity) = patch.quantity {
            entry.quantity = quantity;
        }
        entry.timestamp = timestamp;
        self.entries.insert(0, entry);
        Ok(true)
    }

    /// Removes the entry with the given id. Unknown ids are a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn delete(&mut self, id: EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Empties the ledger. The id counter keeps advancing.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
