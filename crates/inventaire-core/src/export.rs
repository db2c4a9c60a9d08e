//! Export-ready aggregation of the ledger.
//!
//! The results/export view is a second reduction over the ledger: entries
//! are grouped by barcode again even though scan reconciliation already
//! keeps the ledger unique, because a barcode edit can leave two entries
//! sharing a barcode (documented gap, see [`crate::ledger::EntryPatch`]).

use crate::error::{InventaireError, Result};
use crate::ledger::{ScannedEntry, TIMESTAMP_FORMAT};
use crate::session::SessionConfig;
use chrono::NaiveDateTime;

/// Fixed column order of the exported sheet.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "CodeBarres",
    "CodeArticle",
    "Libelle",
    "Quantité",
    "Date/Heure Dernier Scan",
    "Dépôt",
    "Zone",
    "Date Inventaire",
    "Inventorié par",
];

/// One aggregated results row: quantities summed per barcode, timestamp of
/// the latest touch kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedRow {
    pub barcode: String,
    pub code: String,
    pub label: String,
    pub quantity: u64,
    pub timestamp: String,
}

/// Groups ledger entries by barcode, in first-occurrence ledger order.
///
/// The first entry seen for a barcode establishes the row's code and label;
/// later entries with the same barcode add their quantity and may advance
/// the timestamp to a more recent one.
pub fn group_by_barcode(entries: &[ScannedEntry]) -> Vec<AggregatedRow> {
    let mut rows: Vec<AggregatedRow> = Vec::new();
    for entry in entries {
        match rows.iter_mut().find(|r| r.barcode == entry.barcode) {
            Some(row) => {
                row.quantity += u64::from(entry.quantity);
                if is_later(&entry.timestamp, &row.timestamp) {
                    row.timestamp = entry.timestamp.clone();
                }
            }
            None => rows.push(AggregatedRow {
                barcode: entry.barcode.clone(),
                code: entry.code.clone(),
                label: entry.label.clone(),
                quantity: u64::from(entry.quantity),
                timestamp: entry.timestamp.clone(),
            }),
        }
    }
    rows
}

// An unparseable timestamp never replaces a parseable one; when neither
// parses, the first-seen value is kept.
fn is_later(candidate: &str, current: &str) -> bool {
    match (parse_timestamp(candidate), parse_timestamp(current)) {
        (Some(candidate), Some(current)) => candidate > current,
        (Some(_), None) => true,
        _ => false,
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

/// The export view as plain tabular data.
///
/// The spreadsheet byte codec is an external collaborator; it only receives
/// this shape (column names, string rows, suggested file name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSheet {
    /// `Inventaire_{depot}_{zone}_{date}_{inventoriedBy}.xlsx`
    pub file_name: String,
    /// Column names, fixed order ([`EXPORT_COLUMNS`])
    pub columns: Vec<String>,
    /// One row per aggregated barcode, cells in column order
    pub rows: Vec<Vec<String>>,
}

/// Builds the export sheet for the given configuration and ledger.
///
/// Fails with a validation error when the ledger is empty or the
/// configuration is incomplete; both are retryable, nothing changes.
pub fn build_export(config: &SessionConfig, entries: &[ScannedEntry]) -> Result<ExportSheet> {
    if entries.is_empty() {
        return Err(InventaireError::validation("nothing to export: the ledger is empty"));
    }
    if !config.is_complete() {
        return Err(InventaireError::validation(
            "all configuration fields are required before export",
        ));
    }

    let rows = group_by_barcode(entries)
        .into_iter()
        .map(|row| {
            vec![
                row.barcode,
                row.code,
                row.label,
                row.quantity.to_string(),
                row.timestamp,
                config.depot.clone(),
                config.zone.clone(),
                config.date.clone(),
                config.inventoried_by.clone(),
            ]
        })
        .collect();

    Ok(ExportSheet {
        file_name: format!(
            "Inventaire_{}_{}_{}_{}.xlsx",
            config.depot, config.zone, config.date, config.inventoried_by
        ),
        columns: EXPORT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    })
}
