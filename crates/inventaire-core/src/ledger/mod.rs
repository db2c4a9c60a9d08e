//! Scanned-product ledger domain module.
//!
//! The ledger is the recency-ordered sequence of scanned entries: the most
//! recently touched entry is always at the front. Scan reconciliation keeps
//! it deduplicated by barcode; see [`Ledger::record`].

mod model;
mod reconcile;

pub use model::{capture_timestamp, EntryId, EntryPatch, ScannedEntry, TIMESTAMP_FORMAT};
pub use reconcile::Ledger;
