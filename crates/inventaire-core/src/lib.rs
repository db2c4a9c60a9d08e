//! Core domain for the Inventaire stocktake tool.
//!
//! This crate owns the session state and the reconciliation logic that turns
//! a stream of scan events into a deduplicated, quantity-aggregated product
//! ledger. It performs no I/O itself: persistence goes through the
//! [`storage::StateRepository`] trait, and the spreadsheet byte codec is an
//! external collaborator that only sees the row shapes produced by
//! [`export`].
//!
//! # Module Structure
//!
//! - `catalog`: imported product references and the import validator
//! - `ledger`: scanned-entry model and the scan reconciler
//! - `session`: configuration, active view, and the session snapshot
//! - `store`: the authoritative [`store::SessionStore`]
//! - `storage`: typed persistence interface for the durable slices
//! - `export`: grouped-by-barcode aggregation and the export sheet

pub mod catalog;
pub mod error;
pub mod export;
pub mod ledger;
pub mod session;
pub mod storage;
pub mod store;

// Re-export common error type
pub use error::{InventaireError, Result};
