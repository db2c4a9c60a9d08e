//! Application layer for Inventaire.
//!
//! Use-case services coordinating the session store. Boundary-side policy
//! lives here (input validation, the scan debounce, import supersession,
//! the consuming export) so the store commands stay small and mechanical.

pub mod config_service;
pub mod export_service;
pub mod import_service;
pub mod scan_service;

pub use config_service::ConfigService;
pub use export_service::ExportService;
pub use import_service::{ImportOutcome, ImportService, ImportToken};
pub use scan_service::{ScanError, ScanOutcome, ScanService, ScanThrottle, SCAN_DEBOUNCE};
