//! Product catalog domain module.
//!
//! The catalog is the imported article base that scans are resolved
//! against. It is replaced wholesale on import and never persisted: the
//! import file is the source of truth, not storage.

mod import;
mod model;

pub use import::{parse_catalog_rows, ImportError, CATALOG_HEADER};
pub use model::ProductReference;
