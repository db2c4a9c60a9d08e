//! Catalog import use case.
//!
//! File reading is an asynchronous boundary operation; this service brackets
//! it. `begin_import` runs when a file is picked (clearing the previous
//! catalog, so a failed or cancelled read leaves it empty) and hands out a
//! generation token; `complete_import` applies the parsed rows only if no
//! newer import was begun in the meantime (last-submitted import wins).

use inventaire_core::catalog::parse_catalog_rows;
use inventaire_core::store::SessionStore;
use inventaire_core::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Generation token identifying one import attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportToken(u64);

/// Result of a completed import attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The catalog was replaced with this many references.
    Applied { count: usize },
    /// A newer import superseded this one; its rows were discarded.
    Superseded,
}

/// Use case for replacing the catalog from imported tabular rows.
pub struct ImportService {
    store: Arc<SessionStore>,
    generation: AtomicU64,
}

impl ImportService {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            generation: AtomicU64::new(0),
        }
    }

    /// Starts a new import attempt, superseding any in-flight one.
    ///
    /// The previous catalog is cleared immediately: import failure clears
    /// rather than preserves stale data.
    pub fn begin_import(&self) -> ImportToken {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.store.set_catalog(Vec::new());
        ImportToken(generation)
    }

    /// Completes an import attempt with the rows read from the file.
    ///
    /// A stale token (a newer import was begun since) discards the rows
    /// without touching the catalog. A parse failure leaves the catalog
    /// empty and is reported as a rejected, retryable operation.
    pub fn complete_import(
        &self,
        token: ImportToken,
        rows: &[Vec<String>],
    ) -> Result<ImportOutcome> {
        if token.0 != self.generation.load(Ordering::SeqCst) {
            debug!("discarding superseded import result");
            return Ok(ImportOutcome::Superseded);
        }

        match parse_catalog_rows(rows) {
            Ok(references) => {
                let count = references.len();
                self.store.set_catalog(references);
                Ok(ImportOutcome::Applied { count })
            }
            Err(e) => {
                warn!(error = %e, "catalog import failed, catalog left empty");
                self.store.set_catalog(Vec::new());
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventaire_core::catalog::ProductReference;
    use inventaire_infrastructure::MemoryStateRepository;

    fn store() -> Arc<SessionStore> {
        Arc::new(SessionStore::new(Arc::new(MemoryStateRepository::new())))
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn valid_rows() -> Vec<Vec<String>> {
        vec![
            row(&["CodeBarres", "CodeArticle", "Libelle"]),
            row(&["123", "A1", "Widget"]),
        ]
    }

    #[test]
    fn test_successful_import_replaces_catalog() {
        let store = store();
        let imports = ImportService::new(store.clone());

        let token = imports.begin_import();
        let outcome = imports.complete_import(token, &valid_rows()).unwrap();

        assert_eq!(outcome, ImportOutcome::Applied { count: 1 });
        assert_eq!(
            store.snapshot().catalog,
            vec![ProductReference::new("123", "A1", "Widget")]
        );
    }

    #[test]
    fn test_failed_import_leaves_catalog_empty() {
        let store = store();
        let imports = ImportService::new(store.clone());

        // Seed a previously imported catalog
        let token = imports.begin_import();
        imports.complete_import(token, &valid_rows()).unwrap();

        // A later import with a bad header must not preserve stale data
        let token = imports.begin_import();
        let bad_rows = vec![row(&["Wrong", "Header", "Row"]), row(&["123", "A1", "W"])];
        let err = imports.complete_import(token, &bad_rows).unwrap_err();

        assert!(err.is_import());
        assert!(store.snapshot().catalog.is_empty());
    }

    #[test]
    fn test_cancelled_read_leaves_catalog_empty() {
        let store = store();
        let imports = ImportService::new(store.clone());

        let token = imports.begin_import();
        imports.complete_import(token, &valid_rows()).unwrap();

        // The operator picks a new file but the read never completes
        imports.begin_import();

        assert!(store.snapshot().catalog.is_empty());
    }

    #[test]
    fn test_last_submitted_import_wins() {
        let store = store();
        let imports = ImportService::new(store.clone());

        let stale = imports.begin_import();
        let current = imports.begin_import();

        // The slow first read finishes after the second began
        let outcome = imports.complete_import(stale, &valid_rows()).unwrap();
        assert_eq!(outcome, ImportOutcome::Superseded);
        assert!(store.snapshot().catalog.is_empty());

        let rows = vec![
            row(&["CodeBarres", "CodeArticle", "Libelle"]),
            row(&["456", "B2", "Gadget"]),
        ];
        let outcome = imports.complete_import(current, &rows).unwrap();
        assert_eq!(outcome, ImportOutcome::Applied { count: 1 });
        assert_eq!(store.snapshot().catalog[0].barcode, "456");
    }
}
