//! Scan input use case.
//!
//! Sits between the scan boundary (keyboard entry or a hardware scanner
//! emulating one) and the store: trims input, rate-limits bursts, resolves
//! the barcode against the catalog, and hands unknown barcodes back to the
//! boundary so it can open the manual-add form.

use inventaire_core::catalog::ProductReference;
use inventaire_core::ledger::ScannedEntry;
use inventaire_core::store::SessionStore;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Minimum interval between two accepted scans.
pub const SCAN_DEBOUNCE: Duration = Duration::from_millis(300);

/// Errors surfaced to the boundary as transient warnings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The scan input was empty after trimming.
    #[error("enter a barcode or scan a product first")]
    EmptyBarcode,

    /// The attempt came too soon after the previously accepted scan; it is
    /// rejected, not queued.
    #[error("wait before scanning again")]
    Debounced,

    /// A manual addition with one or more empty fields.
    #[error("all manual-add fields are required")]
    MissingFields,
}

/// Result of an accepted scan attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The barcode matched the catalog; the ledger was reconciled.
    Recorded(ScannedEntry),
    /// The barcode is absent from the catalog; the boundary should offer
    /// manual addition with this barcode prefilled.
    UnknownBarcode(String),
}

/// Rejects scan attempts arriving within `min_interval` of the previously
/// accepted one. Rejected attempts do not reset the window.
#[derive(Debug)]
pub struct ScanThrottle {
    min_interval: Duration,
    last_accepted: Option<Instant>,
}

impl ScanThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: None,
        }
    }

    /// Returns whether the attempt at `now` is accepted, and records it if
    /// so.
    pub fn try_accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            if now.duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }
}

/// Use case for barcode scans and manual additions.
pub struct ScanService {
    store: Arc<SessionStore>,
    throttle: Mutex<ScanThrottle>,
}

impl ScanService {
    /// Creates a scan service with the standard 300 ms debounce.
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self::with_debounce(store, SCAN_DEBOUNCE)
    }

    /// Creates a scan service with a custom debounce interval.
    pub fn with_debounce(store: Arc<SessionStore>, min_interval: Duration) -> Self {
        Self {
            store,
            throttle: Mutex::new(ScanThrottle::new(min_interval)),
        }
    }

    /// Processes one scan attempt.
    ///
    /// The debounce window opens on every accepted attempt, including one
    /// that turns out to be an unknown barcode.
    pub fn scan(&self, input: &str) -> Result<ScanOutcome, ScanError> {
        let barcode = input.trim();
        if barcode.is_empty() {
            return Err(ScanError::EmptyBarcode);
        }

        let accepted = self
            .throttle
            .lock()
            .expect("scan throttle lock poisoned")
            .try_accept(Instant::now());
        if !accepted {
            return Err(ScanError::Debounced);
        }

        let snapshot = self.store.snapshot();
        match snapshot.find_reference(barcode) {
            Some(reference) => Ok(ScanOutcome::Recorded(self.store.record_scan(reference, false))),
            None => {
                debug!(barcode = %barcode, "scanned barcode not in catalog");
                Ok(ScanOutcome::UnknownBarcode(barcode.to_string()))
            }
        }
    }

    /// Adds a product by hand: reconciled exactly like a scan, plus the
    /// catalog-append side effect so a later scan of the same barcode
    /// resolves.
    pub fn add_manual(
        &self,
        barcode: &str,
        code: &str,
        label: &str,
    ) -> Result<ScannedEntry, ScanError> {
        let (barcode, code, label) = (barcode.trim(), code.trim(), label.trim());
        if barcode.is_empty() || code.is_empty() || label.is_empty() {
            return Err(ScanError::MissingFields);
        }

        let reference = ProductReference::new(barcode, code, label);
        Ok(self.store.record_scan(&reference, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventaire_infrastructure::MemoryStateRepository;

    fn store_with_catalog() -> Arc<SessionStore> {
        let store = Arc::new(SessionStore::new(Arc::new(MemoryStateRepository::new())));
        store.set_catalog(vec![ProductReference::new("123", "A1", "Widget")]);
        store
    }

    fn service(store: &Arc<SessionStore>) -> ScanService {
        // No debounce so tests can scan back to back
        ScanService::with_debounce(store.clone(), Duration::ZERO)
    }

    #[test]
    fn test_scan_known_barcode_records_entry() {
        let store = store_with_catalog();
        let scans = service(&store);

        let outcome = scans.scan("123").unwrap();

        match outcome {
            ScanOutcome::Recorded(entry) => {
                assert_eq!(entry.label, "Widget");
                assert_eq!(entry.quantity, 1);
            }
            other => panic!("expected Recorded, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_trims_input() {
        let store = store_with_catalog();
        let scans = service(&store);

        let outcome = scans.scan("  123  ").unwrap();

        assert!(matches!(outcome, ScanOutcome::Recorded(_)));
    }

    #[test]
    fn test_scan_empty_input_is_rejected() {
        let store = store_with_catalog();
        let scans = service(&store);

        assert_eq!(scans.scan("   "), Err(ScanError::EmptyBarcode));
        assert!(store.snapshot().ledger.is_empty());
    }

    #[test]
    fn test_scan_unknown_barcode_leaves_ledger_unchanged() {
        let store = store_with_catalog();
        let scans = service(&store);

        let outcome = scans.scan("999").unwrap();

        assert_eq!(outcome, ScanOutcome::UnknownBarcode("999".to_string()));
        assert!(store.snapshot().ledger.is_empty());
    }

    #[test]
    fn test_rapid_second_scan_is_debounced() {
        let store = store_with_catalog();
        let scans = ScanService::with_debounce(store.clone(), Duration::from_secs(3600));

        assert!(scans.scan("123").is_ok());
        assert_eq!(scans.scan("123"), Err(ScanError::Debounced));

        // The rejected attempt was dropped, not queued
        assert_eq!(store.snapshot().ledger[0].quantity, 1);
    }

    #[test]
    fn test_throttle_window() {
        let mut throttle = ScanThrottle::new(Duration::from_millis(300));
        let start = Instant::now();

        assert!(throttle.try_accept(start));
        assert!(!throttle.try_accept(start + Duration::from_millis(299)));
        assert!(throttle.try_accept(start + Duration::from_millis(300)));
    }

    #[test]
    fn test_rejected_attempt_does_not_reset_window() {
        let mut throttle = ScanThrottle::new(Duration::from_millis(300));
        let start = Instant::now();

        assert!(throttle.try_accept(start));
        assert!(!throttle.try_accept(start + Duration::from_millis(200)));
        // Still measured from the accepted scan, not the rejected one
        assert!(throttle.try_accept(start + Duration::from_millis(350)));
    }

    #[test]
    fn test_add_manual_requires_all_fields() {
        let store = store_with_catalog();
        let scans = service(&store);

        assert_eq!(scans.add_manual("789", "", "Sprocket"), Err(ScanError::MissingFields));
        assert!(store.snapshot().ledger.is_empty());
    }

    #[test]
    fn test_add_manual_then_scan_merges() {
        let store = store_with_catalog();
        let scans = service(&store);

        scans.add_manual("789", "C3", "Sprocket").unwrap();
        let outcome = scans.scan("789").unwrap();

        // The manual addition extended the catalog, so the scan resolves
        // and merges into the same entry; the first-seen label wins.
        match outcome {
            ScanOutcome::Recorded(entry) => {
                assert_eq!(entry.quantity, 2);
                assert_eq!(entry.label, "Sprocket");
            }
            other => panic!("expected Recorded, got {other:?}"),
        }
        assert_eq!(store.snapshot().ledger.len(), 1);
    }
}
