//! The authoritative session store.
//!
//! Single in-memory owner of all mutable application state. Every command
//! runs to completion on the caller's thread: validate, mutate, persist the
//! affected slices (best-effort), then notify subscribers synchronously, in
//! registration order, with a fresh snapshot. No command is interleaved
//! with another and each state-changing command yields exactly one
//! notification.

use crate::catalog::ProductReference;
use crate::error::Result;
use crate::ledger::{capture_timestamp, EntryId, EntryPatch, Ledger, ScannedEntry};
use crate::session::{ActiveView, ConfigUpdate, SessionConfig, SessionState};
use crate::storage::StateRepository;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// Handle returned by [`SessionStore::subscribe`]; pass it back to
/// [`SessionStore::unsubscribe`] to stop receiving notifications.
pub type SubscriptionId = u64;

type SubscriberFn = Arc<dyn Fn(&SessionState) + Send + Sync>;

struct State {
    active_view: ActiveView,
    is_configured: bool,
    ledger: Ledger,
    catalog: Vec<ProductReference>,
    config: SessionConfig,
}

#[derive(Default)]
struct SubscriberRegistry {
    next_id: SubscriptionId,
    subscribers: Vec<(SubscriptionId, SubscriberFn)>,
}

/// Owns the session state and mediates every mutation.
///
/// Constructed explicitly with an injected [`StateRepository`]; tests
/// instantiate fresh stores instead of resetting shared globals. All reads
/// go through [`SessionStore::snapshot`], which returns an independent deep
/// copy.
pub struct SessionStore {
    state: Mutex<State>,
    registry: Mutex<SubscriberRegistry>,
    repository: Arc<dyn StateRepository>,
}

impl SessionStore {
    /// Creates a store initialized from persisted storage.
    ///
    /// A persisted configuration marks the session as already configured; a
    /// persisted ledger is restored with its id counter resumed. Load
    /// failures degrade to the defaults (empty everything, today's date)
    /// with a warning; they never fail the boot.
    pub fn new(repository: Arc<dyn StateRepository>) -> Self {
        let saved_config = repository.load_config().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load persisted configuration, starting from defaults");
            None
        });
        let (config, is_configured) = match saved_config {
            Some(config) => (config, true),
            None => (SessionConfig::with_today(), false),
        };

        let entries = repository
            .load_ledger()
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to load persisted ledger, starting empty");
                None
            })
            .unwrap_or_default();

        Self {
            state: Mutex::new(State {
                active_view: ActiveView::Config,
                is_configured,
                ledger: Ledger::from_entries(entries),
                catalog: Vec::new(),
                config,
            }),
            registry: Mutex::new(SubscriberRegistry::default()),
            repository,
        }
    }

    /// Returns a deep, independent copy of the current session state.
    pub fn snapshot(&self) -> SessionState {
        snapshot_of(&self.lock_state())
    }

    /// Registers a subscriber; it will be invoked synchronously after every
    /// state-changing command, in registration order.
    pub fn subscribe(&self, subscriber: impl Fn(&SessionState) + Send + Sync + 'static) -> SubscriptionId {
        let mut registry = self.lock_registry();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.subscribers.push((id, Arc::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.lock_registry();
        let before = registry.subscribers.len();
        registry.subscribers.retain(|(sid, _)| *sid != id);
        registry.subscribers.len() != before
    }

    /// Switches the active view.
    ///
    /// Entering `Scan` or `Results` without a validated configuration is
    /// refused: the store forces the view back to `Config` so the boundary
    /// can surface a warning. The guard is re-checked on every transition.
    /// Returns the view actually applied.
    pub fn set_active_view(&self, view: ActiveView) -> ActiveView {
        let snapshot = {
            let mut state = self.lock_state();
            let applied = if view.requires_configuration() && !state.is_configured {
                debug!(?view, "view requires configuration, forcing config view");
                ActiveView::Config
            } else {
                view
            };
            state.active_view = applied;
            snapshot_of(&state)
        };
        self.notify(&snapshot);
        snapshot.active_view
    }

    /// Merges a partial update into the configuration and persists the full
    /// config slice. Does not itself mark the session as configured; that
    /// validation belongs to the caller.
    pub fn set_configuration(&self, update: ConfigUpdate) {
        let snapshot = {
            let mut state = self.lock_state();
            state.config.merge(update);
            self.persist_config(&state);
            snapshot_of(&state)
        };
        self.notify(&snapshot);
    }

    /// Sets the configured flag.
    pub fn mark_configured(&self, configured: bool) {
        let snapshot = {
            let mut state = self.lock_state();
            state.is_configured = configured;
            snapshot_of(&state)
        };
        self.notify(&snapshot);
    }

    /// Replaces the catalog wholesale.
    ///
    /// The entries must already be unique by barcode (the import validator
    /// guarantees this). The catalog is never persisted.
    pub fn set_catalog(&self, entries: Vec<ProductReference>) {
        let snapshot = {
            let mut state = self.lock_state();
            state.catalog = entries;
            snapshot_of(&state)
        };
        self.notify(&snapshot);
    }

    /// Records one scan (or manual addition) of a product reference.
    ///
    /// Reconciliation is identical for both entry paths; a manual addition
    /// additionally appends the reference to the catalog if its barcode is
    /// not already known (idempotent). Returns the reconciled front entry.
    pub fn record_scan(&self, reference: &ProductReference, manual_addition: bool) -> ScannedEntry {
        let (entry, snapshot) = {
            let mut state = self.lock_state();
            let entry = state.ledger.record(reference, capture_timestamp()).clone();
            if manual_addition
                && !state.catalog.iter().any(|r| r.barcode == reference.barcode)
            {
                state.catalog.push(reference.clone());
            }
            self.persist_ledger(&state);
            (entry, snapshot_of(&state))
        };
        self.notify(&snapshot);
        entry
    }

    /// Applies a field edit to a ledger entry, refreshing its timestamp and
    /// promoting it to the front.
    ///
    /// An unknown id is a silent no-op (stale boundary references are not
    /// an error) and does not notify. A quantity below 1 is rejected with a
    /// validation error and no state change.
    pub fn update_entry(&self, id: EntryId, patch: EntryPatch) -> Result<()> {
        let snapshot = {
            let mut state = self.lock_state();
            if !state.ledger.update(id, patch, capture_timestamp())? {
                return Ok(());
            }
            self.persist_ledger(&state);
            snapshot_of(&state)
        };
        self.notify(&snapshot);
        Ok(())
    }

    /// Deletes the ledger entry with the given id, if present.
    pub fn delete_entry(&self, id: EntryId) {
        let snapshot = {
            let mut state = self.lock_state();
            state.ledger.delete(id);
            self.persist_ledger(&state);
            snapshot_of(&state)
        };
        self.notify(&snapshot);
    }

    /// Empties the ledger and erases its persisted copy.
    pub fn clear_ledger(&self) {
        let snapshot = {
            let mut state = self.lock_state();
            state.ledger.clear();
            if let Err(e) = self.repository.clear_ledger() {
                warn!(error = %e, "failed to erase persisted ledger");
            }
            snapshot_of(&state)
        };
        self.notify(&snapshot);
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("session state lock poisoned")
    }

    fn lock_registry(&self) -> MutexGuard<'_, SubscriberRegistry> {
        self.registry.lock().expect("subscriber registry lock poisoned")
    }

    // Durability is best-effort: the in-memory mutation always completes,
    // persistence failures are logged and swallowed.
    fn persist_config(&self, state: &State) {
        if let Err(e) = self.repository.save_config(&state.config) {
            warn!(error = %e, "failed to persist configuration");
        }
    }

    fn persist_ledger(&self, state: &State) {
        if let Err(e) = self.repository.save_ledger(state.ledger.entries()) {
            warn!(error = %e, "failed to persist ledger");
        }
    }

    fn notify(&self, snapshot: &SessionState) {
        // Clone the handles out so subscribers may call back into the store.
        let subscribers: Vec<SubscriberFn> = self
            .lock_registry()
            .subscribers
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();
        for subscriber in subscribers {
            subscriber(snapshot);
        }
    }
}

fn snapshot_of(state: &State) -> SessionState {
    SessionState {
        active_view: state.active_view,
        is_configured: state.is_configured,
        ledger: state.ledger.entries().to_vec(),
        catalog: state.catalog.clone(),
        config: state.config.clone(),
    }
}
