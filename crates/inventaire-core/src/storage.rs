//! Typed persistence interface for the durable state slices.
//!
//! Exactly two slices are persisted, independently and incrementally: the
//! session configuration and the scanned-product ledger. The catalog is
//! deliberately not persisted; the import file is its source of truth and
//! it is re-imported each session.

use crate::error::Result;
use crate::ledger::ScannedEntry;
use crate::session::SessionConfig;

/// An abstract repository for the two persisted state slices.
///
/// This decouples the store from the concrete storage mechanism (JSON
/// files, browser local storage, an in-memory map for tests, ...). Each
/// slice has its own codec behind this trait.
///
/// # Implementation Notes
///
/// - Absence of a slice is a valid initial-boot state, not an error:
///   `load_*` returns `Ok(None)`.
/// - A corrupted stored value should degrade to "treat as absent" (log and
///   return `Ok(None)`) rather than fail the boot.
/// - Durability is best-effort: the store logs and swallows `save_*`
///   failures, so implementations should make errors descriptive.
pub trait StateRepository: Send + Sync {
    /// Loads the persisted configuration slice, if any.
    fn load_config(&self) -> Result<Option<SessionConfig>>;

    /// Persists the full configuration slice.
    fn save_config(&self, config: &SessionConfig) -> Result<()>;

    /// Loads the persisted ledger slice, if any.
    fn load_ledger(&self) -> Result<Option<Vec<ScannedEntry>>>;

    /// Persists the full ledger slice.
    fn save_ledger(&self, entries: &[ScannedEntry]) -> Result<()>;

    /// Erases the persisted ledger slice. Absence is not an error.
    fn clear_ledger(&self) -> Result<()>;
}
