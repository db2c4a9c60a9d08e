//! Product reference domain model.

use serde::{Deserialize, Serialize};

/// A single article from the imported product catalog.
///
/// Identity is the `barcode`: the catalog holds at most one reference per
/// barcode. References are immutable once imported; a manual addition may
/// append a new barcode but never rewrites an existing reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductReference {
    /// Scannable barcode (identity key)
    pub barcode: String,
    /// Internal article code
    pub code: String,
    /// Human-readable article label
    pub label: String,
}

impl ProductReference {
    /// Creates a new product reference.
    pub fn new(
        barcode: impl Into<String>,
        code: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            barcode: barcode.into(),
            code: code.into(),
            label: label.into(),
        }
    }
}
