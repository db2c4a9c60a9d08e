//! Active view selector.

use serde::{Deserialize, Serialize};

/// The view the operator is currently working in.
///
/// `Scan` and `Results` require a validated configuration; the store forces
/// the view back to `Config` when that precondition does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    #[default]
    Config,
    Scan,
    Results,
}

impl ActiveView {
    /// Whether entering this view requires a validated configuration.
    pub fn requires_configuration(self) -> bool {
        matches!(self, Self::Scan | Self::Results)
    }
}
