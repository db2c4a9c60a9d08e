//! Inventory session configuration.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Returns today's date in `YYYY-MM-DD` form, the default session date.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// The four-field inventory session configuration.
///
/// All fields non-empty is the precondition for scanning, the results view,
/// and export. The serialized field names match the original persisted
/// layout so existing stored sessions round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub depot: String,
    pub zone: String,
    pub inventoried_by: String,
    pub date: String,
}

impl SessionConfig {
    /// A default configuration with the date preset to today.
    pub fn with_today() -> Self {
        Self {
            date: today(),
            ..Self::default()
        }
    }

    /// Whether all four fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.depot.is_empty()
            && !self.zone.is_empty()
            && !self.inventoried_by.is_empty()
            && !self.date.is_empty()
    }

    /// Shallow field overwrite: `Some` fields replace, `None` fields keep
    /// their current value.
    pub fn merge(&mut self, update: ConfigUpdate) {
        if let Some(depot) = update.depot {
            self.depot = depot;
        }
        if let Some(zone) = update.zone {
            self.zone = zone;
        }
        if let Some(inventoried_by) = update.inventoried_by {
            self.inventoried_by = inventoried_by;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
    }
}

/// A partial configuration update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub depot: Option<String>,
    pub zone: Option<String>,
    pub inventoried_by: Option<String>,
    pub date: Option<String>,
}

impl From<SessionConfig> for ConfigUpdate {
    fn from(config: SessionConfig) -> Self {
        Self {
            depot: Some(config.depot),
            zone: Some(config.zone),
            inventoried_by: Some(config.inventoried_by),
            date: Some(config.date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> SessionConfig {
        SessionConfig {
            depot: "D1".to_string(),
            zone: "Z3".to_string(),
            inventoried_by: "Alex".to_string(),
            date: "2026-08-30".to_string(),
        }
    }

    #[test]
    fn test_default_config_is_incomplete() {
        assert!(!SessionConfig::default().is_complete());
        assert!(!SessionConfig::with_today().is_complete());
    }

    #[test]
    fn test_full_config_is_complete() {
        assert!(full_config().is_complete());
    }

    #[test]
    fn test_merge_overwrites_only_provided_fields() {
        let mut config = full_config();

        config.merge(ConfigUpdate {
            zone: Some("Z7".to_string()),
            ..ConfigUpdate::default()
        });

        assert_eq!(config.zone, "Z7");
        assert_eq!(config.depot, "D1");
        assert_eq!(config.inventoried_by, "Alex");
    }

    #[test]
    fn test_serialized_field_names_match_original_layout() {
        let json = serde_json::to_string(&full_config()).unwrap();

        assert!(json.contains("\"inventoriedBy\""));
        assert!(json.contains("\"depot\""));
    }
}
