//! Dashboard configuration, read from camelCase JSON.

use crate::pipeline::FallbackPolicy;
use crate::synthetic::{MAX_SYNTHETIC_DAYS, SYNTHETIC_DAYS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreConfig {
    pub project_id: String,
    pub api_key: String,
    #[serde(default = "default_database_id")]
    pub database_id: String,
}

fn default_database_id() -> String {
    "(default)".to_string()
}

/// Initial map viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: 22.9734,
            center_lng: 78.6569,
            zoom: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    /// Without a project the bundled snapshot store is used.
    pub firestore: Option<FirestoreConfig>,
    pub prices_collection: String,
    pub locations_collection: String,
    pub synthetic_fallback: bool,
    pub synthetic_days: usize,
    pub map: MapConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            firestore: None,
            prices_collection: "market_prices".to_string(),
            locations_collection: "mandiData".to_string(),
            synthetic_fallback: true,
            synthetic_days: SYNTHETIC_DAYS,
            map: MapConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// `syntheticDays` outside `1..=366` is clamped into range.
    pub fn fallback_policy(&self) -> FallbackPolicy {
        let days = self.synthetic_days.clamp(1, MAX_SYNTHETIC_DAYS);
        if days != self.synthetic_days {
            log::warn!(
                "[Mandi] syntheticDays {} out of range, using {}",
                self.synthetic_days,
                days
            );
        }
        FallbackPolicy {
            enabled: self.synthetic_fallback,
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.prices_collection, "market_prices");
        assert_eq!(config.locations_collection, "mandiData");
        assert!(config.firestore.is_none());
        assert_eq!(config.fallback_policy(), FallbackPolicy::default());
    }

    #[test]
    fn firestore_section() {
        let json = r#"{
            "firestore": { "projectId": "mandi-demo", "apiKey": "k123" },
            "syntheticFallback": false,
            "map": { "zoom": 6 }
        }"#;
        let config = DashboardConfig::from_json(json).unwrap();
        let firestore = config.firestore.as_ref().unwrap();
        assert_eq!(firestore.project_id, "mandi-demo");
        assert_eq!(firestore.database_id, "(default)");
        assert!(!config.fallback_policy().enabled);
        assert_eq!(config.map.zoom, 6);
        assert!((config.map.center_lat - 22.9734).abs() < 1e-9);
    }

    #[test]
    fn synthetic_days_clamped() {
        let config = DashboardConfig::from_json(r#"{ "syntheticDays": 200000000 }"#).unwrap();
        assert_eq!(config.fallback_policy().days, MAX_SYNTHETIC_DAYS);
        let config = DashboardConfig::from_json(r#"{ "syntheticDays": 0 }"#).unwrap();
        assert_eq!(config.fallback_policy().days, 1);
        let config = DashboardConfig::from_json(r#"{ "syntheticDays": 45 }"#).unwrap();
        assert_eq!(config.fallback_policy().days, 45);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(DashboardConfig::from_json("{ not json").is_err());
    }
}
