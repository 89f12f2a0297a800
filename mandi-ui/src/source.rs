//! The store the dashboard reads from, chosen by configuration.

use mandi_core::config::DashboardConfig;
use mandi_core::location::LocationDocument;
use mandi_core::query::PriceQuery;
use mandi_core::source::{LocationSource, PriceSource};
use mandi_core::{FetchError, PricePoint};
use mandi_db::Database;
use mandi_firestore::FirestoreClient;

pub enum DashboardSource {
    /// Bundled CSV snapshot in an in-memory database
    Snapshot(Database),
    Firestore(FirestoreClient),
    /// No store could be set up; every fetch fails with this reason
    Unavailable(String),
}

impl DashboardSource {
    /// Firestore when a project is configured, otherwise the bundled snapshot.
    pub fn from_config(config: &DashboardConfig, prices_csv: &str, locations_csv: &str) -> Self {
        if let Some(firestore) = &config.firestore {
            log::info!("[Mandi] using Firestore project {}", firestore.project_id);
            return DashboardSource::Firestore(FirestoreClient::new(firestore.clone()));
        }
        match Database::from_snapshot(prices_csv, locations_csv) {
            Ok(db) => DashboardSource::Snapshot(db),
            Err(e) => {
                log::error!("[Mandi] snapshot store failed to load: {:#}", e);
                DashboardSource::Unavailable(format!("snapshot store failed to load: {e}"))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DashboardSource::Snapshot(_) => "snapshot",
            DashboardSource::Firestore(_) => "firestore",
            DashboardSource::Unavailable(_) => "unavailable",
        }
    }
}

impl PriceSource for DashboardSource {
    async fn fetch_prices(&self, query: &PriceQuery) -> Result<Vec<PricePoint>, FetchError> {
        match self {
            DashboardSource::Snapshot(db) => db.fetch_prices(query).await,
            DashboardSource::Firestore(client) => client.fetch_prices(query).await,
            DashboardSource::Unavailable(reason) => Err(FetchError::StoreUnavailable(reason.clone())),
        }
    }
}

impl LocationSource for DashboardSource {
    async fn fetch_locations(&self, collection: &str) -> Result<Vec<LocationDocument>, FetchError> {
        match self {
            DashboardSource::Snapshot(db) => db.fetch_locations(collection).await,
            DashboardSource::Firestore(client) => client.fetch_locations(collection).await,
            DashboardSource::Unavailable(reason) => Err(FetchError::StoreUnavailable(reason.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use mandi_core::config::FirestoreConfig;
    use mandi_core::Filters;

    const PRICES: &str = "date,commodity,state,district,market,pricePerKg,avgPrice\n2024-10-05,Onion,Maharashtra,Nashik,Lasalgaon,28.5,\n";
    const LOCATIONS: &str = "name,commodity,price,address,latitude,longitude,type\nVashi,Onion,30,,19.07,73.0,major\n";

    #[test]
    fn no_project_uses_snapshot() {
        let source = DashboardSource::from_config(&DashboardConfig::default(), PRICES, LOCATIONS);
        assert_eq!(source.name(), "snapshot");
        let query = PriceQuery::from_filters("market_prices", &Filters::default());
        let points = block_on(source.fetch_prices(&query)).unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn project_uses_firestore() {
        let config = DashboardConfig {
            firestore: Some(FirestoreConfig {
                project_id: "mandi-demo".to_string(),
                api_key: "k".to_string(),
                database_id: "(default)".to_string(),
            }),
            ..DashboardConfig::default()
        };
        assert_eq!(DashboardSource::from_config(&config, PRICES, LOCATIONS).name(), "firestore");
    }

    #[test]
    fn unavailable_fails_every_fetch() {
        let source = DashboardSource::Unavailable("broken".to_string());
        let err = block_on(source.fetch_locations("mandiData")).unwrap_err();
        assert_eq!(err, FetchError::StoreUnavailable("broken".to_string()));
    }
}
