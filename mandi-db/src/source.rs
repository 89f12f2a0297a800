//! The snapshot store behind the core source traits.

use crate::Database;
use mandi_core::location::LocationDocument;
use mandi_core::query::PriceQuery;
use mandi_core::source::{LocationSource, PriceSource};
use mandi_core::{FetchError, PricePoint};

fn unavailable(err: anyhow::Error) -> FetchError {
    FetchError::StoreUnavailable(format!("{err:#}"))
}

impl PriceSource for Database {
    async fn fetch_prices(&self, query: &PriceQuery) -> Result<Vec<PricePoint>, FetchError> {
        let docs = self.query_prices(query).map_err(unavailable)?;
        Ok(docs.into_iter().map(|doc| doc.into_point()).collect())
    }
}

impl LocationSource for Database {
    async fn fetch_locations(&self, collection: &str) -> Result<Vec<LocationDocument>, FetchError> {
        self.query_locations(collection).map_err(unavailable)
    }
}
