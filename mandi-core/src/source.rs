//! Seams between the dashboard and whatever document store backs it.

use crate::error::FetchError;
use crate::location::LocationDocument;
use crate::price::PricePoint;
use crate::query::PriceQuery;

/// Executes price queries. Zero matching documents is `Ok(vec![])`, not an error.
#[allow(async_fn_in_trait)]
pub trait PriceSource {
    async fn fetch_prices(&self, query: &PriceQuery) -> Result<Vec<PricePoint>, FetchError>;
}

/// Lists every document of a location collection.
#[allow(async_fn_in_trait)]
pub trait LocationSource {
    async fn fetch_locations(&self, collection: &str)
        -> Result<Vec<LocationDocument>, FetchError>;
}
