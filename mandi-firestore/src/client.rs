use crate::decode::{decode_run_query, location_document, price_document};
use crate::encode::{collection_query_body, price_query_body, run_query_url};
use crate::transport::{ReqwestTransport, Transport};
use mandi_core::config::FirestoreConfig;
use mandi_core::location::LocationDocument;
use mandi_core::query::PriceQuery;
use mandi_core::source::{LocationSource, PriceSource};
use mandi_core::{FetchError, PricePoint};
use serde_json::{Map, Value};

/// Firestore-backed price and location source.
pub struct FirestoreClient<T: Transport = ReqwestTransport> {
    config: FirestoreConfig,
    transport: T,
}

impl FirestoreClient<ReqwestTransport> {
    pub fn new(config: FirestoreConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::default())
    }
}

impl<T: Transport> FirestoreClient<T> {
    pub fn with_transport(config: FirestoreConfig, transport: T) -> Self {
        Self { config, transport }
    }

    async fn run_query(&self, body: &Value) -> Result<Vec<Map<String, Value>>, FetchError> {
        let url = run_query_url(&self.config);
        let reply = self.transport.post_json(&url, body).await?;
        if !reply.is_success() {
            // Prefer the RPC error message carried in the body
            return Err(match decode_run_query(&reply.body) {
                Err(err @ FetchError::StoreUnavailable(_)) => err,
                _ => FetchError::StoreUnavailable(format!("HTTP {}", reply.status)),
            });
        }
        decode_run_query(&reply.body)
    }
}

impl<T: Transport> PriceSource for FirestoreClient<T> {
    async fn fetch_prices(&self, query: &PriceQuery) -> Result<Vec<PricePoint>, FetchError> {
        let index = query.index_fields();
        if !index.is_empty() {
            log::debug!(
                "[Mandi] firestore: query on {} needs composite index ({})",
                query.collection,
                index.join(", ")
            );
        }
        let docs = self.run_query(&price_query_body(query)).await?;
        log::info!("[Mandi] firestore: {} documents from {}", docs.len(), query.collection);
        Ok(docs
            .iter()
            .map(|fields| price_document(fields).into_point())
            .collect())
    }
}

impl<T: Transport> LocationSource for FirestoreClient<T> {
    async fn fetch_locations(&self, collection: &str) -> Result<Vec<LocationDocument>, FetchError> {
        let docs = self.run_query(&collection_query_body(collection)).await?;
        log::info!("[Mandi] firestore: {} documents from {}", docs.len(), collection);
        Ok(docs.iter().map(location_document).collect())
    }
}
