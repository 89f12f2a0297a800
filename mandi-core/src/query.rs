//! Translation of a filter record into a document-store query.
//!
//! The query model is store-agnostic: the Firestore client encodes it as a
//! `structuredQuery`, the snapshot database as SQL. Field names are the
//! stored document field names and must not change.

use crate::filters::Filters;
use serde::Serialize;

/// Field names of the `market_prices` and `mandiData` collections.
pub mod fields {
    pub const DATE: &str = "date";
    pub const COMMODITY: &str = "commodity";
    pub const STATE: &str = "state";
    pub const DISTRICT: &str = "district";
    pub const MARKET: &str = "market";
    pub const PRICE_PER_KG: &str = "pricePerKg";
    pub const AVG_PRICE: &str = "avgPrice";

    pub const NAME: &str = "name";
    pub const PRICE: &str = "price";
    pub const ADDRESS: &str = "address";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const TYPE: &str = "type";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparison {
    Equal,
    GreaterOrEqual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    pub field: &'static str,
    pub op: Comparison,
    pub value: String,
}

/// Filtered price query. Results are always ordered ascending by `order_by`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuery {
    pub collection: String,
    pub constraints: Vec<Constraint>,
    pub order_by: &'static str,
}

impl PriceQuery {
    /// Equality on commodity, state, district and market (in that order) for
    /// each non-empty filter, `date >= dateFrom` when set. `priceSort` never
    /// reaches the store.
    pub fn from_filters(collection: impl Into<String>, filters: &Filters) -> Self {
        let equalities = [
            (fields::COMMODITY, filters.commodity()),
            (fields::STATE, filters.state()),
            (fields::DISTRICT, filters.district()),
            (fields::MARKET, filters.market()),
        ];
        let mut constraints: Vec<Constraint> = equalities
            .into_iter()
            .filter_map(|(field, value)| {
                value.map(|v| Constraint {
                    field,
                    op: Comparison::Equal,
                    value: v.to_string(),
                })
            })
            .collect();
        if let Some(from) = filters.date_from() {
            constraints.push(Constraint {
                field: fields::DATE,
                op: Comparison::GreaterOrEqual,
                value: from.to_string(),
            });
        }
        Self {
            collection: collection.into(),
            constraints,
            order_by: fields::DATE,
        }
    }

    pub fn equality_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constraints
            .iter()
            .filter(|c| c.op == Comparison::Equal)
            .map(|c| c.field)
    }

    /// Fields of the composite index the store needs for this query:
    /// the equality fields followed by the ordering field. Empty when the
    /// single-field index on the ordering field suffices.
    pub fn index_fields(&self) -> Vec<&'static str> {
        let mut index: Vec<&'static str> = self.equality_fields().collect();
        if !index.is_empty() {
            index.push(self.order_by);
        }
        index
    }
}
