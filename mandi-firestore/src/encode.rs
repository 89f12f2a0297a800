//! `structuredQuery` request bodies.

use mandi_core::config::FirestoreConfig;
use mandi_core::query::{Comparison, Constraint, PriceQuery};
use serde_json::{json, Value};

const API_ROOT: &str = "https://firestore.googleapis.com/v1";

/// `documents:runQuery` endpoint for the configured project and database.
pub fn run_query_url(config: &FirestoreConfig) -> String {
    format!(
        "{API_ROOT}/projects/{}/databases/{}/documents:runQuery?key={}",
        config.project_id, config.database_id, config.api_key
    )
}

fn operator(op: Comparison) -> &'static str {
    match op {
        Comparison::Equal => "EQUAL",
        Comparison::GreaterOrEqual => "GREATER_THAN_OR_EQUAL",
    }
}

fn field_filter(constraint: &Constraint) -> Value {
    json!({
        "fieldFilter": {
            "field": { "fieldPath": constraint.field },
            "op": operator(constraint.op),
            "value": { "stringValue": constraint.value }
        }
    })
}

/// One constraint is a plain field filter, several are AND-ed.
fn where_clause(constraints: &[Constraint]) -> Option<Value> {
    match constraints {
        [] => None,
        [single] => Some(field_filter(single)),
        many => Some(json!({
            "compositeFilter": {
                "op": "AND",
                "filters": many.iter().map(field_filter).collect::<Vec<_>>()
            }
        })),
    }
}

pub fn price_query_body(query: &PriceQuery) -> Value {
    let mut structured = json!({
        "from": [{ "collectionId": query.collection }],
        "orderBy": [{
            "field": { "fieldPath": query.order_by },
            "direction": "ASCENDING"
        }]
    });
    if let Some(filter) = where_clause(&query.constraints) {
        structured["where"] = filter;
    }
    json!({ "structuredQuery": structured })
}

/// Every document of a collection.
pub fn collection_query_body(collection: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }]
        }
    })
}
