//! Decoding of `runQuery` responses.
//!
//! Firestore wraps every field in a typed envelope such as
//! `{"stringValue": "Onion"}` or `{"integerValue": "42"}`. Unknown or
//! mismatched types decode to `None`, like a missing field.

use mandi_core::location::LocationDocument;
use mandi_core::price::PriceDocument;
use mandi_core::query::fields;
use mandi_core::FetchError;
use serde::Deserialize;
use serde_json::{Map, Value};

type Fields = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    fields: Fields,
}

/// One element of the streamed response array.
#[derive(Debug, Deserialize)]
struct QueryItem {
    document: Option<Document>,
    error: Option<RpcError>,
}

fn rpc_failure(err: &RpcError) -> FetchError {
    FetchError::StoreUnavailable(format!("{} {}: {}", err.code, err.status, err.message))
}

/// Field maps of every returned document. Items without a document are
/// read-time markers and are skipped.
pub fn decode_run_query(body: &str) -> Result<Vec<Fields>, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
    if let Some(err) = value.get("error") {
        let err: RpcError = serde_json::from_value(err.clone())
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
        return Err(rpc_failure(&err));
    }
    let items: Vec<QueryItem> =
        serde_json::from_value(value).map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
    let mut documents = Vec::with_capacity(items.len());
    for item in items {
        if let Some(err) = &item.error {
            return Err(rpc_failure(err));
        }
        if let Some(doc) = item.document {
            documents.push(doc.fields);
        }
    }
    Ok(documents)
}

/// Text of a string or timestamp field.
pub fn string_field(fields: &Fields, name: &str) -> Option<String> {
    let value = fields.get(name)?;
    value
        .get("stringValue")
        .or_else(|| value.get("timestampValue"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Numeric value of a double, integer (string-encoded) or numeric string field.
pub fn number_field(fields: &Fields, name: &str) -> Option<f64> {
    let value = fields.get(name)?;
    if let Some(double) = value.get("doubleValue") {
        return double.as_f64().or_else(|| double.as_str().and_then(|s| s.parse().ok()));
    }
    if let Some(integer) = value.get("integerValue") {
        return integer
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .or_else(|| integer.as_i64())
            .map(|i| i as f64);
    }
    value
        .get("stringValue")
        .and_then(Value::as_str)
        .and_then(|s| s.trim().parse().ok())
}

pub fn price_document(map: &Fields) -> PriceDocument {
    PriceDocument {
        date: string_field(map, fields::DATE),
        commodity: string_field(map, fields::COMMODITY),
        state: string_field(map, fields::STATE),
        district: string_field(map, fields::DISTRICT),
        market: string_field(map, fields::MARKET),
        price_per_kg: number_field(map, fields::PRICE_PER_KG),
        avg_price: number_field(map, fields::AVG_PRICE),
    }
}

pub fn location_document(map: &Fields) -> LocationDocument {
    LocationDocument {
        name: string_field(map, fields::NAME),
        commodity: string_field(map, fields::COMMODITY),
        price: number_field(map, fields::PRICE),
        address: string_field(map, fields::ADDRESS),
        latitude: number_field(map, fields::LATITUDE),
        longitude: number_field(map, fields::LONGITUDE),
        kind: string_field(map, fields::TYPE),
    }
}
