//! Query execution against the snapshot tables.
//!
//! Collections and field names arrive in document-store terms and are
//! mapped onto fixed table and column names, so no caller-supplied text is
//! ever spliced into SQL.

use crate::Database;
use anyhow::{anyhow, bail};
use mandi_core::location::LocationDocument;
use mandi_core::price::PriceDocument;
use mandi_core::query::{fields, Comparison, PriceQuery};
use rusqlite::params_from_iter;

/// Table backing a document collection.
pub fn table_for_collection(collection: &str) -> Option<&'static str> {
    match collection {
        "market_prices" => Some("market_prices"),
        "mandiData" | "mandi_data" => Some("mandi_data"),
        _ => None,
    }
}

fn price_column(field: &str) -> Option<&'static str> {
    match field {
        fields::DATE => Some("date"),
        fields::COMMODITY => Some("commodity"),
        fields::STATE => Some("state"),
        fields::DISTRICT => Some("district"),
        fields::MARKET => Some("market"),
        fields::PRICE_PER_KG => Some("price_per_kg"),
        fields::AVG_PRICE => Some("avg_price"),
        _ => None,
    }
}

/// `WHERE` clause, its parameters and the `ORDER BY` column for a query.
fn price_sql(query: &PriceQuery) -> anyhow::Result<(String, Vec<String>)> {
    let table = table_for_collection(&query.collection)
        .filter(|t| *t == "market_prices")
        .ok_or_else(|| anyhow!("unknown price collection '{}'", query.collection))?;
    let mut clauses = Vec::with_capacity(query.constraints.len());
    let mut values = Vec::with_capacity(query.constraints.len());
    for (idx, constraint) in query.constraints.iter().enumerate() {
        let Some(column) = price_column(constraint.field) else {
            bail!("unknown price field '{}'", constraint.field);
        };
        let op = match constraint.op {
            Comparison::Equal => "=",
            Comparison::GreaterOrEqual => ">=",
        };
        clauses.push(format!("{column} {op} ?{}", idx + 1));
        values.push(constraint.value.clone());
    }
    let Some(order) = price_column(query.order_by) else {
        bail!("unknown order field '{}'", query.order_by);
    };
    let mut sql = format!(
        "SELECT date, commodity, state, district, market, price_per_kg, avg_price FROM {table}"
    );
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(&format!(" ORDER BY {order} ASC, id ASC"));
    Ok((sql, values))
}

impl Database {
    /// Matching `market_prices` rows in ascending date order.
    pub fn query_prices(&self, query: &PriceQuery) -> anyhow::Result<Vec<PriceDocument>> {
        let (sql, values) = price_sql(query)?;
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Ok(PriceDocument {
                    date: row.get(0)?,
                    commodity: row.get(1)?,
                    state: row.get(2)?,
                    district: row.get(3)?,
                    market: row.get(4)?,
                    price_per_kg: row.get(5)?,
                    avg_price: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("[Mandi] query: query_prices returned {} records", rows.len());
        Ok(rows)
    }

    /// Every row of a location collection, in load order.
    pub fn query_locations(&self, collection: &str) -> anyhow::Result<Vec<LocationDocument>> {
        let table = table_for_collection(collection)
            .filter(|t| *t == "mandi_data")
            .ok_or_else(|| anyhow!("unknown location collection '{}'", collection))?;
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT name, commodity, price, address, latitude, longitude, type FROM {table} ORDER BY id"
        ))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(LocationDocument {
                    name: row.get(0)?,
                    commodity: row.get(1)?,
                    price: row.get(2)?,
                    address: row.get(3)?,
                    latitude: row.get(4)?,
                    longitude: row.get(5)?,
                    kind: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("[Mandi] query: query_locations returned {} records", rows.len());
        Ok(rows)
    }

    /// Row count of a collection's table.
    pub fn count_rows(&self, collection: &str) -> anyhow::Result<i64> {
        let table = table_for_collection(collection)
            .ok_or_else(|| anyhow!("unknown collection '{}'", collection))?;
        let conn = self.conn.borrow();
        let count = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count)
    }
}
