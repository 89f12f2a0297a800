//! In-memory SQLite snapshot of the mandi document collections.
//!
//! The dashboard falls back to this store when no Firestore project is
//! configured. It holds the same two collections, loaded from CSV that the
//! app embeds with `include_str!`, and answers [`PriceQuery`]s with the same
//! semantics as the remote store: equality constraints, an optional lower
//! date bound, ascending date order.
//!
//! # Usage
//!
//! ```rust
//! use mandi_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_market_prices("date,commodity,state,district,market,pricePerKg,avgPrice\n2024-10-05,Onion,Maharashtra,Nashik,Lasalgaon,28.5,\n").unwrap();
//! assert_eq!(db.count_rows("market_prices").unwrap(), 1);
//! ```
//!
//! [`PriceQuery`]: mandi_core::query::PriceQuery

pub mod schema;
mod loader;
mod queries;
mod source;

pub use queries::table_for_collection;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding the price and location collections.
///
/// Cheaply cloneable; clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create an empty database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Create a database and load both CSV snapshots.
    pub fn from_snapshot(prices_csv: &str, locations_csv: &str) -> anyhow::Result<Self> {
        let db = Self::new()?;
        db.load_market_prices(prices_csv)?;
        db.load_mandi_data(locations_csv)?;
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        assert!(Database::new().is_ok());
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_mandi_data("name,commodity,price,address,latitude,longitude,type\nVashi,Onion,30,,19.07,73.0,major\n")
            .unwrap();
        assert_eq!(db2.count_rows("mandi_data").unwrap(), 1, "clones share one connection");
    }

    #[test]
    fn snapshot_loads_both_tables() {
        let db = Database::from_snapshot(
            "date,commodity,state,district,market,pricePerKg,avgPrice\n2024-10-05,Onion,Maharashtra,Nashik,Lasalgaon,28.5,\n",
            "name,commodity,price,address,latitude,longitude,type\nVashi,Onion,30,,19.07,73.0,major\n",
        )
        .unwrap();
        assert_eq!(db.count_rows("market_prices").unwrap(), 1);
        assert_eq!(db.count_rows("mandi_data").unwrap(), 1);
    }
}
