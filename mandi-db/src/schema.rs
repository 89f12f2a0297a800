//! SQL schema for the snapshot store.
//!
//! Columns mirror the document fields; anything a document may omit is
//! nullable so missing values survive as `None`.

/// The full schema as one batch.
///
/// - `market_prices`: one row per `market_prices` document
/// - `mandi_data`: one row per `mandiData` document
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS market_prices (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT,
        commodity TEXT,
        state TEXT,
        district TEXT,
        market TEXT,
        price_per_kg REAL,
        avg_price REAL
    );
    CREATE INDEX IF NOT EXISTS idx_prices_date ON market_prices(date);
    CREATE INDEX IF NOT EXISTS idx_prices_commodity ON market_prices(commodity, date);

    CREATE TABLE IF NOT EXISTS mandi_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT,
        commodity TEXT,
        price REAL,
        address TEXT,
        latitude REAL,
        longitude REAL,
        type TEXT
    );
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for table in ["market_prices", "mandi_data"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table '{}' should exist", table);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
