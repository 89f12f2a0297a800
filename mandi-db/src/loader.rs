//! CSV loading for the snapshot tables.
//!
//! # CSV Formats
//!
//! - **Prices** (has headers): `date,commodity,state,district,market,pricePerKg,avgPrice`
//! - **Locations** (has headers): `name,commodity,price,address,latitude,longitude,type`
//!
//! Blank cells are stored as NULL, mirroring a document without that field.
//! Non-numeric prices or coordinates are stored as NULL as well.

use crate::Database;
use rusqlite::params;

fn text(record: &csv::StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn number(record: &csv::StringRecord, idx: usize) -> Option<f64> {
    text(record, idx).and_then(|s| s.parse().ok())
}

impl Database {
    /// Load `market_prices` rows from CSV.
    ///
    /// # Example CSV
    /// ```text
    /// date,commodity,state,district,market,pricePerKg,avgPrice
    /// 2024-10-05,Onion,Maharashtra,Nashik,Lasalgaon,28.5,
    /// ```
    pub fn load_market_prices(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            conn.execute(
                "INSERT INTO market_prices
                 (date, commodity, state, district, market, price_per_kg, avg_price)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    text(&r, 0),
                    text(&r, 1),
                    text(&r, 2),
                    text(&r, 3),
                    text(&r, 4),
                    number(&r, 5),
                    number(&r, 6),
                ],
            )?;
            count += 1;
        }
        log::info!("[Mandi] loader: Loaded {} price rows", count);
        Ok(())
    }

    /// Load `mandiData` rows from CSV.
    ///
    /// # Example CSV
    /// ```text
    /// name,commodity,price,address,latitude,longitude,type
    /// Azadpur Mandi,Tomato,32,"Azadpur, Delhi",28.7074,77.1750,major
    /// ```
    pub fn load_mandi_data(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            conn.execute(
                "INSERT INTO mandi_data
                 (name, commodity, price, address, latitude, longitude, type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    text(&r, 0),
                    text(&r, 1),
                    number(&r, 2),
                    text(&r, 3),
                    number(&r, 4),
                    number(&r, 5),
                    text(&r, 6),
                ],
            )?;
            count += 1;
        }
        log::info!("[Mandi] loader: Loaded {} mandi locations", count);
        Ok(())
    }
}
