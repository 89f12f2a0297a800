//! Price observations from the `market_prices` collection.

use crate::dates::parse_iso_date;
use crate::error::FetchError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single price observation as fed to the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// ISO-8601 date or timestamp
    pub date: String,
    /// Price in rupees per kg
    pub price: f64,
    pub commodity: String,
    pub location: String,
}

impl PricePoint {
    /// Calendar day of the observation, if the date string parses.
    pub fn day(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }
}

/// Raw fields of a `market_prices` document. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceDocument {
    pub date: Option<String>,
    pub commodity: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub market: Option<String>,
    pub price_per_kg: Option<f64>,
    pub avg_price: Option<f64>,
}

impl PriceDocument {
    /// `pricePerKg`, else `avgPrice`, else 0. Zero and NaN count as absent.
    pub fn effective_price(&self) -> f64 {
        [self.price_per_kg, self.avg_price]
            .into_iter()
            .flatten()
            .find(|price| *price != 0.0 && !price.is_nan())
            .unwrap_or(0.0)
    }

    pub fn into_point(self) -> PricePoint {
        let price = self.effective_price();
        let location = self
            .state
            .filter(|s| !s.is_empty())
            .or(self.district)
            .unwrap_or_default();
        PricePoint {
            date: self.date.unwrap_or_default(),
            price,
            commodity: self.commodity.unwrap_or_default(),
            location,
        }
    }
}

/// Stable chronological sort. Unparseable dates sort first, in input order.
pub fn sort_chronologically(points: &mut [PricePoint]) {
    points.sort_by(|a, b| a.day().cmp(&b.day()).then_with(|| a.date.cmp(&b.date)));
}

/// A non-empty, chronologically ordered price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series(Vec<PricePoint>);

impl Series {
    /// Sorts the points; fails with [`FetchError::EmptyResult`] when there are none.
    pub fn new(mut points: Vec<PricePoint>) -> Result<Self, FetchError> {
        if points.is_empty() {
            return Err(FetchError::EmptyResult);
        }
        sort_chronologically(&mut points);
        Ok(Self(points))
    }

    /// Caller guarantees at least one point in chronological order.
    pub(crate) fn from_sorted(points: Vec<PricePoint>) -> Self {
        debug_assert!(!points.is_empty());
        Self(points)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, price: f64) -> PricePoint {
        PricePoint {
            date: date.to_string(),
            price,
            commodity: "Tomato".to_string(),
            location: "Maharashtra".to_string(),
        }
    }

    #[test]
    fn effective_price_prefers_price_per_kg() {
        let doc = PriceDocument {
            price_per_kg: Some(42.5),
            avg_price: Some(40.0),
            ..PriceDocument::default()
        };
        assert!((doc.effective_price() - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn effective_price_falls_back_to_avg_price() {
        let doc = PriceDocument {
            price_per_kg: Some(0.0),
            avg_price: Some(38.0),
            ..PriceDocument::default()
        };
        assert!((doc.effective_price() - 38.0).abs() < f64::EPSILON);

        let doc = PriceDocument {
            avg_price: Some(31.0),
            ..PriceDocument::default()
        };
        assert!((doc.effective_price() - 31.0).abs() < f64::EPSILON);
    }

    #[test]
    fn effective_price_defaults_to_zero() {
        assert_eq!(PriceDocument::default().effective_price(), 0.0);
    }

    #[test]
    fn into_point_location_prefers_state() {
        let doc = PriceDocument {
            date: Some("2024-10-05".to_string()),
            commodity: Some("Onion".to_string()),
            state: Some("Maharashtra".to_string()),
            district: Some("Nashik".to_string()),
            avg_price: Some(30.0),
            ..PriceDocument::default()
        };
        let point = doc.into_point();
        assert_eq!(point.location, "Maharashtra");
        assert_eq!(point.commodity, "Onion");
        assert_eq!(point.date, "2024-10-05");

        let doc = PriceDocument {
            state: Some(String::new()),
            district: Some("Nashik".to_string()),
            ..PriceDocument::default()
        };
        assert_eq!(doc.into_point().location, "Nashik");
    }

    #[test]
    fn series_rejects_empty() {
        assert_eq!(Series::new(Vec::new()), Err(FetchError::EmptyResult));
    }

    #[test]
    fn series_sorts_chronologically() {
        let series = Series::new(vec![
            point("2024-10-07", 3.0),
            point("2024-10-05T10:00:00Z", 1.0),
            point("2024-10-06", 2.0),
        ])
        .unwrap();
        let prices: Vec<f64> = series.points().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
    }
}
