//! Synthetic price series used when the document store cannot be reached.
//!
//! The shape is fixed (one point per day, ending today) while the values are
//! drawn from the supplied random source, so callers decide how to seed it.

use crate::dates::format_iso_date;
use crate::filters::Filters;
use crate::price::{PricePoint, Series};
use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Base price for commodities without a dedicated entry.
pub const DEFAULT_BASE_PRICE: f64 = 60.0;

/// Days of data generated when no length is configured.
pub const SYNTHETIC_DAYS: usize = 30;

/// Longest synthetic series: one year of daily points.
pub const MAX_SYNTHETIC_DAYS: usize = 366;

/// Upper bound (exclusive) of the random lift applied to the base price.
const BASE_JITTER: f64 = 20.0;

/// Half-width of the per-day price swing.
const DAILY_SWING: f64 = 4.0;

const DEFAULT_COMMODITY: &str = "Mixed Vegetables";
const DEFAULT_LOCATION: &str = "All Regions";

/// Base price (₹/kg) before jitter, keyed case-insensitively by commodity.
pub fn base_price(commodity: &str) -> f64 {
    match commodity.to_lowercase().as_str() {
        "tomato" => 40.0,
        "onion" => 30.0,
        "potato" => 25.0,
        _ => DEFAULT_BASE_PRICE,
    }
}

/// Generate `days` consecutive daily points ending on `today`.
pub fn generate<R: Rng>(
    filters: &Filters,
    days: usize,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<PricePoint> {
    let base = base_price(&filters.commodity) + rng.random_range(0.0..BASE_JITTER);
    let commodity = filters.commodity().unwrap_or(DEFAULT_COMMODITY);
    let location = filters
        .state()
        .or_else(|| filters.district())
        .unwrap_or(DEFAULT_LOCATION);

    (0..days)
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back as i64);
            let price = base + rng.random_range(-DAILY_SWING..DAILY_SWING);
            PricePoint {
                date: format_iso_date(&date),
                price: (price * 100.0).round() / 100.0,
                commodity: commodity.to_string(),
                location: location.to_string(),
            }
        })
        .collect()
}

/// Fallback series of `days` points, clamped to `1..=MAX_SYNTHETIC_DAYS`.
pub fn fallback_series<R: Rng>(
    filters: &Filters,
    days: usize,
    today: NaiveDate,
    rng: &mut R,
) -> Series {
    Series::from_sorted(generate(filters, days.clamp(1, MAX_SYNTHETIC_DAYS), today, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn base_price_default_without_commodity() {
        assert_eq!(base_price(""), DEFAULT_BASE_PRICE);
        assert_eq!(base_price(&Filters::default().commodity), 60.0);
        assert_eq!(base_price("Brinjal"), 60.0);
    }

    #[test]
    fn base_price_known_commodities() {
        assert_eq!(base_price("tomato"), 40.0);
        assert_eq!(base_price("Tomato"), 40.0);
        assert_eq!(base_price("ONION"), 30.0);
        assert_eq!(base_price("Potato"), 25.0);
    }

    #[test]
    fn series_is_thirty_consecutive_days_ending_today() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = generate(&Filters::default(), SYNTHETIC_DAYS, today(), &mut rng);
        assert_eq!(points.len(), 30);

        let days: Vec<NaiveDate> = points.iter().map(|p| p.day().unwrap()).collect();
        assert_eq!(*days.last().unwrap(), today());
        // Crosses the leap day
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        for pair in days.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn prices_stay_within_jitter_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let filters = Filters {
            commodity: "Potato".to_string(),
            ..Filters::default()
        };
        for point in generate(&filters, 30, today(), &mut rng) {
            assert!(point.price >= 25.0 - DAILY_SWING - 0.01);
            assert!(point.price < 25.0 + BASE_JITTER + DAILY_SWING + 0.01);
            // Two-decimal rounding
            assert!(((point.price * 100.0).round() - point.price * 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn labels_follow_filters() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = generate(&Filters::default(), 3, today(), &mut rng);
        assert_eq!(points[0].commodity, "Mixed Vegetables");
        assert_eq!(points[0].location, "All Regions");

        let filters = Filters {
            commodity: "Onion".to_string(),
            district: "Nashik".to_string(),
            ..Filters::default()
        };
        let points = generate(&filters, 3, today(), &mut rng);
        assert_eq!(points[0].commodity, "Onion");
        assert_eq!(points[0].location, "Nashik");
    }

    #[test]
    fn same_seed_same_series() {
        let a = generate(&Filters::default(), 30, today(), &mut StdRng::seed_from_u64(9));
        let b = generate(&Filters::default(), 30, today(), &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn fallback_series_never_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let series = fallback_series(&Filters::default(), 0, today(), &mut rng);
        assert_eq!(series.len(), 1);
        assert_eq!(series.points()[0].day(), Some(today()));
    }

    #[test]
    fn fallback_series_capped_at_a_year() {
        let mut rng = StdRng::seed_from_u64(3);
        let series = fallback_series(&Filters::default(), 200_000_000, today(), &mut rng);
        assert_eq!(series.len(), MAX_SYNTHETIC_DAYS);
        assert_eq!(series.points()[MAX_SYNTHETIC_DAYS - 1].day(), Some(today()));
    }
}
