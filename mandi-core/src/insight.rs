//! Week-over-week price movement sentence.
//!
//! The latest price is compared with the price seven positions earlier
//! (or the first point for short series). The trend follows the percent
//! after rounding to one decimal: anything that rounds to 0.0% or above reads
//! as "increased". A zero comparison price reads as a 0% change.

use crate::filters::Filters;
use crate::price::PricePoint;
use std::fmt;

pub const INSUFFICIENT_DATA: &str = "Insufficient data for trend analysis.";
pub const NO_DATA: &str = "No data to display.";

/// Positions between the compared prices.
const WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increased,
    Decreased,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increased => write!(f, "increased"),
            Trend::Decreased => write!(f, "decreased"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklyChange {
    pub trend: Trend,
    /// Magnitude of the change in percent, rounded to one decimal.
    pub percent: f64,
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `None` for fewer than two points.
pub fn weekly_change(points: &[PricePoint]) -> Option<WeeklyChange> {
    if points.len() < 2 {
        return None;
    }
    let latest = points[points.len() - 1].price;
    let compare = points[points.len().saturating_sub(WEEK + 1)].price;
    if compare == 0.0 {
        return Some(WeeklyChange {
            trend: Trend::Increased,
            percent: 0.0,
        });
    }
    let percent = round_one_decimal((latest - compare) / compare * 100.0);
    // -0.0 compares equal to 0.0
    let trend = if percent >= 0.0 {
        Trend::Increased
    } else {
        Trend::Decreased
    };
    Some(WeeklyChange {
        trend,
        percent: percent.abs(),
    })
}

/// The insight sentence for a series under the given filters.
pub fn compute(points: &[PricePoint], filters: &Filters) -> String {
    let Some(change) = weekly_change(points) else {
        return INSUFFICIENT_DATA.to_string();
    };
    let subject = match filters.commodity() {
        Some(commodity) => format!("{commodity} prices"),
        None => "Prices".to_string(),
    };
    let region = filters.region().unwrap_or("the region");
    format!(
        "{} have {} by {:.1}% this week in {}.",
        subject, change.trend, change.percent, region
    )
}
