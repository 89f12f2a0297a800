//! Clock and randomness for the browser build.

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Today's date in the browser's time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Fresh generator seeded from `Math.random` and the clock.
pub fn seeded_rng() -> StdRng {
    let entropy = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let clock = js_sys::Date::now() as u64;
    StdRng::seed_from_u64((entropy << 32) ^ clock)
}
