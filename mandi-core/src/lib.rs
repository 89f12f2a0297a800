//! Core types and pure logic for the mandi price dashboard.
//!
//! Everything in this crate is independent of the browser so it can be
//! exercised by native tests:
//! - `filters`: the flat filter record and the form reader
//! - `query`: translation of filters into a document-store query
//! - `price` / `location`: records read from the `market_prices` and `mandiData` collections
//! - `synthetic`: fallback price series used when the store is unreachable
//! - `insight`: week-over-week price movement sentence
//! - `chart` / `map`: render planning and the owning chart/map handles
//! - `view`: the tagged view state shared by the chart panel and the map
//! - `pipeline`: fetch sequencing and the fallback policy
//! - `config`: dashboard configuration schema

pub mod chart;
pub mod config;
pub mod dates;
pub mod error;
pub mod filters;
pub mod insight;
pub mod location;
pub mod map;
pub mod pipeline;
pub mod price;
pub mod query;
pub mod source;
pub mod synthetic;
pub mod view;

pub use error::{FetchError, RecordError, RenderError};
pub use filters::Filters;
pub use price::{PricePoint, Series};
