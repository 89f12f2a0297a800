//! Dioxus components and browser bindings for the mandi price dashboard.
//!
//! This crate provides:
//! - `js_bridge`: loading and calling the Chart.js / Google Maps glue scripts
//! - `backend`: chart and map backends that drive the glue from Rust
//! - `form`: the DOM-backed filter form
//! - `source`: the configured price/location store
//! - `state`: reactive `AppState` and shared services
//! - `cycles`: the async price and map fetch cycles
//! - `components`: the filter bar, chart panel, insight line and map

pub mod backend;
pub mod components;
pub mod cycles;
pub mod form;
pub mod js_bridge;
pub mod map_binding;
pub mod runtime;
pub mod source;
pub mod state;
