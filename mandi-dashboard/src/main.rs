//! Mandi price dashboard
//!
//! A filter bar, a line chart of daily prices with a week-over-week insight
//! sentence, and a clustered map of mandi locations.
//!
//! Data flow:
//! 1. `build.rs` stages `dashboard.json` and the CSV snapshot from `fixtures/`
//!    into OUT_DIR; `include_str!` embeds them in the WASM binary.
//! 2. On start: parse the config, pick the store (Firestore when a project is
//!    configured, the bundled snapshot otherwise) and draw a synthetic
//!    placeholder chart.
//! 3. On mount: run one price cycle with empty filters and the map cycle.
//! 4. On Go: read the form and run a price cycle; only the latest one lands.

use dioxus::prelude::*;
use mandi_core::config::DashboardConfig;
use mandi_core::pipeline::placeholder_view;
use mandi_core::Filters;
use mandi_ui::components::{ChartPanel, FilterBar, MandiMap};
use mandi_ui::cycles::{map_cycle, price_cycle};
use mandi_ui::js_bridge;
use mandi_ui::runtime::{seeded_rng, today};
use mandi_ui::source::DashboardSource;
use mandi_ui::state::{AppState, Services};
use std::rc::Rc;

const DASHBOARD_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/dashboard.json"));
const MARKET_PRICES_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/market_prices.csv"));
const MANDI_DATA_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/mandi_data.csv"));

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("mandi-dashboard-root"))
        .launch(App);
}

fn load_config() -> DashboardConfig {
    match DashboardConfig::from_json(DASHBOARD_JSON) {
        Ok(config) => config,
        Err(e) => {
            log::error!("[Mandi] invalid dashboard.json, using defaults: {}", e);
            DashboardConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let services = use_context_provider(|| {
        js_bridge::load_bridge_scripts();
        let config = load_config();
        let source = DashboardSource::from_config(&config, MARKET_PRICES_CSV, MANDI_DATA_CSV);
        log::info!("[Mandi] dashboard reading from the {} store", source.name());
        Services {
            config: Rc::new(config),
            source: Rc::new(source),
        }
    });
    let state = use_context_provider({
        let policy = services.config.fallback_policy();
        move || {
            let placeholder = placeholder_view(&Filters::default(), policy, today(), &mut seeded_rng());
            AppState::new(placeholder)
        }
    });

    // Page load: first price fetch and the map
    use_effect({
        let services = services.clone();
        move || {
            spawn(price_cycle(state, services.clone(), Filters::default()));
            spawn(map_cycle(state, services.clone()));
        }
    });

    let on_apply = move |filters: Filters| {
        spawn(price_cycle(state, services.clone(), filters));
    };

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #2d5016;",
            h2 {
                style: "margin: 0 0 8px 0;",
                "Mandi Prices"
            }
            FilterBar { on_apply }
            ChartPanel {}
            h3 {
                style: "margin: 24px 0 8px 0;",
                "Mandi Locations"
            }
            MandiMap {}
        }
    }
}
