//! The async fetch cycles behind page load and the Go button.

use crate::runtime::{seeded_rng, today};
use crate::state::{AppState, Services};
use dioxus::prelude::*;
use mandi_core::map::{load_locations, location_view};
use mandi_core::pipeline::run_price_cycle;
use mandi_core::view::{DataOrigin, ViewState};
use mandi_core::Filters;

/// Fetch prices for `filters` and publish the result, unless a newer cycle
/// has started in the meantime.
pub async fn price_cycle(mut state: AppState, services: Services, filters: Filters) {
    let ticket = state.sequencer.write().issue();
    let mut in_flight = state.in_flight;
    let sequencer = state.sequencer;
    let mut rng = seeded_rng();
    let view = run_price_cycle(
        services.source.as_ref(),
        services.config.prices_collection.as_str(),
        &filters,
        services.config.fallback_policy(),
        today(),
        &mut rng,
        move |on| {
            in_flight.with_mut(|n| *n = if on { *n + 1 } else { n.saturating_sub(1) });
        },
        move || sequencer.peek().is_current(ticket),
    )
    .await;

    let Some(view) = view else {
        return;
    };
    if let ViewState::Ready(ready) = &view {
        if ready.origin == DataOrigin::Synthetic {
            log::info!("[Mandi] showing {} synthetic points", ready.series.len());
        }
    }
    state.applied_filters.set(filters);
    state.chart_view.set(view);
}

/// Load every mandi location for the map.
pub async fn map_cycle(mut state: AppState, services: Services) {
    state.map_view.set(ViewState::Loading);
    let result = load_locations(services.source.as_ref(), &services.config.locations_collection).await;
    state.map_view.set(location_view(result));
}
