//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the reactive signals and is provided with
//! `use_context_provider`. `Services` carries the non-reactive config and
//! store handle the fetch cycles need.

use crate::source::DashboardSource;
use dioxus::prelude::*;
use mandi_core::config::DashboardConfig;
use mandi_core::map::LocationSet;
use mandi_core::pipeline::RequestSequencer;
use mandi_core::view::{PriceView, ViewState};
use mandi_core::Filters;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct AppState {
    /// What the chart panel shows
    pub chart_view: Signal<ViewState<PriceView>>,
    /// Filters the current chart was fetched with
    pub applied_filters: Signal<Filters>,
    /// Remote price calls still in flight
    pub in_flight: Signal<usize>,
    pub sequencer: Signal<RequestSequencer>,
    pub map_view: Signal<ViewState<LocationSet>>,
}

impl AppState {
    /// Start with a drawn placeholder chart and a loading map.
    pub fn new(placeholder: PriceView) -> Self {
        Self {
            chart_view: Signal::new(ViewState::Ready(placeholder)),
            applied_filters: Signal::new(Filters::default()),
            in_flight: Signal::new(0),
            sequencer: Signal::new(RequestSequencer::default()),
            map_view: Signal::new(ViewState::Loading),
        }
    }

    pub fn is_loading(&self) -> bool {
        (self.in_flight)() > 0
    }
}

/// Configuration and store shared by every cycle.
#[derive(Clone)]
pub struct Services {
    pub config: Rc<DashboardConfig>,
    pub source: Rc<DashboardSource>,
}
