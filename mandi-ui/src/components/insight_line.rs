//! The insight sentence under the chart.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn InsightLine() -> Element {
    let state = use_context::<AppState>();
    let text = state.chart_view.read().insight(&state.applied_filters.read());

    rsx! {
        div {
            class: "chart-info",
            p {
                strong { "Insight: " }
                "{text}"
            }
        }
    }
}
