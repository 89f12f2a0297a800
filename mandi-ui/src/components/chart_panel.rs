//! Price chart with its loading overlay, state notices and insight line.

use super::{InsightLine, LoadingOverlay, NoticeBox};
use crate::backend::JsChartBackend;
use crate::state::AppState;
use dioxus::prelude::*;
use mandi_core::chart::{ChartMount, PriceChart};
use mandi_core::view::{DataOrigin, ViewState, LOADING_PRICES};
use mandi_core::RenderError;
use std::cell::RefCell;
use std::rc::Rc;

/// Container the chart is mounted in.
pub const CHART_SELECTOR: &str = ".chart-placeholder";
pub const CANVAS_ID: &str = "marketChart";

#[component]
pub fn ChartPanel() -> Element {
    let state = use_context::<AppState>();
    let chart = use_hook(|| {
        Rc::new(RefCell::new(PriceChart::new(
            ChartMount::new(CHART_SELECTOR, CANVAS_ID),
            JsChartBackend,
        )))
    });

    // Redraw whenever a new series or filter set is published
    use_effect(move || {
        let view = state.chart_view.read();
        let ViewState::Ready(ready) = &*view else {
            return;
        };
        let filters = state.applied_filters.read();
        match chart.borrow_mut().render(&ready.series, &filters) {
            Ok(data) => log::debug!("[Mandi] chart drew {} points: {}", data.values.len(), data.title),
            Err(RenderError::RenderTargetMissing(target)) => {
                log::error!("[Mandi] chart mount {} missing, render skipped", target)
            }
            Err(e) => log::warn!("[Mandi] chart render failed: {}", e),
        }
    });

    let view = state.chart_view.read();
    let shows_chart = view.shows_chart();
    let notice = if shows_chart { None } else { view.notice() };
    let synthetic = matches!(view.ready(), Some(ready) if ready.origin == DataOrigin::Synthetic);
    let loading = state.is_loading();

    rsx! {
        div {
            class: "chart-container",
            div {
                class: "chart-placeholder",
                style: "position: relative; height: 400px; width: 100%;",
                if shows_chart {
                    canvas { id: CANVAS_ID }
                }
                if let Some(notice) = notice {
                    NoticeBox { notice }
                }
                if loading {
                    LoadingOverlay { message: LOADING_PRICES.to_string() }
                }
            }
            if synthetic {
                p {
                    class: "data-origin",
                    style: "margin: 4px 0 0; font-size: 12px; color: #666;",
                    "Live prices unavailable, showing sample data."
                }
            }
            InsightLine {}
        }
    }
}
