//! Price chart planning and the owning chart handle.
//!
//! [`PriceChart`] owns exactly one live chart instance per mount point. The
//! drawing itself is delegated to a [`ChartBackend`]; the browser build uses
//! Chart.js through the JS bridge, tests use a recording fake.

use crate::dates::day_month_label;
use crate::error::RenderError;
use crate::filters::Filters;
use crate::price::Series;
use serde::Serialize;
use serde_json::{json, Value};

/// Title subject when no commodity is selected.
pub const DEFAULT_SUBJECT: &str = "Market";

/// Currency prefix for tooltips and y-axis ticks.
pub const CURRENCY_PREFIX: &str = "₹";

/// `"<commodity or Market> Prices (₹/kg)[ - <district or state>]"`
pub fn chart_title(filters: &Filters) -> String {
    let subject = filters.commodity().unwrap_or(DEFAULT_SUBJECT);
    let mut title = format!("{subject} Prices ({CURRENCY_PREFIX}/kg)");
    if let Some(region) = filters.region() {
        title.push_str(" - ");
        title.push_str(region);
    }
    title
}

/// Labels and values handed to the charting library for one redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// The series is already chronological; dates that fail to parse keep
    /// their raw text as the label.
    pub fn from_series(series: &Series, filters: &Filters) -> Self {
        let points = series.points();
        Self {
            title: chart_title(filters),
            labels: points
                .iter()
                .map(|p| p.day().map(|d| day_month_label(&d)).unwrap_or_else(|| p.date.clone()))
                .collect(),
            values: points.iter().map(|p| p.price).collect(),
        }
    }
}

/// Line chart configuration in Chart.js terms. The JS glue adds the
/// ₹-prefixed tooltip and tick callbacks from `currencyPrefix`.
pub fn chart_config() -> Value {
    json!({
        "type": "line",
        "currencyPrefix": CURRENCY_PREFIX,
        "dataset": {
            "label": "Price (₹/kg)",
            "data": [],
            "borderColor": "#4CAF50",
            "backgroundColor": "rgba(76, 175, 80, 0.1)",
            "borderWidth": 3,
            "fill": true,
            "tension": 0.4,
            "stepped": false,
            "pointRadius": 5,
            "pointHoverRadius": 7,
            "pointBackgroundColor": "#4CAF50",
            "pointBorderColor": "#fff",
            "pointBorderWidth": 2,
            "pointHoverBackgroundColor": "#2d5016",
            "pointHoverBorderColor": "#fff"
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": {
                "legend": {
                    "display": true,
                    "position": "top",
                    "labels": {
                        "font": { "size": 14, "weight": "bold" },
                        "color": "#2d5016",
                        "padding": 15
                    }
                },
                "tooltip": {
                    "enabled": true,
                    "mode": "index",
                    "intersect": false,
                    "backgroundColor": "rgba(45, 80, 22, 0.95)",
                    "titleColor": "#fff",
                    "bodyColor": "#fff",
                    "borderColor": "#4CAF50",
                    "borderWidth": 1,
                    "padding": 12,
                    "displayColors": true
                }
            },
            "scales": {
                "x": {
                    "display": true,
                    "grid": { "display": false },
                    "ticks": { "font": { "size": 12 }, "color": "#666" }
                },
                "y": {
                    "display": true,
                    "beginAtZero": false,
                    "grid": { "color": "rgba(0, 0, 0, 0.05)", "drawBorder": false },
                    "ticks": { "font": { "size": 12 }, "color": "#666" }
                }
            },
            "interaction": { "mode": "nearest", "axis": "x", "intersect": false }
        }
    })
}

/// Where the chart lives in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartMount {
    /// CSS selector of the placeholder container
    pub container_selector: String,
    /// id of the canvas inside the container
    pub canvas_id: String,
}

impl ChartMount {
    pub fn new(container_selector: impl Into<String>, canvas_id: impl Into<String>) -> Self {
        Self {
            container_selector: container_selector.into(),
            canvas_id: canvas_id.into(),
        }
    }
}

/// Opaque id of a live chart instance inside a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u32);

/// Drawing operations the chart handle needs from a charting library.
pub trait ChartBackend {
    /// Whether the mount container is present in the document.
    fn mount_exists(&self, mount: &ChartMount) -> bool;
    /// Whether the instance still draws into a canvas that is in the document.
    fn is_attached(&self, handle: ChartHandle) -> bool;
    fn create(&mut self, mount: &ChartMount, config: &Value) -> Result<ChartHandle, RenderError>;
    fn destroy(&mut self, handle: ChartHandle);
    fn update(&mut self, handle: ChartHandle, data: &ChartSeries) -> Result<(), RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    Uninitialized,
    Ready(ChartHandle),
}

/// Owning handle for the dashboard's single price chart.
pub struct PriceChart<B: ChartBackend> {
    mount: ChartMount,
    config: Value,
    backend: B,
    state: ChartState,
}

impl<B: ChartBackend> PriceChart<B> {
    pub fn new(mount: ChartMount, backend: B) -> Self {
        Self {
            mount,
            config: chart_config(),
            backend,
            state: ChartState::Uninitialized,
        }
    }

    pub fn state(&self) -> ChartState {
        self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Idempotent. Reuses the live instance; if its canvas was rebuilt the
    /// stale instance is destroyed before a new one is created.
    pub fn initialize(&mut self) -> Result<ChartHandle, RenderError> {
        if let ChartState::Ready(handle) = self.state {
            if self.backend.is_attached(handle) {
                return Ok(handle);
            }
            log::debug!("[Mandi] chart {} lost its canvas, recreating", handle.0);
            self.backend.destroy(handle);
            self.state = ChartState::Uninitialized;
        }
        if !self.backend.mount_exists(&self.mount) {
            return Err(RenderError::RenderTargetMissing(
                self.mount.container_selector.clone(),
            ));
        }
        let handle = self.backend.create(&self.mount, &self.config)?;
        self.state = ChartState::Ready(handle);
        Ok(handle)
    }

    /// Replace the chart's labels and data and request a redraw.
    pub fn render(&mut self, series: &Series, filters: &Filters) -> Result<ChartSeries, RenderError> {
        let handle = self.initialize()?;
        let data = ChartSeries::from_series(series, filters);
        self.backend.update(handle, &data)?;
        Ok(data)
    }
}
