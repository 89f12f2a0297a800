//! Dioxus RSX components for the mandi dashboard.

mod chart_panel;
mod filter_bar;
mod insight_line;
mod loading_overlay;
mod mandi_map;
mod notice_box;

pub use chart_panel::{ChartPanel, CANVAS_ID, CHART_SELECTOR};
pub use filter_bar::FilterBar;
pub use insight_line::InsightLine;
pub use loading_overlay::LoadingOverlay;
pub use mandi_map::{MandiMap, MAP_CONTAINER_ID};
pub use notice_box::NoticeBox;
