//! Tagged view state shared by the chart panel and the map, with the copy
//! each state presents.

use crate::filters::Filters;
use crate::insight;
use crate::price::Series;

/// Where the series on screen came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Live,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceView {
    pub series: Series,
    pub origin: DataOrigin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Empty,
    Error(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warning,
    Error,
}

/// A message box shown in place of (or over) the chart or map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub headline: String,
    pub detail: Option<String>,
}

impl Notice {
    fn new(tone: Tone, headline: &str, detail: Option<String>) -> Self {
        Self {
            tone,
            headline: headline.to_string(),
            detail,
        }
    }
}

pub const LOADING_PRICES: &str = "Loading market data...";
pub const NO_DATA_HEADLINE: &str = "No data available";
pub const NO_DATA_DETAIL: &str = "Please adjust your filters and try again";
pub const PRICES_ERROR: &str = "Error loading data";
pub const LOADING_LOCATIONS: &str = "Loading market locations...";
pub const LOCATIONS_ERROR: &str = "Error loading market locations";

impl ViewState<PriceView> {
    /// `None` when the chart itself should be visible without a message.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            ViewState::Loading => Some(Notice::new(Tone::Info, LOADING_PRICES, None)),
            ViewState::Ready(_) => None,
            ViewState::Empty => Some(Notice::new(
                Tone::Warning,
                NO_DATA_HEADLINE,
                Some(NO_DATA_DETAIL.to_string()),
            )),
            ViewState::Error(message) => {
                Some(Notice::new(Tone::Error, PRICES_ERROR, Some(message.clone())))
            }
        }
    }

    /// The canvas stays mounted while loading so the overlay sits over the
    /// previous drawing.
    pub fn shows_chart(&self) -> bool {
        matches!(self, ViewState::Loading | ViewState::Ready(_))
    }

    /// Insight sentence for the current state. Always a sentence, never blank.
    pub fn insight(&self, filters: &Filters) -> String {
        match self {
            ViewState::Ready(view) => insight::compute(view.series.points(), filters),
            ViewState::Loading => insight::INSUFFICIENT_DATA.to_string(),
            ViewState::Empty | ViewState::Error(_) => insight::NO_DATA.to_string(),
        }
    }
}

/// Notice for the map area; `None` once the map is drawn.
pub fn map_notice<T>(state: &ViewState<T>) -> Option<Notice> {
    match state {
        ViewState::Loading => Some(Notice::new(Tone::Info, LOADING_LOCATIONS, None)),
        ViewState::Ready(_) => None,
        ViewState::Empty => Some(Notice::new(
            Tone::Error,
            LOCATIONS_ERROR,
            Some("No mandi locations found".to_string()),
        )),
        ViewState::Error(message) => {
            Some(Notice::new(Tone::Error, LOCATIONS_ERROR, Some(message.clone())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::PricePoint;

    fn ready(prices: &[f64]) -> ViewState<PriceView> {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, price)| PricePoint {
                date: format!("2024-10-{:02}", i + 1),
                price: *price,
                commodity: "Onion".to_string(),
                location: "Maharashtra".to_string(),
            })
            .collect();
        ViewState::Ready(PriceView {
            series: Series::new(points).unwrap(),
            origin: DataOrigin::Live,
        })
    }

    #[test]
    fn default_is_loading() {
        let state: ViewState<PriceView> = ViewState::default();
        assert_eq!(state, ViewState::Loading);
        assert_eq!(state.notice().unwrap().headline, LOADING_PRICES);
        assert!(state.shows_chart());
    }

    #[test]
    fn empty_state_copy() {
        let state: ViewState<PriceView> = ViewState::Empty;
        let notice = state.notice().unwrap();
        assert_eq!(notice.headline, "No data available");
        assert_eq!(notice.detail.as_deref(), Some("Please adjust your filters and try again"));
        assert!(!state.shows_chart());
        assert_eq!(state.insight(&Filters::default()), "No data to display.");
    }

    #[test]
    fn error_state_copy() {
        let state: ViewState<PriceView> = ViewState::Error("offline".to_string());
        let notice = state.notice().unwrap();
        assert_eq!(notice.tone, Tone::Error);
        assert_eq!(notice.headline, "Error loading data");
        assert_eq!(notice.detail.as_deref(), Some("offline"));
    }

    #[test]
    fn ready_state_shows_chart_and_insight() {
        let state = ready(&[10.0, 20.0]);
        assert!(state.notice().is_none());
        assert!(state.shows_chart());
        assert!(state.insight(&Filters::default()).contains("increased by 100.0%"));
        assert_eq!(ready(&[10.0]).insight(&Filters::default()), insight::INSUFFICIENT_DATA);
    }

    #[test]
    fn map_notices() {
        let loading: ViewState<()> = ViewState::Loading;
        assert_eq!(map_notice(&loading).unwrap().headline, "Loading market locations...");
        let failed: ViewState<()> = ViewState::Error("timeout".to_string());
        let notice = map_notice(&failed).unwrap();
        assert_eq!(notice.headline, LOCATIONS_ERROR);
        assert_eq!(notice.detail.as_deref(), Some("timeout"));
        assert!(map_notice(&ViewState::Ready(())).is_none());
    }
}
