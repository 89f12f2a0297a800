//! Fetch sequencing and the price fallback policy.
//!
//! Every fetch cycle takes a [`RequestTicket`]; when its response arrives it
//! is applied only if no newer cycle has started since. The outcome of a
//! fetch is folded into a [`ViewState`] by [`resolve_fetch`].

use crate::error::FetchError;
use crate::filters::Filters;
use crate::price::{PricePoint, Series};
use crate::query::PriceQuery;
use crate::source::PriceSource;
use crate::synthetic::{fallback_series, SYNTHETIC_DAYS};
use crate::view::{DataOrigin, PriceView, ViewState};
use chrono::NaiveDate;
use rand::Rng;

/// Id of one fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Issues monotonically increasing tickets; only the latest is current.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// What to show when the store cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackPolicy {
    /// Substitute a synthetic series instead of showing the error
    pub enabled: bool,
    /// Length of the synthetic series in days
    pub days: usize,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            days: SYNTHETIC_DAYS,
        }
    }
}

/// Run the query with the loading indicator on for the remote call only.
pub async fn fetch_prices<S, F>(
    source: &S,
    query: &PriceQuery,
    mut set_loading: F,
) -> Result<Vec<PricePoint>, FetchError>
where
    S: PriceSource,
    F: FnMut(bool),
{
    set_loading(true);
    let result = source.fetch_prices(query).await;
    set_loading(false);
    match &result {
        Ok(rows) => log::info!("[Mandi] {} price rows from {}", rows.len(), query.collection),
        Err(err) => log::warn!("[Mandi] price query on {} failed: {}", query.collection, err),
    }
    result
}

/// Fold a fetch result into the chart view.
///
/// Rows become a live series, zero rows the empty state. Errors fall back to
/// a synthetic series when the policy allows it, otherwise they surface.
pub fn resolve_fetch<R: Rng>(
    result: Result<Vec<PricePoint>, FetchError>,
    filters: &Filters,
    policy: FallbackPolicy,
    today: NaiveDate,
    rng: &mut R,
) -> ViewState<PriceView> {
    let err = match result.and_then(Series::new) {
        Ok(series) => {
            return ViewState::Ready(PriceView {
                series,
                origin: DataOrigin::Live,
            })
        }
        Err(FetchError::EmptyResult) => return ViewState::Empty,
        Err(err) => err,
    };
    if !policy.enabled {
        return ViewState::Error(err.to_string());
    }
    log::warn!("[Mandi] using synthetic prices: {}", err);
    ViewState::Ready(PriceView {
        series: fallback_series(filters, policy.days, today, rng),
        origin: DataOrigin::Synthetic,
    })
}

/// Placeholder chart drawn before the first fetch completes.
pub fn placeholder_view<R: Rng>(
    filters: &Filters,
    policy: FallbackPolicy,
    today: NaiveDate,
    rng: &mut R,
) -> PriceView {
    PriceView {
        series: fallback_series(filters, policy.days, today, rng),
        origin: DataOrigin::Synthetic,
    }
}

/// One complete price cycle: query, fetch, fold.
///
/// `is_current` is asked once the store answers; when a newer cycle has
/// started in the meantime the response is dropped and `None` returned.
#[allow(clippy::too_many_arguments)]
pub async fn run_price_cycle<S, F, C, R>(
    source: &S,
    collection: &str,
    filters: &Filters,
    policy: FallbackPolicy,
    today: NaiveDate,
    rng: &mut R,
    set_loading: F,
    is_current: C,
) -> Option<ViewState<PriceView>>
where
    S: PriceSource,
    F: FnMut(bool),
    C: FnOnce() -> bool,
    R: Rng,
{
    let query = PriceQuery::from_filters(collection, filters);
    let result = fetch_prices(source, &query, set_loading).await;
    if !is_current() {
        log::debug!("[Mandi] discarding stale price response from {}", collection);
        return None;
    }
    Some(resolve_fetch(result, filters, policy, today, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::MAX_SYNTHETIC_DAYS;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    struct StaticPrices {
        result: Result<Vec<PricePoint>, FetchError>,
        seen: RefCell<Vec<PriceQuery>>,
    }

    impl StaticPrices {
        fn new(result: Result<Vec<PricePoint>, FetchError>) -> Self {
            Self {
                result,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl PriceSource for StaticPrices {
        async fn fetch_prices(&self, query: &PriceQuery) -> Result<Vec<PricePoint>, FetchError> {
            self.seen.borrow_mut().push(query.clone());
            self.result.clone()
        }
    }

    fn point(date: &str, price: f64) -> PricePoint {
        PricePoint {
            date: date.to_string(),
            price,
            commodity: "Tomato".to_string(),
            location: "Maharashtra".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 19).unwrap()
    }

    #[test]
    fn sequencer_discards_stale_ticket() {
        let mut sequencer = RequestSequencer::default();
        let first = sequencer.issue();
        assert!(sequencer.is_current(first));
        let second = sequencer.issue();
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn rows_become_live_series_sorted() {
        let rows = vec![point("2024-10-06", 2.0), point("2024-10-05", 1.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let state = resolve_fetch(Ok(rows), &Filters::default(), FallbackPolicy::default(), today(), &mut rng);
        let view = state.ready().unwrap();
        assert_eq!(view.origin, DataOrigin::Live);
        assert_eq!(view.series.points()[0].price, 1.0);
    }

    #[test]
    fn zero_rows_is_empty_state() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = resolve_fetch(Ok(Vec::new()), &Filters::default(), FallbackPolicy::default(), today(), &mut rng);
        assert_eq!(state, ViewState::Empty);
    }

    #[test]
    fn error_falls_back_to_synthetic() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = Err(FetchError::StoreUnavailable("offline".to_string()));
        let state = resolve_fetch(err, &Filters::default(), FallbackPolicy::default(), today(), &mut rng);
        let view = state.ready().unwrap();
        assert_eq!(view.origin, DataOrigin::Synthetic);
        assert_eq!(view.series.len(), 30);
        assert_eq!(view.series.points()[29].day(), Some(today()));
    }

    #[test]
    fn oversized_fallback_length_is_capped() {
        let mut rng = StdRng::seed_from_u64(1);
        let policy = FallbackPolicy {
            enabled: true,
            days: 200_000_000,
        };
        let err = Err(FetchError::StoreUnavailable("offline".to_string()));
        let state = resolve_fetch(err, &Filters::default(), policy, today(), &mut rng);
        assert_eq!(state.ready().unwrap().series.len(), MAX_SYNTHETIC_DAYS);
    }

    #[test]
    fn error_surfaces_when_fallback_disabled() {
        let mut rng = StdRng::seed_from_u64(1);
        let policy = FallbackPolicy {
            enabled: false,
            days: 30,
        };
        let err = Err(FetchError::MalformedResponse("bad json".to_string()));
        let state = resolve_fetch(err, &Filters::default(), policy, today(), &mut rng);
        assert_eq!(state, ViewState::Error("malformed store response: bad json".to_string()));
    }

    #[test]
    fn loading_toggles_around_remote_call() {
        let source = StaticPrices::new(Ok(vec![point("2024-10-05", 1.0)]));
        let mut calls = Vec::new();
        let query = PriceQuery::from_filters("market_prices", &Filters::default());
        let rows = block_on(fetch_prices(&source, &query, |on| calls.push(on))).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(calls, vec![true, false]);
    }

    #[test]
    fn loading_cleared_on_failure() {
        let source = StaticPrices::new(Err(FetchError::StoreUnavailable("down".to_string())));
        let mut calls = Vec::new();
        let query = PriceQuery::from_filters("market_prices", &Filters::default());
        assert!(block_on(fetch_prices(&source, &query, |on| calls.push(on))).is_err());
        assert_eq!(calls, vec![true, false]);
    }

    #[test]
    fn cycle_builds_query_from_filters() {
        let source = StaticPrices::new(Ok(vec![point("2024-10-05", 10.0), point("2024-10-06", 20.0)]));
        let filters = Filters {
            commodity: "Tomato".to_string(),
            price_sort: "desc".to_string(),
            ..Filters::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let state = block_on(run_price_cycle(
            &source,
            "market_prices",
            &filters,
            FallbackPolicy::default(),
            today(),
            &mut rng,
            |_| {},
            || true,
        ))
        .unwrap();
        assert!(state.insight(&filters).contains("increased by 100.0%"));
        let seen = source.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].constraints.len(), 1);
        assert_eq!(seen[0].constraints[0].field, "commodity");
    }

    /// Answers each fetch, in call order, with whatever its gate is fed.
    struct GatedPrices {
        gates: RefCell<VecDeque<oneshot::Receiver<Result<Vec<PricePoint>, FetchError>>>>,
    }

    impl PriceSource for GatedPrices {
        async fn fetch_prices(&self, _query: &PriceQuery) -> Result<Vec<PricePoint>, FetchError> {
            let gate = self.gates.borrow_mut().pop_front();
            match gate {
                Some(gate) => gate
                    .await
                    .unwrap_or_else(|_| Err(FetchError::StoreUnavailable("gate dropped".to_string()))),
                None => Err(FetchError::StoreUnavailable("no gate".to_string())),
            }
        }
    }

    #[test]
    fn older_cycle_finishing_last_is_dropped() {
        let (old_tx, old_rx) = oneshot::channel();
        let (new_tx, new_rx) = oneshot::channel();
        let source = GatedPrices {
            gates: RefCell::new(VecDeque::from(vec![old_rx, new_rx])),
        };
        let sequencer = RefCell::new(RequestSequencer::default());
        let in_flight = Cell::new(0usize);
        let set_loading = |on: bool| in_flight.set(if on { in_flight.get() + 1 } else { in_flight.get() - 1 });
        let onion = Filters {
            commodity: "Onion".to_string(),
            ..Filters::default()
        };
        let tomato = Filters {
            commodity: "Tomato".to_string(),
            ..Filters::default()
        };

        let older = async {
            let ticket = sequencer.borrow_mut().issue();
            let mut rng = StdRng::seed_from_u64(1);
            run_price_cycle(
                &source,
                "market_prices",
                &onion,
                FallbackPolicy::default(),
                today(),
                &mut rng,
                set_loading,
                || sequencer.borrow().is_current(ticket),
            )
            .await
        };
        let newer = async {
            let ticket = sequencer.borrow_mut().issue();
            let mut rng = StdRng::seed_from_u64(2);
            run_price_cycle(
                &source,
                "market_prices",
                &tomato,
                FallbackPolicy::default(),
                today(),
                &mut rng,
                set_loading,
                || sequencer.borrow().is_current(ticket),
            )
            .await
        };
        let answers = async {
            assert_eq!(in_flight.get(), 2);
            new_tx
                .send(Ok(vec![point("2024-10-05", 10.0), point("2024-10-06", 15.0)]))
                .unwrap();
            old_tx.send(Ok(vec![point("2024-10-06", 99.0)])).unwrap();
        };

        let (older, newer, ()) = block_on(async { futures::join!(older, newer, answers) });
        assert_eq!(older, None);
        let newer = newer.unwrap();
        assert!(newer.insight(&tomato).starts_with("Tomato prices have increased by 50.0%"));
        assert_eq!(in_flight.get(), 0);
    }

    #[test]
    fn placeholder_is_synthetic() {
        let mut rng = StdRng::seed_from_u64(2);
        let view = placeholder_view(&Filters::default(), FallbackPolicy::default(), today(), &mut rng);
        assert_eq!(view.origin, DataOrigin::Synthetic);
        assert_eq!(view.series.len(), SYNTHETIC_DAYS);
    }
}
