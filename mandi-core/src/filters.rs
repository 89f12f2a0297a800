//! The filter record read from the dashboard form.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// DOM identifiers of the filter inputs.
pub mod ids {
    pub const COMMODITY: &str = "commodity";
    pub const STATE: &str = "state";
    pub const DISTRICT: &str = "district";
    pub const MARKET: &str = "market";
    pub const DATE_FROM: &str = "dateFrom";
    /// The price sort select is named `price` in the page markup.
    pub const PRICE_SORT: &str = "price";
}

/// Current filter selection. An empty string means "no constraint".
///
/// Values are passed through verbatim; there is no validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    pub commodity: String,
    pub state: String,
    pub district: String,
    pub market: String,
    pub date_from: String,
    pub price_sort: String,
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Filters {
    pub fn commodity(&self) -> Option<&str> {
        non_empty(&self.commodity)
    }

    pub fn state(&self) -> Option<&str> {
        non_empty(&self.state)
    }

    pub fn district(&self) -> Option<&str> {
        non_empty(&self.district)
    }

    pub fn market(&self) -> Option<&str> {
        non_empty(&self.market)
    }

    pub fn date_from(&self) -> Option<&str> {
        non_empty(&self.date_from)
    }

    /// Most specific geographic constraint: district, then state.
    pub fn region(&self) -> Option<&str> {
        self.district().or_else(|| self.state())
    }

    /// True when no field constrains anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Anything that can answer "what is the current value of the input with this id".
pub trait FormSource {
    /// `None` when no such element exists.
    fn value_of(&self, id: &str) -> Option<String>;
}

impl FormSource for HashMap<String, String> {
    fn value_of(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl FormSource for BTreeMap<String, String> {
    fn value_of(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// Read the filter record from a form. Missing elements read as empty strings.
pub fn read_filters(form: &impl FormSource) -> Filters {
    let read = |id: &str| form.value_of(id).unwrap_or_default();
    Filters {
        commodity: read(ids::COMMODITY),
        state: read(ids::STATE),
        district: read(ids::DISTRICT),
        market: read(ids::MARKET),
        date_from: read(ids::DATE_FROM),
        price_sort: read(ids::PRICE_SORT),
    }
}
