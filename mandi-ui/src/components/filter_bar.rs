//! Filter inputs and the Go button.

use crate::form::read_dom_filters;
use dioxus::prelude::*;
use mandi_core::filters::ids;
use mandi_core::Filters;

const COMMODITIES: [&str; 6] = ["Tomato", "Onion", "Potato", "Cabbage", "Cauliflower", "Brinjal"];

#[derive(Props, Clone, PartialEq)]
pub struct FilterBarProps {
    /// Called with the filters read from the form when Go is pressed
    pub on_apply: EventHandler<Filters>,
}

/// Inputs are read by id when Go is pressed, not tracked per keystroke.
#[component]
pub fn FilterBar(props: FilterBarProps) -> Element {
    let on_apply = props.on_apply;
    let on_go = move |_evt: Event<MouseData>| {
        let filters = read_dom_filters();
        log::info!("[Mandi] applying filters {:?}", filters);
        on_apply.call(filters);
    };

    rsx! {
        div {
            class: "filter-bar",
            style: "display: flex; flex-wrap: wrap; gap: 8px; align-items: center; margin: 8px 0 16px;",
            select {
                id: ids::COMMODITY,
                option { value: "", "All Commodities" }
                for commodity in COMMODITIES {
                    option { key: "{commodity}", value: "{commodity}", "{commodity}" }
                }
            }
            input { id: ids::STATE, r#type: "text", placeholder: "State" }
            input { id: ids::DISTRICT, r#type: "text", placeholder: "District" }
            input { id: ids::MARKET, r#type: "text", placeholder: "Market" }
            input { id: ids::DATE_FROM, r#type: "date" }
            select {
                id: ids::PRICE_SORT,
                option { value: "", "Sort by Price" }
                option { value: "low-high", "Low to High" }
                option { value: "high-low", "High to Low" }
            }
            button {
                style: "padding: 6px 16px; background: #4b753b; color: #fff; border: none; border-radius: 4px; cursor: pointer;",
                onclick: on_go,
                "Go"
            }
        }
    }
}
