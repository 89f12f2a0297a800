//! The mandi map area.

use super::NoticeBox;
use crate::map_binding::MapBinding;
use crate::state::{AppState, Services};
use dioxus::prelude::*;
use mandi_core::map::MapOptions;
use mandi_core::view::{map_notice, ViewState};
use mandi_core::RenderError;
use std::cell::RefCell;
use std::rc::Rc;

pub const MAP_CONTAINER_ID: &str = "mandiMap";

/// Shows a notice while loading or on failure, otherwise the map with one
/// clustered marker per location.
#[component]
pub fn MandiMap() -> Element {
    let state = use_context::<AppState>();
    let services = use_context::<Services>();
    let binding: Rc<RefCell<Option<MapBinding>>> = use_hook(|| Rc::new(RefCell::new(None)));

    use_effect({
        let binding = binding.clone();
        let options = MapOptions::from_config(&services.config.map);
        move || {
            let view = state.map_view.read();
            let mut slot = binding.borrow_mut();
            let ViewState::Ready(set) = &*view else {
                // The container is gone; release the old map
                slot.take();
                return;
            };
            if slot.is_some() {
                return;
            }
            match MapBinding::attach(MAP_CONTAINER_ID, &options, set.locations.clone()) {
                Ok(bound) => {
                    log::info!(
                        "[Mandi] map ready with {} markers, {} records skipped",
                        bound.marker_count(),
                        set.skipped
                    );
                    *slot = Some(bound);
                }
                Err(RenderError::RenderTargetMissing(target)) => {
                    log::error!("[Mandi] map container {} missing, render skipped", target)
                }
                Err(e) => log::error!("[Mandi] map failed to start: {}", e),
            }
        }
    });

    use_drop(move || {
        binding.borrow_mut().take();
    });

    let notice = map_notice(&*state.map_view.read());

    rsx! {
        div {
            class: "map-section",
            if let Some(notice) = notice {
                NoticeBox { notice }
            } else {
                div {
                    id: MAP_CONTAINER_ID,
                    style: "width: 100%; height: 500px; border-radius: 8px;",
                }
            }
        }
    }
}
