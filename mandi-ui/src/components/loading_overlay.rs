//! Loading overlay drawn on top of the chart.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingOverlayProps {
    pub message: String,
}

/// Translucent cover with a message; the content underneath stays mounted.
#[component]
pub fn LoadingOverlay(props: LoadingOverlayProps) -> Element {
    rsx! {
        div {
            class: "loading-overlay",
            style: "position: absolute; inset: 0; display: flex; justify-content: center; align-items: center; background: rgba(255, 255, 255, 0.8); color: #2d5016; font-weight: bold;",
            "{props.message}"
        }
    }
}
