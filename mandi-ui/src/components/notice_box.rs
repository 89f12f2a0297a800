//! Message box for empty, error and loading states.

use dioxus::prelude::*;
use mandi_core::view::{Notice, Tone};

#[derive(Props, Clone, PartialEq)]
pub struct NoticeBoxProps {
    pub notice: Notice,
}

fn palette(tone: Tone) -> &'static str {
    match tone {
        Tone::Info => "background: #f8f9fa; color: #2d5016; border: 1px solid #e0e0e0;",
        Tone::Warning => "background: #FFF8E1; color: #8D6E00; border: 1px solid #FFE082;",
        Tone::Error => "background: #FFEBEE; color: #C62828; border: 1px solid #EF9A9A;",
    }
}

/// Headline with an optional detail line, styled by tone.
#[component]
pub fn NoticeBox(props: NoticeBoxProps) -> Element {
    let style = format!(
        "padding: 24px 16px; margin: 8px 0; border-radius: 4px; text-align: center; {}",
        palette(props.notice.tone)
    );
    rsx! {
        div {
            class: "notice",
            style: "{style}",
            strong { "{props.notice.headline}" }
            if let Some(detail) = props.notice.detail.clone() {
                p {
                    style: "margin: 8px 0 0; font-size: 13px;",
                    "{detail}"
                }
            }
        }
    }
}
