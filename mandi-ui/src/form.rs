//! The filter form as rendered in the document.

use mandi_core::filters::{read_filters, FormSource};
use mandi_core::Filters;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement, HtmlSelectElement};

/// Reads input and select values by element id.
pub struct DomForm {
    document: Document,
}

impl DomForm {
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }
}

impl FormSource for DomForm {
    fn value_of(&self, id: &str) -> Option<String> {
        let element = self.document.get_element_by_id(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        element.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
    }
}

/// Current filters from the page; all empty when there is no document.
pub fn read_dom_filters() -> Filters {
    match DomForm::from_window() {
        Some(form) => read_filters(&form),
        None => Filters::default(),
    }
}
