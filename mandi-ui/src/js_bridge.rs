//! Calls into the embedded JS glue.
//!
//! The glue scripts in `assets/js/*.js` are evaluated once at startup and
//! publish `window.MandiCharts` and `window.MandiMaps`. Every call goes
//! through [`call_bridge`], which turns a missing global or a thrown JS
//! exception into a [`RenderError`] instead of a panic.

use js_sys::{Array, Function, Reflect};
use mandi_core::RenderError;
use wasm_bindgen::{JsCast, JsValue};

static PRICE_CHART_JS: &str = include_str!("../assets/js/price-chart.js");
static MANDI_MAP_JS: &str = include_str!("../assets/js/mandi-map.js");

/// Global published by `price-chart.js`.
pub const CHARTS: &str = "MandiCharts";
/// Global published by `mandi-map.js`.
pub const MAPS: &str = "MandiMaps";

/// Evaluate the glue scripts. Call once at app startup.
pub fn load_bridge_scripts() {
    for (name, source) in [("price-chart.js", PRICE_CHART_JS), ("mandi-map.js", MANDI_MAP_JS)] {
        if let Err(e) = js_sys::eval(source) {
            log::error!("[Mandi] failed to load {}: {}", name, describe(&e));
        }
    }
}

/// Best-effort text of a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn js_error(value: JsValue) -> RenderError {
    RenderError::Js(describe(&value))
}

/// Call `window[object][method](...args)`.
pub fn call_bridge(object: &str, method: &str, args: &[JsValue]) -> Result<JsValue, RenderError> {
    let window = web_sys::window().ok_or_else(|| RenderError::LibraryUnavailable("window".to_string()))?;
    let target = Reflect::get(&window, &JsValue::from_str(object)).map_err(js_error)?;
    if target.is_undefined() || target.is_null() {
        return Err(RenderError::LibraryUnavailable(object.to_string()));
    }
    let method_fn: Function = Reflect::get(&target, &JsValue::from_str(method))
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| RenderError::LibraryUnavailable(format!("{object}.{method}")))?;
    let args: Array = args.iter().collect();
    method_fn.apply(&target, &args).map_err(js_error)
}

/// Whether a CSS selector matches anything in the document.
pub fn selector_exists(selector: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(selector).ok().flatten())
        .is_some()
}

/// Whether an element with this id is in the document.
pub fn element_exists(id: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .is_some()
}
