//! Chart and map backends that drive the JS glue.

use crate::js_bridge::{call_bridge, element_exists, selector_exists, CHARTS, MAPS};
use mandi_core::chart::{ChartBackend, ChartHandle, ChartMount, ChartSeries};
use mandi_core::map::{ClusterStyle, MapBackend, MapHandle, MapOptions, MarkerSpec};
use mandi_core::RenderError;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    serde_json::to_string(value).map_err(|e| RenderError::Encode(e.to_string()))
}

fn handle_id(value: JsValue, what: &str) -> Result<u32, RenderError> {
    value
        .as_f64()
        .map(|id| id as u32)
        .ok_or_else(|| RenderError::Js(format!("{what} returned no id")))
}

/// Chart.js through `window.MandiCharts`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsChartBackend;

impl ChartBackend for JsChartBackend {
    fn mount_exists(&self, mount: &ChartMount) -> bool {
        selector_exists(&mount.container_selector)
    }

    fn is_attached(&self, handle: ChartHandle) -> bool {
        call_bridge(CHARTS, "isAttached", &[JsValue::from(handle.0)])
            .map(|v| v.as_bool().unwrap_or(false))
            .unwrap_or(false)
    }

    fn create(&mut self, mount: &ChartMount, config: &serde_json::Value) -> Result<ChartHandle, RenderError> {
        let config = encode(config)?;
        let id = call_bridge(
            CHARTS,
            "create",
            &[
                JsValue::from_str(&mount.container_selector),
                JsValue::from_str(&mount.canvas_id),
                JsValue::from(config),
            ],
        )?;
        handle_id(id, "MandiCharts.create").map(ChartHandle)
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if let Err(e) = call_bridge(CHARTS, "destroy", &[JsValue::from(handle.0)]) {
            log::warn!("[Mandi] chart {} destroy failed: {}", handle.0, e);
        }
    }

    fn update(&mut self, handle: ChartHandle, data: &ChartSeries) -> Result<(), RenderError> {
        let data = encode(data)?;
        call_bridge(CHARTS, "update", &[JsValue::from(handle.0), JsValue::from(data)]).map(|_| ())
    }
}

/// Google Maps through `window.MandiMaps`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsMapBackend;

impl MapBackend for JsMapBackend {
    fn container_exists(&self, container_id: &str) -> bool {
        element_exists(container_id)
    }

    fn create_map(&mut self, container_id: &str, options: &MapOptions) -> Result<MapHandle, RenderError> {
        let options = encode(options)?;
        let id = call_bridge(
            MAPS,
            "create",
            &[JsValue::from_str(container_id), JsValue::from(options)],
        )?;
        handle_id(id, "MandiMaps.create").map(MapHandle)
    }

    fn add_clustered_markers(
        &mut self,
        map: MapHandle,
        markers: &[MarkerSpec],
        cluster: &ClusterStyle,
    ) -> Result<(), RenderError> {
        let markers = encode(markers)?;
        let cluster = encode(cluster)?;
        call_bridge(
            MAPS,
            "addMarkers",
            &[JsValue::from(map.0), JsValue::from(markers), JsValue::from(cluster)],
        )
        .map(|_| ())
    }

    fn open_info_window(&mut self, map: MapHandle, marker: usize, content: &str) {
        let args = [
            JsValue::from(map.0),
            JsValue::from(marker as u32),
            JsValue::from_str(content),
        ];
        if let Err(e) = call_bridge(MAPS, "openInfoWindow", &args) {
            log::warn!("[Mandi] info window {} failed to open: {}", marker, e);
        }
    }

    fn close_info_window(&mut self, map: MapHandle, marker: usize) {
        if let Err(e) = call_bridge(
            MAPS,
            "closeInfoWindow",
            &[JsValue::from(map.0), JsValue::from(marker as u32)],
        ) {
            log::warn!("[Mandi] info window {} failed to close: {}", marker, e);
        }
    }

    fn destroy_map(&mut self, map: MapHandle) {
        if let Err(e) = call_bridge(MAPS, "destroy", &[JsValue::from(map.0)]) {
            log::warn!("[Mandi] map {} destroy failed: {}", map.0, e);
        }
    }
}

/// Route marker clicks on `map` to `callback`.
pub fn on_marker_click(map: MapHandle, callback: &Closure<dyn FnMut(u32)>) -> Result<(), RenderError> {
    let callback: &JsValue = callback.as_ref();
    call_bridge(MAPS, "onMarkerClick", &[JsValue::from(map.0), callback.clone()]).map(|_| ())
}
