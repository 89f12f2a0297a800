//! Mandi map planning and the owning map session.
//!
//! [`MapSession`] owns one map instance, its clustered markers and their
//! lazily built info windows. Marker clicks go through an
//! [`InfoWindowSwitch`] so at most one info window is open at a time.

use crate::config::MapConfig;
use crate::error::{FetchError, RenderError};
use crate::location::{valid_locations, MandiLocation, MandiType};
use crate::source::LocationSource;
use crate::view::ViewState;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Map constructor options in Google Maps terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub styles: Value,
    pub map_type_control: bool,
    pub street_view_control: bool,
    pub fullscreen_control: bool,
    pub zoom_control: bool,
    /// Name of a `google.maps.ControlPosition` member
    pub zoom_control_position: &'static str,
}

impl MapOptions {
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            center: LatLng {
                lat: config.center_lat,
                lng: config.center_lng,
            },
            zoom: config.zoom,
            styles: theme_styles(),
            map_type_control: false,
            street_view_control: false,
            fullscreen_control: true,
            zoom_control: true,
            zoom_control_position: "RIGHT_BOTTOM",
        }
    }
}

/// Muted base map with green labels and water.
pub fn theme_styles() -> Value {
    json!([
        { "featureType": "all", "elementType": "geometry", "stylers": [{ "color": "#f5f5f5" }] },
        { "featureType": "all", "elementType": "labels.text.fill", "stylers": [{ "color": "#2d5016" }] },
        { "featureType": "water", "elementType": "geometry", "stylers": [{ "color": "#e8f5e9" }] },
        { "featureType": "poi.park", "elementType": "geometry", "stylers": [{ "color": "#e8f5e9" }] },
        { "featureType": "road", "elementType": "geometry", "stylers": [{ "color": "#ffffff" }] }
    ])
}

/// Circle symbol drawn for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcon {
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub stroke_color: &'static str,
    pub stroke_weight: f64,
    pub scale: f64,
}

impl MandiType {
    pub fn icon(self) -> MarkerIcon {
        match self {
            MandiType::Major => MarkerIcon {
                fill_color: "#4b753b",
                fill_opacity: 1.0,
                stroke_color: "#ffffff",
                stroke_weight: 2.0,
                scale: 10.0,
            },
            MandiType::Local => MarkerIcon {
                fill_color: "#66bb6a",
                fill_opacity: 1.0,
                stroke_color: "#ffffff",
                stroke_weight: 2.0,
                scale: 8.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub title: String,
    pub icon: MarkerIcon,
}

impl MarkerSpec {
    pub fn for_location(location: &MandiLocation) -> Self {
        Self {
            position: LatLng {
                lat: location.latitude,
                lng: location.longitude,
            },
            title: location.name.clone(),
            icon: location.kind.icon(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStyle {
    pub text_color: &'static str,
    pub text_size: u32,
    pub height: u32,
    pub width: u32,
    pub background_position: &'static str,
    pub background_color: &'static str,
}

impl Default for ClusterStyle {
    fn default() -> Self {
        Self {
            text_color: "#ffffff",
            text_size: 14,
            height: 40,
            width: 40,
            background_position: "center",
            background_color: "#4b753b",
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Info window body: name, commodity and price, optional address.
pub fn info_window_html(location: &MandiLocation) -> String {
    let price = match location.price {
        Some(price) => format!("₹{price}/kg"),
        None => "Price unavailable".to_string(),
    };
    let address = location
        .address
        .as_deref()
        .map(|a| {
            format!(
                r#"<p style="margin: 8px 0 0; color: #666; font-size: 12px;">{}</p>"#,
                escape_html(a)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<div style="padding: 12px; max-width: 200px;"><h3 style="margin: 0 0 8px; color: #2d5016; font-size: 16px;">{name}</h3><div style="margin: 8px 0; padding: 8px; background: #f8f9fa; border-radius: 4px;"><strong style="color: #4b753b;">{commodity}</strong><div style="font-size: 18px; color: #2d5016; margin-top: 4px;">{price}</div></div>{address}</div>"#,
        name = escape_html(&location.name),
        commodity = escape_html(&location.commodity),
        price = price,
        address = address,
    )
}

/// Opaque id of a live map instance inside a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapHandle(pub u32);

/// Map operations the session needs from a maps library.
pub trait MapBackend {
    fn container_exists(&self, container_id: &str) -> bool;
    fn create_map(&mut self, container_id: &str, options: &MapOptions) -> Result<MapHandle, RenderError>;
    fn add_clustered_markers(
        &mut self,
        map: MapHandle,
        markers: &[MarkerSpec],
        cluster: &ClusterStyle,
    ) -> Result<(), RenderError>;
    /// Builds the info window on first use, then opens it on its marker.
    fn open_info_window(&mut self, map: MapHandle, marker: usize, content: &str);
    fn close_info_window(&mut self, map: MapHandle, marker: usize);
    /// Tears the map down with its markers and info windows.
    fn destroy_map(&mut self, map: MapHandle);
}

/// Tracks the single open info window.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InfoWindowSwitch {
    active: Option<usize>,
}

impl InfoWindowSwitch {
    /// Mark `marker` as open; returns the previously open marker to close.
    pub fn activate(&mut self, marker: usize) -> Option<usize> {
        self.active.replace(marker).filter(|previous| *previous != marker)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }
}

/// What the map area currently shows once locations are loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSet {
    pub locations: Vec<MandiLocation>,
    pub skipped: usize,
}

/// Fetch every location document; records without coordinates are dropped
/// with a warning. An empty collection is [`FetchError::EmptyResult`].
pub async fn load_locations<S: LocationSource>(
    source: &S,
    collection: &str,
) -> Result<LocationSet, FetchError> {
    let docs = source.fetch_locations(collection).await?;
    if docs.is_empty() {
        return Err(FetchError::EmptyResult);
    }
    let total = docs.len();
    let (locations, warnings) = valid_locations(docs);
    let skipped = warnings.len();
    log::info!(
        "[Mandi] map: {} of {} locations usable, {} skipped",
        locations.len(),
        total,
        skipped
    );
    Ok(LocationSet { locations, skipped })
}

/// Fold a location load into the map area's state.
pub fn location_view(result: Result<LocationSet, FetchError>) -> ViewState<LocationSet> {
    match result {
        Ok(set) => ViewState::Ready(set),
        Err(FetchError::EmptyResult) => {
            log::warn!("[Mandi] map: no mandi locations found");
            ViewState::Empty
        }
        Err(err) => {
            log::error!("[Mandi] map locations failed: {}", err);
            ViewState::Error(err.to_string())
        }
    }
}

/// Owning handle for the mandi map; dropping it destroys the map.
pub struct MapSession<B: MapBackend> {
    backend: B,
    handle: MapHandle,
    locations: Vec<MandiLocation>,
    info_windows: Vec<Option<String>>,
    switch: InfoWindowSwitch,
}

impl<B: MapBackend> MapSession<B> {
    /// Create the map, then one clustered marker per location.
    pub fn start(
        mut backend: B,
        container_id: &str,
        options: &MapOptions,
        locations: Vec<MandiLocation>,
    ) -> Result<Self, RenderError> {
        if !backend.container_exists(container_id) {
            return Err(RenderError::RenderTargetMissing(format!("#{container_id}")));
        }
        let handle = backend.create_map(container_id, options)?;
        let markers: Vec<MarkerSpec> = locations.iter().map(MarkerSpec::for_location).collect();
        if let Err(err) = backend.add_clustered_markers(handle, &markers, &ClusterStyle::default()) {
            backend.destroy_map(handle);
            return Err(err);
        }
        let info_windows = vec![None; locations.len()];
        Ok(Self {
            backend,
            handle,
            locations,
            info_windows,
            switch: InfoWindowSwitch::default(),
        })
    }

    pub fn handle(&self) -> MapHandle {
        self.handle
    }

    pub fn marker_count(&self) -> usize {
        self.locations.len()
    }

    pub fn open_marker(&self) -> Option<usize> {
        self.switch.active()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Close whichever info window is open, then open this marker's.
    pub fn handle_marker_click(&mut self, marker: usize) {
        if marker >= self.locations.len() {
            log::warn!("[Mandi] click on unknown marker {}", marker);
            return;
        }
        if let Some(previous) = self.switch.activate(marker) {
            self.backend.close_info_window(self.handle, previous);
        }
        let content = self.info_windows[marker]
            .get_or_insert_with(|| info_window_html(&self.locations[marker]));
        self.backend.open_info_window(self.handle, marker, content);
    }
}

impl<B: MapBackend> Drop for MapSession<B> {
    fn drop(&mut self) {
        self.backend.destroy_map(self.handle);
    }
}
