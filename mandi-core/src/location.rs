//! Mandi locations from the `mandiData` collection.

use crate::error::RecordError;
use serde::{Deserialize, Serialize};

/// Marker category of a mandi. Anything other than "major" is local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MandiType {
    Major,
    #[default]
    Local,
}

impl MandiType {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(kind) if kind.eq_ignore_ascii_case("major") => MandiType::Major,
            _ => MandiType::Local,
        }
    }
}

/// A mandi with usable coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MandiLocation {
    pub name: String,
    pub commodity: String,
    pub price: Option<f64>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub kind: MandiType,
}

/// Raw fields of a `mandiData` document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationDocument {
    pub name: Option<String>,
    pub commodity: Option<String>,
    pub price: Option<f64>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub kind: Option<String>,
}

/// Zero counts as missing: stored placeholders of 0,0 are not real mandis.
fn coordinate(value: Option<f64>, axis: &str, limit: f64) -> Result<f64, String> {
    match value {
        None => Err(format!("missing {axis}")),
        Some(v) if v == 0.0 || !v.is_finite() => Err(format!("missing {axis}")),
        Some(v) if v.abs() > limit => Err(format!("{axis} {v} out of range")),
        Some(v) => Ok(v),
    }
}

impl TryFrom<LocationDocument> for MandiLocation {
    type Error = RecordError;

    fn try_from(doc: LocationDocument) -> Result<Self, Self::Error> {
        let name = doc.name.unwrap_or_default();
        let checked = coordinate(doc.latitude, "latitude", 90.0)
            .and_then(|lat| coordinate(doc.longitude, "longitude", 180.0).map(|lng| (lat, lng)));
        let (latitude, longitude) = match checked {
            Ok(pair) => pair,
            Err(reason) => return Err(RecordError::MalformedRecord { name, reason }),
        };
        Ok(MandiLocation {
            name,
            commodity: doc.commodity.unwrap_or_default(),
            price: doc.price,
            address: doc.address.filter(|a| !a.trim().is_empty()),
            latitude,
            longitude,
            kind: MandiType::parse(doc.kind.as_deref()),
        })
    }
}

/// Split documents into usable locations and the per-record rejections.
pub fn partition_locations(docs: Vec<LocationDocument>) -> (Vec<MandiLocation>, Vec<RecordError>) {
    let mut valid = Vec::with_capacity(docs.len());
    let mut skipped = Vec::new();
    for doc in docs {
        match MandiLocation::try_from(doc) {
            Ok(location) => valid.push(location),
            Err(err) => skipped.push(err),
        }
    }
    (valid, skipped)
}

/// Like [`partition_locations`], logging one warning per skipped record.
/// Returns the usable locations and the warnings that were logged.
pub fn valid_locations(docs: Vec<LocationDocument>) -> (Vec<MandiLocation>, Vec<String>) {
    let (valid, skipped) = partition_locations(docs);
    let warnings: Vec<String> = skipped
        .iter()
        .map(|err| {
            let warning = format!("[Mandi] {err}");
            log::warn!("{}", warning);
            warning
        })
        .collect();
    (valid, warnings)
}
