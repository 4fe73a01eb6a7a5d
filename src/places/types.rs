//! Place candidate definitions

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// One place record returned by the search service, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceCandidate {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub place_id: String,
    pub location: Option<LatLng>,
}

impl PlaceCandidate {
    pub fn new(name: impl Into<String>, place_id: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            formatted_address: None,
            place_id: place_id.into(),
            location: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.formatted_address = Some(address.into());
        self
    }

    pub fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.location = Some(LatLng { lat, lng });
        self
    }
}

/// Wire shape of a Text Search response
#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResponse {
    #[serde(default)]
    pub results: Option<Vec<RawPlace>>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlace {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub place_id: String,
    /// Kept loose so a bad coordinate only drops the location
    pub geometry: Option<serde_json::Value>,
}

impl From<RawPlace> for PlaceCandidate {
    fn from(raw: RawPlace) -> Self {
        Self {
            name: raw.name,
            formatted_address: raw.formatted_address,
            place_id: raw.place_id,
            location: raw
                .geometry
                .as_ref()
                .and_then(|g| g.get("location"))
                .and_then(|l| serde_json::from_value(l.clone()).ok()),
        }
    }
}
