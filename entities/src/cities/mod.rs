use serde::{Deserialize, Serialize};
use shared_kernel::string_key;

string_key!(CityId);

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Read-only catalog entry. Trips embed a copy of the city at the time it was added.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(default)]
    pub is_transport_hub: bool,
}

impl City {
    pub fn new(id: impl Into<CityId>, name: &str, country: &str, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.to_owned(),
            country: country.to_owned(),
            coordinates: Coordinates { lat, lng },
            region: None,
            population: None,
            is_transport_hub: false,
        }
    }
}
