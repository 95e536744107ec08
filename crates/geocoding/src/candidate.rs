use foundation::math::GeoPoint;
use serde::{Deserialize, Serialize};

/// One geocoding result offered to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub formatted_address: String,
    pub location: GeoPoint,
    /// Provider-specific identifier, when the provider returns one.
    #[serde(default)]
    pub place_id: Option<String>,
}

impl Candidate {
    pub fn new(formatted_address: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            formatted_address: formatted_address.into(),
            location,
            place_id: None,
        }
    }
}
