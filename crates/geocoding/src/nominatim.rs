use foundation::math::GeoPoint;
use serde::Deserialize;

use crate::candidate::Candidate;
use crate::error::ResolveError;
use crate::provider::{GeocodeProvider, ProviderRequest};

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = concat!("massing-wizard/", env!("CARGO_PKG_VERSION"));

/// OpenStreetMap Nominatim `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimProvider {
    pub base_url: String,
    pub user_agent: String,
    pub limit: u32,
}

impl Default for NominatimProvider {
    fn default() -> Self {
        Self {
            base_url: NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            limit: 5,
        }
    }
}

// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    #[serde(default)]
    place_id: Option<serde_json::Value>,
    lat: String,
    lon: String,
    display_name: String,
}

impl GeocodeProvider for NominatimProvider {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    fn request(&self, address: &str) -> ProviderRequest {
        ProviderRequest {
            url: self.base_url.clone(),
            query: vec![
                ("q", address.to_string()),
                ("format", "json".to_string()),
                ("limit", self.limit.to_string()),
            ],
            headers: vec![("User-Agent", self.user_agent.clone())],
        }
    }

    fn parse_response(&self, body: &str) -> Result<Vec<Candidate>, ResolveError> {
        let places: Vec<Place> =
            serde_json::from_str(body).map_err(|e| ResolveError::Decode(e.to_string()))?;
        if places.is_empty() {
            return Err(ResolveError::ZeroResults);
        }

        places
            .into_iter()
            .map(|p| {
                let lat = parse_coord(&p.lat)?;
                let lon = parse_coord(&p.lon)?;
                Ok(Candidate {
                    formatted_address: p.display_name,
                    location: GeoPoint::new(lat, lon),
                    place_id: p.place_id.map(|v| match v {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    }),
                })
            })
            .collect()
    }
}

fn parse_coord(s: &str) -> Result<f64, ResolveError> {
    s.trim()
        .parse()
        .map_err(|_| ResolveError::Decode(format!("bad coordinate {s:?}")))
}
