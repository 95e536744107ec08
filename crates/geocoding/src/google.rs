use foundation::math::GeoPoint;
use serde::Deserialize;

use crate::candidate::Candidate;
use crate::error::ResolveError;
use crate::provider::{GeocodeProvider, ProviderRequest};

pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Google Geocoding API (`/maps/api/geocode/json`).
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    pub api_key: String,
    pub base_url: String,
}

impl GoogleProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: GOOGLE_GEOCODE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
    #[serde(default)]
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GeocodeProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn request(&self, address: &str) -> ProviderRequest {
        ProviderRequest {
            url: self.base_url.clone(),
            query: vec![
                ("address", address.to_string()),
                ("key", self.api_key.clone()),
            ],
            headers: Vec::new(),
        }
    }

    fn parse_response(&self, body: &str) -> Result<Vec<Candidate>, ResolveError> {
        let resp: GeocodeResponse =
            serde_json::from_str(body).map_err(|e| ResolveError::Decode(e.to_string()))?;

        match resp.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(ResolveError::ZeroResults),
            _ => {
                return Err(ResolveError::Status {
                    status: resp.status,
                    message: resp.error_message,
                });
            }
        }

        if resp.results.is_empty() {
            return Err(ResolveError::ZeroResults);
        }

        Ok(resp
            .results
            .into_iter()
            .map(|r| Candidate {
                formatted_address: r.formatted_address,
                location: GeoPoint::new(r.geometry.location.lat, r.geometry.location.lng),
                place_id: r.place_id,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::GoogleProvider;
    use crate::error::ResolveError;
    use crate::provider::GeocodeProvider;
    use foundation::math::GeoPoint;
    use pretty_assertions::assert_eq;

    const OK_BODY: &str = r#"{
        "results": [
            {
                "formatted_address": "10 Downing St, London SW1A 2AA, UK",
                "geometry": { "location": { "lat": 51.5033635, "lng": -0.1276248 } },
                "place_id": "ChIJRxzRQcUEdkgRGVaKyzmkgvg"
            },
            {
                "formatted_address": "10 Downing St, Liverpool, UK",
                "geometry": { "location": { "lat": 53.41, "lng": -2.99 } }
            }
        ],
        "status": "OK"
    }"#;

    #[test]
    fn request_carries_address_and_key() {
        let p = GoogleProvider::new("k123");
        let req = p.request("10 Downing St, London, , , UK");
        assert_eq!(req.url, super::GOOGLE_GEOCODE_URL);
        assert_eq!(
            req.query,
            vec![
                ("address", "10 Downing St, London, , , UK".to_string()),
                ("key", "k123".to_string())
            ]
        );
    }

    #[test]
    fn parses_results_in_order() {
        let got = GoogleProvider::new("k").parse_response(OK_BODY).unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].formatted_address, "10 Downing St, London SW1A 2AA, UK");
        assert_eq!(got[0].location, GeoPoint::new(51.5033635, -0.1276248));
        assert_eq!(got[0].place_id.as_deref(), Some("ChIJRxzRQcUEdkgRGVaKyzmkgvg"));
        assert_eq!(got[1].place_id, None);
    }

    #[test]
    fn zero_results_status() {
        let body = r#"{ "results": [], "status": "ZERO_RESULTS" }"#;
        assert_eq!(
            GoogleProvider::new("k").parse_response(body),
            Err(ResolveError::ZeroResults)
        );
    }

    #[test]
    fn failure_status_keeps_reason() {
        let body = r#"{
            "error_message": "You must use an API key to authenticate each request.",
            "results": [],
            "status": "REQUEST_DENIED"
        }"#;
        let err = GoogleProvider::new("").parse_response(body).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Status {
                status: "REQUEST_DENIED".into(),
                message: Some("You must use an API key to authenticate each request.".into()),
            }
        );
    }

    #[test]
    fn garbage_is_decode_error() {
        assert!(matches!(
            GoogleProvider::new("k").parse_response("<html>"),
            Err(ResolveError::Decode(_))
        ));
    }
}
