use crate::candidate::Candidate;
use crate::error::ResolveError;
use crate::google::GoogleProvider;
use crate::nominatim::NominatimProvider;

/// Everything a transport needs to issue a GET for one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    pub url: String,
    pub query: Vec<(&'static str, String)>,
    pub headers: Vec<(&'static str, String)>,
}

/// A geocoding web service, minus the transport.
pub trait GeocodeProvider {
    fn name(&self) -> &'static str;

    fn request(&self, address: &str) -> ProviderRequest;

    /// Maps a response body to candidates in provider order.
    ///
    /// Zero matches are reported as [`ResolveError::ZeroResults`].
    fn parse_response(&self, body: &str) -> Result<Vec<Candidate>, ResolveError>;
}

/// Provider chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum Provider {
    Google(GoogleProvider),
    Nominatim(NominatimProvider),
}

impl GeocodeProvider for Provider {
    fn name(&self) -> &'static str {
        match self {
            Provider::Google(p) => p.name(),
            Provider::Nominatim(p) => p.name(),
        }
    }

    fn request(&self, address: &str) -> ProviderRequest {
        match self {
            Provider::Google(p) => p.request(address),
            Provider::Nominatim(p) => p.request(address),
        }
    }

    fn parse_response(&self, body: &str) -> Result<Vec<Candidate>, ResolveError> {
        match self {
            Provider::Google(p) => p.parse_response(body),
            Provider::Nominatim(p) => p.parse_response(body),
        }
    }
}
