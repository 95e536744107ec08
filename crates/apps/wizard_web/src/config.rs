use geocoding::{GoogleProvider, NominatimProvider, Provider};
use serde::Deserialize;
use wizard::WizardConfig;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderConfig {
    Google {
        api_key: String,
    },
    Nominatim {
        #[serde(default)]
        base_url: Option<String>,
    },
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Nominatim { base_url: None }
    }
}

impl ProviderConfig {
    pub fn build(&self) -> Provider {
        match self {
            ProviderConfig::Google { api_key } => Provider::Google(GoogleProvider::new(api_key)),
            ProviderConfig::Nominatim { base_url } => {
                let mut provider = NominatimProvider::default();
                if let Some(url) = base_url {
                    provider.base_url = url.clone();
                }
                Provider::Nominatim(provider)
            }
        }
    }
}

/// Page configuration passed to `configure` as JSON.
///
/// Wizard settings sit at the top level next to `provider` and `seed`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    #[serde(flatten)]
    pub wizard: WizardConfig,
    pub provider: ProviderConfig,
    /// Fixed seed for the lot estimate, for reproducible demos.
    pub seed: Option<u64>,
}

impl WebConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
