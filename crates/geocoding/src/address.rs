use serde::{Deserialize, Serialize};

/// The five free-text fields of the address form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressForm {
    pub line: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

impl AddressForm {
    /// Single-line query: `"{line}, {city}, {region} {postal_code}, {country}"`.
    ///
    /// Fields are trimmed but empty ones are kept, so the shape of the query
    /// does not depend on which fields were filled.
    pub fn query(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.line.trim(),
            self.city.trim(),
            self.region.trim(),
            self.postal_code.trim(),
            self.country.trim()
        )
    }

    pub fn is_blank(&self) -> bool {
        [
            &self.line,
            &self.city,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .all(|f| f.trim().is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
