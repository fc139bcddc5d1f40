//! Address geocoding through Nominatim.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ProviderError, ValidationError};
use crate::polyline::Coordinate;
use crate::traits::Geocoder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NominatimConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "eld_app".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let places = self
            .client
            .get(url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()?
            .error_for_status()?
            .json::<Vec<NominatimPlace>>()?;

        places.first().map(NominatimPlace::coordinate).transpose()
    }
}

/// Nominatim reports coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn coordinate(&self) -> Result<Coordinate, ProviderError> {
        let parse = |value: &str| {
            value
                .parse::<f64>()
                .map_err(|err| ProviderError::Parse(format!("invalid coordinate {:?}: {}", value, err)))
        };
        Ok(Coordinate::new(parse(&self.lat)?, parse(&self.lon)?))
    }
}

/// Whether an address only uses letters, digits, whitespace, `,`, `.` and `-`.
pub fn is_admissible_address(address: &str) -> bool {
    !address.is_empty()
        && address
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, ',' | '.' | '-'))
}

/// Geocode a user-supplied address.
///
/// Provider failures are logged and reported as not found, like a provider
/// miss.
pub fn geocode_address<G: Geocoder>(geocoder: &G, address: &str) -> Result<Coordinate, ValidationError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ValidationError::AddressRequired);
    }
    if !is_admissible_address(address) {
        return Err(ValidationError::AddressNotFound);
    }

    match geocoder.geocode(address) {
        Ok(Some(coordinate)) => {
            info!(address, ?coordinate, "geocoded address");
            Ok(coordinate)
        }
        Ok(None) => Err(ValidationError::AddressNotFound),
        Err(err) => {
            warn!(address, error = %err, "geocoding failed");
            Err(ValidationError::AddressNotFound)
        }
    }
}
