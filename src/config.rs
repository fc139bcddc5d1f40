//! Planner configuration, read from TOML.
//!
//! Every section and key is optional; missing values fall back to their
//! defaults.
//!
//! ```toml
//! [rules]
//! max_cycle_hours = 60.0
//!
//! [routing]
//! api_key = "..."
//!
//! [geocoding]
//! user_agent = "fleet-planner"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geocode::NominatimConfig;
use crate::ors::OrsConfig;
use crate::rules::HosRules;

/// Environment variable that overrides the routing API key.
pub const API_KEY_ENV: &str = "OPENROUTESERVICE_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub rules: HosRules,
    pub routing: OrsConfig,
    pub geocoding: NominatimConfig,
}

impl PlannerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_key(std::env::var(API_KEY_ENV).ok())
    }

    fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.routing.api_key = key;
        }
        self
    }

    /// Whether a routing provider can be called at all.
    pub fn has_routing_credentials(&self) -> bool {
        !self.routing.api_key.trim().is_empty()
    }
}
