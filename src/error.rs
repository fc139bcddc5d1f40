//! Error types for route estimation, log admission and plan generation.

use thiserror::Error;

use crate::trip::{TripAction, TripStatus};

/// Failure talking to an external routing or geocoding provider.
///
/// Routing failures are recovered by the straight-line fallback; geocoding
/// failures are surfaced as "address not found".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),
    #[error("provider request timed out")]
    Timeout,
    #[error("provider returned HTTP {status}")]
    Http { status: u16 },
    #[error("failed to parse provider response: {0}")]
    Parse(String),
    #[error("provider reported an error: {0}")]
    Service(String),
    #[error("provider returned no result")]
    EmptyResponse,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if let Some(status) = err.status() {
            ProviderError::Http {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

/// A rejected input. Not retried; the message goes back to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Duration must be positive")]
    NonPositiveDuration,
    #[error("Daily driving limit of {limit_hours} hours exceeded")]
    DailyDrivingExceeded { limit_hours: f64 },
    #[error("Address is required")]
    AddressRequired,
    #[error("Address not found")]
    AddressNotFound,
}

/// A trip lifecycle move that is not allowed from the trip's current status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} a {status} trip")]
pub struct TransitionError {
    pub status: TripStatus,
    pub action: TripAction,
}

/// The inputs cannot produce a compliance plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error(
        "no driving hours available: {cycle_used_hours}h already used of the {max_cycle_hours}h cycle"
    )]
    NoAvailableHours {
        cycle_used_hours: f64,
        max_cycle_hours: f64,
    },
    #[error("total drive hours must be positive and finite, got {0}")]
    InvalidDriveHours(f64),
    #[error("total distance must be positive and finite, got {0}")]
    InvalidDistance(f64),
    #[error("cycle hours used must be non-negative and finite, got {0}")]
    InvalidCycleHours(f64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Aggregate error reported to callers of the planner.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    IllegalStateTransition(#[from] TransitionError),
    #[error("Route calculation failed: {0}")]
    Planning(#[from] PlanError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PlannerError {
    /// HTTP status an API layer should answer with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            PlannerError::Validation(ValidationError::AddressNotFound) => 404,
            PlannerError::IllegalStateTransition(_) => 403,
            PlannerError::Provider(_) | PlannerError::Validation(_) | PlannerError::Planning(_) => {
                400
            }
            PlannerError::Config(_) => 500,
        }
    }
}
