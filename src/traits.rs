//! Seams to the external providers the planner consumes.
//!
//! These are intentionally minimal. The HTTP clients in this crate implement
//! them, and tests substitute their own.

use crate::error::ProviderError;
use crate::polyline::Coordinate;
use crate::route::RouteResult;

/// Resolves an ordered current → pickup → dropoff route.
///
/// A single attempt per call; retries and timeouts belong to the
/// implementation's client configuration.
pub trait RouteProvider {
    fn route(
        &self,
        current: Coordinate,
        pickup: Coordinate,
        dropoff: Coordinate,
    ) -> Result<RouteResult, ProviderError>;
}

/// Resolves a free-text address to a coordinate.
pub trait Geocoder {
    /// `Ok(None)` when the provider has no match for the address.
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError>;
}

impl<T: RouteProvider + ?Sized> RouteProvider for Box<T> {
    fn route(
        &self,
        current: Coordinate,
        pickup: Coordinate,
        dropoff: Coordinate,
    ) -> Result<RouteResult, ProviderError> {
        (**self).route(current, pickup, dropoff)
    }
}

impl<T: Geocoder + ?Sized> Geocoder for Box<T> {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError> {
        (**self).geocode(address)
    }
}
