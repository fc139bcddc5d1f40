//! Great-circle distance and straight-line route estimation.
//!
//! Used when the routing provider is unavailable. Ignores roads entirely,
//! but always produces a result.

use crate::error::ProviderError;
use crate::polyline::{Coordinate, Polyline};
use crate::route::RouteResult;
use crate::traits::RouteProvider;

/// Average loaded-truck highway speed.
const DEFAULT_SPEED_MPH: f64 = 55.0;

/// Mean earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance between two coordinates in miles.
pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_MILES * c
}

/// Straight-line route estimator.
///
/// Distance is the sum of the great-circle legs current→pickup→dropoff and
/// duration assumes a constant average speed.
#[derive(Debug, Clone)]
pub struct HaversineRoute {
    /// Assumed average driving speed in mph.
    pub speed_mph: f64,
}

impl Default for HaversineRoute {
    fn default() -> Self {
        Self {
            speed_mph: DEFAULT_SPEED_MPH,
        }
    }
}

impl HaversineRoute {
    pub fn new(speed_mph: f64) -> Self {
        Self { speed_mph }
    }

    /// Estimate the three-point route. Never fails.
    pub fn estimate(&self, current: Coordinate, pickup: Coordinate, dropoff: Coordinate) -> RouteResult {
        let to_pickup = haversine_miles(current, pickup);
        let to_dropoff = haversine_miles(pickup, dropoff);
        let distance_miles = to_pickup + to_dropoff;

        RouteResult {
            polyline: Polyline::new(vec![current, pickup, dropoff]),
            distance_miles,
            duration_hours: distance_miles / self.speed_mph,
            instructions: vec![
                format!("Drive {:.1} miles to pickup location", to_pickup),
                format!("Drive {:.1} miles to dropoff location", to_dropoff),
            ],
        }
    }
}

impl RouteProvider for HaversineRoute {
    fn route(
        &self,
        current: Coordinate,
        pickup: Coordinate,
        dropoff: Coordinate,
    ) -> Result<RouteResult, ProviderError> {
        Ok(self.estimate(current, pickup, dropoff))
    }
}
