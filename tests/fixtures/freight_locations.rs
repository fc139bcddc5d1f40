//! US freight hub locations for trip fixtures.
//!
//! Coordinates are city-centre approximations from OpenStreetMap.

use hos_planner::polyline::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

// ============================================================================
// Midwest
// ============================================================================

pub const CHICAGO: Location = Location::new("Chicago, IL", 41.8781, -87.6298);
pub const INDIANAPOLIS: Location = Location::new("Indianapolis, IN", 39.7684, -86.1581);
pub const KANSAS_CITY: Location = Location::new("Kansas City, MO", 39.0997, -94.5786);

// ============================================================================
// South
// ============================================================================

pub const NASHVILLE: Location = Location::new("Nashville, TN", 36.1627, -86.7816);
pub const MEMPHIS: Location = Location::new("Memphis, TN", 35.1495, -90.0490);
pub const DALLAS: Location = Location::new("Dallas, TX", 32.7767, -96.7970);

// ============================================================================
// West
// ============================================================================

pub const DENVER: Location = Location::new("Denver, CO", 39.7392, -104.9903);
pub const LAS_VEGAS: Location = Location::new("Las Vegas, NV", 36.1699, -115.1398);
pub const LOS_ANGELES: Location = Location::new("Los Angeles, CA", 34.0522, -118.2437);
