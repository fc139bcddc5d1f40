//! Test fixtures for hos-planner.
//!
//! Provides:
//! - Real US freight hub locations
//! - Stub route providers that succeed or fail without network access

#![allow(dead_code)]

pub mod freight_locations;

pub use freight_locations::*;

use chrono::NaiveDate;
use hos_planner::error::ProviderError;
use hos_planner::polyline::{Coordinate, Polyline};
use hos_planner::route::RouteResult;
use hos_planner::traits::RouteProvider;

/// Provider that always fails, forcing the straight-line fallback.
pub struct FailingProvider(pub ProviderError);

impl RouteProvider for FailingProvider {
    fn route(&self, _: Coordinate, _: Coordinate, _: Coordinate) -> Result<RouteResult, ProviderError> {
        Err(self.0.clone())
    }
}

/// Provider returning a fixed road distance and duration over a straight
/// polyline of `points` evenly spaced vertices.
pub struct FixedRouteProvider {
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub points: usize,
}

impl RouteProvider for FixedRouteProvider {
    fn route(&self, current: Coordinate, _: Coordinate, dropoff: Coordinate) -> Result<RouteResult, ProviderError> {
        let steps = self.points.max(2) - 1;
        let points = (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                Coordinate::new(
                    current.latitude + (dropoff.latitude - current.latitude) * t,
                    current.longitude + (dropoff.longitude - current.longitude) * t,
                )
            })
            .collect();
        Ok(RouteResult {
            polyline: Polyline::new(points),
            distance_miles: self.distance_miles,
            duration_hours: self.duration_hours,
            instructions: vec!["Continue on the interstate".to_string()],
        })
    }
}

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
}

/// Straight two-vertex polyline between two fixtures.
pub fn polyline(from: &Location, to: &Location) -> Polyline {
    Polyline::new(vec![from.coords(), to.coords()])
}
