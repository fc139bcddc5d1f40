//! Polyline representation for route geometries.
//!
//! Route geometry is kept as decoded coordinates. Provider-specific
//! coordinate order (`[lng, lat]`) is converted at the boundary, so
//! everything inside the planner works in latitude/longitude.

use serde::{Deserialize, Serialize};

/// Label given to interpolated points at or beyond the route ends.
pub const ROUTE_LOCATION_LABEL: &str = "Route location";

/// A point on the earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The (0, 0) point used when there is no geometry to read from.
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A coordinate with a human-readable label (address or mile marker).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledLocation {
    pub coordinate: Coordinate,
    pub label: String,
}

impl LabeledLocation {
    pub fn new(coordinate: Coordinate, label: impl Into<String>) -> Self {
        Self {
            coordinate,
            label: label.into(),
        }
    }
}

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Coordinate>> for Polyline {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

/// Find the location at a progress fraction along a route.
///
/// Progress at or below zero yields the first point, at or above one the
/// last point, both labelled [`ROUTE_LOCATION_LABEL`]. In between, the point
/// at `floor(progress * (len - 1))` is returned with a mile-marker label.
/// The selection is by vertex index, not by distance along the line.
///
/// An empty polyline yields the origin rather than failing.
pub fn interpolate(points: &[Coordinate], progress: f64) -> LabeledLocation {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return LabeledLocation::new(Coordinate::origin(), ROUTE_LOCATION_LABEL);
    };

    // NaN is treated as the route start.
    if progress <= 0.0 || progress.is_nan() {
        return LabeledLocation::new(*first, ROUTE_LOCATION_LABEL);
    }
    if progress >= 1.0 {
        return LabeledLocation::new(*last, ROUTE_LOCATION_LABEL);
    }

    let index = ((progress * (points.len() - 1) as f64).floor() as usize).min(points.len() - 1);
    let marker = (progress * 1000.0).floor() as u32;

    LabeledLocation::new(points[index], format!("Mile marker {}", marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Coordinate> {
        vec![
            Coordinate::new(38.5, -120.2),
            Coordinate::new(40.7, -120.95),
            Coordinate::new(43.252, -126.453),
        ]
    }

    #[test]
    fn test_new_and_points() {
        let points = sample_points();
        let polyline = Polyline::new(points.clone());
        assert_eq!(polyline.points(), &points[..]);
        assert_eq!(polyline.len(), 3);
    }

    #[test]
    fn test_into_points() {
        let points = sample_points();
        let polyline = Polyline::from(points.clone());
        assert_eq!(polyline.into_points(), points);
    }

    #[test]
    fn test_interpolate_start_and_end() {
        let points = sample_points();

        let start = interpolate(&points, 0.0);
        assert_eq!(start.coordinate, points[0]);
        assert_eq!(start.label, ROUTE_LOCATION_LABEL);

        let before_start = interpolate(&points, -0.5);
        assert_eq!(before_start.coordinate, points[0]);

        let end = interpolate(&points, 1.0);
        assert_eq!(end.coordinate, points[2]);
        assert_eq!(end.label, ROUTE_LOCATION_LABEL);

        let past_end = interpolate(&points, 1.7);
        assert_eq!(past_end.coordinate, points[2]);
    }

    #[test]
    fn test_interpolate_midway_uses_floor_index_and_marker() {
        let points = sample_points();

        // 0.49 * 2 = 0.98 -> index 0
        let early = interpolate(&points, 0.49);
        assert_eq!(early.coordinate, points[0]);
        assert_eq!(early.label, "Mile marker 490");

        // 0.5 * 2 = 1.0 -> index 1
        let middle = interpolate(&points, 0.5);
        assert_eq!(middle.coordinate, points[1]);
        assert_eq!(middle.label, "Mile marker 500");

        let late = interpolate(&points, 0.999);
        assert_eq!(late.coordinate, points[1]);
        assert_eq!(late.label, "Mile marker 999");
    }

    #[test]
    fn test_interpolate_empty_polyline_returns_origin() {
        let location = interpolate(&[], 0.5);
        assert_eq!(location.coordinate, Coordinate::origin());
        assert_eq!(location.label, ROUTE_LOCATION_LABEL);
    }

    #[test]
    fn test_interpolate_single_point() {
        let points = vec![Coordinate::new(1.0, 2.0)];
        assert_eq!(interpolate(&points, 0.3).coordinate, points[0]);
    }

    #[test]
    fn test_serde_round_trip_shape() {
        let polyline = Polyline::new(vec![Coordinate::new(1.5, 2.5)]);
        let json = serde_json::to_string(&polyline).unwrap();
        assert!(json.contains("\"latitude\":1.5"));
        assert!(json.contains("\"longitude\":2.5"));
    }
}
