//! OpenRouteService HTTP adapter for truck routes.
//!
//! Requests the heavy-goods-vehicle directions for the ordered waypoints
//! current → pickup → dropoff and converts the GeoJSON response into a
//! [`RouteResult`]. Distances are requested in metres and converted to miles;
//! durations arrive in seconds and are converted to hours.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProviderError;
use crate::polyline::{Coordinate, Polyline};
use crate::route::RouteResult;
use crate::traits::RouteProvider;

const METERS_PER_MILE: f64 = 1609.344;
const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrsConfig {
    pub base_url: String,
    pub profile: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openrouteservice.org".to_string(),
            profile: "driving-hgv".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrsClient {
    config: OrsConfig,
    client: reqwest::blocking::Client,
}

impl OrsClient {
    pub fn new(config: OrsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::with_client(config, client))
    }

    /// Use a pre-built HTTP client; `config.timeout_secs` is not applied.
    pub fn with_client(config: OrsConfig, client: reqwest::blocking::Client) -> Self {
        Self { config, client }
    }

    fn directions_url(&self) -> String {
        format!(
            "{}/v2/directions/{}/geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile
        )
    }
}

impl RouteProvider for OrsClient {
    fn route(
        &self,
        current: Coordinate,
        pickup: Coordinate,
        dropoff: Coordinate,
    ) -> Result<RouteResult, ProviderError> {
        let url = self.directions_url();
        let body = DirectionsRequest::new(&[current, pickup, dropoff]);
        debug!(%url, "requesting directions");

        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, &self.config.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(classify_error(status.as_u16(), &body));
        }

        convert_response(response.json::<DirectionsResponse>()?)
    }
}

#[derive(Debug, Serialize)]
struct DirectionsRequest {
    /// `[lng, lat]` pairs, the provider's native order.
    coordinates: Vec<[f64; 2]>,
    instructions: bool,
    units: &'static str,
}

impl DirectionsRequest {
    fn new(waypoints: &[Coordinate]) -> Self {
        Self {
            coordinates: waypoints
                .iter()
                .map(|point| [point.longitude, point.latitude])
                .collect(),
            instructions: true,
            units: "m",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// `[lng, lat]` or `[lng, lat, elevation]`.
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct Properties {
    summary: Option<Summary>,
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    distance: Option<f64>,
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    #[serde(default)]
    distance: f64,
    instruction: Option<String>,
}

/// Error payload, either `{"error": "text"}` or `{"error": {"code": .., "message": ..}}`.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Structured { message: String },
}

/// Map a non-2xx response to a provider error, keeping the provider's own
/// message when the body carries one.
pub(crate) fn classify_error(status: u16, body: &str) -> ProviderError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error: ErrorDetail::Message(message) | ErrorDetail::Structured { message },
        }) => ProviderError::Service(format!("{} (HTTP {})", message, status)),
        Err(_) => ProviderError::Http { status },
    }
}

pub(crate) fn convert_response(response: DirectionsResponse) -> Result<RouteResult, ProviderError> {
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    let points = feature
        .geometry
        .coordinates
        .iter()
        .map(|position| match position.as_slice() {
            [lng, lat, ..] => Ok(Coordinate::new(*lat, *lng)),
            _ => Err(ProviderError::Parse(format!(
                "geometry position has {} values",
                position.len()
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let properties = feature.properties;
    let (distance_m, duration_s) = match &properties.summary {
        Some(Summary {
            distance: Some(distance),
            duration: Some(duration),
        }) => (*distance, *duration),
        _ => properties
            .segments
            .iter()
            .fold((0.0, 0.0), |(distance, duration), segment| {
                (distance + segment.distance, duration + segment.duration)
            }),
    };

    let instructions = properties
        .segments
        .iter()
        .flat_map(|segment| segment.steps.iter())
        .filter_map(|step| {
            step.instruction.as_ref().map(|text| {
                format!("{} ({:.1} miles)", text, step.distance / METERS_PER_MILE)
            })
        })
        .collect();

    Ok(RouteResult {
        polyline: Polyline::new(points),
        distance_miles: distance_m / METERS_PER_MILE,
        duration_hours: duration_s / SECONDS_PER_HOUR,
        instructions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[-87.6298, 41.8781, 180.0], [-86.1581, 39.7684, 220.0], [-86.7816, 36.1627, 160.0]]
            },
            "properties": {
                "summary": {"distance": 160934.4, "duration": 7200.0},
                "segments": [
                    {
                        "distance": 80467.2,
                        "duration": 3600.0,
                        "steps": [
                            {"distance": 1609.344, "duration": 60.0, "instruction": "Head south on Michigan Avenue"},
                            {"distance": 78857.856, "duration": 3540.0, "instruction": "Arrive at your destination"}
                        ]
                    },
                    {
                        "distance": 80467.2,
                        "duration": 3600.0,
                        "steps": [
                            {"distance": 80467.2, "duration": 3600.0, "instruction": "Continue onto I-65"}
                        ]
                    }
                ]
            }
        }]
    }"#;

    #[test]
    fn test_convert_success_response() {
        let response: DirectionsResponse = serde_json::from_str(SUCCESS).unwrap();
        let route = convert_response(response).unwrap();

        assert!((route.distance_miles - 100.0).abs() < 1e-9);
        assert!((route.duration_hours - 2.0).abs() < 1e-9);
        assert_eq!(route.polyline.len(), 3);
        // provider order is [lng, lat]
        assert_eq!(route.polyline.points()[0], Coordinate::new(41.8781, -87.6298));
        assert_eq!(
            route.instructions,
            vec![
                "Head south on Michigan Avenue (1.0 miles)",
                "Arrive at your destination (49.0 miles)",
                "Continue onto I-65 (50.0 miles)",
            ]
        );
    }

    #[test]
    fn test_convert_without_summary_sums_segments() {
        let json = r#"{
            "features": [{
                "geometry": {"coordinates": [[0.0, 0.0], [1.0, 1.0]]},
                "properties": {"segments": [
                    {"distance": 1609.344, "duration": 1800.0, "steps": []},
                    {"distance": 3218.688, "duration": 1800.0, "steps": []}
                ]}
            }]
        }"#;
        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        let route = convert_response(response).unwrap();

        assert!((route.distance_miles - 3.0).abs() < 1e-9);
        assert!((route.duration_hours - 1.0).abs() < 1e-9);
        assert!(route.instructions.is_empty());
    }

    #[test]
    fn test_convert_empty_features() {
        let response: DirectionsResponse = serde_json::from_str(r#"{"features": []}"#).unwrap();
        assert_eq!(convert_response(response), Err(ProviderError::EmptyResponse));
    }

    #[test]
    fn test_convert_malformed_position() {
        let json = r#"{
            "features": [{
                "geometry": {"coordinates": [[0.0]]},
                "properties": {"segments": []}
            }]
        }"#;
        let response: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(convert_response(response), Err(ProviderError::Parse(_))));
    }

    #[test]
    fn test_classify_structured_error_body() {
        let body = r#"{"error": {"code": 2010, "message": "Could not find routable point within a radius of 350.0 meters"}, "info": {"engine": {"version": "8.0.0"}}}"#;
        assert_eq!(
            classify_error(404, body),
            ProviderError::Service(
                "Could not find routable point within a radius of 350.0 meters (HTTP 404)".to_string()
            )
        );
    }

    #[test]
    fn test_classify_plain_error_body() {
        let body = r#"{"error": "Access to this API has been disallowed"}"#;
        assert_eq!(
            classify_error(403, body),
            ProviderError::Service("Access to this API has been disallowed (HTTP 403)".to_string())
        );
    }

    #[test]
    fn test_classify_without_error_body() {
        assert_eq!(classify_error(503, ""), ProviderError::Http { status: 503 });
        assert_eq!(
            classify_error(502, "<html>Bad Gateway</html>"),
            ProviderError::Http { status: 502 }
        );
    }

    #[test]
    fn test_request_body_uses_provider_order() {
        let body = DirectionsRequest::new(&[Coordinate::new(41.0, -87.0), Coordinate::new(39.0, -86.0)]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["coordinates"][0][0], -87.0);
        assert_eq!(json["coordinates"][0][1], 41.0);
        assert_eq!(json["instructions"], true);
    }

    #[test]
    fn test_directions_url_strips_trailing_slash() {
        let client = OrsClient::new(OrsConfig {
            base_url: "http://ors.example.com/".to_string(),
            ..OrsConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.directions_url(),
            "http://ors.example.com/v2/directions/driving-hgv/geojson"
        );
    }
}
