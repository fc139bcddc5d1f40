//! Route estimation with a straight-line fallback.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::haversine::HaversineRoute;
use crate::polyline::{Coordinate, Polyline};
use crate::traits::RouteProvider;

/// Distance, duration and geometry of a current → pickup → dropoff route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub polyline: Polyline,
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub instructions: Vec<String>,
}

/// Where a route estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    Provider,
    Fallback,
}

/// Estimates routes through an optional provider, falling back to
/// great-circle distance on any provider failure.
///
/// The fallback is silent to the caller; failures show up only in logs.
#[derive(Debug, Clone)]
pub struct RouteEstimator<P> {
    provider: Option<P>,
    fallback: HaversineRoute,
}

impl<P: RouteProvider> RouteEstimator<P> {
    pub fn new(provider: P, fallback: HaversineRoute) -> Self {
        Self {
            provider: Some(provider),
            fallback,
        }
    }

    /// An estimator that always uses the straight-line fallback.
    pub fn fallback_only(fallback: HaversineRoute) -> Self {
        Self {
            provider: None,
            fallback,
        }
    }

    /// Estimate the route. Never fails.
    pub fn estimate(&self, current: Coordinate, pickup: Coordinate, dropoff: Coordinate) -> RouteResult {
        self.estimate_with_source(current, pickup, dropoff).0
    }

    /// Estimate the route and report which path produced it.
    pub fn estimate_with_source(
        &self,
        current: Coordinate,
        pickup: Coordinate,
        dropoff: Coordinate,
    ) -> (RouteResult, RouteSource) {
        if let Some(provider) = &self.provider {
            match provider.route(current, pickup, dropoff) {
                Ok(route) if is_usable(&route) => {
                    info!(
                        distance_miles = route.distance_miles,
                        duration_hours = route.duration_hours,
                        "route estimated by provider"
                    );
                    return (route, RouteSource::Provider);
                }
                Ok(route) => {
                    warn!(
                        distance_miles = route.distance_miles,
                        duration_hours = route.duration_hours,
                        points = route.polyline.len(),
                        "provider returned an unusable route, using straight-line fallback"
                    );
                }
                Err(err) => {
                    warn!(error = %err, "route calculation failed, using straight-line fallback");
                }
            }
        }

        let route = self.fallback.estimate(current, pickup, dropoff);
        info!(
            distance_miles = route.distance_miles,
            duration_hours = route.duration_hours,
            "route estimated by straight-line fallback"
        );
        (route, RouteSource::Fallback)
    }
}

fn is_usable(route: &RouteResult) -> bool {
    route.distance_miles.is_finite()
        && route.distance_miles > 0.0
        && route.duration_hours.is_finite()
        && route.duration_hours > 0.0
        && route.polyline.len() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::haversine::haversine_miles;

    const CURRENT: Coordinate = Coordinate::new(41.8781, -87.6298);
    const PICKUP: Coordinate = Coordinate::new(39.7684, -86.1581);
    const DROPOFF: Coordinate = Coordinate::new(36.1627, -86.7816);

    struct FixedProvider(Result<RouteResult, ProviderError>);

    impl RouteProvider for FixedProvider {
        fn route(&self, _: Coordinate, _: Coordinate, _: Coordinate) -> Result<RouteResult, ProviderError> {
            self.0.clone()
        }
    }

    fn provider_route() -> RouteResult {
        RouteResult {
            polyline: Polyline::new(vec![CURRENT, PICKUP, DROPOFF]),
            distance_miles: 470.0,
            duration_hours: 7.5,
            instructions: vec!["Head south (1.0 miles)".to_string()],
        }
    }

    #[test]
    fn test_provider_success_is_used() {
        let estimator = RouteEstimator::new(FixedProvider(Ok(provider_route())), HaversineRoute::default());
        let (route, source) = estimator.estimate_with_source(CURRENT, PICKUP, DROPOFF);
        assert_eq!(source, RouteSource::Provider);
        assert_eq!(route, provider_route());
    }

    #[test]
    fn test_provider_failure_falls_back() {
        let estimator = RouteEstimator::new(
            FixedProvider(Err(ProviderError::Http { status: 503 })),
            HaversineRoute::default(),
        );
        let (route, source) = estimator.estimate_with_source(CURRENT, PICKUP, DROPOFF);
        let expected = haversine_miles(CURRENT, PICKUP) + haversine_miles(PICKUP, DROPOFF);

        assert_eq!(source, RouteSource::Fallback);
        assert!((route.distance_miles - expected).abs() < 1e-9);
        assert!((route.duration_hours - expected / 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_provider_route_falls_back() {
        let mut bad = provider_route();
        bad.polyline = Polyline::new(vec![CURRENT]);
        let estimator = RouteEstimator::new(FixedProvider(Ok(bad)), HaversineRoute::default());
        let (_, source) = estimator.estimate_with_source(CURRENT, PICKUP, DROPOFF);
        assert_eq!(source, RouteSource::Fallback);
    }

    #[test]
    fn test_fallback_only() {
        let estimator = RouteEstimator::<FixedProvider>::fallback_only(HaversineRoute::default());
        let route = estimator.estimate(CURRENT, PICKUP, DROPOFF);
        assert_eq!(route.polyline.len(), 3);
        assert!(route.distance_miles > 0.0);
    }
}
