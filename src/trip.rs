//! Trips: lifecycle transitions and end-to-end planning.
//!
//! A trip is planned once, from its three locations and the driver's used
//! cycle hours. Storage is the caller's concern; nothing here persists.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PlanError, TransitionError};
use crate::plan::{CompliancePlan, PlanRequest, generate_compliance_plan};
use crate::polyline::Coordinate;
use crate::route::{RouteEstimator, RouteResult};
use crate::rules::HosRules;
use crate::traits::RouteProvider;

/// Identity of the driver a trip is planned for. Always supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(String);

impl DriverId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    #[default]
    Planned,
    Active,
    Completed,
    Cancelled,
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TripStatus::Planned => "planned",
            TripStatus::Active => "active",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripAction {
    Start,
    Complete,
    Cancel,
}

impl fmt::Display for TripAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TripAction::Start => "start",
            TripAction::Complete => "complete",
            TripAction::Cancel => "cancel",
        };
        f.write_str(label)
    }
}

/// What a caller asks to have planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub current_location: Coordinate,
    pub pickup_location: Coordinate,
    pub dropoff_location: Coordinate,
    pub current_cycle_used_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub driver_id: DriverId,
    pub status: TripStatus,
    pub current_location: Coordinate,
    pub pickup_location: Coordinate,
    pub dropoff_location: Coordinate,
    pub current_cycle_used_hours: f64,
    pub route: Option<RouteResult>,
    pub plan: Option<CompliancePlan>,
    pub trip_start_time: Option<DateTime<Utc>>,
    pub trip_end_time: Option<DateTime<Utc>>,
}

impl Trip {
    pub fn new(driver_id: DriverId, request: TripRequest) -> Self {
        Self {
            driver_id,
            status: TripStatus::Planned,
            current_location: request.current_location,
            pickup_location: request.pickup_location,
            dropoff_location: request.dropoff_location,
            current_cycle_used_hours: request.current_cycle_used_hours,
            route: None,
            plan: None,
            trip_start_time: None,
            trip_end_time: None,
        }
    }

    pub fn total_distance_miles(&self) -> Option<f64> {
        self.route.as_ref().map(|route| route.distance_miles)
    }

    pub fn estimated_drive_time_hours(&self) -> Option<f64> {
        self.route.as_ref().map(|route| route.duration_hours)
    }

    /// Whether the estimated driving exceeds what the first day allows.
    pub fn requires_multiple_days(&self, rules: &HosRules) -> bool {
        match self.estimated_drive_time_hours() {
            Some(hours) if hours > 0.0 => {
                hours > rules.first_day_available_hours(self.current_cycle_used_hours)
            }
            _ => false,
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.check(TripAction::Start, &[TripStatus::Completed, TripStatus::Cancelled])?;
        self.status = TripStatus::Active;
        self.trip_start_time = Some(now);
        info!(driver_id = %self.driver_id, "trip started");
        Ok(())
    }

    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.check(TripAction::Complete, &[TripStatus::Cancelled])?;
        self.status = TripStatus::Completed;
        self.trip_end_time = Some(now);
        info!(driver_id = %self.driver_id, "trip completed");
        Ok(())
    }

    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        self.check(TripAction::Cancel, &[TripStatus::Completed])?;
        self.status = TripStatus::Cancelled;
        self.trip_end_time = Some(now);
        info!(driver_id = %self.driver_id, "trip cancelled");
        Ok(())
    }

    fn check(&self, action: TripAction, forbidden: &[TripStatus]) -> Result<(), TransitionError> {
        if forbidden.contains(&self.status) {
            return Err(TransitionError {
                status: self.status,
                action,
            });
        }
        Ok(())
    }
}

/// Route estimation followed by plan generation.
#[derive(Debug, Clone)]
pub struct TripPlanner<P> {
    estimator: RouteEstimator<P>,
    rules: HosRules,
}

impl<P: RouteProvider> TripPlanner<P> {
    pub fn new(estimator: RouteEstimator<P>, rules: HosRules) -> Self {
        Self { estimator, rules }
    }

    pub fn rules(&self) -> &HosRules {
        &self.rules
    }

    /// Plan a new trip for `driver_id` starting on `start_date`.
    ///
    /// Route estimation cannot fail; plan generation can, in which case no
    /// trip is returned.
    pub fn plan_trip(
        &self,
        driver_id: DriverId,
        request: TripRequest,
        start_date: NaiveDate,
    ) -> Result<Trip, PlanError> {
        let mut trip = Trip::new(driver_id, request);
        let route = self
            .estimator
            .estimate(trip.current_location, trip.pickup_location, trip.dropoff_location);

        let plan = generate_compliance_plan(
            &self.rules,
            &PlanRequest {
                driver_id: trip.driver_id.clone(),
                total_drive_hours: route.duration_hours,
                total_distance_miles: route.distance_miles,
                cycle_used_hours: trip.current_cycle_used_hours,
                polyline: route.polyline.clone(),
                start_date,
            },
        )?;

        trip.route = Some(route);
        trip.plan = Some(plan);
        Ok(trip)
    }
}
