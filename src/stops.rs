//! Break, fuel and rest stops keyed to distance along the route.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::duty::clock;
use crate::polyline::{Coordinate, LabeledLocation, interpolate};
use crate::rules::HosRules;
use crate::schedule::DaySchedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopType {
    Fuel,
    Rest,
    Break,
    Pickup,
    Dropoff,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestStop {
    pub stop_type: StopType,
    pub location: LabeledLocation,
    pub scheduled_arrival: NaiveDateTime,
    pub duration_hours: f64,
    pub distance_from_start_miles: f64,
    pub is_mandatory: bool,
    pub reason: String,
}

/// Plans the stops for each scheduled day.
///
/// Stops are anchored by distance: the break where the eighth driving hour
/// ends, fuel at the day's starting distance, rest at the day's ending
/// distance. Arrival times are fixed clock times on the day's date.
#[derive(Debug, Clone, Copy)]
pub struct RestStopPlanner<'a> {
    rules: &'a HosRules,
    polyline: &'a [Coordinate],
    total_drive_hours: f64,
    total_distance_miles: f64,
}

impl<'a> RestStopPlanner<'a> {
    pub fn new(
        rules: &'a HosRules,
        polyline: &'a [Coordinate],
        total_drive_hours: f64,
        total_distance_miles: f64,
    ) -> Self {
        Self {
            rules,
            polyline,
            total_drive_hours,
            total_distance_miles,
        }
    }

    /// Stops for one day, in break → fuel → rest order.
    pub fn plan_day(&self, day: &DaySchedule) -> Vec<RestStop> {
        let mut stops = Vec::new();
        stops.extend(self.break_stop(day));
        stops.extend(self.fuel_stop(day));
        stops.extend(self.rest_stop(day));
        stops
    }

    /// Stops for every day, ordered by distance from the start.
    pub fn plan<'d>(&self, days: impl IntoIterator<Item = &'d DaySchedule>) -> Vec<RestStop> {
        let mut stops: Vec<RestStop> = days.into_iter().flat_map(|day| self.plan_day(day)).collect();
        sort_by_distance(&mut stops);
        stops
    }

    fn break_stop(&self, day: &DaySchedule) -> Option<RestStop> {
        let rules = self.rules;
        if day.drive_hours <= rules.break_after_driving_hours {
            return None;
        }

        let distance = day.distance_start_miles
            + rules.break_after_driving_hours / self.total_drive_hours * self.total_distance_miles;
        Some(RestStop {
            stop_type: StopType::Break,
            location: self.location_at(distance),
            scheduled_arrival: at(day.date, 12),
            duration_hours: rules.break_duration_hours,
            distance_from_start_miles: distance,
            is_mandatory: true,
            reason: format!(
                "{}-minute break required after {} hours driving",
                rules.break_duration_hours * 60.0,
                rules.break_after_driving_hours
            ),
        })
    }

    /// Coarse "roughly every interval" check on the day's starting distance,
    /// not an exact crossing detector.
    fn fuel_stop(&self, day: &DaySchedule) -> Option<RestStop> {
        let rules = self.rules;
        let distance = day.distance_start_miles;
        if distance <= 0.0 || distance % rules.fuel_interval_miles >= rules.fuel_window_miles {
            return None;
        }

        Some(RestStop {
            stop_type: StopType::Fuel,
            location: self.location_at(distance),
            scheduled_arrival: at(day.date, 18),
            duration_hours: rules.break_duration_hours,
            distance_from_start_miles: distance,
            is_mandatory: false,
            reason: format!("Fuel stop ({}+ miles)", rules.fuel_interval_miles),
        })
    }

    fn rest_stop(&self, day: &DaySchedule) -> Option<RestStop> {
        if day.remaining_drive_hours <= 0.0 {
            return None;
        }

        let distance = day.distance_end_miles;
        Some(RestStop {
            stop_type: StopType::Rest,
            location: self.location_at(distance),
            scheduled_arrival: at(day.date, 22),
            duration_hours: self.rules.min_off_duty_hours,
            distance_from_start_miles: distance,
            is_mandatory: true,
            reason: format!(
                "Mandatory {}-hour rest before day {}",
                self.rules.min_off_duty_hours,
                day.day_index + 2
            ),
        })
    }

    fn location_at(&self, distance_miles: f64) -> LabeledLocation {
        interpolate(self.polyline, distance_miles / self.total_distance_miles)
    }
}

/// Stable ascending sort on distance from the start.
pub fn sort_by_distance(stops: &mut [RestStop]) {
    stops.sort_by(|a, b| a.distance_from_start_miles.total_cmp(&b.distance_from_start_miles));
}

fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(clock(hour, 0))
}
