//! Hours-of-Service rule set.
//!
//! The limits are injected into the generator rather than hard-coded so that
//! alternate rule variants can be planned and tested without touching the
//! scheduling code.

use serde::{Deserialize, Serialize};

/// HOS limits and planning allowances, in hours unless noted otherwise.
///
/// Defaults are the US property-carrying driver rules on a 70-hour/8-day
/// cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HosRules {
    /// Maximum driving time per day.
    pub max_driving_hours_daily: f64,
    /// Maximum on-duty time (driving + not driving) per day.
    pub max_on_duty_hours_daily: f64,
    /// Maximum on-duty time over the rolling cycle.
    pub max_cycle_hours: f64,
    /// Cumulative driving after which a break is required.
    pub break_after_driving_hours: f64,
    /// Length of the required break.
    pub break_duration_hours: f64,
    /// Off-duty period separating consecutive driving days.
    pub min_off_duty_hours: f64,
    /// On-duty allowance for pickup and dropoff combined.
    pub pickup_dropoff_hours: f64,
    /// Approximate spacing of fuel stops, in miles.
    pub fuel_interval_miles: f64,
    /// Window past each interval multiple in which a fuel stop is planned, in miles.
    pub fuel_window_miles: f64,
    /// Average loaded-truck speed assumed by the straight-line fallback, in mph.
    pub average_speed_mph: f64,
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            max_driving_hours_daily: 11.0,
            max_on_duty_hours_daily: 14.0,
            max_cycle_hours: 70.0,
            break_after_driving_hours: 8.0,
            break_duration_hours: 0.5,
            min_off_duty_hours: 10.0,
            pickup_dropoff_hours: 2.0,
            fuel_interval_miles: 1000.0,
            fuel_window_miles: 200.0,
            average_speed_mph: 55.0,
        }
    }
}

impl HosRules {
    /// Cycle hours still available, never negative.
    pub fn remaining_cycle_hours(&self, cycle_used_hours: f64) -> f64 {
        (self.max_cycle_hours - cycle_used_hours).max(0.0)
    }

    /// Driving hours available on the first day of a trip.
    pub fn first_day_available_hours(&self, cycle_used_hours: f64) -> f64 {
        self.max_driving_hours_daily
            .min(self.remaining_cycle_hours(cycle_used_hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_property_carrying_rules() {
        let rules = HosRules::default();
        assert_eq!(rules.max_driving_hours_daily, 11.0);
        assert_eq!(rules.max_on_duty_hours_daily, 14.0);
        assert_eq!(rules.max_cycle_hours, 70.0);
        assert_eq!(rules.break_duration_hours, 0.5);
        assert_eq!(rules.min_off_duty_hours, 10.0);
    }

    #[test]
    fn test_first_day_available_hours() {
        let rules = HosRules::default();
        assert_eq!(rules.first_day_available_hours(0.0), 11.0);
        assert_eq!(rules.first_day_available_hours(65.0), 5.0);
        assert_eq!(rules.first_day_available_hours(70.0), 0.0);
        assert_eq!(rules.first_day_available_hours(82.5), 0.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let rules: HosRules = toml::from_str("max_cycle_hours = 60.0").unwrap();
        assert_eq!(rules.max_cycle_hours, 60.0);
        assert_eq!(rules.max_driving_hours_daily, 11.0);
    }
}
