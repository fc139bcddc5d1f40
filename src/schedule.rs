//! Day-by-day duty schedule generation under HOS caps.
//!
//! The number of days is fixed up front from the first day's capped
//! allowance, `ceil(total / min(11, 70 - cycle_used))`, and the loop runs
//! exactly that many times. Later days get the full daily cap, so with a
//! nearly exhausted cycle the trailing days may carry no driving at all;
//! they still count toward the plan's days.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::duty::{DutySegment, DutyStatus, clock};
use crate::error::PlanError;
use crate::rules::HosRules;

/// Remaining hours smaller than this are treated as zero.
const DRIFT_EPSILON: f64 = 1e-6;

/// On-duty time logged before the first day's driving.
const PRE_TRIP_HOURS: f64 = 1.0;

/// One day of the schedule and the share of the route it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    pub day_index: u32,
    pub date: NaiveDate,
    pub drive_hours: f64,
    /// Drive hours still to be allocated after this day.
    pub remaining_drive_hours: f64,
    pub distance_start_miles: f64,
    pub distance_end_miles: f64,
    pub segments: Vec<DutySegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DutySchedule {
    pub available_first_day_hours: f64,
    pub days: Vec<DaySchedule>,
}

impl DutySchedule {
    pub fn days_required(&self) -> u32 {
        self.days.len() as u32
    }

    pub fn segments(&self) -> impl Iterator<Item = &DutySegment> {
        self.days.iter().flat_map(|day| day.segments.iter())
    }
}

/// Hours the first day can hold, after checking the inputs the day count
/// divides by.
fn first_day_hours(rules: &HosRules, total_drive_hours: f64, cycle_used_hours: f64) -> Result<f64, PlanError> {
    if !total_drive_hours.is_finite() || total_drive_hours <= 0.0 {
        return Err(PlanError::InvalidDriveHours(total_drive_hours));
    }
    if !cycle_used_hours.is_finite() || cycle_used_hours < 0.0 {
        return Err(PlanError::InvalidCycleHours(cycle_used_hours));
    }

    let available = rules.first_day_available_hours(cycle_used_hours);
    if available <= 0.0 {
        return Err(PlanError::NoAvailableHours {
            cycle_used_hours,
            max_cycle_hours: rules.max_cycle_hours,
        });
    }
    Ok(available)
}

/// Days needed when every day is sized by the first day's available hours.
fn day_count(total_drive_hours: f64, available_first_day_hours: f64) -> u32 {
    (total_drive_hours / available_first_day_hours).ceil() as u32
}

/// Shared checks on plan inputs, before anything divides by them.
pub(crate) fn validate_inputs(
    rules: &HosRules,
    total_drive_hours: f64,
    total_distance_miles: f64,
    cycle_used_hours: f64,
) -> Result<f64, PlanError> {
    let available = first_day_hours(rules, total_drive_hours, cycle_used_hours)?;
    if !total_distance_miles.is_finite() || total_distance_miles <= 0.0 {
        return Err(PlanError::InvalidDistance(total_distance_miles));
    }
    Ok(available)
}

#[derive(Debug, Clone, Copy)]
pub struct DutyScheduleGenerator<'a> {
    rules: &'a HosRules,
}

impl<'a> DutyScheduleGenerator<'a> {
    pub fn new(rules: &'a HosRules) -> Self {
        Self { rules }
    }

    /// `ceil(total_drive_hours / first_day_available_hours)`.
    pub fn days_required(&self, total_drive_hours: f64, cycle_used_hours: f64) -> Result<u32, PlanError> {
        let available = first_day_hours(self.rules, total_drive_hours, cycle_used_hours)?;
        Ok(day_count(total_drive_hours, available))
    }

    pub fn generate(
        &self,
        total_drive_hours: f64,
        total_distance_miles: f64,
        cycle_used_hours: f64,
        start_date: NaiveDate,
    ) -> Result<DutySchedule, PlanError> {
        let available_first_day_hours =
            validate_inputs(self.rules, total_drive_hours, total_distance_miles, cycle_used_hours)?;
        let days_required = day_count(total_drive_hours, available_first_day_hours);

        debug!(
            total_drive_hours,
            cycle_used_hours,
            available_first_day_hours,
            days_required,
            "generating duty schedule"
        );

        let mut days = Vec::with_capacity(days_required as usize);
        let mut remaining = total_drive_hours;
        let mut distance_covered = 0.0;

        for day_index in 0..days_required {
            let date = start_date + Days::new(u64::from(day_index));
            let first_day = day_index == 0;

            let cap = if first_day {
                available_first_day_hours
            } else {
                self.rules.max_driving_hours_daily
            };
            let drive_hours = remaining.min(cap);

            let distance_start_miles = distance_covered;
            remaining -= drive_hours;
            if remaining.abs() < DRIFT_EPSILON {
                remaining = 0.0;
            }
            distance_covered += drive_hours / total_drive_hours * total_distance_miles;

            debug!(day_index, %date, drive_hours, remaining, "scheduled day");

            days.push(DaySchedule {
                day_index,
                date,
                drive_hours,
                remaining_drive_hours: remaining,
                distance_start_miles,
                distance_end_miles: distance_covered,
                segments: self.daily_segments(date, drive_hours, first_day),
            });
        }

        Ok(DutySchedule {
            available_first_day_hours,
            days,
        })
    }

    /// Duty segments for one day; each segment starts where the previous ends.
    fn daily_segments(&self, date: NaiveDate, drive_hours: f64, first_day: bool) -> Vec<DutySegment> {
        let rules = self.rules;
        let mut segments = Vec::with_capacity(4);

        let opening = if first_day {
            DutySegment::new(
                date,
                DutyStatus::OnDutyNotDriving,
                clock(6, 0),
                PRE_TRIP_HOURS,
                "Pre-trip inspection and trip planning",
            )
        } else {
            DutySegment::new(
                date,
                DutyStatus::OffDuty,
                clock(0, 0),
                rules.min_off_duty_hours,
                format!("Required {}-hour off-duty period", rules.min_off_duty_hours),
            )
        };
        let driving_start = opening.end_time;
        segments.push(opening);

        // A day with nothing left to drive keeps only its opening block.
        if drive_hours <= 0.0 {
            return segments;
        }

        if drive_hours <= rules.break_after_driving_hours {
            segments.push(DutySegment::new(
                date,
                DutyStatus::Driving,
                driving_start,
                drive_hours,
                "Driving to destination",
            ));
            return segments;
        }

        let first_stint = DutySegment::new(
            date,
            DutyStatus::Driving,
            driving_start,
            rules.break_after_driving_hours,
            format!("Driving (first {} hours)", rules.break_after_driving_hours),
        );
        let rest_break = DutySegment::new(
            date,
            DutyStatus::OffDuty,
            first_stint.end_time,
            rules.break_duration_hours,
            format!("Mandatory {}-minute break", rules.break_duration_hours * 60.0),
        );
        let second_stint = DutySegment::new(
            date,
            DutyStatus::Driving,
            rest_break.end_time,
            drive_hours - rules.break_after_driving_hours,
            "Driving (after break)",
        );
        segments.extend([first_stint, rest_break, second_stint]);
        segments
    }
}
