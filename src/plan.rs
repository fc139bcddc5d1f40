//! Whole-trip compliance plan: duty segments, stops and summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::duty::DutySegment;
use crate::error::PlanError;
use crate::polyline::Polyline;
use crate::rules::HosRules;
use crate::schedule::DutyScheduleGenerator;
use crate::stops::{RestStop, RestStopPlanner};
use crate::trip::DriverId;

/// Inputs for one plan generation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub driver_id: DriverId,
    pub total_drive_hours: f64,
    pub total_distance_miles: f64,
    pub cycle_used_hours: f64,
    pub polyline: Polyline,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total_drive_hours: f64,
    pub total_on_duty_hours: f64,
    pub days_required: u32,
    pub cycle_hours_used: f64,
}

impl ComplianceSummary {
    /// On-duty time is driving plus the pickup/dropoff allowance, and is
    /// added on top of the cycle hours already used.
    pub fn new(rules: &HosRules, total_drive_hours: f64, cycle_used_hours: f64, days_required: u32) -> Self {
        let total_on_duty_hours = total_drive_hours + rules.pickup_dropoff_hours;
        Self {
            total_drive_hours,
            total_on_duty_hours,
            days_required,
            cycle_hours_used: cycle_used_hours + total_on_duty_hours,
        }
    }
}

/// Output of one plan generation. Not modified after it is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompliancePlan {
    pub driver_id: DriverId,
    pub segments: Vec<DutySegment>,
    /// Ordered by distance from the start.
    pub stops: Vec<RestStop>,
    pub total_days: u32,
    pub summary: ComplianceSummary,
}

/// Build the day-by-day duty schedule and stops for a trip.
pub fn generate_compliance_plan(rules: &HosRules, request: &PlanRequest) -> Result<CompliancePlan, PlanError> {
    let schedule = DutyScheduleGenerator::new(rules).generate(
        request.total_drive_hours,
        request.total_distance_miles,
        request.cycle_used_hours,
        request.start_date,
    )?;

    let stops = RestStopPlanner::new(
        rules,
        request.polyline.points(),
        request.total_drive_hours,
        request.total_distance_miles,
    )
    .plan(&schedule.days);

    let total_days = schedule.days_required();
    let summary = ComplianceSummary::new(
        rules,
        request.total_drive_hours,
        request.cycle_used_hours,
        total_days,
    );

    info!(
        driver_id = %request.driver_id,
        total_days,
        stops = stops.len(),
        cycle_hours_used = summary.cycle_hours_used,
        "compliance plan generated"
    );

    Ok(CompliancePlan {
        driver_id: request.driver_id.clone(),
        segments: schedule.segments().cloned().collect(),
        stops,
        total_days,
        summary,
    })
}
