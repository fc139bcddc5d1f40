//! Duty statuses and dated duty segments.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    OffDuty,
    SleeperBerth,
    Driving,
    OnDutyNotDriving,
}

impl DutyStatus {
    /// Whether time in this status counts toward on-duty limits.
    pub fn is_on_duty(self) -> bool {
        match self {
            DutyStatus::Driving | DutyStatus::OnDutyNotDriving => true,
            DutyStatus::OffDuty | DutyStatus::SleeperBerth => false,
        }
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::SleeperBerth => "Sleeper Berth",
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDutyNotDriving => "On Duty (Not Driving)",
        };
        f.write_str(label)
    }
}

/// Wall-clock time from whole hours and minutes; out-of-range values saturate
/// to the end of the day.
pub fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_else(end_of_day)
}

/// Last representable time of a day; segments never run past it.
pub fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

const SECONDS_PER_DAY: f64 = 86_400.0;

/// `start_time + duration_hours`, clamped to 23:59:59 when it would cross
/// into another calendar date. Non-finite durations clamp too.
pub fn derive_end_time(date: NaiveDate, start_time: NaiveTime, duration_hours: f64) -> NaiveTime {
    let seconds = (duration_hours * 3600.0).round();
    // a day or longer always crosses midnight
    if !seconds.is_finite() || seconds.abs() >= SECONDS_PER_DAY {
        return end_of_day();
    }

    let start = date.and_time(start_time);
    match start.checked_add_signed(Duration::seconds(seconds as i64)) {
        Some(end) if end.date() == date => end.time(),
        _ => end_of_day(),
    }
}

/// One interval of a single duty status within a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutySegment {
    pub date: NaiveDate,
    pub duty_status: DutyStatus,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_hours: f64,
    pub remarks: String,
}

impl DutySegment {
    pub fn new(
        date: NaiveDate,
        duty_status: DutyStatus,
        start_time: NaiveTime,
        duration_hours: f64,
        remarks: impl Into<String>,
    ) -> Self {
        Self {
            date,
            duty_status,
            start_time,
            end_time: derive_end_time(date, start_time, duration_hours),
            duration_hours,
            remarks: remarks.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_end_time_same_day() {
        assert_eq!(derive_end_time(date(), time(7, 0), 8.0), time(15, 0));
        assert_eq!(derive_end_time(date(), time(15, 0), 0.5), time(15, 30));
        assert_eq!(derive_end_time(date(), time(15, 30), 2.25), time(17, 45));
    }

    #[test]
    fn test_end_time_clamped_at_day_boundary() {
        assert_eq!(derive_end_time(date(), time(22, 0), 10.0), end_of_day());
        assert_eq!(derive_end_time(date(), time(23, 30), 1.0), end_of_day());
    }

    #[test]
    fn test_end_time_exactly_midnight_is_clamped() {
        assert_eq!(derive_end_time(date(), time(14, 0), 10.0), end_of_day());
    }

    #[test]
    fn test_end_time_for_unbounded_durations() {
        assert_eq!(derive_end_time(date(), time(20, 0), 1e13), end_of_day());
        assert_eq!(derive_end_time(date(), time(0, 0), 24.0), end_of_day());
        assert_eq!(derive_end_time(date(), time(6, 0), f64::INFINITY), end_of_day());
        assert_eq!(derive_end_time(date(), time(6, 0), f64::NAN), end_of_day());
    }

    #[test]
    fn test_segment_derives_end_time() {
        let segment = DutySegment::new(date(), DutyStatus::Driving, time(10, 0), 3.5, "Driving to destination");
        assert_eq!(segment.end_time, time(13, 30));
        assert_eq!(segment.remarks, "Driving to destination");
    }

    #[test]
    fn test_on_duty_statuses() {
        assert!(DutyStatus::Driving.is_on_duty());
        assert!(DutyStatus::OnDutyNotDriving.is_on_duty());
        assert!(!DutyStatus::OffDuty.is_on_duty());
        assert!(!DutyStatus::SleeperBerth.is_on_duty());
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&DutyStatus::OnDutyNotDriving).unwrap(),
            "\"on_duty_not_driving\""
        );
    }
}
