//! ELD duty-log entries and their admission rules.
//!
//! Entries are validated against the other entries of the same driver and
//! day before they are stored. Only the daily driving cap blocks admission;
//! the on-duty cap is reported by [`DailyTotals::is_violation`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::duty::{DutySegment, DutyStatus, derive_end_time};
use crate::error::ValidationError;
use crate::polyline::LabeledLocation;
use crate::rules::HosRules;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Set for stored entries; an entry with the same id is being replaced.
    pub id: Option<u64>,
    pub date: NaiveDate,
    pub duty_status: DutyStatus,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub duration_hours: f64,
    pub location: Option<LabeledLocation>,
    pub remarks: String,
}

impl LogEntry {
    pub fn new(date: NaiveDate, duty_status: DutyStatus, start_time: NaiveTime, duration_hours: f64) -> Self {
        Self {
            id: None,
            date,
            duty_status,
            start_time,
            end_time: None,
            duration_hours,
            location: None,
            remarks: String::new(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    pub fn with_location(mut self, location: LabeledLocation) -> Self {
        self.location = Some(location);
        self
    }

    fn replaces(&self, other: &LogEntry) -> bool {
        self.id.is_some() && self.id == other.id
    }
}

impl From<&DutySegment> for LogEntry {
    fn from(segment: &DutySegment) -> Self {
        Self {
            id: None,
            date: segment.date,
            duty_status: segment.duty_status,
            start_time: segment.start_time,
            end_time: Some(segment.end_time),
            duration_hours: segment.duration_hours,
            location: None,
            remarks: segment.remarks.clone(),
        }
    }
}

/// Admit `candidate` against the driver's existing entries.
///
/// Entries on other days, and the entry being replaced, are ignored. On
/// success the returned entry has its end time filled in.
pub fn validate_log_entry(
    rules: &HosRules,
    existing: &[LogEntry],
    candidate: LogEntry,
) -> Result<LogEntry, ValidationError> {
    if candidate.duration_hours.is_nan() || candidate.duration_hours <= 0.0 {
        return Err(ValidationError::NonPositiveDuration);
    }

    if candidate.duty_status == DutyStatus::Driving {
        let driven: f64 = existing
            .iter()
            .filter(|entry| entry.date == candidate.date)
            .filter(|entry| entry.duty_status == DutyStatus::Driving)
            .filter(|entry| !candidate.replaces(entry))
            .map(|entry| entry.duration_hours)
            .sum();

        if driven + candidate.duration_hours > rules.max_driving_hours_daily {
            return Err(ValidationError::DailyDrivingExceeded {
                limit_hours: rules.max_driving_hours_daily,
            });
        }
    }

    let end_time = candidate
        .end_time
        .unwrap_or_else(|| derive_end_time(candidate.date, candidate.start_time, candidate.duration_hours));

    Ok(LogEntry {
        end_time: Some(end_time),
        ..candidate
    })
}

/// Driving and on-duty hours logged on one day.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyTotals {
    pub driving_hours: f64,
    pub on_duty_hours: f64,
}

impl DailyTotals {
    pub fn from_entries<'a>(date: NaiveDate, entries: impl IntoIterator<Item = &'a LogEntry>) -> Self {
        entries
            .into_iter()
            .filter(|entry| entry.date == date)
            .fold(Self::default(), |mut totals, entry| {
                if entry.duty_status == DutyStatus::Driving {
                    totals.driving_hours += entry.duration_hours;
                }
                if entry.duty_status.is_on_duty() {
                    totals.on_duty_hours += entry.duration_hours;
                }
                totals
            })
    }

    /// Diagnostic only; does not block admission.
    pub fn is_violation(&self, rules: &HosRules) -> bool {
        self.driving_hours > rules.max_driving_hours_daily || self.on_duty_hours > rules.max_on_duty_hours_daily
    }
}
