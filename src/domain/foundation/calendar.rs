//! Business calendar.
//!
//! Expiry dates, reminder milestones and the one-notification-per-day rule all
//! operate on calendar days, not instants. The calendar decides which day an
//! instant falls on for the business, using a fixed UTC offset.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use super::{Timestamp, ValidationError};

/// Maps instants to business calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    offset: FixedOffset,
}

impl BusinessCalendar {
    /// Calendar aligned with UTC.
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Calendar shifted by whole hours from UTC (e.g. `-3` for Brasília).
    pub fn with_offset_hours(hours: i32) -> Result<Self, ValidationError> {
        if !(-14..=14).contains(&hours) {
            return Err(ValidationError::out_of_range("utc_offset_hours", -14, 14, hours));
        }
        let offset = FixedOffset::east_opt(hours * 3600).ok_or_else(|| {
            ValidationError::invalid_format("utc_offset_hours", "offset not representable")
        })?;
        Ok(Self { offset })
    }

    /// The business day `now` falls on.
    pub fn today(&self, now: Timestamp) -> NaiveDate {
        now.as_datetime().with_timezone(&self.offset).date_naive()
    }
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

/// Signed number of calendar days from `today` until `date`.
///
/// Zero means `date` is today; negative means it already passed.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}
