//! Expiry reminder milestones.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days-before-expiry on which a reseller gets a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderMilestone {
    OneWeek,
    ThreeDays,
    OneDay,
}

impl ReminderMilestone {
    /// All milestones, earliest first.
    pub const ALL: [ReminderMilestone; 3] = [
        ReminderMilestone::OneWeek,
        ReminderMilestone::ThreeDays,
        ReminderMilestone::OneDay,
    ];

    /// The milestone furthest from expiry.
    pub fn earliest() -> Self {
        ReminderMilestone::OneWeek
    }

    /// Days before expiry this milestone fires.
    pub fn days(&self) -> i64 {
        match self {
            ReminderMilestone::OneWeek => 7,
            ReminderMilestone::ThreeDays => 3,
            ReminderMilestone::OneDay => 1,
        }
    }

    /// Matches an exact days-until-expiry count.
    pub fn from_days(days: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.days() == days)
    }

    /// Expiry dates that hit a milestone when observed on `today`.
    pub fn target_expiry_dates(today: NaiveDate) -> Vec<NaiveDate> {
        Self::ALL
            .iter()
            .map(|m| today + chrono::Duration::days(m.days()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_seven_three_and_one_match() {
        assert_eq!(ReminderMilestone::from_days(7), Some(ReminderMilestone::OneWeek));
        assert_eq!(ReminderMilestone::from_days(3), Some(ReminderMilestone::ThreeDays));
        assert_eq!(ReminderMilestone::from_days(1), Some(ReminderMilestone::OneDay));

        for days in [-1, 0, 2, 4, 5, 6, 8, 30] {
            assert_eq!(ReminderMilestone::from_days(days), None, "days = {}", days);
        }
    }

    #[test]
    fn target_dates_follow_milestones() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 28).unwrap();
        let dates = ReminderMilestone::target_expiry_dates(today);

        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 29).unwrap(),
            ]
        );
    }
}
