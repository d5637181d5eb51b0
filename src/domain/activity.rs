//! Activity feed entries. The backend only supports listing and creating them.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ActivityId, ActivityType, optional_text, sanitized_text};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    pub title: String,
    pub activity_type: ActivityType,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub contact: Option<String>,
    pub company: Option<String>,
}

impl Activity {
    /// Relative label such as `3 hours ago`, falling back to the calendar date.
    pub fn relative_time(&self, now: NaiveDateTime) -> String {
        format_relative_time(self.date, now)
    }
}

pub fn format_relative_time(date: NaiveDateTime, now: NaiveDateTime) -> String {
    let hours = now.signed_duration_since(date).num_hours();

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{hours} hours ago")
    } else if hours < 48 {
        "Yesterday".to_string()
    } else if hours < TimeDelta::weeks(1).num_hours() {
        format!("{} days ago", hours / 24)
    } else {
        date.format("%-m/%-d/%Y").to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewActivity {
    pub title: String,
    pub activity_type: ActivityType,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub contact: Option<String>,
    pub company: Option<String>,
}

impl NewActivity {
    #[must_use]
    pub fn new(
        title: String,
        activity_type: ActivityType,
        description: Option<String>,
        date: NaiveDateTime,
        contact: Option<String>,
        company: Option<String>,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            activity_type,
            description: sanitized_text(description),
            date,
            contact: optional_text(contact),
            company: optional_text(company),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn relative_time_buckets() {
        let now = at(20, 12);

        assert_eq!(format_relative_time(at(20, 12), now), "Just now");
        assert_eq!(format_relative_time(at(20, 9), now), "3 hours ago");
        assert_eq!(format_relative_time(at(19, 10), now), "Yesterday");
        assert_eq!(format_relative_time(at(17, 12), now), "3 days ago");
        assert_eq!(format_relative_time(at(2, 12), now), "11/2/2023");
    }

    #[test]
    fn future_dates_read_as_just_now() {
        let now = at(20, 12);
        assert_eq!(format_relative_time(at(21, 12), now), "Just now");
    }
}
