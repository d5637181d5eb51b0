use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::activity::NewActivity;
use crate::domain::types::ActivityType;
use crate::forms::{FormError, not_blank, optional};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Accepts a datetime-local value or a plain date (midnight).
fn parse_timestamp(value: &str) -> Result<NaiveDateTime, FormError> {
    let value = value.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| FormError::InvalidDate(value.to_string()))
}

fn timestamp(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || parse_timestamp(value).is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("date"))
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Form data for logging an activity.
pub struct ActivityForm {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[serde(rename = "type", default)]
    pub activity_type: ActivityType,
    #[serde(default)]
    pub description: String,
    #[validate(
        custom(function = "not_blank", message = "Date is required"),
        custom(function = "timestamp", message = "Invalid date format")
    )]
    pub date: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub company: String,
}

impl ActivityForm {
    pub fn to_new_activity(&self) -> Result<NewActivity, FormError> {
        Ok(NewActivity::new(
            self.title.clone(),
            self.activity_type,
            optional(&self.description),
            parse_timestamp(&self.date)?,
            optional(&self.contact),
            optional(&self.company),
        ))
    }
}
