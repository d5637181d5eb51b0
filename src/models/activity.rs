use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::activity::{Activity as DomainActivity, NewActivity as DomainNewActivity};
use crate::domain::types::ActivityId;
use crate::models::{
    choice_or_default, lenient_datetime, lenient_text, record_id, required_text, to_value,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::{FetchParams, PagingInfo, SortType};

pub const TABLE: &str = "Activity2";

const FIELDS: &[&str] = &[
    "Id",
    "Name",
    "title",
    "type",
    "description",
    "date",
    "contact",
    "company",
    "CreatedOn",
    "ModifiedOn",
];

#[derive(Debug, Clone, Deserialize)]
/// Row of the `Activity2` table.
pub struct Activity {
    #[serde(rename = "Id", deserialize_with = "record_id")]
    pub id: i32,
    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub activity_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: Option<String>,
    #[serde(rename = "CreatedOn", default, deserialize_with = "lenient_datetime")]
    pub created_on: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
/// Insertable form of [`Activity`].
pub struct NewActivity<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    pub title: &'a str,
    #[serde(rename = "type")]
    pub activity_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<&'a str>,
}

impl TryFrom<Activity> for DomainActivity {
    type Error = RepositoryError;

    fn try_from(row: Activity) -> Result<Self, Self::Error> {
        let id = ActivityId::new(row.id)?;
        let date = row
            .date
            .or(row.created_on)
            .ok_or_else(|| RepositoryError::Decode(format!("activity {} has no date", row.id)))?;

        Ok(Self {
            id,
            title: required_text(row.title.or(row.name), "title")?,
            activity_type: choice_or_default(row.activity_type.as_deref(), "type", row.id),
            description: row.description,
            date,
            contact: row.contact,
            company: row.company,
        })
    }
}

impl<'a> From<&'a DomainNewActivity> for NewActivity<'a> {
    fn from(activity: &'a DomainNewActivity) -> Self {
        Self {
            name: activity.title.as_str(),
            title: activity.title.as_str(),
            activity_type: activity.activity_type.as_str(),
            description: activity.description.as_deref(),
            date: activity.date,
            contact: activity.contact.as_deref(),
            company: activity.company.as_deref(),
        }
    }
}

/// Newest `limit` activities first.
pub fn recent_params(limit: usize) -> FetchParams {
    FetchParams::new(FIELDS)
        .order_by("date", SortType::Desc)
        .paginate(Some(PagingInfo { limit, offset: 0 }))
}

pub fn from_record(record: Value) -> RepositoryResult<DomainActivity> {
    serde_json::from_value::<Activity>(record)?.try_into()
}

pub fn draft_record(draft: &DomainNewActivity) -> RepositoryResult<Value> {
    to_value(&NewActivity::from(draft))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::domain::types::ActivityType;

    #[test]
    fn recent_params_order_newest_first_with_limit() {
        let value = serde_json::to_value(recent_params(5)).unwrap();

        assert_eq!(
            value["orderBy"],
            json!([{"fieldName": "date", "SortType": "DESC"}])
        );
        assert_eq!(value["pagingInfo"], json!({"limit": 5, "offset": 0}));
    }

    #[test]
    fn row_without_date_falls_back_to_creation_time() {
        let activity = from_record(json!({
            "Id": 2,
            "Name": "Call with Sarah",
            "type": "call",
            "CreatedOn": "2023-11-19T15:00:00Z"
        }))
        .unwrap();

        assert_eq!(activity.title, "Call with Sarah");
        assert_eq!(activity.activity_type, ActivityType::Call);
        assert_eq!(
            activity.date.date(),
            NaiveDate::from_ymd_opt(2023, 11, 19).unwrap()
        );
    }

    #[test]
    fn draft_date_is_sent_as_iso_timestamp() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 20)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let draft = DomainNewActivity::new(
            "Demo".to_string(),
            ActivityType::Meeting,
            None,
            date,
            Some("John Smith".to_string()),
            None,
        );

        let value = draft_record(&draft).unwrap();

        assert_eq!(value["date"], json!("2023-11-20T09:30:00"));
        assert_eq!(value["type"], json!("meeting"));
        assert!(value.get("company").is_none());
    }
}
