//! Activity feed.

use validator::Validate;

use crate::domain::activity::Activity;
use crate::forms::FieldErrors;
use crate::forms::activity::ActivityForm;
use crate::repository::{ActivityReader, ActivityWriter};
use crate::services::{ServiceError, ServiceResult};

/// Newest `limit` activities.
pub async fn recent_activities<R>(repo: &R, limit: usize) -> ServiceResult<Vec<Activity>>
where
    R: ActivityReader + ?Sized,
{
    repo.recent(limit).await.map_err(ServiceError::from)
}

/// Validates the form and records a new activity.
pub async fn log_activity<R>(repo: &R, form: &ActivityForm) -> ServiceResult<Activity>
where
    R: ActivityWriter + ?Sized,
{
    form.validate()
        .map_err(|errors| ServiceError::Validation(FieldErrors::from(errors)))?;
    let activity = form.to_new_activity()?;
    let created = repo.create_activity(&activity).await.map_err(|err| {
        log::error!("Failed to log activity: {err}");
        ServiceError::from(err)
    })?;
    log::info!("Logged activity {}", created.title);
    Ok(created)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::types::{ActivityId, ActivityType};
    use crate::repository::mock::MockActivityRepository;

    #[tokio::test]
    async fn logs_a_valid_activity() {
        let mut repo = MockActivityRepository::new();
        repo.expect_create_activity()
            .withf(|activity| {
                activity.title == "Demo" && activity.activity_type == ActivityType::Meeting
            })
            .times(1)
            .returning(|activity| {
                Ok(Activity {
                    id: ActivityId::new(5).unwrap(),
                    title: activity.title.clone(),
                    activity_type: activity.activity_type,
                    description: None,
                    date: activity.date,
                    contact: None,
                    company: activity.company.clone(),
                })
            });
        let form = ActivityForm {
            title: "Demo".to_string(),
            activity_type: ActivityType::Meeting,
            date: "2024-03-01T10:00".to_string(),
            company: "Acme".to_string(),
            ..ActivityForm::default()
        };

        let created = log_activity(&repo, &form).await.unwrap();

        assert_eq!(created.id.get(), 5);
        assert_eq!(
            created.date,
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
    }

    #[tokio::test]
    async fn missing_title_is_not_sent() {
        let mut repo = MockActivityRepository::new();
        repo.expect_create_activity().never();

        let err = log_activity(&repo, &ActivityForm::default()).await.unwrap_err();

        assert!(err.field_errors().is_some_and(|f| f.get("title").is_some()));
    }
}
