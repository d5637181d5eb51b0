use serde::Deserialize;
use validator::Validate;

use crate::domain::task::{NewTask, Task, UpdateTask};
use crate::domain::types::{TaskCategory, TaskPriority, TaskStatus};
use crate::forms::{EntityForm, FormError, iso_date, not_blank, optional, parse_date};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for creating or editing a task.
pub struct TaskForm {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(
        custom(function = "not_blank", message = "Due date is required"),
        custom(function = "iso_date", message = "Invalid date format")
    )]
    pub due_date: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub status: TaskStatus,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task.due_date.format("%Y-%m-%d").to_string(),
            priority: task.priority,
            category: task.category,
            status: task.status,
        }
    }
}

impl TryFrom<&TaskForm> for NewTask {
    type Error = FormError;

    fn try_from(form: &TaskForm) -> Result<Self, Self::Error> {
        Ok(NewTask::new(
            form.title.clone(),
            optional(&form.description),
            parse_date(&form.due_date)?,
            form.priority,
            form.category,
            form.status,
        ))
    }
}

impl EntityForm<Task> for TaskForm {
    fn to_draft(&self) -> Result<NewTask, FormError> {
        NewTask::try_from(self)
    }

    fn to_changes(&self) -> Result<UpdateTask, FormError> {
        NewTask::try_from(self).map(UpdateTask::from)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn title_and_due_date_are_required() {
        let errors = TaskForm::default().check().unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("due_date"), Some("Due date is required"));
    }

    #[test]
    fn malformed_due_date() {
        let form = TaskForm {
            title: "Call Acme".to_string(),
            due_date: "2024-13-01".to_string(),
            ..TaskForm::default()
        };

        assert_eq!(
            form.check().unwrap_err().get("due_date"),
            Some("Invalid date format")
        );
    }

    #[test]
    fn draft_uses_parsed_due_date() {
        let form = TaskForm {
            title: " Call Acme ".to_string(),
            due_date: "2024-02-29".to_string(),
            priority: TaskPriority::High,
            category: TaskCategory::Call,
            ..TaskForm::default()
        };

        let draft = form.to_draft().unwrap();

        assert_eq!(draft.title, "Call Acme");
        assert_eq!(
            draft.due_date,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(draft.status, TaskStatus::Pending);
        assert_eq!(draft.description, None);
    }
}
