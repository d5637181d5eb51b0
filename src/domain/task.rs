use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::filter::TaskFilter;
use crate::domain::types::{TaskCategory, TaskId, TaskPriority, TaskStatus, sanitized_text};
use crate::domain::{Entity, Searchable};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub status: TaskStatus,
    pub created_on: Option<NaiveDateTime>,
}

impl Task {
    /// Open tasks whose due date lies before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Completed && self.due_date < today
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub status: TaskStatus,
}

impl NewTask {
    #[must_use]
    pub fn new(
        title: String,
        description: Option<String>,
        due_date: NaiveDate,
        priority: TaskPriority,
        category: TaskCategory,
        status: TaskStatus,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            description: sanitized_text(description),
            due_date,
            priority,
            category,
            status,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<TaskPriority>,
    pub category: Option<TaskCategory>,
    pub status: Option<TaskStatus>,
}

impl UpdateTask {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl From<NewTask> for UpdateTask {
    fn from(task: NewTask) -> Self {
        Self {
            title: Some(task.title),
            description: Some(task.description),
            due_date: Some(task.due_date),
            priority: Some(task.priority),
            category: Some(task.category),
            status: Some(task.status),
        }
    }
}

impl Entity for Task {
    type Id = TaskId;
    type Draft = NewTask;
    type Changes = UpdateTask;
    type Filter = TaskFilter;

    const LABEL: &'static str = "Task";
    const PLURAL: &'static str = "tasks";

    fn id(&self) -> TaskId {
        self.id
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.title.as_str()), self.description.as_deref()]
    }

    /// Due dates can change locally before the next refresh.
    fn display_order(items: &mut [Self]) {
        items.sort_by_key(|task| task.due_date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(due: NaiveDate, status: TaskStatus) -> Task {
        Task {
            id: TaskId::new(1).unwrap(),
            title: "Send proposal".to_string(),
            description: None,
            due_date: due,
            priority: TaskPriority::High,
            category: TaskCategory::Email,
            status,
            created_on: None,
        }
    }

    #[test]
    fn overdue_ignores_completed_and_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        assert!(task(yesterday, TaskStatus::Pending).is_overdue(today));
        assert!(task(yesterday, TaskStatus::InProgress).is_overdue(today));
        assert!(!task(yesterday, TaskStatus::Completed).is_overdue(today));
        assert!(!task(today, TaskStatus::Pending).is_overdue(today));
    }
}
