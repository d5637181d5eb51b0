use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::filter::TaskFilter;
use crate::domain::task::{
    NewTask as DomainNewTask, Task as DomainTask, UpdateTask as DomainUpdateTask,
};
use crate::domain::types::TaskId;
use crate::models::{
    TableRecord, choice_or_default, lenient_date, lenient_datetime, lenient_text, patch_text,
    record_id, required_text, to_value,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::Condition;

#[derive(Debug, Clone, Deserialize)]
/// Row of the `task` table.
pub struct Task {
    #[serde(rename = "Id", deserialize_with = "record_id")]
    pub id: i32,
    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(rename = "dueDate", default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(rename = "CreatedOn", default, deserialize_with = "lenient_datetime")]
    pub created_on: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
/// Insertable form of [`Task`].
pub struct NewTask<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(rename = "dueDate")]
    pub due_date: NaiveDate,
    pub priority: &'static str,
    pub category: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
/// Partial update of a [`Task`] row.
pub struct UpdateTask<'a> {
    #[serde(rename = "Id")]
    pub id: i32,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<&'a str>>,
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}

impl TryFrom<Task> for DomainTask {
    type Error = RepositoryError;

    fn try_from(row: Task) -> Result<Self, Self::Error> {
        let id = TaskId::new(row.id)?;
        let title = required_text(row.title.or(row.name), "title")?;
        let due_date = row
            .due_date
            .ok_or_else(|| RepositoryError::Decode(format!("task {} has no dueDate", row.id)))?;

        Ok(Self {
            id,
            title,
            description: row.description,
            due_date,
            priority: choice_or_default(row.priority.as_deref(), "priority", row.id),
            category: choice_or_default(row.category.as_deref(), "category", row.id),
            status: choice_or_default(row.status.as_deref(), "status", row.id),
            created_on: row.created_on,
        })
    }
}

impl<'a> From<&'a DomainNewTask> for NewTask<'a> {
    fn from(task: &'a DomainNewTask) -> Self {
        Self {
            name: task.title.as_str(),
            title: task.title.as_str(),
            description: task.description.as_deref(),
            due_date: task.due_date,
            priority: task.priority.as_str(),
            category: task.category.as_str(),
            status: task.status.as_str(),
        }
    }
}

impl<'a> UpdateTask<'a> {
    pub fn new(id: TaskId, changes: &'a DomainUpdateTask) -> Self {
        Self {
            id: id.get(),
            name: changes.title.as_deref(),
            title: changes.title.as_deref(),
            description: patch_text(&changes.description),
            due_date: changes.due_date,
            priority: changes.priority.map(|p| p.as_str()),
            category: changes.category.map(|c| c.as_str()),
            status: changes.status.map(|s| s.as_str()),
        }
    }
}

impl TableRecord for DomainTask {
    const TABLE: &'static str = "task";
    const FIELDS: &'static [&'static str] = &[
        "Id",
        "Name",
        "title",
        "description",
        "dueDate",
        "priority",
        "category",
        "status",
        "CreatedOn",
        "ModifiedOn",
    ];
    const ORDER_BY: &'static str = "dueDate";
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "description"];

    fn exact_conditions(filter: &TaskFilter) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(status) = filter.status {
            conditions.push(Condition::exact("status", status.as_str()));
        }
        if let Some(priority) = filter.priority {
            conditions.push(Condition::exact("priority", priority.as_str()));
        }
        conditions
    }

    fn from_record(record: Value) -> RepositoryResult<Self> {
        serde_json::from_value::<Task>(record)?.try_into()
    }

    fn draft_record(draft: &DomainNewTask) -> RepositoryResult<Value> {
        to_value(&NewTask::from(draft))
    }

    fn changes_record(id: TaskId, changes: &DomainUpdateTask) -> RepositoryResult<Value> {
        to_value(&UpdateTask::new(id, changes))
    }
}
