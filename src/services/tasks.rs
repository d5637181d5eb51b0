//! Tasks page.

use chrono::NaiveDate;

use crate::domain::filter::TaskFilter;
use crate::domain::task::{Task, UpdateTask};
use crate::domain::types::TaskId;
use crate::forms::task::TaskForm;
use crate::repository::{EntityReader, EntityWriter};
use crate::services::{ServiceError, ServiceResult, records};
use crate::store::{EntityStore, RefreshOutcome};

pub async fn load_tasks<R>(repo: &R, store: &mut EntityStore<Task>) -> RefreshOutcome
where
    R: EntityReader<Task> + ?Sized,
{
    records::refresh(repo, store, &TaskFilter::default()).await
}

pub async fn create_task<R>(
    repo: &R,
    store: &mut EntityStore<Task>,
    form: &TaskForm,
) -> ServiceResult<Task>
where
    R: EntityWriter<Task> + ?Sized,
{
    records::add(repo, store, form).await
}

pub async fn update_task<R>(
    repo: &R,
    store: &mut EntityStore<Task>,
    id: TaskId,
    form: &TaskForm,
) -> ServiceResult<Task>
where
    R: EntityWriter<Task> + ?Sized,
{
    records::apply_edit(repo, store, id, form).await
}

/// Completes an open task or reopens a completed one.
pub async fn toggle_status<R>(
    repo: &R,
    store: &mut EntityStore<Task>,
    id: TaskId,
) -> ServiceResult<Task>
where
    R: EntityWriter<Task> + ?Sized,
{
    let task = store.get(id).ok_or(ServiceError::NotFound)?;
    let status = task.status.toggled();
    records::update_fields(repo, store, id, &UpdateTask::status(status)).await
}

/// Open tasks past their due date.
pub fn overdue(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|task| task.is_overdue(today)).collect()
}
