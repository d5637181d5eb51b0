//! Store workflows shared by every entity page.

use crate::domain::Entity;
use crate::forms::EntityForm;
use crate::repository::{EntityReader, EntityWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::store::{EntityStore, RefreshOutcome};

/// Reloads the store from the backend.
///
/// Failures end up in [`EntityStore::error`]; the previous items stay visible.
pub async fn refresh<E, R>(
    repo: &R,
    store: &mut EntityStore<E>,
    filter: &E::Filter,
) -> RefreshOutcome
where
    E: Entity,
    R: EntityReader<E> + ?Sized,
{
    let ticket = store.begin_refresh();
    let result = repo.list(filter).await;
    store.finish_refresh(ticket, result)
}

/// Validates the form and creates the record.
///
/// The record is appended once the backend confirmed it; nothing is shown
/// optimistically.
pub async fn add<E, R, F>(repo: &R, store: &mut EntityStore<E>, form: &F) -> ServiceResult<E>
where
    E: Entity,
    R: EntityWriter<E> + ?Sized,
    F: EntityForm<E> + ?Sized,
{
    form.check().map_err(ServiceError::Validation)?;
    let draft = form.to_draft()?;

    let draft_id = store.begin_create(draft.clone());
    let result = repo.create(&draft).await;
    store.finish_create(draft_id, result.clone());

    let record = result?;
    log::info!("Added {} {}", E::LABEL, record.display_name());
    Ok(record)
}

/// Validates the form and saves every editable field of record `id`.
pub async fn apply_edit<E, R, F>(
    repo: &R,
    store: &mut EntityStore<E>,
    id: E::Id,
    form: &F,
) -> ServiceResult<E>
where
    E: Entity,
    R: EntityWriter<E> + ?Sized,
    F: EntityForm<E> + ?Sized,
{
    form.check().map_err(ServiceError::Validation)?;
    let changes = form.to_changes()?;
    update_fields(repo, store, id, &changes).await
}

/// Sends a partial update without form validation.
pub async fn update_fields<E, R>(
    repo: &R,
    store: &mut EntityStore<E>,
    id: E::Id,
    changes: &E::Changes,
) -> ServiceResult<E>
where
    E: Entity,
    R: EntityWriter<E> + ?Sized,
{
    let record = repo.update(id, changes).await.map_err(|err| {
        log::error!("Failed to update {} {id}: {err}", E::LABEL);
        ServiceError::from(err)
    })?;
    Ok(store.apply_update(id, record).into_record())
}

/// Deletes record `id` and drops it from the store.
pub async fn remove<E, R>(repo: &R, store: &mut EntityStore<E>, id: E::Id) -> ServiceResult<()>
where
    E: Entity,
    R: EntityWriter<E> + ?Sized,
{
    repo.delete(id).await.map_err(|err| {
        log::error!("Failed to delete {} {id}: {err}", E::LABEL);
        ServiceError::from(err)
    })?;
    store.apply_delete(id);
    Ok(())
}

/// Second step of a delete started with [`EntityStore::request_delete`].
///
/// Returns the deleted id, or `None` when nothing awaited confirmation.
pub async fn confirm_delete<E, R>(
    repo: &R,
    store: &mut EntityStore<E>,
) -> ServiceResult<Option<E::Id>>
where
    E: Entity,
    R: EntityWriter<E> + ?Sized,
{
    let Some(id) = store.take_pending_delete() else {
        return Ok(None);
    };
    remove(repo, store, id).await?;
    Ok(Some(id))
}
