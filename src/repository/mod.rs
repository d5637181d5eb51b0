//! Remote data gateway.
//!
//! Services depend on the [`EntityReader`]/[`EntityWriter`] traits;
//! [`RemoteRepository`] implements them for every table-backed entity on top
//! of an injected [`DataBackend`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Entity;
use crate::domain::activity::{Activity, NewActivity};
use crate::models::{self, TableRecord, decode_records};
use crate::repository::backend::DataBackend;
use crate::repository::errors::RepositoryResult;

pub mod backend;
pub mod errors;
#[cfg(feature = "client")]
pub mod http;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod query;

#[async_trait]
pub trait EntityReader<E: Entity>: Send + Sync {
    /// Records matching `filter` in the table's display order.
    async fn list(&self, filter: &E::Filter) -> RepositoryResult<Vec<E>>;
}

#[async_trait]
pub trait EntityWriter<E: Entity>: Send + Sync {
    /// Persists `draft`; the returned record carries the backend id.
    async fn create(&self, draft: &E::Draft) -> RepositoryResult<E>;
    async fn update(&self, id: E::Id, changes: &E::Changes) -> RepositoryResult<E>;
    async fn delete(&self, id: E::Id) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ActivityReader: Send + Sync {
    /// Newest `limit` activities first.
    async fn recent(&self, limit: usize) -> RepositoryResult<Vec<Activity>>;
}

#[async_trait]
pub trait ActivityWriter: Send + Sync {
    async fn create_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity>;
}

#[derive(Clone)]
pub struct RemoteRepository {
    backend: Arc<dyn DataBackend>,
}

impl RemoteRepository {
    pub fn new(backend: Arc<dyn DataBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl<E> EntityReader<E> for RemoteRepository
where
    E: TableRecord,
{
    async fn list(&self, filter: &E::Filter) -> RepositoryResult<Vec<E>> {
        let params = E::fetch_params(filter);
        let records = self.backend.fetch_records(E::TABLE, &params).await?;
        Ok(decode_records(E::LABEL, records, E::from_record))
    }
}

#[async_trait]
impl<E> EntityWriter<E> for RemoteRepository
where
    E: TableRecord,
    E::Id: Into<i32>,
{
    async fn create(&self, draft: &E::Draft) -> RepositoryResult<E> {
        let record = E::draft_record(draft)?;
        let created = self.backend.create_record(E::TABLE, record).await?;
        let created = E::from_record(created)?;
        log::info!("Created {} {}", E::LABEL, created.id());
        Ok(created)
    }

    async fn update(&self, id: E::Id, changes: &E::Changes) -> RepositoryResult<E> {
        let record = E::changes_record(id, changes)?;
        let updated = self.backend.update_record(E::TABLE, record).await?;
        E::from_record(updated)
    }

    async fn delete(&self, id: E::Id) -> RepositoryResult<()> {
        self.backend.delete_records(E::TABLE, &[id.into()]).await?;
        log::info!("Deleted {} {id}", E::LABEL);
        Ok(())
    }
}

#[async_trait]
impl ActivityReader for RemoteRepository {
    async fn recent(&self, limit: usize) -> RepositoryResult<Vec<Activity>> {
        let params = models::activity::recent_params(limit);
        let records = self
            .backend
            .fetch_records(models::activity::TABLE, &params)
            .await?;
        Ok(decode_records(
            "Activity",
            records,
            models::activity::from_record,
        ))
    }
}

#[async_trait]
impl ActivityWriter for RemoteRepository {
    async fn create_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity> {
        let record = models::activity::draft_record(activity)?;
        let created = self
            .backend
            .create_record(models::activity::TABLE, record)
            .await?;
        models::activity::from_record(created)
    }
}
