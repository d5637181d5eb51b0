//! Mock gateway implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::activity::{Activity, NewActivity};
use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::deal::{Deal, NewDeal, UpdateDeal};
use crate::domain::filter::{CompanyFilter, ContactFilter, DealFilter, TaskFilter};
use crate::domain::task::{NewTask, Task, UpdateTask};
use crate::domain::types::{CompanyId, ContactId, DealId, TaskId};
use crate::repository::backend::{IdentityProvider, UserSession};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ActivityReader, ActivityWriter, EntityReader, EntityWriter};

mock! {
    pub ContactRepository {}

    #[async_trait]
    impl EntityReader<Contact> for ContactRepository {
        async fn list(&self, filter: &ContactFilter) -> RepositoryResult<Vec<Contact>>;
    }

    #[async_trait]
    impl EntityWriter<Contact> for ContactRepository {
        async fn create(&self, draft: &NewContact) -> RepositoryResult<Contact>;
        async fn update(&self, id: ContactId, changes: &UpdateContact) -> RepositoryResult<Contact>;
        async fn delete(&self, id: ContactId) -> RepositoryResult<()>;
    }
}

mock! {
    pub CompanyRepository {}

    #[async_trait]
    impl EntityReader<Company> for CompanyRepository {
        async fn list(&self, filter: &CompanyFilter) -> RepositoryResult<Vec<Company>>;
    }

    #[async_trait]
    impl EntityWriter<Company> for CompanyRepository {
        async fn create(&self, draft: &NewCompany) -> RepositoryResult<Company>;
        async fn update(&self, id: CompanyId, changes: &UpdateCompany) -> RepositoryResult<Company>;
        async fn delete(&self, id: CompanyId) -> RepositoryResult<()>;
    }
}

mock! {
    pub DealRepository {}

    #[async_trait]
    impl EntityReader<Deal> for DealRepository {
        async fn list(&self, filter: &DealFilter) -> RepositoryResult<Vec<Deal>>;
    }

    #[async_trait]
    impl EntityWriter<Deal> for DealRepository {
        async fn create(&self, draft: &NewDeal) -> RepositoryResult<Deal>;
        async fn update(&self, id: DealId, changes: &UpdateDeal) -> RepositoryResult<Deal>;
        async fn delete(&self, id: DealId) -> RepositoryResult<()>;
    }
}

mock! {
    pub TaskRepository {}

    #[async_trait]
    impl EntityReader<Task> for TaskRepository {
        async fn list(&self, filter: &TaskFilter) -> RepositoryResult<Vec<Task>>;
    }

    #[async_trait]
    impl EntityWriter<Task> for TaskRepository {
        async fn create(&self, draft: &NewTask) -> RepositoryResult<Task>;
        async fn update(&self, id: TaskId, changes: &UpdateTask) -> RepositoryResult<Task>;
        async fn delete(&self, id: TaskId) -> RepositoryResult<()>;
    }
}

mock! {
    pub ActivityRepository {}

    #[async_trait]
    impl ActivityReader for ActivityRepository {
        async fn recent(&self, limit: usize) -> RepositoryResult<Vec<Activity>>;
    }

    #[async_trait]
    impl ActivityWriter for ActivityRepository {
        async fn create_activity(&self, activity: &NewActivity) -> RepositoryResult<Activity>;
    }
}

mock! {
    pub Identity {}

    #[async_trait]
    impl IdentityProvider for Identity {
        async fn restore_session(&self) -> RepositoryResult<Option<UserSession>>;
        async fn logout(&self) -> RepositoryResult<()>;
    }
}
