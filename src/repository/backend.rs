//! Seams between the gateway and whatever stores the records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::repository::errors::RepositoryResult;
use crate::repository::query::FetchParams;

/// Untyped table access offered by the hosted records API.
///
/// Records are JSON objects keyed by wire field names; `Id` is assigned by
/// the backend on create.
#[async_trait]
pub trait DataBackend: Send + Sync {
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> RepositoryResult<Vec<Value>>;

    async fn create_record(&self, table: &str, record: Value) -> RepositoryResult<Value>;

    /// `record` carries `Id` plus only the fields to change.
    async fn update_record(&self, table: &str, record: Value) -> RepositoryResult<Value>;

    async fn delete_records(&self, table: &str, ids: &[i32]) -> RepositoryResult<()>;
}

/// Signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub user_id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserSession {
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => self.email.clone(),
        }
    }
}

/// External authentication. The sign-in flow itself is owned by the provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current session, `None` when nobody is signed in.
    async fn restore_session(&self) -> RepositoryResult<Option<UserSession>>;

    async fn logout(&self) -> RepositoryResult<()>;
}
