//! Hosted records API over HTTPS.
//!
//! Every request carries the project id and public key headers. Responses use
//! a `{success, message, data}` envelope; writes report per-record `results`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::models::config::AppConfig;
use crate::repository::backend::{DataBackend, IdentityProvider, UserSession};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::FetchParams;

const PROJECT_ID_HEADER: &str = "X-Apper-Project-Id";
const PUBLIC_KEY_HEADER: &str = "X-Apper-Public-Key";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
    #[serde(default = "Vec::new")]
    results: Vec<RecordResult>,
}

#[derive(Debug, Deserialize)]
struct RecordResult {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    fn ensure_success(&self) -> RepositoryResult<()> {
        if self.success {
            return Ok(());
        }
        Err(RepositoryError::Rejected(
            self.message
                .clone()
                .unwrap_or_else(|| "request was not successful".to_string()),
        ))
    }

    /// Data of the single record written by this request.
    fn into_written_record(self) -> RepositoryResult<Value> {
        self.ensure_success()?;
        let result = self
            .results
            .into_iter()
            .next()
            .ok_or_else(|| RepositoryError::Decode("response has no results".to_string()))?;

        if !result.success {
            return Err(RepositoryError::Rejected(
                result
                    .message
                    .unwrap_or_else(|| "record was rejected".to_string()),
            ));
        }

        result
            .data
            .ok_or_else(|| RepositoryError::Decode("result has no data".to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    public_key: String,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            public_key: config.public_key.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, path))
            .header(PROJECT_ID_HEADER, &self.project_id)
            .header(PUBLIC_KEY_HEADER, &self.public_key)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> RepositoryResult<Envelope<T>> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::NOT_FOUND => RepositoryError::NotFound,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RepositoryError::Unauthorized,
                _ => RepositoryError::Backend {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        Ok(response.json::<Envelope<T>>().await?)
    }
}

#[async_trait]
impl DataBackend for HttpBackend {
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> RepositoryResult<Vec<Value>> {
        log::debug!("Fetching {table} records");
        let path = format!("tables/{table}/fetch");
        let request = self.request(Method::POST, &path).json(params);
        let envelope: Envelope<Vec<Value>> = self.send(request).await?;
        envelope.ensure_success()?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn create_record(&self, table: &str, record: Value) -> RepositoryResult<Value> {
        let path = format!("tables/{table}/records");
        let body = json!({ "records": [record] });
        let request = self.request(Method::POST, &path).json(&body);
        let envelope: Envelope<Value> = self.send(request).await?;
        envelope.into_written_record()
    }

    async fn update_record(&self, table: &str, record: Value) -> RepositoryResult<Value> {
        let path = format!("tables/{table}/records");
        let body = json!({ "records": [record] });
        let request = self.request(Method::PATCH, &path).json(&body);
        let envelope: Envelope<Value> = self.send(request).await?;
        envelope.into_written_record()
    }

    async fn delete_records(&self, table: &str, ids: &[i32]) -> RepositoryResult<()> {
        let path = format!("tables/{table}/records");
        let body = json!({ "RecordIds": ids });
        let request = self.request(Method::DELETE, &path).json(&body);
        let envelope: Envelope<Value> = self.send(request).await?;
        envelope.ensure_success()?;

        if let Some(failed) = envelope.results.into_iter().find(|result| !result.success) {
            return Err(RepositoryError::Rejected(
                failed
                    .message
                    .unwrap_or_else(|| "record was not deleted".to_string()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for HttpBackend {
    async fn restore_session(&self) -> RepositoryResult<Option<UserSession>> {
        let envelope: Envelope<UserSession> = match self
            .send(self.request(Method::GET, "auth/session"))
            .await
        {
            Ok(envelope) => envelope,
            Err(RepositoryError::Unauthorized) => return Ok(None),
            Err(err) => return Err(err),
        };
        envelope.ensure_success()?;
        Ok(envelope.data)
    }

    async fn logout(&self) -> RepositoryResult<()> {
        let envelope: Envelope<Value> = self.send(self.request(Method::POST, "auth/logout")).await?;
        envelope.ensure_success()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn written_record_is_taken_from_first_result() {
        let envelope: Envelope<Value> = serde_json::from_value(json!({
            "success": true,
            "results": [{"success": true, "data": {"Id": 7, "Name": "Acme"}}]
        }))
        .unwrap();

        assert_eq!(
            envelope.into_written_record().unwrap(),
            json!({"Id": 7, "Name": "Acme"})
        );
    }

    #[test]
    fn rejected_result_carries_backend_message() {
        let envelope: Envelope<Value> = serde_json::from_value(json!({
            "success": true,
            "results": [{"success": false, "message": "email must be unique"}]
        }))
        .unwrap();

        match envelope.into_written_record() {
            Err(RepositoryError::Rejected(message)) => assert_eq!(message, "email must be unique"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unsuccessful_envelope_is_rejected() {
        let envelope: Envelope<Vec<Value>> =
            serde_json::from_value(json!({"success": false, "message": "bad table"})).unwrap();

        assert!(matches!(
            envelope.ensure_success(),
            Err(RepositoryError::Rejected(message)) if message == "bad table"
        ));
    }

    #[test]
    fn backend_trims_trailing_slash() {
        let config = AppConfig {
            project_id: "p".to_string(),
            public_key: "k".to_string(),
            api_url: "https://api.example.com/v1/".to_string(),
            ..AppConfig::default()
        };

        let backend = HttpBackend::new(&config).unwrap();
        assert_eq!(backend.base_url, "https://api.example.com/v1");
    }
}
