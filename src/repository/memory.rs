//! In-process records backend.
//!
//! Evaluates [`FetchParams`] against JSON rows the same way the hosted API
//! does, so the gateway can be exercised without a network.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use crate::repository::backend::{DataBackend, IdentityProvider, UserSession};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::{
    Condition, ConditionOperator, FetchParams, GroupOperator, SortType, WhereGroup,
};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Map<String, Value>>,
    next_id: i64,
}

#[derive(Debug, Default)]
struct State {
    tables: HashMap<String, Table>,
    fetches: Vec<(String, FetchParams)>,
    failure: Option<String>,
    session: Option<UserSession>,
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `rows` to `table`. Rows without an `Id` get the next free one.
    pub fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        {
            let mut state = self.lock();
            let table = state.tables.entry(table.to_string()).or_default();
            for row in rows {
                if let Value::Object(row) = row {
                    insert_row(table, row);
                }
            }
        }
        self
    }

    pub fn with_session(self, session: UserSession) -> Self {
        self.lock().session = Some(session);
        self
    }

    /// Makes every following call fail with a transport error until cleared.
    pub fn set_failure(&self, message: Option<&str>) {
        self.lock().failure = message.map(str::to_string);
    }

    /// Current rows of `table` in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock()
            .tables
            .get(table)
            .map(|table| table.rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default()
    }

    /// Every fetch received so far.
    pub fn fetches(&self) -> Vec<(String, FetchParams)> {
        self.lock().fetches.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_failure(state: &State) -> RepositoryResult<()> {
        match &state.failure {
            Some(message) => Err(RepositoryError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

fn timestamp_now() -> Value {
    let now = Utc::now().naive_utc();
    Value::from(now.format("%Y-%m-%dT%H:%M:%S").to_string())
}

fn insert_row(table: &mut Table, mut row: Map<String, Value>) -> Map<String, Value> {
    let id = match row.get("Id").and_then(Value::as_i64) {
        Some(id) => id,
        None => table.next_id + 1,
    };
    table.next_id = table.next_id.max(id);
    row.insert("Id".to_string(), Value::from(id));
    table.rows.push(row.clone());
    row
}

fn row_id(row: &Map<String, Value>) -> Option<i64> {
    row.get("Id").and_then(Value::as_i64)
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(value_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

fn condition_matches(row: &Map<String, Value>, condition: &Condition) -> bool {
    let Some(actual) = row.get(&condition.field_name).and_then(value_text) else {
        return false;
    };

    match condition.operator {
        ConditionOperator::Contains => {
            let actual = actual.to_lowercase();
            condition
                .values
                .iter()
                .any(|value| actual.contains(&value.to_lowercase()))
        }
        ConditionOperator::ExactMatch => condition.values.iter().any(|value| *value == actual),
    }
}

fn group_matches(row: &Map<String, Value>, group: &WhereGroup) -> bool {
    let mut sub_groups = group.sub_groups.iter().map(|sub_group| {
        sub_group
            .conditions
            .iter()
            .all(|condition| condition_matches(row, condition))
    });

    match group.operator {
        GroupOperator::Or => sub_groups.any(|matched| matched),
        GroupOperator::And => sub_groups.all(|matched| matched),
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Number(l)), Some(Value::Number(r))) => l
            .as_f64()
            .partial_cmp(&r.as_f64())
            .unwrap_or(Ordering::Equal),
        (l, r) => {
            let l = l.and_then(value_text);
            let r = r.and_then(value_text);
            match (l, r) {
                (Some(l), Some(r)) => l.to_lowercase().cmp(&r.to_lowercase()),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
    }
}

fn project(row: &Map<String, Value>, fields: &[String]) -> Value {
    if fields.is_empty() {
        return Value::Object(row.clone());
    }
    let projected = fields
        .iter()
        .filter_map(|field| row.get(field).map(|value| (field.clone(), value.clone())))
        .collect();
    Value::Object(projected)
}

fn object(record: Value) -> RepositoryResult<Map<String, Value>> {
    match record {
        Value::Object(map) => Ok(map),
        other => Err(RepositoryError::ValidationError(format!(
            "record must be an object, got {other}"
        ))),
    }
}

#[async_trait]
impl DataBackend for MemoryBackend {
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> RepositoryResult<Vec<Value>> {
        let mut state = self.lock();
        state.fetches.push((table.to_string(), params.clone()));
        Self::check_failure(&state)?;

        let Some(rows) = state.tables.get(table).map(|table| &table.rows) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<&Map<String, Value>> = rows
            .iter()
            .filter(|row| {
                params
                    .conditions
                    .iter()
                    .all(|condition| condition_matches(row, condition))
            })
            .filter(|row| {
                params
                    .where_groups
                    .iter()
                    .all(|group| group_matches(row, group))
            })
            .collect();

        for order in params.order_by.iter().rev() {
            matched.sort_by(|left, right| {
                let ordering =
                    compare_values(left.get(&order.field_name), right.get(&order.field_name));
                match order.sort_type {
                    SortType::Asc => ordering,
                    SortType::Desc => ordering.reverse(),
                }
            });
        }

        let (offset, limit) = match params.paging_info {
            Some(paging) => (paging.offset, paging.limit),
            None => (0, usize::MAX),
        };

        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|row| project(row, &params.fields))
            .collect())
    }

    async fn create_record(&self, table: &str, record: Value) -> RepositoryResult<Value> {
        let mut state = self.lock();
        Self::check_failure(&state)?;

        let mut row = object(record)?;
        row.remove("Id");
        row.entry("CreatedOn").or_insert_with(timestamp_now);

        let table = state.tables.entry(table.to_string()).or_default();
        Ok(Value::Object(insert_row(table, row)))
    }

    async fn update_record(&self, table: &str, record: Value) -> RepositoryResult<Value> {
        let mut state = self.lock();
        Self::check_failure(&state)?;

        let changes = object(record)?;
        let id = row_id(&changes)
            .ok_or_else(|| RepositoryError::ValidationError("update without Id".to_string()))?;

        let row = state
            .tables
            .get_mut(table)
            .and_then(|table| table.rows.iter_mut().find(|row| row_id(row) == Some(id)))
            .ok_or(RepositoryError::NotFound)?;

        row.extend(changes);
        row.insert("ModifiedOn".to_string(), timestamp_now());
        Ok(Value::Object(row.clone()))
    }

    async fn delete_records(&self, table: &str, ids: &[i32]) -> RepositoryResult<()> {
        let mut state = self.lock();
        Self::check_failure(&state)?;

        let table = state
            .tables
            .get_mut(table)
            .ok_or(RepositoryError::NotFound)?;

        let before = table.rows.len();
        table.rows.retain(|row| {
            row_id(row).is_none_or(|id| !ids.iter().any(|wanted| i64::from(*wanted) == id))
        });

        if table.rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for MemoryBackend {
    async fn restore_session(&self) -> RepositoryResult<Option<UserSession>> {
        let state = self.lock();
        Self::check_failure(&state)?;
        Ok(state.session.clone())
    }

    async fn logout(&self) -> RepositoryResult<()> {
        let mut state = self.lock();
        Self::check_failure(&state)?;
        state.session = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::repository::query::PagingInfo;

    fn backend() -> MemoryBackend {
        MemoryBackend::new().with_rows(
            "company",
            vec![
                json!({"Name": "Globex", "industry": "Energy", "location": "Springfield"}),
                json!({"Name": "acme", "industry": "Technology", "location": "Berlin"}),
                json!({"Name": "Initech", "industry": "Technology", "location": "Austin",
                       "description": "Software for banks"}),
            ],
        )
    }

    #[tokio::test]
    async fn fetch_applies_conditions_groups_and_order() {
        let backend = backend();
        let params = FetchParams::new(&["Id", "Name"])
            .order_by("Name", SortType::Asc)
            .condition(Condition::exact("industry", "Technology"))
            .search(&["Name", "description"], Some("SOFT"));

        let rows = backend.fetch_records("company", &params).await.unwrap();

        assert_eq!(rows, vec![json!({"Id": 3, "Name": "Initech"})]);
    }

    #[tokio::test]
    async fn fetch_orders_case_insensitively_and_pages() {
        let backend = backend();
        let params = FetchParams::new(&["Name"])
            .order_by("Name", SortType::Asc)
            .paginate(Some(PagingInfo {
                limit: 2,
                offset: 1,
            }));

        let rows = backend.fetch_records("company", &params).await.unwrap();

        assert_eq!(
            rows,
            vec![json!({"Name": "Globex"}), json!({"Name": "Initech"})]
        );
    }

    #[tokio::test]
    async fn create_assigns_next_id() {
        let backend = backend();

        let created = backend
            .create_record("company", json!({"Id": 99, "Name": "Umbrella"}))
            .await
            .unwrap();

        assert_eq!(created["Id"], json!(4));
        assert!(created.get("CreatedOn").is_some());
    }

    #[tokio::test]
    async fn update_merges_only_sent_fields() {
        let backend = backend();

        let updated = backend
            .update_record("company", json!({"Id": 2, "location": "Munich"}))
            .await
            .unwrap();

        assert_eq!(updated["Name"], json!("acme"));
        assert_eq!(updated["location"], json!("Munich"));

        let missing = backend
            .update_record("company", json!({"Id": 42, "location": "Paris"}))
            .await;
        assert!(matches!(missing, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn delete_removes_rows() {
        let backend = backend();

        backend.delete_records("company", &[1]).await.unwrap();

        assert_eq!(backend.rows("company").len(), 2);
        assert!(matches!(
            backend.delete_records("company", &[1]).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn injected_failure_surfaces_as_transport_error() {
        let backend = backend();
        backend.set_failure(Some("offline"));

        let result = backend
            .fetch_records("company", &FetchParams::default())
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::Transport(message)) if message == "offline"
        ));
    }
}
