//! Wire models for the records API tables.
//!
//! Rows are decoded leniently: unknown enumeration values fall back to the
//! default variant and unparseable dates become `None`, each with a warning.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::Entity;
use crate::domain::filter::RecordFilter;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::{Condition, FetchParams, PagingInfo, SortType};

pub mod activity;
pub mod company;
pub mod config;
pub mod contact;
pub mod deal;
pub mod task;

/// An entity stored in one table of the records API.
pub trait TableRecord: Entity {
    const TABLE: &'static str;
    const FIELDS: &'static [&'static str];
    const ORDER_BY: &'static str;
    const SORT: SortType = SortType::Asc;
    /// Fields OR-ed together for the free-text search term.
    const SEARCH_FIELDS: &'static [&'static str];

    /// `ExactMatch` conditions for the categorical values set on `filter`.
    fn exact_conditions(filter: &Self::Filter) -> Vec<Condition>;

    fn from_record(record: Value) -> RepositoryResult<Self>;

    fn draft_record(draft: &Self::Draft) -> RepositoryResult<Value>;

    /// `Id` plus only the fields present in `changes`.
    fn changes_record(id: Self::Id, changes: &Self::Changes) -> RepositoryResult<Value>;

    fn fetch_params(filter: &Self::Filter) -> FetchParams {
        FetchParams::new(Self::FIELDS)
            .order_by(Self::ORDER_BY, Self::SORT)
            .search(Self::SEARCH_FIELDS, filter.search_term())
            .conditions(Self::exact_conditions(filter))
            .paginate(filter.paging().map(PagingInfo::from))
    }
}

/// Decodes every row it can; rows that fail are logged and skipped.
pub fn decode_records<T>(
    label: &str,
    records: Vec<Value>,
    decode: impl Fn(Value) -> RepositoryResult<T>,
) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match decode(record) {
            Ok(item) => Some(item),
            Err(err) => {
                log::warn!("Skipping undecodable {label} record: {err}");
                None
            }
        })
        .collect()
}

pub(crate) fn to_value<T: serde::Serialize>(record: &T) -> RepositoryResult<Value> {
    Ok(serde_json::to_value(record)?)
}

/// Parses a closed-enum wire value, using the default for unknown values.
/// Patch value of an optional text field; a cleared field is sent as `null`.
pub(crate) fn patch_text(value: &Option<Option<String>>) -> Option<Option<&str>> {
    value.as_ref().map(Option::as_deref)
}

pub(crate) fn choice_or_default<T>(value: Option<&str>, field: &str, id: i32) -> T
where
    T: FromStr + Default,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => T::default(),
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Record {id}: unknown {field} value '{raw}', using default");
            T::default()
        }),
    }
}

pub(crate) fn required_text(value: Option<String>, field: &str) -> RepositoryResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| RepositoryError::Decode(format!("missing {field}")))
}

fn parse_datetime_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime_text(text).map(|dt| dt.date()))
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        other => Some(other.to_string()),
    }
}

/// Accepts strings and numbers; `null` and blanks become `None`.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(text_of)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty()))
}

pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = lenient_text(deserializer)?;
    Ok(text.and_then(|text| {
        let parsed = parse_date_text(&text);
        if parsed.is_none() {
            log::warn!("Ignoring unparseable date '{text}'");
        }
        parsed
    }))
}

pub(crate) fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = lenient_text(deserializer)?;
    Ok(text.and_then(|text| {
        let parsed = parse_datetime_text(&text);
        if parsed.is_none() {
            log::warn!("Ignoring unparseable timestamp '{text}'");
        }
        parsed
    }))
}

/// Record id sent either as a number or a numeric string.
pub(crate) fn record_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_of(&value).ok_or_else(|| serde::de::Error::custom(format!("invalid record id {value}")))
}

fn id_of(value: &Value) -> Option<i32> {
    match value {
        Value::Number(number) => number.as_i64().and_then(|id| i32::try_from(id).ok()),
        Value::String(text) => text.trim().parse().ok(),
        Value::Object(map) => map.get("Id").and_then(id_of),
        _ => None,
    }
}

/// Id list sent as an array (of numbers, strings or `{Id}` lookups) or as a
/// comma separated string. Entries that are not ids are dropped.
pub(crate) fn lenient_id_list<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(id_of).collect(),
        Some(Value::String(text)) => text
            .split(',')
            .filter_map(|part| part.trim().parse().ok())
            .collect(),
        Some(other) => id_of(&other).into_iter().collect(),
    })
}
