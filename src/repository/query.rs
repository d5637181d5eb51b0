//! Structured fetch parameters sent to the records API.

use serde::{Deserialize, Serialize};

use crate::domain::filter::Paging;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionOperator {
    /// Case-insensitive substring match.
    Contains,
    ExactMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field_name: String,
    pub operator: ConditionOperator,
    pub values: Vec<String>,
}

impl Condition {
    pub fn contains(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            operator: ConditionOperator::Contains,
            values: vec![value.into()],
        }
    }

    pub fn exact(field_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            operator: ConditionOperator::ExactMatch,
            values: vec![value.into()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupOperator {
    Or,
    And,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubGroup {
    pub conditions: Vec<Condition>,
}

/// Sub-groups joined with `operator`; conditions inside a sub-group are AND-ed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhereGroup {
    pub operator: GroupOperator,
    pub sub_groups: Vec<SubGroup>,
}

impl WhereGroup {
    /// One sub-group per field, any of which may contain `term`.
    pub fn any_contains(fields: &[&str], term: &str) -> Self {
        Self {
            operator: GroupOperator::Or,
            sub_groups: fields
                .iter()
                .map(|field| SubGroup {
                    conditions: vec![Condition::contains(*field, term)],
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub field_name: String,
    #[serde(rename = "SortType")]
    pub sort_type: SortType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub limit: usize,
    pub offset: usize,
}

impl From<Paging> for PagingInfo {
    fn from(paging: Paging) -> Self {
        Self {
            limit: paging.limit,
            offset: paging.offset,
        }
    }
}

/// Body of a `fetch` call. Empty sections are left out of the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
    pub fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(default, rename = "where", skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub where_groups: Vec<WhereGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<PagingInfo>,
}

impl FetchParams {
    pub fn new(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|field| field.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn order_by(mut self, field_name: &str, sort_type: SortType) -> Self {
        self.order_by.push(OrderBy {
            field_name: field_name.to_string(),
            sort_type,
        });
        self
    }

    /// Adds an OR group over `fields` when `term` is set.
    pub fn search(mut self, fields: &[&str], term: Option<&str>) -> Self {
        if let Some(term) = term
            && !fields.is_empty()
        {
            self.where_groups.push(WhereGroup::any_contains(fields, term));
        }
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    pub fn paginate(mut self, paging: Option<PagingInfo>) -> Self {
        self.paging_info = paging;
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn payload_matches_records_api_shape() {
        let params = FetchParams::new(&["Id", "Name"])
            .order_by("Name", SortType::Asc)
            .search(&["Name", "email"], Some("acme"))
            .condition(Condition::exact("type", "lead"))
            .paginate(Some(PagingInfo {
                limit: 20,
                offset: 40,
            }));

        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(
            value,
            json!({
                "fields": ["Id", "Name"],
                "orderBy": [{"fieldName": "Name", "SortType": "ASC"}],
                "where": [{"fieldName": "type", "operator": "ExactMatch", "values": ["lead"]}],
                "whereGroups": [{
                    "operator": "OR",
                    "subGroups": [
                        {"conditions": [{"fieldName": "Name", "operator": "Contains", "values": ["acme"]}]},
                        {"conditions": [{"fieldName": "email", "operator": "Contains", "values": ["acme"]}]}
                    ]
                }],
                "pagingInfo": {"limit": 20, "offset": 40}
            })
        );
    }

    #[test]
    fn unset_criteria_are_omitted() {
        let params = FetchParams::new(&["Id"]).search(&["Name"], None);
        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(value, json!({"fields": ["Id"]}));
    }
}
