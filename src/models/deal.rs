use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::deal::{
    Deal as DomainDeal, NewDeal as DomainNewDeal, UpdateDeal as DomainUpdateDeal,
};
use crate::domain::filter::DealFilter;
use crate::domain::types::DealId;
use crate::models::{
    TableRecord, choice_or_default, lenient_date, lenient_text, patch_text, record_id,
    required_text, to_value,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::Condition;

#[derive(Debug, Clone, Deserialize)]
/// Row of the `deal1` table.
pub struct Deal {
    #[serde(rename = "Id", deserialize_with = "record_id")]
    pub id: i32,
    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub stage: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
/// Insertable form of [`Deal`].
pub struct NewDeal<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    pub company: &'a str,
    pub value: &'a str,
    pub stage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
/// Partial update of a [`Deal`] row.
pub struct UpdateDeal<'a> {
    #[serde(rename = "Id")]
    pub id: i32,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Option<NaiveDate>>,
}

impl TryFrom<Deal> for DomainDeal {
    type Error = RepositoryError;

    fn try_from(row: Deal) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DealId::new(row.id)?,
            name: required_text(row.name, "Name")?,
            company: row.company.unwrap_or_default(),
            value: row.value.unwrap_or_default(),
            stage: choice_or_default(row.stage.as_deref(), "stage", row.id),
            contact: row.contact,
            date: row.date,
        })
    }
}

impl<'a> From<&'a DomainNewDeal> for NewDeal<'a> {
    fn from(deal: &'a DomainNewDeal) -> Self {
        Self {
            name: deal.name.as_str(),
            company: deal.company.as_str(),
            value: deal.value.as_str(),
            stage: deal.stage.as_str(),
            contact: deal.contact.as_deref(),
            date: deal.date,
        }
    }
}

impl<'a> UpdateDeal<'a> {
    pub fn new(id: DealId, changes: &'a DomainUpdateDeal) -> Self {
        Self {
            id: id.get(),
            name: changes.name.as_deref(),
            company: changes.company.as_deref(),
            value: changes.value.as_deref(),
            stage: changes.stage.map(|stage| stage.as_str()),
            contact: patch_text(&changes.contact),
            date: changes.date,
        }
    }
}

impl TableRecord for DomainDeal {
    const TABLE: &'static str = "deal1";
    const FIELDS: &'static [&'static str] = &[
        "Id",
        "Name",
        "value",
        "stage",
        "date",
        "company",
        "contact",
        "CreatedOn",
        "ModifiedOn",
    ];
    const ORDER_BY: &'static str = "date";
    const SEARCH_FIELDS: &'static [&'static str] = &["Name", "company", "contact"];

    fn exact_conditions(filter: &DealFilter) -> Vec<Condition> {
        filter
            .stage
            .map(|stage| Condition::exact("stage", stage.as_str()))
            .into_iter()
            .collect()
    }

    fn from_record(record: Value) -> RepositoryResult<Self> {
        serde_json::from_value::<Deal>(record)?.try_into()
    }

    fn draft_record(draft: &DomainNewDeal) -> RepositoryResult<Value> {
        to_value(&NewDeal::from(draft))
    }

    fn changes_record(id: DealId, changes: &DomainUpdateDeal) -> RepositoryResult<Value> {
        to_value(&UpdateDeal::new(id, changes))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::types::DealStage;

    #[test]
    fn numeric_value_is_kept_as_text() {
        let deal = DomainDeal::from_record(json!({
            "Id": 12,
            "Name": "Enterprise renewal",
            "company": "Acme Corp",
            "value": 24000,
            "stage": "negotiation",
            "date": "2023-12-15"
        }))
        .unwrap();

        assert_eq!(deal.value, "24000");
        assert_eq!(deal.amount(), Some(24000.0));
        assert_eq!(deal.stage, DealStage::Negotiation);
    }

    #[test]
    fn stage_move_sends_only_the_stage() {
        let value = DomainDeal::changes_record(
            DealId::new(12).unwrap(),
            &DomainUpdateDeal::stage(DealStage::Closed),
        )
        .unwrap();

        assert_eq!(value, json!({"Id": 12, "stage": "closed"}));
    }

    #[test]
    fn deals_are_ordered_by_date() {
        let params = DomainDeal::fetch_params(&DealFilter::new().stage(DealStage::Proposal));
        let value = serde_json::to_value(&params).unwrap();

        assert_eq!(
            value["orderBy"],
            json!([{"fieldName": "date", "SortType": "ASC"}])
        );
        assert_eq!(
            value["where"],
            json!([{"fieldName": "stage", "operator": "ExactMatch", "values": ["proposal"]}])
        );
        assert!(value.get("whereGroups").is_none());
    }
}
