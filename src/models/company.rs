use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::company::{
    Company as DomainCompany, NewCompany as DomainNewCompany, UpdateCompany as DomainUpdateCompany,
};
use crate::domain::filter::CompanyFilter;
use crate::domain::types::{CompanyId, ContactId, DealId};
use crate::models::{
    TableRecord, lenient_datetime, lenient_id_list, lenient_text, patch_text, record_id,
    required_text, to_value,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::Condition;

#[derive(Debug, Clone, Deserialize)]
/// Row of the `company` table.
pub struct Company {
    #[serde(rename = "Id", deserialize_with = "record_id")]
    pub id: i32,
    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_id_list")]
    pub contacts: Vec<i32>,
    #[serde(default, deserialize_with = "lenient_id_list")]
    pub deals: Vec<i32>,
    #[serde(rename = "CreatedOn", default, deserialize_with = "lenient_datetime")]
    pub created_on: Option<NaiveDateTime>,
    #[serde(rename = "ModifiedOn", default, deserialize_with = "lenient_datetime")]
    pub modified_on: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
/// Insertable form of [`Company`].
pub struct NewCompany<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    pub industry: &'a str,
    pub size: &'a str,
    pub location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deals: Vec<i32>,
}

#[derive(Debug, Serialize)]
/// Partial update of a [`Company`] row.
pub struct UpdateCompany<'a> {
    #[serde(rename = "Id")]
    pub id: i32,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deals: Option<Vec<i32>>,
}

impl TryFrom<Company> for DomainCompany {
    type Error = RepositoryError;

    fn try_from(row: Company) -> Result<Self, Self::Error> {
        let id = CompanyId::new(row.id)?;
        let record_id = row.id;

        // References are not integrity checked; only malformed ids are dropped.
        let contacts = row
            .contacts
            .into_iter()
            .filter_map(|raw| ContactId::new(raw).ok())
            .collect();
        let deals = row
            .deals
            .into_iter()
            .filter_map(|raw| DealId::new(raw).ok())
            .collect();

        let or_blank = |value: Option<String>, field: &str| {
            value.unwrap_or_else(|| {
                log::warn!("Company {record_id} has no {field}");
                String::new()
            })
        };

        Ok(Self {
            id,
            name: required_text(row.name, "Name")?,
            industry: or_blank(row.industry, "industry"),
            size: or_blank(row.size, "size"),
            location: or_blank(row.location, "location"),
            website: row.website,
            description: row.description,
            contacts,
            deals,
            created_at: row.created_on,
            updated_at: row.modified_on,
        })
    }
}

impl<'a> From<&'a DomainNewCompany> for NewCompany<'a> {
    fn from(company: &'a DomainNewCompany) -> Self {
        Self {
            name: company.name.as_str(),
            industry: company.industry.as_str(),
            size: company.size.as_str(),
            location: company.location.as_str(),
            website: company.website.as_deref(),
            description: company.description.as_deref(),
            contacts: company.contacts.iter().map(|id| id.get()).collect(),
            deals: company.deals.iter().map(|id| id.get()).collect(),
        }
    }
}

impl<'a> UpdateCompany<'a> {
    pub fn new(id: CompanyId, changes: &'a DomainUpdateCompany) -> Self {
        Self {
            id: id.get(),
            name: changes.name.as_deref(),
            industry: changes.industry.as_deref(),
            size: changes.size.as_deref(),
            location: changes.location.as_deref(),
            website: patch_text(&changes.website),
            description: patch_text(&changes.description),
            contacts: changes
                .contacts
                .as_ref()
                .map(|ids| ids.iter().map(|id| id.get()).collect()),
            deals: changes
                .deals
                .as_ref()
                .map(|ids| ids.iter().map(|id| id.get()).collect()),
        }
    }
}

impl TableRecord for DomainCompany {
    const TABLE: &'static str = "company";
    const FIELDS: &'static [&'static str] = &[
        "Id",
        "Name",
        "industry",
        "size",
        "location",
        "website",
        "description",
        "contacts",
        "deals",
        "CreatedOn",
        "ModifiedOn",
    ];
    const ORDER_BY: &'static str = "Name";
    const SEARCH_FIELDS: &'static [&'static str] = &["Name", "location", "description"];

    fn exact_conditions(filter: &CompanyFilter) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(industry) = &filter.industry {
            conditions.push(Condition::exact("industry", industry.as_str()));
        }
        if let Some(size) = &filter.size {
            conditions.push(Condition::exact("size", size.as_str()));
        }
        conditions
    }

    fn from_record(record: Value) -> RepositoryResult<Self> {
        serde_json::from_value::<Company>(record)?.try_into()
    }

    fn draft_record(draft: &DomainNewCompany) -> RepositoryResult<Value> {
        to_value(&NewCompany::from(draft))
    }

    fn changes_record(id: CompanyId, changes: &DomainUpdateCompany) -> RepositoryResult<Value> {
        to_value(&UpdateCompany::new(id, changes))
    }
}
