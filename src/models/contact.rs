use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::contact::{
    Contact as DomainContact, NewContact as DomainNewContact, UpdateContact as DomainUpdateContact,
};
use crate::domain::filter::ContactFilter;
use crate::domain::types::ContactId;
use crate::models::{
    TableRecord, choice_or_default, lenient_date, lenient_datetime, lenient_text, patch_text,
    record_id, required_text, to_value,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::Condition;

#[derive(Debug, Clone, Deserialize)]
/// Row of the `contact1` table.
pub struct Contact {
    #[serde(rename = "Id", deserialize_with = "record_id")]
    pub id: i32,
    #[serde(rename = "Name", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(rename = "firstName", default, deserialize_with = "lenient_text")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default, deserialize_with = "lenient_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub contact_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: Option<String>,
    #[serde(rename = "lastContact", default, deserialize_with = "lenient_date")]
    pub last_contact: Option<NaiveDate>,
    #[serde(rename = "CreatedOn", default, deserialize_with = "lenient_datetime")]
    pub created_on: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
/// Insertable form of [`Contact`].
pub struct NewContact<'a> {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "firstName")]
    pub first_name: &'a str,
    #[serde(rename = "lastName")]
    pub last_name: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(rename = "type")]
    pub contact_type: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
    #[serde(rename = "lastContact", skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
/// Partial update of a [`Contact`] row. Cleared fields are sent as `null`.
pub struct UpdateContact<'a> {
    #[serde(rename = "Id")]
    pub id: i32,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<&'a str>,
    #[serde(rename = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<&'a str>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<&'a str>>,
    #[serde(rename = "lastContact", skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<Option<NaiveDate>>,
}

fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}").trim().to_string()
}

impl TryFrom<Contact> for DomainContact {
    type Error = RepositoryError;

    fn try_from(row: Contact) -> Result<Self, Self::Error> {
        let id = ContactId::new(row.id)?;

        // Older rows only carry the combined `Name`.
        let (first_name, last_name) = match (row.first_name, row.last_name) {
            (None, None) => {
                let name = required_text(row.name, "Name")?;
                match name.split_once(' ') {
                    Some((first, last)) => (first.to_string(), last.trim().to_string()),
                    None => (name, String::new()),
                }
            }
            (first, last) => (first.unwrap_or_default(), last.unwrap_or_default()),
        };

        Ok(Self {
            id,
            first_name,
            last_name,
            email: row.email.unwrap_or_default(),
            phone: row.phone,
            company: row.company,
            title: row.title,
            contact_type: choice_or_default(row.contact_type.as_deref(), "type", row.id),
            status: choice_or_default(row.status.as_deref(), "status", row.id),
            notes: row.notes,
            last_contact: row.last_contact,
            created_on: row.created_on,
        })
    }
}

impl<'a> From<&'a DomainNewContact> for NewContact<'a> {
    fn from(contact: &'a DomainNewContact) -> Self {
        Self {
            name: full_name(&contact.first_name, &contact.last_name),
            first_name: contact.first_name.as_str(),
            last_name: contact.last_name.as_str(),
            email: contact.email.as_str(),
            phone: contact.phone.as_deref(),
            company: contact.company.as_deref(),
            title: contact.title.as_deref(),
            contact_type: contact.contact_type.as_str(),
            status: contact.status.as_str(),
            notes: contact.notes.as_deref(),
            last_contact: contact.last_contact,
        }
    }
}

impl<'a> UpdateContact<'a> {
    pub fn new(id: ContactId, changes: &'a DomainUpdateContact) -> Self {
        let name = match (&changes.first_name, &changes.last_name) {
            (Some(first), Some(last)) => Some(full_name(first, last)),
            _ => None,
        };

        Self {
            id: id.get(),
            name,
            first_name: changes.first_name.as_deref(),
            last_name: changes.last_name.as_deref(),
            email: changes.email.as_deref(),
            phone: patch_text(&changes.phone),
            company: patch_text(&changes.company),
            title: patch_text(&changes.title),
            contact_type: changes.contact_type.map(|t| t.as_str()),
            status: changes.status.map(|s| s.as_str()),
            notes: patch_text(&changes.notes),
            last_contact: changes.last_contact,
        }
    }
}

impl TableRecord for DomainContact {
    const TABLE: &'static str = "contact1";
    const FIELDS: &'static [&'static str] = &[
        "Id",
        "Name",
        "firstName",
        "lastName",
        "email",
        "phone",
        "title",
        "type",
        "status",
        "notes",
        "lastContact",
        "company",
        "CreatedOn",
        "ModifiedOn",
    ];
    const ORDER_BY: &'static str = "Name";
    const SEARCH_FIELDS: &'static [&'static str] = &["Name", "email"];

    fn exact_conditions(filter: &ContactFilter) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(contact_type) = filter.contact_type {
            conditions.push(Condition::exact("type", contact_type.as_str()));
        }
        if let Some(status) = filter.status {
            conditions.push(Condition::exact("status", status.as_str()));
        }
        conditions
    }

    fn from_record(record: Value) -> RepositoryResult<Self> {
        serde_json::from_value::<Contact>(record)?.try_into()
    }

    fn draft_record(draft: &DomainNewContact) -> RepositoryResult<Value> {
        to_value(&NewContact::from(draft))
    }

    fn changes_record(id: ContactId, changes: &DomainUpdateContact) -> RepositoryResult<Value> {
        to_value(&UpdateContact::new(id, changes))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::types::{ContactStatus, ContactType};

    #[test]
    fn row_into_domain() {
        let contact = DomainContact::from_record(json!({
            "Id": 3,
            "Name": "John Smith",
            "firstName": "John",
            "lastName": "Smith",
            "email": "john@acme.com",
            "company": "Acme Corp",
            "type": "customer",
            "status": "active",
            "lastContact": "2023-11-20",
            "CreatedOn": "2023-10-01T08:30:00Z",
            "Tags": "vip"
        }))
        .unwrap();

        assert_eq!(contact.id.get(), 3);
        assert_eq!(contact.full_name(), "John Smith");
        assert_eq!(contact.contact_type, ContactType::Customer);
        assert_eq!(contact.company.as_deref(), Some("Acme Corp"));
        assert_eq!(contact.last_contact, NaiveDate::from_ymd_opt(2023, 11, 20));
        assert!(contact.created_on.is_some());
    }

    #[test]
    fn combined_name_is_split_when_parts_are_missing() {
        let contact = DomainContact::from_record(json!({
            "Id": 8,
            "Name": "Ada Lovelace King",
            "type": "reseller"
        }))
        .unwrap();

        assert_eq!(contact.first_name, "Ada");
        assert_eq!(contact.last_name, "Lovelace King");
        assert_eq!(contact.contact_type, ContactType::Lead);
        assert_eq!(contact.status, ContactStatus::Active);
    }

    #[test]
    fn rows_without_valid_id_are_rejected() {
        let zero = DomainContact::from_record(json!({"Id": 0, "Name": "Zero"}));
        let missing = DomainContact::from_record(json!({"Name": "Nobody"}));
        assert!(zero.is_err());
        assert!(missing.is_err());
    }

    #[test]
    fn draft_record_carries_combined_name() {
        let draft = DomainNewContact::new(
            "Jane".to_string(),
            "Doe".to_string(),
            "jane@x.com".to_string(),
            None,
            Some("Acme".to_string()),
            None,
            ContactType::Partner,
            ContactStatus::Inactive,
            None,
        );

        let value = DomainContact::draft_record(&draft).unwrap();

        assert_eq!(
            value,
            json!({
                "Name": "Jane Doe",
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@x.com",
                "company": "Acme",
                "type": "partner",
                "status": "inactive"
            })
        );
    }

    #[test]
    fn changes_record_only_carries_set_fields() {
        let changes = DomainUpdateContact {
            status: Some(ContactStatus::Inactive),
            ..DomainUpdateContact::default()
        };

        let id = ContactId::new(5).unwrap();
        let value = DomainContact::changes_record(id, &changes).unwrap();

        assert_eq!(value, json!({"Id": 5, "status": "inactive"}));
    }

    #[test]
    fn cleared_fields_are_sent_as_null() {
        let changes = DomainUpdateContact {
            phone: Some(None),
            company: Some(None),
            title: Some(Some("CTO".to_string())),
            ..DomainUpdateContact::default()
        };

        let id = ContactId::new(5).unwrap();
        let value = DomainContact::changes_record(id, &changes).unwrap();

        assert_eq!(
            value,
            json!({"Id": 5, "phone": null, "company": null, "title": "CTO"})
        );
    }
}
