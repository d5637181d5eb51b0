use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::filter::ContactFilter;
use crate::domain::types::{ContactId, ContactStatus, ContactType, optional_text, sanitized_text};
use crate::domain::{Entity, Searchable};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Free-text employer name.
    pub company: Option<String>,
    pub title: Option<String>,
    pub contact_type: ContactType,
    pub status: ContactStatus,
    pub notes: Option<String>,
    pub last_contact: Option<NaiveDate>,
    /// Assigned by the backend.
    pub created_on: Option<NaiveDateTime>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub contact_type: ContactType,
    pub status: ContactStatus,
    pub notes: Option<String>,
    pub last_contact: Option<NaiveDate>,
}

impl NewContact {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        company: Option<String>,
        title: Option<String>,
        contact_type: ContactType,
        status: ContactStatus,
        notes: Option<String>,
    ) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: optional_text(phone),
            company: optional_text(company),
            title: optional_text(title),
            contact_type,
            status,
            notes: sanitized_text(notes),
            last_contact: None,
        }
    }
}

/// Partial update; `None` leaves the stored value untouched and `Some(None)`
/// clears an optional field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateContact {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub company: Option<Option<String>>,
    pub title: Option<Option<String>>,
    pub contact_type: Option<ContactType>,
    pub status: Option<ContactStatus>,
    pub notes: Option<Option<String>>,
    pub last_contact: Option<Option<NaiveDate>>,
}

impl From<NewContact> for UpdateContact {
    fn from(contact: NewContact) -> Self {
        Self {
            first_name: Some(contact.first_name),
            last_name: Some(contact.last_name),
            email: Some(contact.email),
            phone: Some(contact.phone),
            company: Some(contact.company),
            title: Some(contact.title),
            contact_type: Some(contact.contact_type),
            status: Some(contact.status),
            notes: Some(contact.notes),
            last_contact: Some(contact.last_contact),
        }
    }
}

impl Entity for Contact {
    type Id = ContactId;
    type Draft = NewContact;
    type Changes = UpdateContact;
    type Filter = ContactFilter;

    const LABEL: &'static str = "Contact";
    const PLURAL: &'static str = "contacts";

    fn id(&self) -> ContactId {
        self.id
    }

    fn display_name(&self) -> String {
        self.full_name()
    }
}

impl Searchable for Contact {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.first_name.as_str()),
            Some(self.last_name.as_str()),
            Some(self.email.as_str()),
            self.company.as_deref(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_contact_normalizes_input() {
        let contact = NewContact::new(
            " Jane ".to_string(),
            "Doe".to_string(),
            " Jane@X.com ".to_string(),
            Some("  ".to_string()),
            Some(" Acme ".to_string()),
            None,
            ContactType::Customer,
            ContactStatus::Active,
            Some("<b>VIP</b>".to_string()),
        );

        assert_eq!(contact.first_name, "Jane");
        assert_eq!(contact.email, "jane@x.com");
        assert_eq!(contact.phone, None);
        assert_eq!(contact.company.as_deref(), Some("Acme"));
        assert_eq!(contact.notes.as_deref(), Some("<b>VIP</b>"));
    }
}
