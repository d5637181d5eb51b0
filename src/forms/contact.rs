use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::types::{ContactStatus, ContactType};
use crate::forms::{EntityForm, FormError, not_blank, optional};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$")
        .expect("phone pattern is valid")
});

fn email_format(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || EMAIL_RE.is_match(value) {
        return Ok(());
    }
    Err(ValidationError::new("email"))
}

fn phone_format(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || PHONE_RE.is_match(value) {
        return Ok(());
    }
    Err(ValidationError::new("phone"))
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for creating or editing a contact.
pub struct ContactForm {
    #[validate(custom(function = "not_blank", message = "First name is required"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    pub last_name: String,
    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        custom(function = "email_format", message = "Email is invalid")
    )]
    pub email: String,
    /// Optional; checked only when filled in.
    #[serde(default)]
    #[validate(custom(function = "phone_format", message = "Phone number is invalid"))]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub contact_type: ContactType,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default)]
    pub notes: String,
}

impl ContactForm {
    /// Prefills the editor from a loaded contact.
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone().unwrap_or_default(),
            company: contact.company.clone().unwrap_or_default(),
            title: contact.title.clone().unwrap_or_default(),
            contact_type: contact.contact_type,
            status: contact.status,
            notes: contact.notes.clone().unwrap_or_default(),
        }
    }
}

impl From<&ContactForm> for NewContact {
    fn from(form: &ContactForm) -> Self {
        NewContact::new(
            form.first_name.clone(),
            form.last_name.clone(),
            form.email.clone(),
            optional(&form.phone),
            optional(&form.company),
            optional(&form.title),
            form.contact_type,
            form.status,
            optional(&form.notes),
        )
    }
}

impl EntityForm<Contact> for ContactForm {
    fn to_draft(&self) -> Result<NewContact, FormError> {
        Ok(NewContact::from(self))
    }

    fn to_changes(&self) -> Result<UpdateContact, FormError> {
        Ok(UpdateContact::from(NewContact::from(self)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactForm {
        ContactForm {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "john@acme.com".to_string(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(valid().check().is_ok());
    }

    #[test]
    fn empty_email_reports_required_only() {
        let form = ContactForm {
            email: String::new(),
            ..valid()
        };

        let errors = form.check().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("Email is required"));
    }

    #[test]
    fn all_failing_fields_are_reported_at_once() {
        let form = ContactForm {
            first_name: "  ".to_string(),
            last_name: String::new(),
            email: "not-an-email".to_string(),
            phone: "12".to_string(),
            ..ContactForm::default()
        };

        let errors = form.check().unwrap_err();

        assert_eq!(errors.get("first_name"), Some("First name is required"));
        assert_eq!(errors.get("last_name"), Some("Last name is required"));
        assert_eq!(errors.get("email"), Some("Email is invalid"));
        assert_eq!(errors.get("phone"), Some("Phone number is invalid"));
    }

    #[test]
    fn phone_formats() {
        for phone in ["555-123-4567", "(555) 123-4567", "+5551234567", "555.123.456789"] {
            let form = ContactForm {
                phone: phone.to_string(),
                ..valid()
            };
            assert!(form.check().is_ok(), "{phone} should be accepted");
        }

        for phone in ["123", "phone", "555-123-45"] {
            let form = ContactForm {
                phone: phone.to_string(),
                ..valid()
            };
            assert!(form.check().is_err(), "{phone} should be rejected");
        }
    }

    #[test]
    fn draft_drops_blank_optionals() {
        let form = ContactForm {
            company: " Acme ".to_string(),
            title: "   ".to_string(),
            ..valid()
        };

        let draft = form.to_draft().unwrap();

        assert_eq!(draft.company.as_deref(), Some("Acme"));
        assert_eq!(draft.title, None);
        assert_eq!(draft.phone, None);
    }

    #[test]
    fn changes_carry_every_editable_field() {
        let form = ContactForm {
            contact_type: ContactType::Vendor,
            status: ContactStatus::Inactive,
            ..valid()
        };
        let changes = form.to_changes().unwrap();

        assert_eq!(changes.contact_type, Some(ContactType::Vendor));
        assert_eq!(changes.status, Some(ContactStatus::Inactive));
        assert_eq!(changes.email.as_deref(), Some("john@acme.com"));
    }

    #[test]
    fn blank_optional_fields_clear_the_stored_value() {
        let form = ContactForm {
            company: "Acme".to_string(),
            ..valid()
        };
        let changes = form.to_changes().unwrap();

        assert_eq!(changes.company, Some(Some("Acme".to_string())));
        assert_eq!(changes.phone, Some(None));
        assert_eq!(changes.notes, Some(None));
    }
}
