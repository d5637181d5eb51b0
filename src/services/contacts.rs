//! Contacts page.

use serde::Serialize;

use crate::domain::contact::Contact;
use crate::domain::filter::ContactFilter;
use crate::domain::types::ContactId;
use crate::forms::contact::ContactForm;
use crate::pagination::Paginated;
use crate::repository::{EntityReader, EntityWriter};
use crate::services::{ServiceResult, records};
use crate::store::{EntityStore, ListView, RefreshOutcome};

/// What the contacts table renders.
#[derive(Debug, Clone, Serialize)]
pub struct ContactsPage {
    pub contacts: Paginated<Contact>,
    /// 1-based row range of the current page.
    pub showing: Option<(usize, usize)>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ContactsPage {
    /// `Showing 11 to 20 of 42 contacts`.
    pub fn summary(&self) -> String {
        match self.showing {
            Some((first, last)) => format!(
                "Showing {first} to {last} of {} contacts",
                self.contacts.total
            ),
            None => "No contacts found".to_string(),
        }
    }
}

pub async fn load_contacts<R>(repo: &R, store: &mut EntityStore<Contact>) -> RefreshOutcome
where
    R: EntityReader<Contact> + ?Sized,
{
    records::refresh(repo, store, &ContactFilter::default()).await
}

pub fn page_data(store: &EntityStore<Contact>, view: &ListView<Contact>) -> ContactsPage {
    let contacts = view.visible(store);
    let showing = contacts.showing(view.per_page());
    ContactsPage {
        contacts,
        showing,
        is_loading: store.is_loading(),
        error: store.error().map(str::to_string),
    }
}

pub async fn create_contact<R>(
    repo: &R,
    store: &mut EntityStore<Contact>,
    form: &ContactForm,
) -> ServiceResult<Contact>
where
    R: EntityWriter<Contact> + ?Sized,
{
    records::add(repo, store, form).await
}

pub async fn update_contact<R>(
    repo: &R,
    store: &mut EntityStore<Contact>,
    id: ContactId,
    form: &ContactForm,
) -> ServiceResult<Contact>
where
    R: EntityWriter<Contact> + ?Sized,
{
    records::apply_edit(repo, store, id, form).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ContactStatus, ContactType};

    fn contact(id: i32, first: &str, contact_type: ContactType) -> Contact {
        Contact {
            id: ContactId::new(id).unwrap(),
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: None,
            company: None,
            title: None,
            contact_type,
            status: ContactStatus::Active,
            notes: None,
            last_contact: None,
            created_on: None,
        }
    }

    #[test]
    fn page_summary_reports_row_range() {
        let items = (1..=25)
            .map(|id| contact(id, &format!("C{id}"), ContactType::Lead))
            .collect();
        let store = EntityStore::with_items(items);
        let mut view = ListView::default();
        view.go_to(&store, 3);

        let page = page_data(&store, &view);

        assert_eq!(page.contacts.items.len(), 5);
        assert_eq!(page.showing, Some((21, 25)));
        assert_eq!(page.summary(), "Showing 21 to 25 of 25 contacts");
    }

    #[test]
    fn filtered_to_nothing() {
        let store = EntityStore::with_items(vec![contact(1, "Ann", ContactType::Lead)]);
        let mut view = ListView::default();
        view.update_filter(|filter: ContactFilter| filter.contact_type(ContactType::Vendor));

        let page = page_data(&store, &view);

        assert_eq!(page.showing, None);
        assert_eq!(page.summary(), "No contacts found");
    }
}
