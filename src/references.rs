//! Links from a company to the contacts and deals it references by id.
//!
//! Resolution is purely local: the ids are turned into placeholder labels and
//! in-app locators without fetching the referenced records.

use serde::Serialize;

use crate::domain::company::Company;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    Contact,
    Deal,
}

impl RefKind {
    fn label(self) -> &'static str {
        match self {
            RefKind::Contact => "Contact",
            RefKind::Deal => "Deal",
        }
    }

    fn path(self) -> &'static str {
        match self {
            RefKind::Contact => "/contacts",
            RefKind::Deal => "/deals",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    pub kind: RefKind,
    pub id: i32,
    /// Placeholder such as `Contact #12`.
    pub label: String,
    /// Page showing the referenced record, e.g. `/contacts?id=12`.
    pub locator: String,
}

impl EntityRef {
    pub fn new(kind: RefKind, id: i32) -> Self {
        Self {
            kind,
            id,
            label: format!("{} #{id}", kind.label()),
            locator: format!("{}?id={id}", kind.path()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyReferences {
    pub contacts: Vec<EntityRef>,
    pub deals: Vec<EntityRef>,
}

impl CompanyReferences {
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty() && self.deals.is_empty()
    }
}

/// Builds the reference lists of `company` in stored order.
pub fn resolve_company_references(company: &Company) -> CompanyReferences {
    CompanyReferences {
        contacts: company
            .contacts
            .iter()
            .map(|id| EntityRef::new(RefKind::Contact, id.get()))
            .collect(),
        deals: company
            .deals
            .iter()
            .map(|id| EntityRef::new(RefKind::Deal, id.get()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CompanyId, ContactId, DealId};

    fn company(contacts: &[i32], deals: &[i32]) -> Company {
        Company {
            id: CompanyId::new(1).unwrap(),
            name: "Acme".to_string(),
            industry: "Technology".to_string(),
            size: "1-10".to_string(),
            location: "Berlin".to_string(),
            website: None,
            description: None,
            contacts: contacts.iter().flat_map(|id| ContactId::new(*id)).collect(),
            deals: deals.iter().flat_map(|id| DealId::new(*id)).collect(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn labels_and_locators() {
        let refs = resolve_company_references(&company(&[12, 3], &[7]));

        assert_eq!(refs.contacts.len(), 2);
        assert_eq!(refs.contacts[0].label, "Contact #12");
        assert_eq!(refs.contacts[0].locator, "/contacts?id=12");
        assert_eq!(refs.contacts[1].id, 3);
        assert_eq!(refs.deals[0].label, "Deal #7");
        assert_eq!(refs.deals[0].locator, "/deals?id=7");
        assert_eq!(refs.deals[0].kind, RefKind::Deal);
    }

    #[test]
    fn company_without_references() {
        let refs = resolve_company_references(&company(&[], &[]));
        assert!(refs.is_empty());
    }
}
