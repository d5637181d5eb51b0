use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::filter::CompanyFilter;
use crate::domain::types::{CompanyId, ContactId, DealId, optional_text, sanitized_text};
use crate::domain::{Entity, Searchable};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub industry: String,
    /// Free-text headcount bucket such as `1-10`.
    pub size: String,
    pub location: String,
    pub website: Option<String>,
    pub description: Option<String>,
    /// Associated contacts in display order. Not checked for existence.
    pub contacts: Vec<ContactId>,
    /// Associated deals in display order. Not checked for existence.
    pub deals: Vec<DealId>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCompany {
    pub name: String,
    pub industry: String,
    pub size: String,
    pub location: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub contacts: Vec<ContactId>,
    pub deals: Vec<DealId>,
}

impl NewCompany {
    #[must_use]
    pub fn new(
        name: String,
        industry: String,
        size: String,
        location: String,
        website: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            industry: industry.trim().to_string(),
            size: size.trim().to_string(),
            location: location.trim().to_string(),
            website: optional_text(website),
            description: sanitized_text(description),
            contacts: Vec::new(),
            deals: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateCompany {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub location: Option<String>,
    pub website: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub contacts: Option<Vec<ContactId>>,
    pub deals: Option<Vec<DealId>>,
}

impl From<NewCompany> for UpdateCompany {
    /// Form edits never touch the association lists.
    fn from(company: NewCompany) -> Self {
        Self {
            name: Some(company.name),
            industry: Some(company.industry),
            size: Some(company.size),
            location: Some(company.location),
            website: Some(company.website),
            description: Some(company.description),
            contacts: None,
            deals: None,
        }
    }
}

impl Entity for Company {
    type Id = CompanyId;
    type Draft = NewCompany;
    type Changes = UpdateCompany;
    type Filter = CompanyFilter;

    const LABEL: &'static str = "Company";
    const PLURAL: &'static str = "companies";

    fn id(&self) -> CompanyId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl Searchable for Company {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            Some(self.location.as_str()),
            self.description.as_deref(),
        ]
    }
}
