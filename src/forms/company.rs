use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::forms::{EntityForm, FormError, not_blank, optional};

static WEBSITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(http|https)://[^ "]+$"#).expect("website pattern is valid"));

fn website_format(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || WEBSITE_RE.is_match(value) {
        return Ok(());
    }
    Err(ValidationError::new("url"))
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
/// Form data for creating or editing a company.
pub struct CompanyForm {
    #[validate(custom(function = "not_blank", message = "Company name is required"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Industry is required"))]
    pub industry: String,
    /// Free-text headcount bucket such as `1-10`.
    #[validate(custom(function = "not_blank", message = "Company size is required"))]
    pub size: String,
    #[validate(custom(function = "not_blank", message = "Location is required"))]
    pub location: String,
    #[serde(default)]
    #[validate(custom(
        function = "website_format",
        message = "Please enter a valid URL (including http:// or https://)"
    ))]
    pub website: String,
    #[serde(default)]
    pub description: String,
}

impl CompanyForm {
    pub fn from_company(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            industry: company.industry.clone(),
            size: company.size.clone(),
            location: company.location.clone(),
            website: company.website.clone().unwrap_or_default(),
            description: company.description.clone().unwrap_or_default(),
        }
    }
}

impl From<&CompanyForm> for NewCompany {
    fn from(form: &CompanyForm) -> Self {
        NewCompany::new(
            form.name.clone(),
            form.industry.clone(),
            form.size.clone(),
            form.location.clone(),
            optional(&form.website),
            optional(&form.description),
        )
    }
}

impl EntityForm<Company> for CompanyForm {
    fn to_draft(&self) -> Result<NewCompany, FormError> {
        Ok(NewCompany::from(self))
    }

    /// Leaves the reference lists untouched.
    fn to_changes(&self) -> Result<UpdateCompany, FormError> {
        Ok(UpdateCompany::from(NewCompany::from(self)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CompanyForm {
        CompanyForm {
            name: "Acme Corp".to_string(),
            industry: "Technology".to_string(),
            size: "51-200".to_string(),
            location: "Berlin".to_string(),
            ..CompanyForm::default()
        }
    }

    #[test]
    fn required_fields() {
        let errors = CompanyForm::default().check().unwrap_err();

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("name"), Some("Company name is required"));
        assert_eq!(errors.get("size"), Some("Company size is required"));
    }

    #[test]
    fn website_must_be_http_url() {
        let form = CompanyForm {
            website: "acme.example".to_string(),
            ..valid()
        };
        assert_eq!(
            form.check().unwrap_err().get("website"),
            Some("Please enter a valid URL (including http:// or https://)")
        );

        let form = CompanyForm {
            website: "https://acme.example/about".to_string(),
            ..valid()
        };
        assert!(form.check().is_ok());
    }

    #[test]
    fn changes_leave_references_alone() {
        let changes = valid().to_changes().unwrap();

        assert_eq!(changes.contacts, None);
        assert_eq!(changes.deals, None);
        assert_eq!(changes.name.as_deref(), Some("Acme Corp"));
    }
}
