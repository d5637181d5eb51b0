use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::deal::{Deal, NewDeal, UpdateDeal};
use crate::domain::types::DealStage;
use crate::forms::{EntityForm, FormError, optional, parse_date};

#[derive(Debug, Clone, Default, Deserialize)]
/// Form data for creating or editing a deal.
pub struct DealForm {
    pub name: String,
    pub company: String,
    /// Currency text as typed, e.g. `$12,500`.
    pub value: String,
    #[serde(default)]
    pub stage: DealStage,
    #[serde(default)]
    pub contact: String,
    /// Expected close date, `YYYY-MM-DD` or blank.
    #[serde(default)]
    pub date: String,
}

impl DealForm {
    pub fn from_deal(deal: &Deal) -> Self {
        Self {
            name: deal.name.clone(),
            company: deal.company.clone(),
            value: deal.value.clone(),
            stage: deal.stage,
            contact: deal.contact.clone().unwrap_or_default(),
            date: deal
                .date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    fn new_deal(&self) -> Result<NewDeal, FormError> {
        let date = match optional(&self.date) {
            Some(date) => Some(parse_date(&date)?),
            None => None,
        };
        Ok(NewDeal::new(
            self.name.clone(),
            self.company.clone(),
            self.value.clone(),
            self.stage,
            optional(&self.contact),
            date,
        ))
    }
}

fn required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    message: &'static str,
) {
    if value.trim().is_empty() {
        let error = ValidationError::new("required");
        errors.add(field, error.with_message(message.into()));
    }
}

impl Validate for DealForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        required(&mut errors, "name", &self.name, "Deal name is required");
        required(&mut errors, "company", &self.company, "Company is required");
        required(&mut errors, "value", &self.value, "Deal value is required");
        if !self.date.trim().is_empty() && parse_date(&self.date).is_err() {
            let error = ValidationError::new("date");
            errors.add("date", error.with_message("Invalid date format".into()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl EntityForm<Deal> for DealForm {
    fn to_draft(&self) -> Result<NewDeal, FormError> {
        self.new_deal()
    }

    fn to_changes(&self) -> Result<UpdateDeal, FormError> {
        self.new_deal().map(UpdateDeal::from)
    }
}
