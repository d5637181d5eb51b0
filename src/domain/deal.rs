use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::filter::DealFilter;
use crate::domain::types::{DealId, DealStage, optional_text};
use crate::domain::{Entity, Searchable};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Deal {
    pub id: DealId,
    pub name: String,
    pub company: String,
    /// Currency-formatted amount, e.g. `$24,000`.
    pub value: String,
    pub stage: DealStage,
    pub contact: Option<String>,
    /// Expected close date.
    pub date: Option<NaiveDate>,
}

impl Deal {
    /// Numeric amount of [`Deal::value`], `None` when it holds no number.
    pub fn amount(&self) -> Option<f64> {
        parse_amount(&self.value)
    }
}

/// Strips currency symbols and separators before parsing.
pub fn parse_amount(value: &str) -> Option<f64> {
    let digits: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let amount: f64 = digits.parse().ok()?;
    amount.is_finite().then_some(amount)
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewDeal {
    pub name: String,
    pub company: String,
    pub value: String,
    pub stage: DealStage,
    pub contact: Option<String>,
    pub date: Option<NaiveDate>,
}

impl NewDeal {
    #[must_use]
    pub fn new(
        name: String,
        company: String,
        value: String,
        stage: DealStage,
        contact: Option<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            company: company.trim().to_string(),
            value: value.trim().to_string(),
            stage,
            contact: optional_text(contact),
            date,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateDeal {
    pub name: Option<String>,
    pub company: Option<String>,
    pub value: Option<String>,
    pub stage: Option<DealStage>,
    pub contact: Option<Option<String>>,
    pub date: Option<Option<NaiveDate>>,
}

impl UpdateDeal {
    /// Pipeline move carrying nothing but the new stage.
    pub fn stage(stage: DealStage) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }
}

impl From<NewDeal> for UpdateDeal {
    fn from(deal: NewDeal) -> Self {
        Self {
            name: Some(deal.name),
            company: Some(deal.company),
            value: Some(deal.value),
            stage: Some(deal.stage),
            contact: Some(deal.contact),
            date: Some(deal.date),
        }
    }
}

impl Entity for Deal {
    type Id = DealId;
    type Draft = NewDeal;
    type Changes = UpdateDeal;
    type Filter = DealFilter;

    const LABEL: &'static str = "Deal";
    const PLURAL: &'static str = "deals";

    fn id(&self) -> DealId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl Searchable for Deal {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            Some(self.company.as_str()),
            self.contact.as_deref(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_strips_currency_formatting() {
        assert_eq!(parse_amount("$24,000"), Some(24000.0));
        assert_eq!(parse_amount("€1,250.50"), Some(1250.5));
        assert_eq!(parse_amount("TBD"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn stage_changes_only_carry_the_stage() {
        let changes = UpdateDeal::stage(DealStage::Negotiation);
        assert_eq!(changes.stage, Some(DealStage::Negotiation));
        assert_eq!(changes.name, None);
        assert_eq!(changes.value, None);
    }
}
