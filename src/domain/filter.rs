//! List criteria shared by the remote gateway and the local search engine.
//!
//! A filter is a free-text search term plus a set of optional categorical
//! values. An absent value never restricts the result.

use std::str::FromStr;

use crate::domain::company::Company;
use crate::domain::contact::Contact;
use crate::domain::deal::Deal;
use crate::domain::task::Task;
use crate::domain::types::{ContactStatus, ContactType, DealStage, TaskPriority, TaskStatus};

/// Offset paging requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub limit: usize,
    pub offset: usize,
}

/// Criteria applied to a collection of `E`.
pub trait RecordFilter<E> {
    /// Trimmed, non-empty search term.
    fn search_term(&self) -> Option<&str>;

    /// Whether every categorical value set on the filter equals the record's.
    fn matches_categories(&self, item: &E) -> bool;

    /// Backend paging, if any. The local engine never pages.
    fn paging(&self) -> Option<Paging> {
        None
    }
}

fn normalized_term(term: &Option<String>) -> Option<&str> {
    term.as_deref().map(str::trim).filter(|t| !t.is_empty())
}

fn category_matches<T: PartialEq>(wanted: &Option<T>, actual: &T) -> bool {
    wanted.as_ref().is_none_or(|wanted| wanted == actual)
}

/// Parses a select value where `all` or blank means "no filter".
pub fn parse_choice<T>(value: &str) -> Result<Option<T>, T::Err>
where
    T: FromStr,
{
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFilter {
    pub search_term: Option<String>,
    pub contact_type: Option<ContactType>,
    pub status: Option<ContactStatus>,
    pub paging: Option<Paging>,
}

impl ContactFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn contact_type(mut self, contact_type: ContactType) -> Self {
        self.contact_type = Some(contact_type);
        self
    }

    pub fn status(mut self, status: ContactStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, limit: usize, offset: usize) -> Self {
        self.paging = Some(Paging { limit, offset });
        self
    }
}

impl RecordFilter<Contact> for ContactFilter {
    fn search_term(&self) -> Option<&str> {
        normalized_term(&self.search_term)
    }

    fn matches_categories(&self, item: &Contact) -> bool {
        category_matches(&self.contact_type, &item.contact_type)
            && category_matches(&self.status, &item.status)
    }

    fn paging(&self) -> Option<Paging> {
        self.paging
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyFilter {
    pub search_term: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
}

impl CompanyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into()).filter(|s: &String| !s.is_empty());
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into()).filter(|s: &String| !s.is_empty());
        self
    }
}

impl RecordFilter<Company> for CompanyFilter {
    fn search_term(&self) -> Option<&str> {
        normalized_term(&self.search_term)
    }

    fn matches_categories(&self, item: &Company) -> bool {
        category_matches(&self.industry, &item.industry) && category_matches(&self.size, &item.size)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealFilter {
    pub search_term: Option<String>,
    pub stage: Option<DealStage>,
}

impl DealFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn stage(mut self, stage: DealStage) -> Self {
        self.stage = Some(stage);
        self
    }
}

impl RecordFilter<Deal> for DealFilter {
    fn search_term(&self) -> Option<&str> {
        normalized_term(&self.search_term)
    }

    fn matches_categories(&self, item: &Deal) -> bool {
        category_matches(&self.stage, &item.stage)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub search_term: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl RecordFilter<Task> for TaskFilter {
    fn search_term(&self) -> Option<&str> {
        normalized_term(&self.search_term)
    }

    fn matches_categories(&self, item: &Task) -> bool {
        category_matches(&self.status, &item.status)
            && category_matches(&self.priority, &item.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_choice_treats_all_as_unset() {
        assert_eq!(parse_choice::<TaskStatus>("all"), Ok(None));
        assert_eq!(parse_choice::<TaskStatus>(""), Ok(None));
        assert_eq!(
            parse_choice::<TaskStatus>("completed"),
            Ok(Some(TaskStatus::Completed))
        );
        assert!(parse_choice::<TaskStatus>("done").is_err());
    }

    #[test]
    fn blank_search_terms_are_ignored() {
        let filter = DealFilter::new().search("   ");
        assert_eq!(RecordFilter::<Deal>::search_term(&filter), None);

        let filter = DealFilter::new().search(" acme ");
        assert_eq!(RecordFilter::<Deal>::search_term(&filter), Some("acme"));
    }

    #[test]
    fn empty_company_categories_are_unset() {
        let filter = CompanyFilter::new().industry("").size("1-10");
        assert_eq!(filter.industry, None);
        assert_eq!(filter.size.as_deref(), Some("1-10"));
    }
}
