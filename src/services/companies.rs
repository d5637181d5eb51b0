//! Companies page: filter options and the detail panel.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::company::Company;
use crate::domain::filter::CompanyFilter;
use crate::domain::types::CompanyId;
use crate::forms::company::CompanyForm;
use crate::references::{CompanyReferences, resolve_company_references};
use crate::repository::{EntityReader, EntityWriter};
use crate::services::{ServiceResult, records};
use crate::store::{EntityStore, RefreshOutcome};

/// Distinct values offered by the filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompanyFilterOptions {
    pub industries: Vec<String>,
    pub sizes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    pub company: Company,
    pub references: CompanyReferences,
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|value| !value.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sorted, de-duplicated industries and sizes of the loaded companies.
pub fn filter_options(companies: &[Company]) -> CompanyFilterOptions {
    CompanyFilterOptions {
        industries: distinct(companies.iter().map(|c| c.industry.as_str())),
        sizes: distinct(companies.iter().map(|c| c.size.as_str())),
    }
}

/// Detail panel for the selected company, if any.
pub fn selected_detail(store: &EntityStore<Company>) -> Option<CompanyDetail> {
    store.selected().map(|company| CompanyDetail {
        company: company.clone(),
        references: resolve_company_references(company),
    })
}

/// Selects company `id` and returns its detail panel.
pub fn open_detail(store: &mut EntityStore<Company>, id: CompanyId) -> Option<CompanyDetail> {
    store.select(id);
    selected_detail(store).filter(|detail| detail.company.id == id)
}

pub async fn load_companies<R>(repo: &R, store: &mut EntityStore<Company>) -> RefreshOutcome
where
    R: EntityReader<Company> + ?Sized,
{
    records::refresh(repo, store, &CompanyFilter::default()).await
}

pub async fn create_company<R>(
    repo: &R,
    store: &mut EntityStore<Company>,
    form: &CompanyForm,
) -> ServiceResult<Company>
where
    R: EntityWriter<Company> + ?Sized,
{
    records::add(repo, store, form).await
}

pub async fn update_company<R>(
    repo: &R,
    store: &mut EntityStore<Company>,
    id: CompanyId,
    form: &CompanyForm,
) -> ServiceResult<Company>
where
    R: EntityWriter<Company> + ?Sized,
{
    records::apply_edit(repo, store, id, form).await
}

/// Deletes the company awaiting confirmation after
/// [`EntityStore::request_delete`]. The detail panel closes when it showed
/// that company.
pub async fn delete_company<R>(
    repo: &R,
    store: &mut EntityStore<Company>,
) -> ServiceResult<Option<CompanyId>>
where
    R: EntityWriter<Company> + ?Sized,
{
    let deleted = records::confirm_delete(repo, store).await?;
    if let Some(id) = deleted {
        log::info!("Deleted company {id}");
    }
    Ok(deleted)
}
