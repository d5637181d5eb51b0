//! Domain aggregates exposed by the CRM client core.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::domain::filter::RecordFilter;

pub mod activity;
pub mod company;
pub mod contact;
pub mod deal;
pub mod filter;
pub mod task;
pub mod types;

/// A backend-persisted record kind managed by an entity store.
///
/// `Draft` is the payload of a create call, `Changes` the partial payload of
/// an update call and `Filter` the list criteria understood by both the
/// gateway and the in-memory search engine.
pub trait Entity: Clone + Debug + PartialEq + Send + Sync + 'static {
    type Id: Copy + Debug + Display + Eq + Hash + Send + Sync + 'static;
    type Draft: Clone + Debug + Send + Sync + 'static;
    type Changes: Clone + Debug + Default + Send + Sync + 'static;
    type Filter: RecordFilter<Self> + Clone + Debug + Default + PartialEq + Send + Sync + 'static;

    /// Singular, capitalized name used in user-facing messages.
    const LABEL: &'static str;

    /// Lowercase plural used in list messages.
    const PLURAL: &'static str;

    fn id(&self) -> Self::Id;

    /// Name shown in lists and notifications.
    fn display_name(&self) -> String;
}

/// Fields a record exposes to the free-text search.
pub trait Searchable {
    /// Values matched against the search term; `None` never matches.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Reorders a filtered projection for display. Defaults to the gateway order.
    fn display_order(_items: &mut [Self])
    where
        Self: Sized,
    {
    }
}
