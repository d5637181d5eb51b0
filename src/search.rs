//! In-memory filter and search over a loaded collection.
//!
//! The projection is recomputed from scratch on every call and never stored.

use crate::domain::Searchable;
use crate::domain::filter::RecordFilter;

/// Case-insensitive substring match against any of the record's search fields.
pub fn matches_search<E: Searchable>(item: &E, term: &str) -> bool {
    let needle = term.to_lowercase();
    item.search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Returns the records matching `filter`, ordered for display.
pub fn apply_filter<E, F>(items: &[E], filter: &F) -> Vec<E>
where
    E: Searchable + Clone,
    F: RecordFilter<E> + ?Sized,
{
    let term = filter.search_term();

    let mut result: Vec<E> = items
        .iter()
        .filter(|item| term.is_none_or(|term| matches_search(*item, term)))
        .filter(|item| filter.matches_categories(item))
        .cloned()
        .collect();

    E::display_order(&mut result);
    result
}
