use crate::domain::{Entity, Searchable};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated, page_count};
use crate::search::apply_filter;
use crate::store::EntityStore;

/// Filter and page selection of a list page over an [`EntityStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<E: Entity> {
    filter: E::Filter,
    page: usize,
    per_page: usize,
}

impl<E: Entity + Searchable> Default for ListView<E> {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl<E: Entity + Searchable> ListView<E> {
    pub fn new(per_page: usize) -> Self {
        Self {
            filter: E::Filter::default(),
            page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn filter(&self) -> &E::Filter {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Replaces the criteria and goes back to the first page.
    pub fn set_filter(&mut self, filter: E::Filter) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn update_filter(&mut self, change: impl FnOnce(E::Filter) -> E::Filter) {
        let current = std::mem::take(&mut self.filter);
        self.set_filter(change(current));
    }

    pub fn reset(&mut self) {
        self.set_filter(E::Filter::default());
    }

    /// Moves to `page`, clamped to the pages `store` currently yields.
    pub fn go_to(&mut self, store: &EntityStore<E>, page: usize) -> usize {
        let total_pages = page_count(self.filtered(store).len(), self.per_page);
        self.page = page.clamp(1, total_pages.max(1));
        self.page
    }

    pub fn filtered(&self, store: &EntityStore<E>) -> Vec<E> {
        apply_filter(store.items(), &self.filter)
    }

    /// Current page of the filtered projection.
    pub fn visible(&self, store: &EntityStore<E>) -> Paginated<E> {
        Paginated::from_slice(&self.filtered(store), self.page, self.per_page)
    }
}
