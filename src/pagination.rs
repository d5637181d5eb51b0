use serde::Serialize;

/// Rows per page on the paged list views.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Number of pages needed to show `total` rows.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Builds the pager links, `None` marking an elided gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of a filtered list plus what the pager needs to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
    /// Number of rows across all pages.
    pub total: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize, total: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
            total,
        }
    }

    /// 1-based index range of the rows on this page, `None` when empty.
    pub fn showing(&self, per_page: usize) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page - 1) * per_page + 1;
        Some((first, first + self.items.len() - 1))
    }
}

impl<T: Clone> Paginated<T> {
    /// Slices page `page` (1-based) out of `items`. Out-of-range pages are clamped.
    pub fn from_slice(items: &[T], page: usize, per_page: usize) -> Self {
        let total = items.len();
        let total_pages = page_count(total, per_page);
        let page = page.clamp(1, total_pages.max(1));

        let start = (page - 1).saturating_mul(per_page).min(total);
        let end = start.saturating_add(per_page).min(total);

        Self::new(items[start..end].to_vec(), page, total_pages, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn pages_concatenate_to_the_original_list() {
        for total in [0usize, 1, 9, 10, 11, 25, 40] {
            let items: Vec<usize> = (0..total).collect();
            let pages = page_count(total, 10);

            let rebuilt: Vec<usize> = (1..=pages)
                .flat_map(|n| Paginated::from_slice(&items, n, 10).items)
                .collect();

            assert_eq!(rebuilt, items, "total = {total}");
        }
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let items: Vec<u8> = (0..15).collect();

        let last = Paginated::from_slice(&items, 9, 10);
        assert_eq!(last.page, 2);
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.showing(10), Some((11, 15)));

        let first = Paginated::from_slice(&items, 0, 10);
        assert_eq!(first.page, 1);
        assert_eq!(first.showing(10), Some((1, 10)));

        let empty = Paginated::from_slice(&Vec::<u8>::new(), 3, 10);
        assert_eq!(empty.page, 1);
        assert!(empty.pages.is_empty());
        assert_eq!(empty.showing(10), None);
    }

    #[test]
    fn pager_elides_distant_pages() {
        let pages = get_pages(20, 10, 2, 2, 4, 2);
        assert_eq!(
            pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }
}
