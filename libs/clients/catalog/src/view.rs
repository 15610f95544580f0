//! List helpers for item pages.

use domain_items::Item;
use std::ops::Range;

/// Items shown per page in the grid view
pub const PAGE_SIZE: usize = 10;

/// Above this many results the UI suggests the virtualized list
pub const LARGE_LIST_THRESHOLD: usize = 50;

pub const DEFAULT_ROW_HEIGHT: u32 = 100;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 400;
pub const DEFAULT_OVERSCAN: usize = 5;

/// One rendered page of the grid view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPage {
    pub items: Vec<Item>,
    /// Number of items matching the search term
    pub matched: usize,
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub large_list: bool,
}

/// Search and paging state for the item grid
///
/// Filtering runs over the mirrored items, not the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsView {
    search_term: String,
    current_page: usize,
}

impl Default for ItemsView {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemsView {
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            current_page: 1,
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Changing the term always goes back to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.current_page += 1;
    }

    pub fn prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Items whose name or category contains the term, ignoring case
    pub fn filter<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        if self.search_term.trim().is_empty() {
            return items.iter().collect();
        }
        let needle = self.search_term.to_lowercase();
        items
            .iter()
            .filter(|item| domain_items::query::matches(item, &needle))
            .collect()
    }

    pub fn total_pages(&self, items: &[Item]) -> usize {
        self.filter(items).len().div_ceil(PAGE_SIZE)
    }

    pub fn is_large_list(&self, items: &[Item]) -> bool {
        self.filter(items).len() > LARGE_LIST_THRESHOLD
    }

    /// Compute the visible page, first moving back to page 1 when the
    /// current page lies beyond the filtered results.
    pub fn render(&mut self, items: &[Item]) -> ViewPage {
        let filtered = self.filter(items);
        let total_pages = filtered.len().div_ceil(PAGE_SIZE);

        if self.current_page > total_pages && total_pages > 0 {
            self.current_page = 1;
        }

        let start = (self.current_page - 1).saturating_mul(PAGE_SIZE);
        let page_items = filtered
            .iter()
            .skip(start)
            .take(PAGE_SIZE)
            .map(|item| (*item).clone())
            .collect();

        ViewPage {
            items: page_items,
            matched: filtered.len(),
            page: self.current_page,
            total_pages,
            has_prev: self.current_page > 1,
            has_next: self.current_page < total_pages,
            large_list: filtered.len() > LARGE_LIST_THRESHOLD,
        }
    }
}

/// Fixed row height windowing for long lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualWindow {
    pub row_height: u32,
    pub viewport_height: u32,
    /// Extra rows rendered on each side of the visible range
    pub overscan: usize,
}

impl Default for VirtualWindow {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

impl VirtualWindow {
    pub fn with_viewport(viewport_height: u32) -> Self {
        Self {
            viewport_height,
            ..Default::default()
        }
    }

    /// Height of the scrollable content
    pub fn total_height(&self, item_count: usize) -> u64 {
        item_count as u64 * u64::from(self.row_height)
    }

    /// Top offset of a row
    pub fn row_offset(&self, index: usize) -> u64 {
        index as u64 * u64::from(self.row_height)
    }

    /// Rows to render for a scroll position, overscan included
    pub fn visible_range(&self, item_count: usize, scroll_offset: u32) -> Range<usize> {
        if item_count == 0 || self.row_height == 0 {
            return 0..0;
        }

        let row_height = u64::from(self.row_height);
        let last = item_count - 1;
        let offset = u64::from(scroll_offset).min(self.total_height(item_count));

        let start = ((offset / row_height) as usize).min(last);
        let visible_bottom = offset + u64::from(self.viewport_height);
        let remaining = visible_bottom.saturating_sub(self.row_offset(start));
        let visible_rows = remaining.div_ceil(row_height).max(1) as usize;
        let stop = (start + visible_rows - 1).min(last);

        start.saturating_sub(self.overscan)..(stop + self.overscan).min(last) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(n: i64) -> Vec<Item> {
        (1..=n)
            .map(|id| Item {
                id,
                name: format!("Item {}", id),
                category: if id % 2 == 0 { "Even" } else { "Odd" }.to_string(),
                price: id as f64,
            })
            .collect()
    }

    #[test]
    fn test_render_first_page() {
        let items = catalog(25);
        let mut view = ItemsView::new();

        let page = view.render(&items);

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].id, 1);
        assert_eq!(page.matched, 25);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_prev);
        assert!(page.has_next);
        assert!(!page.large_list);
    }

    #[test]
    fn test_render_last_partial_page() {
        let items = catalog(25);
        let mut view = ItemsView::new();
        view.set_page(3);

        let page = view.render(&items);

        let ids: Vec<i64> = page.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![21, 22, 23, 24, 25]);
        assert!(page.has_prev);
        assert!(!page.has_next);
    }

    #[test]
    fn test_search_resets_page() {
        let mut view = ItemsView::new();
        view.set_page(3);
        view.set_search("odd");
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_search_matches_name_and_category() {
        let items = catalog(25);
        let mut view = ItemsView::new();

        view.set_search("EVEN");
        assert_eq!(view.filter(&items).len(), 12);

        view.set_search("item 2");
        let ids: Vec<i64> = view.filter(&items).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 20, 21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_blank_search_shows_everything() {
        let items = catalog(5);
        let mut view = ItemsView::new();
        view.set_search("   ");
        assert_eq!(view.filter(&items).len(), 5);
    }

    #[test]
    fn test_page_beyond_results_resets_to_first() {
        let items = catalog(25);
        let mut view = ItemsView::new();
        view.set_page(3);
        view.render(&items);

        let fewer = catalog(8);
        let page = view.render(&fewer);

        assert_eq!(page.page, 1);
        assert_eq!(view.current_page(), 1);
        assert_eq!(page.items.len(), 8);
    }

    #[test]
    fn test_no_results_keeps_page() {
        let items = catalog(25);
        let mut view = ItemsView::new();
        view.set_search("nothing matches");
        view.set_page(2);

        let page = view.render(&items);

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn test_large_list_hint() {
        let mut view = ItemsView::new();
        assert!(!view.is_large_list(&catalog(50)));
        assert!(view.is_large_list(&catalog(51)));
        assert!(view.render(&catalog(51)).large_list);
    }

    #[test]
    fn test_prev_page_stops_at_one() {
        let mut view = ItemsView::new();
        view.prev_page();
        assert_eq!(view.current_page(), 1);
        view.next_page();
        view.next_page();
        view.prev_page();
        assert_eq!(view.current_page(), 2);
    }

    #[test]
    fn test_visible_range_at_top() {
        let window = VirtualWindow::default();
        assert_eq!(window.visible_range(100, 0), 0..9);
    }

    #[test]
    fn test_visible_range_scrolled() {
        let window = VirtualWindow::default();
        // rows 10..=13 visible, 5 overscan either side
        assert_eq!(window.visible_range(100, 1000), 5..19);
        // partially scrolled row stays in range
        assert_eq!(window.visible_range(100, 1050), 5..20);
    }

    #[test]
    fn test_visible_range_at_bottom() {
        let window = VirtualWindow::default();
        assert_eq!(window.visible_range(20, 1600), 11..20);
        assert_eq!(window.visible_range(20, u32::MAX), 14..20);
    }

    #[test]
    fn test_visible_range_short_and_empty_lists() {
        let window = VirtualWindow::with_viewport(600);
        assert_eq!(window.visible_range(3, 0), 0..3);
        assert_eq!(window.visible_range(0, 0), 0..0);
    }

    #[test]
    fn test_total_height() {
        let window = VirtualWindow::default();
        assert_eq!(window.total_height(25), 2500);
        assert_eq!(window.row_offset(3), 300);
    }
}
