//! Search and pagination over an in-memory item sequence.

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemPage, Pagination};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// A validated 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    /// Apply defaults and reject non-positive values.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> ItemResult<Self> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(ItemError::Validation(
                "page must be a positive integer".to_string(),
            ));
        }
        if page_size < 1 {
            return Err(ItemError::Validation(
                "limit must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            page: usize::try_from(page).unwrap_or(usize::MAX),
            page_size: usize::try_from(page_size).unwrap_or(usize::MAX),
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the first item of this page within the filtered sequence
    pub fn start_index(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE as usize,
            page_size: DEFAULT_PAGE_SIZE as usize,
        }
    }
}

/// Normalize a search term; blank terms mean "no filter".
fn normalize_term(term: Option<&str>) -> Option<String> {
    let term = term?.trim().to_lowercase();
    (!term.is_empty()).then_some(term)
}

/// Whether `item` matches an already lowercased needle
pub fn matches(item: &Item, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle) || item.category.to_lowercase().contains(needle)
}

/// Keep items whose name or category contains `term`, ignoring case.
pub fn search(items: Vec<Item>, term: Option<&str>) -> Vec<Item> {
    match normalize_term(term) {
        Some(needle) => items
            .into_iter()
            .filter(|item| matches(item, &needle))
            .collect(),
        None => items,
    }
}

/// Slice one page out of an already filtered sequence.
pub fn paginate(items: Vec<Item>, request: PageRequest) -> ItemPage {
    let total = items.len();
    let start = request.start_index();
    let end = start.saturating_add(request.page_size);

    let items: Vec<Item> = items
        .into_iter()
        .skip(start)
        .take(request.page_size)
        .collect();

    ItemPage {
        items,
        pagination: Pagination {
            total,
            page: request.page,
            page_size: request.page_size,
            total_pages: total.div_ceil(request.page_size),
            has_next: end < total,
            // Reports "is there a lower page number", also past the last page
            has_prev: request.page > 1,
        },
    }
}

/// Search then paginate.
pub fn find(items: Vec<Item>, term: Option<&str>, request: PageRequest) -> ItemPage {
    paginate(search(items, term), request)
}
