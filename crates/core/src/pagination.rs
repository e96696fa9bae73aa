//! Client-side pagination over fully fetched lists.
//!
//! The backend returns whole collections; pages are slices of them. Every
//! page number handed out is within `[1, total_pages]`.

use serde::{Deserialize, Serialize};

/// Default number of cards per page on public listings.
pub const DEFAULT_PER_PAGE: usize = 12;

/// Upper bound on the page size a caller may request.
pub const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total_items: usize,
    per_page: usize,
}

impl Paginator {
    pub fn new(total_items: usize, per_page: usize) -> Self {
        Self {
            total_items,
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages; an empty list still has one (empty) page.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page).max(1)
    }

    pub fn clamp_page(&self, requested: usize) -> usize {
        requested.clamp(1, self.total_pages())
    }

    pub fn next(&self, page: usize) -> usize {
        self.clamp_page(page.saturating_add(1))
    }

    pub fn prev(&self, page: usize) -> usize {
        self.clamp_page(page.saturating_sub(1))
    }

    /// Index range of `page` (clamped) within the full list.
    pub fn range(&self, page: usize) -> std::ops::Range<usize> {
        let page = self.clamp_page(page);
        let start = ((page - 1) * self.per_page).min(self.total_items);
        let end = (start + self.per_page).min(self.total_items);
        start..end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice `items` down to the requested page.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let paginator = Paginator::new(items.len(), per_page);
    let page = paginator.clamp_page(page);
    let range = paginator.range(page);
    let total_items = items.len();

    let items = items
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect();

    Page {
        items,
        page,
        per_page: paginator.per_page(),
        total_pages: paginator.total_pages(),
        total_items,
    }
}

/// Pagination parameters (`?page=&per_page=`).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl PageParams {
    pub fn apply<T>(&self, items: Vec<T>) -> Page<T> {
        paginate(
            items,
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}
