use std::ops::Range;

pub const PAGE_SIZE: usize = 8;
pub const MAX_PAGE_BUTTONS: usize = 5;

/// Number of pages needed for `total` items. Zero items means zero pages.
pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// Pagination controls are only shown when there is more than one page worth of items.
pub fn controls_visible(total: usize) -> bool {
    total > PAGE_SIZE
}

/// Zero-based item range shown on `page` (1-indexed), clamped to `total`.
pub fn page_window(page: usize, total: usize) -> Range<usize> {
    let page = page.max(1);
    let start = (PAGE_SIZE * (page - 1)).min(total);
    let end = (PAGE_SIZE * page).min(total);
    start..end
}

/// Sliding strip of page numbers around `page`, at most five wide.
///
/// Near the start the strip is pinned to `1..=5`, near the end to the last five
/// pages, and in between it keeps `page` centered.
pub fn page_buttons(page: usize, total: usize) -> Vec<usize> {
    let count = page_count(total);
    if count == 0 {
        return Vec::new();
    }
    let (first, last) = if page < 3 {
        (1, MAX_PAGE_BUTTONS.min(count))
    } else if page + 3 > count {
        (count.saturating_sub(MAX_PAGE_BUTTONS - 1).max(1), count)
    } else {
        (page - 2, page + 2)
    };
    (first..=last).collect()
}

/// Previous page, or `page` unchanged on the first page.
pub fn prev_page(page: usize) -> usize {
    if page > 1 { page - 1 } else { page }
}

/// Next page. Compares against the un-ceiled `total / PAGE_SIZE` quotient, so with a
/// partial last page Next stops one page early; the last page stays reachable
/// through the button strip.
pub fn next_page(page: usize, total: usize) -> usize {
    if page < total / PAGE_SIZE { page + 1 } else { page }
}

/// Clamp `page` into `1..=max(1, page_count(total))`.
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, page_count(total).max(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub current: usize,
    pub total: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    pub fn new() -> Self {
        Self {
            current: 1,
            total: 0,
        }
    }

    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.current = clamp_page(self.current, total);
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total)
    }

    pub fn window(&self) -> Range<usize> {
        page_window(self.current, self.total)
    }

    pub fn buttons(&self) -> Vec<usize> {
        page_buttons(self.current, self.total)
    }

    pub fn controls_visible(&self) -> bool {
        controls_visible(self.total)
    }

    pub fn prev(&mut self) {
        self.current = prev_page(self.current);
    }

    pub fn next(&mut self) {
        self.current = next_page(self.current, self.total);
    }

    /// Jump to a page from the button strip. Pages outside the strip are ignored.
    pub fn go_to(&mut self, page: usize) -> bool {
        if self.buttons().contains(&page) {
            self.current = page;
            true
        } else {
            false
        }
    }
}
